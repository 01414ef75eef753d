//! Error types for the Wayfarer installation engine.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use wayfarer_error::{WayfarerResult, UpstreamError};
//!
//! fn call_model() -> WayfarerResult<String> {
//!     Err(UpstreamError::new(503, "model overloaded"))?
//! }
//!
//! match call_model() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod finalize;
mod http;
mod json;
mod session;
mod storage;
mod upstream;
mod voice;

pub use builder::BuilderError;
pub use config::ConfigError;
pub use error::{WayfarerError, WayfarerErrorKind, WayfarerResult};
pub use finalize::{FinalizationError, FinalizationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use session::{SessionError, SessionErrorKind};
pub use storage::{StorageError, StorageErrorKind};
pub use upstream::UpstreamError;
pub use voice::{CaptureError, PlaybackError};
