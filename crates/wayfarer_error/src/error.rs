//! Top-level error wrapper types.

use crate::{
    BuilderError, CaptureError, ConfigError, FinalizationError, HttpError, JsonError,
    PlaybackError, SessionError, StorageError, UpstreamError,
};

/// The foundation error enum collecting every failure domain in the
/// workspace.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum WayfarerErrorKind {
    /// HTTP transport error
    #[from(HttpError)]
    Http(HttpError),
    /// Upstream service returned a non-success status
    #[from(UpstreamError)]
    Upstream(UpstreamError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// Session state error
    #[from(SessionError)]
    Session(SessionError),
    /// Speech capture/transcription error
    #[from(CaptureError)]
    Capture(CaptureError),
    /// Audio synthesis/playback error
    #[from(PlaybackError)]
    Playback(PlaybackError),
    /// Finalization error
    #[from(FinalizationError)]
    Finalization(FinalizationError),
    /// Artifact storage error
    #[from(StorageError)]
    Storage(StorageError),
}

/// Wayfarer error with kind discrimination.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{WayfarerError, WayfarerResult, ConfigError};
///
/// fn might_fail() -> WayfarerResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Wayfarer Error: {}", _0)]
pub struct WayfarerError(Box<WayfarerErrorKind>);

impl WayfarerError {
    /// Create a new error from a kind.
    pub fn new(kind: WayfarerErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &WayfarerErrorKind {
        &self.0
    }

    /// True when the error is an upstream non-success status.
    pub fn is_upstream(&self) -> bool {
        matches!(*self.0, WayfarerErrorKind::Upstream(_))
    }
}

// Generic From implementation for any type that converts to WayfarerErrorKind
impl<T> From<T> for WayfarerError
where
    T: Into<WayfarerErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Wayfarer operations.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{WayfarerResult, UpstreamError};
///
/// fn fetch_data() -> WayfarerResult<String> {
///     Err(UpstreamError::new(404, "Not Found"))?
/// }
/// ```
pub type WayfarerResult<T> = std::result::Result<T, WayfarerError>;
