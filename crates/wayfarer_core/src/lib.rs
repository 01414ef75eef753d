//! Core data types for the Wayfarer installation engine.
//!
//! This crate provides the foundation data types shared by the narrative
//! model adapters and the conversation engine.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod request;
mod role;

pub use message::{Message, MessageBuilder};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
