//! Request and response types for narrative model generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Generation request sent to a narrative model driver.
///
/// # Examples
///
/// ```
/// use wayfarer_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .messages(vec![Message::user("Hello!")])
///     .temperature(Some(0.7))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 1);
/// ```
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(default)]
pub struct GenerateRequest {
    /// The prompt messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier override
    pub model: Option<String>,
}

impl GenerateRequest {
    /// Start building a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// The unified response object.
///
/// The narrative model contract is free-form text continuing the story;
/// multimodal outputs live behind their own adapters.
///
/// # Examples
///
/// ```
/// use wayfarer_core::GenerateResponse;
///
/// let response = GenerateResponse {
///     text: "Hello! How can I help?".to_string(),
/// };
///
/// assert!(!response.text.is_empty());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default, derive_builder::Builder,
)]
#[builder(setter(into), default)]
pub struct GenerateResponse {
    /// The generated text
    pub text: String,
}

impl GenerateResponse {
    /// Start building a response.
    pub fn builder() -> GenerateResponseBuilder {
        GenerateResponseBuilder::default()
    }
}
