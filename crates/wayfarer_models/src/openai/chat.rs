//! OpenAI chat completions client implementing the narrative model driver.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use wayfarer_core::{GenerateRequest, GenerateResponse, Role};
use wayfarer_error::{HttpError, UpstreamError, WayfarerResult};
use wayfarer_interface::NarrativeDriver;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Default narrative model.
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// OpenAI chat completions client.
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiChatClient {
    /// Creates a new client for the default narrative model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_model(api_key, DEFAULT_CHAT_MODEL)
    }

    /// Creates a new client with an explicit model identifier.
    pub fn with_model(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let model = model.into();
        debug!(model = %model, "Creating new OpenAI chat client");
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    fn convert_request(&self, request: &GenerateRequest) -> ChatRequest {
        let messages = request
            .messages
            .iter()
            .map(|msg| ChatMessage {
                role: match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: msg.content.clone(),
            })
            .collect();

        ChatRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        }
    }
}

#[async_trait]
impl NarrativeDriver for OpenAiChatClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> WayfarerResult<GenerateResponse> {
        let body = self.convert_request(request);

        let response = self
            .client
            .post(CHAT_COMPLETIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send chat completion request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "Chat API returned error");
            return Err(UpstreamError::new(status, body).into());
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse chat completion response");
            HttpError::new(format!("Failed to parse response: {}", e))
        })?;

        let text = parsed
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        debug!(response_len = text.len(), "Received chat completion");
        Ok(GenerateResponse { text })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
