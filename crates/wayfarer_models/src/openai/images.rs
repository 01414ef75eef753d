//! OpenAI image generation client.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};
use wayfarer_error::{HttpError, UpstreamError, WayfarerResult};
use wayfarer_interface::{GeneratedImage, ImageGenerator, ImageOptions};

const IMAGE_GENERATIONS_URL: &str = "https://api.openai.com/v1/images/generations";

/// Default image model.
pub const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageItem>,
}

#[derive(Debug, Deserialize)]
struct ImageItem {
    b64_json: Option<String>,
    url: Option<String>,
}

/// OpenAI image generation client.
#[derive(Debug, Clone)]
pub struct OpenAiImageClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiImageClient {
    /// Creates a new image client for the default model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_IMAGE_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImageClient {
    #[instrument(skip(self, prompt), fields(provider = "openai", model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str, opts: &ImageOptions) -> WayfarerResult<GeneratedImage> {
        let body = ImageRequest {
            model: &self.model,
            prompt,
            size: &opts.size,
            quality: &opts.quality,
        };

        let response = self
            .client
            .post(IMAGE_GENERATIONS_URL)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send image generation request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "Image API returned error");
            return Err(UpstreamError::new(status, body).into());
        }

        let parsed: ImageResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse image generation response");
            HttpError::new(format!("Failed to parse response: {}", e))
        })?;

        let item = parsed
            .data
            .into_iter()
            .next()
            .ok_or_else(|| HttpError::new("Image API returned no image"))?;

        if let Some(b64) = item.b64_json {
            let bytes = BASE64
                .decode(b64.as_bytes())
                .map_err(|e| HttpError::new(format!("Invalid base64 image payload: {}", e)))?;
            debug!(size = bytes.len(), "Received generated image bytes");
            return Ok(GeneratedImage::Bytes(bytes));
        }

        // URL payloads are resolved to bytes here so downstream persistence
        // never depends on the payload shape
        if let Some(url) = item.url {
            debug!(url = %url, "Received generated image URL, fetching bytes");
            let bytes = self.fetch_url(&url).await?;
            return Ok(GeneratedImage::Bytes(bytes));
        }

        Err(HttpError::new("Image API returned neither bytes nor URL").into())
    }
}

impl OpenAiImageClient {
    /// Fetch the image bytes behind a URL payload.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` on any non-success status.
    #[instrument(skip(self))]
    pub async fn fetch_url(&self, url: &str) -> WayfarerResult<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HttpError::new(format!("Image fetch failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::new(status, body).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Image body read failed: {}", e)))?;
        Ok(bytes.to_vec())
    }
}
