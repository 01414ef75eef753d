//! OpenAI Whisper transcription client.

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, error, instrument};
use wayfarer_error::{HttpError, UpstreamError, WayfarerResult};
use wayfarer_interface::{AudioClip, TranscribeOptions};

const TRANSCRIPTIONS_URL: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Default transcription model.
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-1";

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// OpenAI Whisper transcription client.
#[derive(Debug, Clone)]
pub struct WhisperClient {
    client: Client,
    api_key: String,
    model: String,
}

impl WhisperClient {
    /// Creates a new Whisper client.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_TRANSCRIPTION_MODEL.to_string(),
        }
    }

    /// Transcribe a recorded utterance to text.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` on any non-success status.
    #[instrument(skip(self, clip), fields(size = clip.data.len(), language = %opts.language))]
    pub async fn transcribe(
        &self,
        clip: &AudioClip,
        opts: &TranscribeOptions,
    ) -> WayfarerResult<String> {
        let file_name = match clip.mime.as_str() {
            "audio/mpeg" => "audio.mp3",
            "audio/wav" => "audio.wav",
            _ => "audio.webm",
        };

        let part = Part::bytes(clip.data.clone())
            .file_name(file_name)
            .mime_str(&clip.mime)
            .map_err(|e| HttpError::new(format!("Invalid audio MIME type: {}", e)))?;

        let form = Form::new()
            .part("file", part)
            .text("model", self.model.clone())
            .text("language", opts.language.clone());

        let response = self
            .client
            .post(TRANSCRIPTIONS_URL)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send transcription request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "Transcription API returned error");
            return Err(UpstreamError::new(status, body).into());
        }

        let parsed: TranscriptionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse transcription response");
            HttpError::new(format!("Failed to parse response: {}", e))
        })?;

        let text = parsed.text.unwrap_or_default().trim().to_string();
        debug!(transcript_len = text.len(), "Received transcription");
        Ok(text)
    }
}
