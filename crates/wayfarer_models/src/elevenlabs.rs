//! ElevenLabs text-to-speech client.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error, instrument};
use wayfarer_error::{HttpError, UpstreamError, WayfarerResult};
use wayfarer_interface::{AudioClip, SynthesisOptions, VoiceSynthesizer};

const TTS_URL_BASE: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// Default synthesis model.
pub const DEFAULT_TTS_MODEL: &str = "eleven_multilingual_v2";

#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
    style: f32,
    use_speaker_boost: bool,
}

/// ElevenLabs text-to-speech client.
#[derive(Debug, Clone)]
pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    model: String,
}

impl ElevenLabsClient {
    /// Creates a new client for the default multilingual model.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_TTS_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl VoiceSynthesizer for ElevenLabsClient {
    #[instrument(skip(self, text), fields(provider = "elevenlabs", voice = %opts.voice_id, text_len = text.len()))]
    async fn synthesize(&self, text: &str, opts: &SynthesisOptions) -> WayfarerResult<AudioClip> {
        let url = format!("{}/{}", TTS_URL_BASE, opts.voice_id);
        let body = TtsRequest {
            text,
            model_id: &self.model,
            voice_settings: VoiceSettings {
                stability: opts.stability,
                similarity_boost: opts.similarity_boost,
                style: opts.style,
                use_speaker_boost: opts.use_speaker_boost,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send synthesis request");
                HttpError::new(format!("Request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "ElevenLabs API returned error");
            return Err(UpstreamError::new(status, body).into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("Audio body read failed: {}", e)))?;

        debug!(size = bytes.len(), "Received synthesized audio");
        Ok(AudioClip::new("audio/mpeg", bytes.to_vec()))
    }
}
