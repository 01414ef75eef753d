//! Session configuration.

use serde::{Deserialize, Serialize};
use wayfarer_interface::{CaptureOptions, ImageOptions, SynthesisOptions, TranscribeOptions};

/// Tunable parameters for one installation session.
///
/// # Examples
///
/// ```
/// use wayfarer_session::SessionConfig;
///
/// let config = SessionConfig::builder()
///     .language("French")
///     .build()
///     .unwrap();
/// assert_eq!(config.language, "French");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SessionConfig {
    /// Spoken language the model must always reply in
    #[builder(default = "\"Brazilian Portuguese\".to_string()")]
    pub language: String,
    /// Options for transcribing captured utterances
    #[builder(default)]
    pub transcription: TranscribeOptions,
    /// Bounds for recording one answer inside the stage loop
    #[builder(default = "CaptureOptions { max_duration_ms: 10_000, silence_timeout_ms: 1_500 }")]
    pub capture: CaptureOptions,
    /// Voice synthesis tuning
    #[builder(default)]
    pub synthesis: SynthesisOptions,
    /// Summary image parameters
    #[builder(default)]
    pub image: ImageOptions,
    /// Sampling temperature for the intro narration
    #[builder(default = "0.6")]
    pub intro_temperature: f32,
    /// Sampling temperature for stage generation
    #[builder(default = "0.7")]
    pub stage_temperature: f32,
    /// Sampling temperature for the timeline summary
    #[builder(default = "0.5")]
    pub timeline_temperature: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: "Brazilian Portuguese".to_string(),
            transcription: TranscribeOptions::default(),
            capture: CaptureOptions {
                max_duration_ms: 10_000,
                silence_timeout_ms: 1_500,
            },
            synthesis: SynthesisOptions::default(),
            image: ImageOptions::default(),
            intro_temperature: 0.6,
            stage_temperature: 0.7,
            timeline_temperature: 0.5,
        }
    }
}

impl SessionConfig {
    /// Start building a config.
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::default()
    }
}
