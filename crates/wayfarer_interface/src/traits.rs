//! Trait definitions for external collaborators.

use crate::{
    AudioClip, CaptureOptions, GeneratedImage, ImageOptions, SynthesisOptions, TranscribeOptions,
};
use async_trait::async_trait;
use wayfarer_core::{GenerateRequest, GenerateResponse};
use wayfarer_error::WayfarerResult;

/// Core trait for narrative model backends.
///
/// Given a structured prompt, returns free-form text continuing the story.
/// Implementations fail with `UpstreamError` on non-success status; the
/// core never retries automatically.
#[async_trait]
pub trait NarrativeDriver: Send + Sync {
    /// Generate model output for the given prompt.
    async fn generate(&self, req: &GenerateRequest) -> WayfarerResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o-mini").
    fn model_name(&self) -> &str;
}

/// Speech input: record one user utterance and transcribe it.
#[async_trait]
pub trait SpeechCapture: Send + Sync {
    /// Record a single utterance bounded by max duration and silence timeout.
    async fn record_utterance(&self, opts: &CaptureOptions) -> WayfarerResult<AudioClip>;

    /// Transcribe a recorded utterance to text.
    async fn transcribe(&self, clip: &AudioClip, opts: &TranscribeOptions)
    -> WayfarerResult<String>;
}

/// Voice synthesis: turn text into playable audio.
#[async_trait]
pub trait VoiceSynthesizer: Send + Sync {
    /// Synthesize speech for the given text.
    async fn synthesize(&self, text: &str, opts: &SynthesisOptions) -> WayfarerResult<AudioClip>;
}

/// Audio output: play a clip to completion.
///
/// The loop controller treats playback failures as non-fatal; sinks should
/// still report them so they can be logged.
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Play the clip, returning once playback finishes.
    async fn play(&self, clip: &AudioClip) -> WayfarerResult<()>;
}

/// Image generation from a text prompt.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate a single image for the prompt.
    async fn generate(&self, prompt: &str, opts: &ImageOptions) -> WayfarerResult<GeneratedImage>;
}

/// External image store used before email dispatch.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload image bytes, returning a retrievable URL.
    async fn upload(&self, image: &[u8]) -> WayfarerResult<String>;
}

/// Email dispatch for the final summary image.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email containing the image URL to the recipient.
    async fn send_image(&self, to: &str, image_url: &str) -> WayfarerResult<()>;
}

/// Read-only credential lookup.
///
/// Values may be empty until the underlying source is populated; callers
/// either await [`CredentialSource::ready`] or poll with a bounded wait
/// before giving up and letting the first real request fail explicitly.
#[async_trait]
pub trait CredentialSource: Send + Sync {
    /// Look up a credential by name; empty string if unset.
    fn get(&self, name: &str) -> String;

    /// Resolves once the source has been populated.
    async fn ready(&self);
}
