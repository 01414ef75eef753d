//! Option and payload types shared by the adapter traits.

use serde::{Deserialize, Serialize};

/// A chunk of encoded audio with its MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioClip {
    /// MIME type, e.g. "audio/webm" or "audio/mpeg"
    pub mime: String,
    /// Encoded audio bytes
    pub data: Vec<u8>,
}

impl AudioClip {
    /// Create a clip from a MIME type and raw bytes.
    pub fn new(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            data,
        }
    }
}

/// Bounds for recording a single user utterance.
///
/// Recording stops on whichever comes first: the max duration elapsing, or
/// continuous silence sustained for the silence timeout.
///
/// # Examples
///
/// ```
/// use wayfarer_interface::CaptureOptions;
///
/// let opts = CaptureOptions::builder()
///     .max_duration_ms(10_000u64)
///     .silence_timeout_ms(1_500u64)
///     .build()
///     .unwrap();
/// assert_eq!(opts.max_duration_ms, 10_000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
pub struct CaptureOptions {
    /// Hard cap on recording length, in milliseconds
    #[builder(default = "20_000")]
    pub max_duration_ms: u64,
    /// Continuous-silence cutoff, in milliseconds
    #[builder(default = "2_000")]
    pub silence_timeout_ms: u64,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            max_duration_ms: 20_000,
            silence_timeout_ms: 2_000,
        }
    }
}

impl CaptureOptions {
    /// Start building capture options.
    pub fn builder() -> CaptureOptionsBuilder {
        CaptureOptionsBuilder::default()
    }
}

/// Options for transcribing a captured utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscribeOptions {
    /// ISO language hint, e.g. "pt"
    pub language: String,
}

impl Default for TranscribeOptions {
    fn default() -> Self {
        Self {
            language: "pt".to_string(),
        }
    }
}

/// Voice synthesis tuning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct SynthesisOptions {
    /// Provider voice identifier
    #[builder(default)]
    pub voice_id: String,
    /// Voice stability (0.0 to 1.0)
    #[builder(default = "0.8")]
    pub stability: f32,
    /// Similarity boost (0.0 to 1.0)
    #[builder(default = "0.8")]
    pub similarity_boost: f32,
    /// Style exaggeration (0.0 to 1.0)
    #[builder(default = "0.2")]
    pub style: f32,
    /// Enable speaker boost
    #[builder(default = "true")]
    pub use_speaker_boost: bool,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            voice_id: String::new(),
            stability: 0.8,
            similarity_boost: 0.8,
            style: 0.2,
            use_speaker_boost: true,
        }
    }
}

impl SynthesisOptions {
    /// Start building synthesis options.
    pub fn builder() -> SynthesisOptionsBuilder {
        SynthesisOptionsBuilder::default()
    }
}

/// Image generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct ImageOptions {
    /// Output size, e.g. "1536x1024"
    #[builder(default = "\"1536x1024\".to_string()")]
    pub size: String,
    /// Output quality, e.g. "high"
    #[builder(default = "\"high\".to_string()")]
    pub quality: String,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            size: "1536x1024".to_string(),
            quality: "high".to_string(),
        }
    }
}

impl ImageOptions {
    /// Start building image options.
    pub fn builder() -> ImageOptionsBuilder {
        ImageOptionsBuilder::default()
    }
}

/// A generated image, either as raw bytes or a URL to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedImage {
    /// Decoded image bytes (PNG unless stated otherwise)
    Bytes(Vec<u8>),
    /// URL where the image can be retrieved
    Url(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_builder_defaults_match_default_impl() {
        let built = CaptureOptions::builder().build().unwrap();
        assert_eq!(built, CaptureOptions::default());
    }

    #[test]
    fn synthesis_builder_defaults_match_default_impl() {
        let built = SynthesisOptions::builder().build().unwrap();
        assert_eq!(built, SynthesisOptions::default());
    }

    #[test]
    fn image_builder_defaults_match_default_impl() {
        let built = ImageOptions::builder().build().unwrap();
        assert_eq!(built, ImageOptions::default());
    }
}
