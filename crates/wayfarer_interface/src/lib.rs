//! Adapter trait definitions for the Wayfarer installation engine.
//!
//! The conversation core treats every external collaborator — narrative
//! model, speech capture/transcription, voice synthesis, audio output,
//! image generation, upload, email, credentials — as a black box behind
//! one of these traits. Concrete HTTP implementations live in
//! `wayfarer_models`; scripted implementations live in tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{
    AudioSink, CredentialSource, ImageGenerator, ImageStore, Mailer, NarrativeDriver,
    SpeechCapture, VoiceSynthesizer,
};
pub use types::{
    AudioClip, CaptureOptions, CaptureOptionsBuilder, GeneratedImage, ImageOptions,
    ImageOptionsBuilder, SynthesisOptions, SynthesisOptionsBuilder, TranscribeOptions,
};
