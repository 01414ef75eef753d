//! Concrete adapter implementations for the Wayfarer installation engine.
//!
//! Every external collaborator the conversation core talks to has its
//! HTTP client here:
//!
//! - [`OpenAiChatClient`] — narrative model (chat completions)
//! - [`WhisperClient`] / [`SpooledCapture`] — speech transcription and
//!   utterance intake
//! - [`OpenAiImageClient`] — summary image generation
//! - [`ElevenLabsClient`] — voice synthesis
//! - [`CloudinaryStore`] — image upload before email dispatch
//! - [`EmailJsMailer`] — email dispatch
//! - [`EnvCredentials`] — environment-backed credential source
//! - [`StoredAudioSink`] — headless playback stand-in persisting clips

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod capture;
mod cloudinary;
mod credentials;
mod elevenlabs;
mod emailjs;
mod openai;
mod playback;

pub use capture::SpooledCapture;
pub use cloudinary::CloudinaryStore;
pub use credentials::EnvCredentials;
pub use elevenlabs::ElevenLabsClient;
pub use emailjs::EmailJsMailer;
pub use openai::{OpenAiChatClient, OpenAiImageClient, WhisperClient};
pub use playback::StoredAudioSink;
