//! Scripted mock adapters for session tests.

// Each integration test binary uses its own subset of these helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use wayfarer_core::{GenerateRequest, GenerateResponse};
use wayfarer_error::{CaptureError, PlaybackError, UpstreamError, WayfarerResult};
use wayfarer_interface::{
    AudioClip, AudioSink, CaptureOptions, GeneratedImage, ImageGenerator, ImageOptions,
    ImageStore, Mailer, NarrativeDriver, SpeechCapture, SynthesisOptions, TranscribeOptions,
    VoiceSynthesizer,
};

/// One scripted driver reply.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Failure { status: u16, body: String },
}

/// Narrative driver replaying a script.
pub struct ScriptedDriver {
    responses: Mutex<VecDeque<MockResponse>>,
    fallback: Option<String>,
    calls: AtomicUsize,
}

impl ScriptedDriver {
    /// Always returns the same text.
    pub fn repeating(text: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            fallback: Some(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Pops scripted responses in order; exhaustion is a scripted 500.
    pub fn sequence(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            fallback: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NarrativeDriver for ScriptedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> WayfarerResult<GenerateResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Success(text)) => Ok(GenerateResponse { text }),
            Some(MockResponse::Failure { status, body }) => {
                Err(UpstreamError::new(status, body).into())
            }
            None => match &self.fallback {
                Some(text) => Ok(GenerateResponse { text: text.clone() }),
                None => Err(UpstreamError::new(500, "script exhausted").into()),
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

/// Synthesizer returning a tiny clip for any text.
pub struct MockSynthesizer;

#[async_trait]
impl VoiceSynthesizer for MockSynthesizer {
    async fn synthesize(&self, _text: &str, _opts: &SynthesisOptions) -> WayfarerResult<AudioClip> {
        Ok(AudioClip::new("audio/mpeg", vec![0x4d, 0x50, 0x33]))
    }
}

/// Synthesizer that always fails; playback failures must be swallowed.
pub struct FailingSynthesizer;

#[async_trait]
impl VoiceSynthesizer for FailingSynthesizer {
    async fn synthesize(&self, _text: &str, _opts: &SynthesisOptions) -> WayfarerResult<AudioClip> {
        Err(PlaybackError::new("synthesis unavailable").into())
    }
}

/// Sink counting how many clips were played.
pub struct CountingSink {
    plays: Arc<AtomicUsize>,
}

impl CountingSink {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let plays = Arc::new(AtomicUsize::new(0));
        (
            Self {
                plays: plays.clone(),
            },
            plays,
        )
    }
}

#[async_trait]
impl AudioSink for CountingSink {
    async fn play(&self, _clip: &AudioClip) -> WayfarerResult<()> {
        self.plays.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Capture replaying scripted answers.
pub struct ScriptedCapture {
    answers: Mutex<VecDeque<String>>,
}

impl ScriptedCapture {
    pub fn new(answers: Vec<&str>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().map(String::from).collect()),
        }
    }
}

#[async_trait]
impl SpeechCapture for ScriptedCapture {
    async fn record_utterance(&self, _opts: &CaptureOptions) -> WayfarerResult<AudioClip> {
        Ok(AudioClip::new("audio/webm", vec![1, 2, 3]))
    }

    async fn transcribe(
        &self,
        _clip: &AudioClip,
        _opts: &TranscribeOptions,
    ) -> WayfarerResult<String> {
        Ok(self.answers.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Capture whose recording step always throws.
pub struct FailingCapture;

#[async_trait]
impl SpeechCapture for FailingCapture {
    async fn record_utterance(&self, _opts: &CaptureOptions) -> WayfarerResult<AudioClip> {
        Err(CaptureError::new("microphone unplugged").into())
    }

    async fn transcribe(
        &self,
        _clip: &AudioClip,
        _opts: &TranscribeOptions,
    ) -> WayfarerResult<String> {
        Err(CaptureError::new("unreachable").into())
    }
}

/// Capture whose transcript is only a non-speech marker.
pub struct ParentheticalCapture;

#[async_trait]
impl SpeechCapture for ParentheticalCapture {
    async fn record_utterance(&self, _opts: &CaptureOptions) -> WayfarerResult<AudioClip> {
        Ok(AudioClip::new("audio/webm", vec![9]))
    }

    async fn transcribe(
        &self,
        _clip: &AudioClip,
        _opts: &TranscribeOptions,
    ) -> WayfarerResult<String> {
        Ok("(wind noise)".to_string())
    }
}

/// Image generator returning fixed bytes.
pub struct MockImageGenerator;

#[async_trait]
impl ImageGenerator for MockImageGenerator {
    async fn generate(&self, _prompt: &str, _opts: &ImageOptions) -> WayfarerResult<GeneratedImage> {
        Ok(GeneratedImage::Bytes(vec![0x89, b'P', b'N', b'G']))
    }
}

/// Uploader returning a fixed URL and counting calls.
pub struct MockUploader {
    uploads: Arc<AtomicUsize>,
}

impl MockUploader {
    pub fn new() -> (Self, Arc<AtomicUsize>) {
        let uploads = Arc::new(AtomicUsize::new(0));
        (
            Self {
                uploads: uploads.clone(),
            },
            uploads,
        )
    }
}

#[async_trait]
impl ImageStore for MockUploader {
    async fn upload(&self, _image: &[u8]) -> WayfarerResult<String> {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok("https://images.example.test/final.png".to_string())
    }
}

/// Mailer recording dispatched messages.
pub struct MockMailer {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockMailer {
    pub fn new() -> (Self, Arc<Mutex<Vec<(String, String)>>>) {
        let sent = Arc::new(Mutex::new(Vec::new()));
        (Self { sent: sent.clone() }, sent)
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_image(&self, to: &str, image_url: &str) -> WayfarerResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), image_url.to_string()));
        Ok(())
    }
}
