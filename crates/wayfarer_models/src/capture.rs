//! Spool-directory speech capture.
//!
//! The kiosk front-end owns the microphone: it records one utterance with
//! its own silence detection and drops the encoded file into a spool
//! directory. This adapter waits for that file to appear, consumes it, and
//! transcribes it through Whisper.

use crate::WhisperClient;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use wayfarer_error::{CaptureError, WayfarerResult};
use wayfarer_interface::{AudioClip, CaptureOptions, SpeechCapture, TranscribeOptions};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn mime_for_extension(path: &std::path::Path) -> Option<&'static str> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("webm") => Some("audio/webm"),
        Some("wav") => Some("audio/wav"),
        Some("mp3") => Some("audio/mpeg"),
        Some("ogg") => Some("audio/ogg"),
        _ => None,
    }
}

/// Speech capture backed by a spool directory and Whisper transcription.
pub struct SpooledCapture {
    spool_dir: PathBuf,
    whisper: WhisperClient,
}

impl SpooledCapture {
    /// Creates a capture adapter watching `spool_dir` for utterance files.
    pub fn new(spool_dir: impl Into<PathBuf>, whisper: WhisperClient) -> Self {
        Self {
            spool_dir: spool_dir.into(),
            whisper,
        }
    }

    /// Consume the first queued audio file, if any.
    async fn take_utterance(&self) -> WayfarerResult<Option<AudioClip>> {
        let mut entries = tokio::fs::read_dir(&self.spool_dir)
            .await
            .map_err(|e| CaptureError::new(format!("spool dir unreadable: {}", e)))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CaptureError::new(format!("spool dir unreadable: {}", e)))?
        {
            let path = entry.path();
            let Some(mime) = mime_for_extension(&path) else {
                continue;
            };

            let data = tokio::fs::read(&path)
                .await
                .map_err(|e| CaptureError::new(format!("utterance read failed: {}", e)))?;
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Failed to remove consumed utterance");
            }
            debug!(path = %path.display(), size = data.len(), "Consumed spooled utterance");
            return Ok(Some(AudioClip::new(mime, data)));
        }

        Ok(None)
    }
}

#[async_trait]
impl SpeechCapture for SpooledCapture {
    #[instrument(skip(self), fields(spool = %self.spool_dir.display(), max_ms = opts.max_duration_ms))]
    async fn record_utterance(&self, opts: &CaptureOptions) -> WayfarerResult<AudioClip> {
        let deadline = tokio::time::Instant::now() + Duration::from_millis(opts.max_duration_ms);

        loop {
            if let Some(clip) = self.take_utterance().await? {
                return Ok(clip);
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(CaptureError::new("no utterance arrived before max duration").into());
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn transcribe(
        &self,
        clip: &AudioClip,
        opts: &TranscribeOptions,
    ) -> WayfarerResult<String> {
        self.whisper.transcribe(clip, opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn picks_up_a_queued_utterance() {
        let dir = tempfile::tempdir().unwrap();
        let capture = SpooledCapture::new(dir.path(), WhisperClient::new("test-key"));

        tokio::fs::write(dir.path().join("utterance.webm"), b"opus bytes")
            .await
            .unwrap();

        let opts = CaptureOptions::builder()
            .max_duration_ms(2_000u64)
            .build()
            .unwrap();
        let clip = capture.record_utterance(&opts).await.unwrap();
        assert_eq!(clip.mime, "audio/webm");
        assert_eq!(clip.data, b"opus bytes");

        // consumed
        assert!(!dir.path().join("utterance.webm").exists());
    }

    #[tokio::test]
    async fn times_out_when_nothing_arrives() {
        let dir = tempfile::tempdir().unwrap();
        let capture = SpooledCapture::new(dir.path(), WhisperClient::new("test-key"));

        let opts = CaptureOptions::builder()
            .max_duration_ms(250u64)
            .build()
            .unwrap();
        assert!(capture.record_utterance(&opts).await.is_err());
    }

    #[tokio::test]
    async fn ignores_non_audio_files() {
        let dir = tempfile::tempdir().unwrap();
        let capture = SpooledCapture::new(dir.path(), WhisperClient::new("test-key"));

        tokio::fs::write(dir.path().join("notes.txt"), b"not audio")
            .await
            .unwrap();

        let opts = CaptureOptions::builder()
            .max_duration_ms(250u64)
            .build()
            .unwrap();
        assert!(capture.record_utterance(&opts).await.is_err());
        assert!(dir.path().join("notes.txt").exists());
    }
}
