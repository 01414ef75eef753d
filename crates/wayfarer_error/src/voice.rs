//! Speech capture and audio playback error types.
//!
//! Both are downgraded by the loop controller: capture failures become an
//! empty answer, playback failures are logged and the loop proceeds.

/// Speech capture or transcription failure.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Capture Error: {} at line {} in {}", message, line, file)]
pub struct CaptureError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl CaptureError {
    /// Create a new CaptureError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Audio synthesis or playback failure.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Playback Error: {} at line {} in {}", message, line, file)]
pub struct PlaybackError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl PlaybackError {
    /// Create a new PlaybackError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
