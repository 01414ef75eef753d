//! Finalization error types.

/// Specific error conditions for the post-session finalization sequence.
///
/// Each step's failure is caught independently: an email failure never
/// undoes a successful image persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum FinalizationErrorKind {
    /// Timeline summarization via the narrative model failed
    #[display("Timeline summary failed: {}", _0)]
    TimelineSummary(String),
    /// Summary image generation failed
    #[display("Image generation failed: {}", _0)]
    ImageGeneration(String),
    /// Local image persistence failed
    #[display("Image persistence failed: {}", _0)]
    Persistence(String),
    /// Image upload to the external store failed
    #[display("Image upload failed: {}", _0)]
    Upload(String),
    /// Email dispatch failed
    #[display("Email dispatch failed: {}", _0)]
    Email(String),
    /// Nothing to finalize (empty stage history)
    #[display("Finalization requires a non-empty stage history")]
    EmptyHistory,
}

/// Error type for finalization operations.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Finalization Error: {} at line {} in {}", kind, line, file)]
pub struct FinalizationError {
    /// The specific error condition
    pub kind: FinalizationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl FinalizationError {
    /// Create a new FinalizationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FinalizationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
