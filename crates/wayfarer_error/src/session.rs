//! Session error types.

/// Specific error conditions for the conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum SessionErrorKind {
    /// Operation invoked out of its allowed state-machine order
    #[display("Invalid session state: {}", _0)]
    InvalidState(String),
    /// Intro context was already prepared for this session
    #[display("Intro context already prepared (stage 0 exists)")]
    IntroAlreadyPrepared,
    /// `get_next` called after the terminal stage completed
    #[display("Session already finished after stage {}", _0)]
    SessionFinished(u8),
    /// Prompt context could not be serialized
    #[display("Failed to serialize prompt context: {}", _0)]
    ContextSerialization(String),
}

/// Error type for session operations.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{SessionError, SessionErrorKind};
///
/// let err = SessionError::new(SessionErrorKind::IntroAlreadyPrepared);
/// assert!(format!("{}", err).contains("already prepared"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Session Error: {} at line {} in {}", kind, line, file)]
pub struct SessionError {
    /// The specific error condition
    pub kind: SessionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl SessionError {
    /// Create a new SessionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SessionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
