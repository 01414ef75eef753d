//! Artifact storage error types.

/// Specific error conditions for artifact storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Directory could not be created
    #[display("Failed to create directory: {}", _0)]
    DirectoryCreation(String),
    /// File write failed
    #[display("Failed to write file: {}", _0)]
    FileWrite(String),
    /// File read failed
    #[display("Failed to read file: {}", _0)]
    FileRead(String),
    /// Artifact not found
    #[display("Artifact not found: {}", _0)]
    NotFound(String),
    /// Stored content does not match its recorded hash
    #[display("Content hash mismatch: {}", _0)]
    HashMismatch(String),
}

/// Error type for artifact storage operations.
///
/// # Examples
///
/// ```
/// use wayfarer_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::NotFound("abc123".into()));
/// assert!(format!("{}", err).contains("abc123"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The specific error condition
    pub kind: StorageErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl StorageError {
    /// Create a new StorageError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
