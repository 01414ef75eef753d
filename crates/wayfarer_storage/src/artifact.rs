//! Artifact classification and reference types.

use uuid::Uuid;

/// Kind of session artifact being stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ArtifactKind {
    /// Generated summary image
    Image,
    /// Synthesized or captured audio
    Audio,
    /// Timeline or narration text
    Text,
}

impl ArtifactKind {
    /// Directory name used for this kind under the store root.
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Image => "images",
            ArtifactKind::Audio => "audio",
            ArtifactKind::Text => "text",
        }
    }
}

/// Metadata supplied when storing an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMetadata {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// MIME type, e.g. "image/png"
    pub mime_type: String,
}

impl ArtifactMetadata {
    /// Create metadata for the given kind and MIME type.
    pub fn new(kind: ArtifactKind, mime_type: impl Into<String>) -> Self {
        Self {
            kind,
            mime_type: mime_type.into(),
        }
    }
}

/// Reference to a stored artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactReference {
    /// Unique reference id
    pub id: Uuid,
    /// SHA-256 hash of the stored bytes
    pub content_hash: String,
    /// Filesystem path of the stored artifact
    pub storage_path: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Artifact kind
    pub kind: ArtifactKind,
    /// MIME type
    pub mime_type: String,
}
