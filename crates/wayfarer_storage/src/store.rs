//! Storage backend trait.

use crate::{ArtifactMetadata, ArtifactReference};
use wayfarer_error::WayfarerResult;

/// Pluggable artifact storage backend.
#[async_trait::async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store the bytes, returning a reference for later retrieval.
    async fn store(
        &self,
        data: &[u8],
        metadata: &ArtifactMetadata,
    ) -> WayfarerResult<ArtifactReference>;

    /// Retrieve a previously stored artifact.
    async fn retrieve(&self, reference: &ArtifactReference) -> WayfarerResult<Vec<u8>>;

    /// Delete a stored artifact.
    async fn delete(&self, reference: &ArtifactReference) -> WayfarerResult<()>;

    /// Check whether the referenced artifact exists.
    async fn exists(&self, reference: &ArtifactReference) -> WayfarerResult<bool>;
}
