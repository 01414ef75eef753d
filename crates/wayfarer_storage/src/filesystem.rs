//! Filesystem-based artifact storage implementation.

use crate::{ArtifactMetadata, ArtifactReference, ArtifactStore};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;
use wayfarer_error::{StorageError, StorageErrorKind, WayfarerResult};

/// Filesystem storage backend.
///
/// Stores artifacts in a content-addressable structure:
/// `{base_path}/{kind}/{hash[0:2]}/{hash[2:4]}/{hash}`
///
/// Same content hashes to the same path, so repeated stores deduplicate.
/// Writes go to a temp file first and are renamed into place.
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store, creating the base directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> WayfarerResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem artifact store");
        Ok(Self { base_path })
    }

    /// Compute SHA-256 hash of data.
    fn compute_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }

    /// Path for a given hash and kind: `{base}/{kind}/{hash[0:2]}/{hash[2:4]}/{hash}`.
    fn artifact_path(&self, hash: &str, metadata: &ArtifactMetadata) -> PathBuf {
        self.base_path
            .join(metadata.kind.dir_name())
            .join(&hash[0..2])
            .join(&hash[2..4])
            .join(hash)
    }

    fn verify_hash(data: &[u8], expected_hash: &str) -> WayfarerResult<()> {
        let actual_hash = Self::compute_hash(data);
        if actual_hash != expected_hash {
            return Err(StorageError::new(StorageErrorKind::HashMismatch(format!(
                "expected {}, got {}",
                expected_hash, actual_hash
            )))
            .into());
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ArtifactStore for FileSystemStore {
    #[tracing::instrument(skip(self, data, metadata), fields(size = data.len(), kind = %metadata.kind))]
    async fn store(
        &self,
        data: &[u8],
        metadata: &ArtifactMetadata,
    ) -> WayfarerResult<ArtifactReference> {
        let hash = Self::compute_hash(data);
        let path = self.artifact_path(&hash, metadata);

        // If the file already exists, just return a reference (deduplication)
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!(
                hash = %hash,
                path = %path.display(),
                "Artifact already exists, returning existing reference"
            );

            return Ok(ArtifactReference {
                id: Uuid::new_v4(),
                content_hash: hash,
                storage_path: path.to_string_lossy().to_string(),
                size_bytes: data.len() as u64,
                kind: metadata.kind,
                mime_type: metadata.mime_type.clone(),
            });
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Temp file + rename keeps partially written artifacts invisible
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(
            hash = %hash,
            path = %path.display(),
            size = data.len(),
            kind = %metadata.kind,
            "Stored artifact"
        );

        Ok(ArtifactReference {
            id: Uuid::new_v4(),
            content_hash: hash,
            storage_path: path.to_string_lossy().to_string(),
            size_bytes: data.len() as u64,
            kind: metadata.kind,
            mime_type: metadata.mime_type.clone(),
        })
    }

    #[tracing::instrument(skip(self, reference), fields(hash = %reference.content_hash))]
    async fn retrieve(&self, reference: &ArtifactReference) -> WayfarerResult<Vec<u8>> {
        let path = Path::new(&reference.storage_path);

        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        Self::verify_hash(&data, &reference.content_hash)?;

        tracing::debug!(
            hash = %reference.content_hash,
            size = data.len(),
            "Retrieved artifact"
        );

        Ok(data)
    }

    #[tracing::instrument(skip(self, reference), fields(hash = %reference.content_hash))]
    async fn delete(&self, reference: &ArtifactReference) -> WayfarerResult<()> {
        let path = Path::new(&reference.storage_path);

        tokio::fs::remove_file(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(reference.storage_path.clone()))
            } else {
                StorageError::new(StorageErrorKind::FileWrite(format!(
                    "delete {}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!(hash = %reference.content_hash, "Deleted artifact");

        Ok(())
    }

    async fn exists(&self, reference: &ArtifactReference) -> WayfarerResult<bool> {
        let path = Path::new(&reference.storage_path);
        Ok(tokio::fs::try_exists(path).await.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn image_metadata() -> ArtifactMetadata {
        ArtifactMetadata::new(crate::ArtifactKind::Image, "image/png")
    }

    #[tokio::test]
    async fn store_and_retrieve_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemStore::new(dir.path()).unwrap();

        let data = b"not actually a png";
        let reference = store.store(data, &image_metadata()).await.unwrap();
        assert_eq!(reference.size_bytes, data.len() as u64);

        let loaded = store.retrieve(&reference).await.unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn duplicate_content_shares_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemStore::new(dir.path()).unwrap();

        let first = store.store(b"same bytes", &image_metadata()).await.unwrap();
        let second = store.store(b"same bytes", &image_metadata()).await.unwrap();
        assert_eq!(first.storage_path, second.storage_path);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn retrieve_missing_artifact_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSystemStore::new(dir.path()).unwrap();

        let reference = store.store(b"ephemeral", &image_metadata()).await.unwrap();
        store.delete(&reference).await.unwrap();

        assert!(!store.exists(&reference).await.unwrap());
        assert!(store.retrieve(&reference).await.is_err());
    }
}
