//! Headless audio sink persisting clips through the artifact store.
//!
//! The kiosk shell plays audio; headless runs (and the CLI) keep the same
//! turn sequencing by writing each clip to disk instead.

use async_trait::async_trait;
use tracing::{info, instrument};
use wayfarer_error::WayfarerResult;
use wayfarer_interface::{AudioClip, AudioSink};
use wayfarer_storage::{ArtifactKind, ArtifactMetadata, ArtifactStore, FileSystemStore};

/// Audio sink that stores clips instead of playing them.
pub struct StoredAudioSink {
    store: FileSystemStore,
}

impl StoredAudioSink {
    /// Creates a sink persisting into the given artifact store.
    pub fn new(store: FileSystemStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AudioSink for StoredAudioSink {
    #[instrument(skip(self, clip), fields(mime = %clip.mime, size = clip.data.len()))]
    async fn play(&self, clip: &AudioClip) -> WayfarerResult<()> {
        let metadata = ArtifactMetadata::new(ArtifactKind::Audio, clip.mime.clone());
        let reference = self.store.store(&clip.data, &metadata).await?;
        info!(path = %reference.storage_path, "Stored audio clip");
        Ok(())
    }
}
