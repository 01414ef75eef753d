//! Environment-backed credential source.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Notify;
use tracing::{info, instrument, warn};
use wayfarer_interface::CredentialSource;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_WAIT: Duration = Duration::from_secs(5);

/// Credential source reading process environment variables.
///
/// Values are empty strings until the environment is populated (the facade
/// loads `.env` at startup and calls [`EnvCredentials::mark_ready`]).
/// Consumers either await [`CredentialSource::ready`] or use
/// [`EnvCredentials::wait_for`] with the bounded poll-and-give-up behavior;
/// proceeding with an empty credential makes the first real request fail
/// explicitly.
#[derive(Clone, Default)]
pub struct EnvCredentials {
    populated: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl EnvCredentials {
    /// Creates a new, not-yet-ready source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal that the environment has been populated.
    pub fn mark_ready(&self) {
        self.populated.store(true, Ordering::Release);
        self.notify.notify_waiters();
    }

    /// Wait up to ~5s for every named credential to become non-empty.
    ///
    /// Returns `true` if all arrived in time; `false` means the caller
    /// proceeds anyway and lets the first request fail.
    #[instrument(skip(self))]
    pub async fn wait_for(&self, names: &[&str]) -> bool {
        let deadline = tokio::time::Instant::now() + DEFAULT_WAIT;
        loop {
            if names.iter().all(|n| !self.get(n).is_empty()) {
                return true;
            }
            if tokio::time::Instant::now() >= deadline {
                warn!(?names, "Credentials still missing after bounded wait");
                return false;
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    /// Log which credentials are present, with a short non-secret preview.
    pub fn log_presence(&self, names: &[&str]) {
        for name in names {
            let value = self.get(name);
            if value.is_empty() {
                warn!(credential = %name, "Credential missing");
            } else {
                let preview: String = value.chars().take(6).collect();
                info!(credential = %name, preview = %format!("{}...", preview), "Credential present");
            }
        }
    }
}

#[async_trait]
impl CredentialSource for EnvCredentials {
    fn get(&self, name: &str) -> String {
        std::env::var(name).unwrap_or_default().trim().to_string()
    }

    async fn ready(&self) {
        if self.populated.load(Ordering::Acquire) {
            return;
        }
        loop {
            let notified = self.notify.notified();
            if self.populated.load(Ordering::Acquire) {
                return;
            }
            notified.await;
        }
    }
}
