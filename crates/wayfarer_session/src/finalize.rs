//! Post-session finalization: timeline summary, image, persistence, email.

use crate::stage::StageEntry;
use wayfarer_core::{GenerateRequest, Message};
use wayfarer_error::{BuilderError, FinalizationError, FinalizationErrorKind, WayfarerResult};
use wayfarer_interface::{GeneratedImage, ImageGenerator, ImageOptions, ImageStore, Mailer, NarrativeDriver};
use wayfarer_storage::{ArtifactKind, ArtifactMetadata, ArtifactStore};

const TIMELINE_SYSTEM_PROMPT: &str = "You summarize narrative timelines. Return a concise text with 6-10 key milestones, in chronological order, describing the most striking events that happened in the user's world across 15 stages. Use short sentences separated by semicolons.";

const TIMELINE_POSITIVE: &str = "cinematic photorealistic timeline, left-to-right progression, clear separators, global environmental themes, volumetric lighting, hdr, sharp focus";
const TIMELINE_KEYWORDS: &str = "climate crisis, renewable energy, migration, biodiversity loss, carbon capture, drought, flood, wildfire, sea level rise, reforestation";
const FINAL_POSITIVE: &str = "cinematic photorealistic environmental scene, global scale, dramatic natural light, volumetric lighting, hdr, ultra-detailed, sharp focus";
const FINAL_KEYWORDS: &str = "climate, society, technology, biodiversity, oceans, forests, cities, resilience";
const NEGATIVE: &str = "text, captions, watermarks, logos, charts, ui, low-res, blurry, distorted, oversaturated, nsfw, close-up faces";

/// Char-safe prefix truncation for prompt assembly.
fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Image prompt for the horizontal timeline rendering of a session.
pub fn build_timeline_prompt(summary: &str, final_description: &str) -> String {
    [
        format!("Positive: {}.", TIMELINE_POSITIVE),
        format!("Keywords: {}.", TIMELINE_KEYWORDS),
        format!("Negative: {}.", NEGATIVE),
        "Context:".to_string(),
        truncate(summary, 600).to_string(),
        "Final:".to_string(),
        truncate(final_description, 240).to_string(),
    ]
    .join("\n")
}

/// Image prompt for a single final-world scene, used when no timeline
/// summary is available.
pub fn build_final_prompt(final_description: &str) -> String {
    [
        format!("Positive: {}.", FINAL_POSITIVE),
        format!("Keywords: {}.", FINAL_KEYWORDS),
        format!("Negative: {}.", NEGATIVE),
        "Final world summary:".to_string(),
        truncate(final_description, 700).to_string(),
    ]
    .join("\n")
}

/// What the finalization sequence managed to produce.
///
/// Partial success is expected: an email failure never undoes a stored
/// image.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinalizationReport {
    /// Condensed chronological timeline, if summarization succeeded
    pub timeline: Option<String>,
    /// Local path of the persisted summary image
    pub image_path: Option<String>,
    /// URL of the uploaded image, if the email channel ran
    pub image_url: Option<String>,
    /// Whether the email was dispatched
    pub email_sent: bool,
}

/// Consumes a completed session and produces its keepsakes.
pub struct FinalizationPipeline {
    driver: Box<dyn NarrativeDriver>,
    generator: Box<dyn ImageGenerator>,
    store: Box<dyn ArtifactStore>,
    uploader: Option<Box<dyn ImageStore>>,
    mailer: Option<Box<dyn Mailer>>,
    image_options: ImageOptions,
    timeline_temperature: f32,
}

impl FinalizationPipeline {
    /// Create a pipeline over the given driver, image generator and local
    /// artifact store.
    pub fn new(
        driver: Box<dyn NarrativeDriver>,
        generator: Box<dyn ImageGenerator>,
        store: Box<dyn ArtifactStore>,
    ) -> Self {
        Self {
            driver,
            generator,
            store,
            uploader: None,
            mailer: None,
            image_options: ImageOptions::default(),
            timeline_temperature: 0.5,
        }
    }

    /// Add the upload half of the email channel.
    pub fn with_uploader(mut self, uploader: Box<dyn ImageStore>) -> Self {
        self.uploader = Some(uploader);
        self
    }

    /// Add the dispatch half of the email channel.
    pub fn with_mailer(mut self, mailer: Box<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Override the summary image parameters.
    pub fn with_image_options(mut self, options: ImageOptions) -> Self {
        self.image_options = options;
        self
    }

    /// Override the timeline summarization temperature.
    pub fn with_timeline_temperature(mut self, temperature: f32) -> Self {
        self.timeline_temperature = temperature;
        self
    }

    /// Produce a condensed chronological timeline from the recorded stages.
    ///
    /// # Errors
    ///
    /// Propagates driver failures; the caller decides whether that skips
    /// the dependent image step.
    #[tracing::instrument(skip(self, stages), fields(stage_count = stages.len()))]
    pub async fn summarize_timeline(&self, stages: &[StageEntry]) -> WayfarerResult<String> {
        let payload = serde_json::to_string(stages).map_err(|e| {
            FinalizationError::new(FinalizationErrorKind::TimelineSummary(e.to_string()))
        })?;

        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(TIMELINE_SYSTEM_PROMPT),
                Message::user(format!(
                    "Here is the complete trajectory (stages with question, user answer, narration and state): {}",
                    payload
                )),
            ])
            .temperature(Some(self.timeline_temperature))
            .build()
            .map_err(|e| BuilderError::new(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        Ok(response.text.trim().to_string())
    }

    /// Run the full finalization sequence.
    ///
    /// Every step is isolated: a failure is logged, recorded as absent in
    /// the report, and never aborts the remaining steps that do not depend
    /// on it.
    #[tracing::instrument(
        skip(self, recorded, final_entry, email),
        fields(stage_count = recorded.len(), has_email = email.is_some())
    )]
    pub async fn finalize(
        &self,
        recorded: &[StageEntry],
        final_entry: Option<&StageEntry>,
        email: Option<&str>,
    ) -> FinalizationReport {
        let mut report = FinalizationReport::default();

        if recorded.is_empty() && final_entry.is_none() {
            let err = FinalizationError::new(FinalizationErrorKind::EmptyHistory);
            tracing::error!(error = %err, "Nothing to finalize");
            return report;
        }

        match self.summarize_timeline(recorded).await {
            Ok(timeline) if !timeline.is_empty() => {
                tracing::info!(timeline_len = timeline.len(), "Timeline summarized");
                report.timeline = Some(timeline);
            }
            Ok(_) => {
                tracing::warn!("Timeline summary came back empty");
            }
            Err(e) => {
                let err = FinalizationError::new(FinalizationErrorKind::TimelineSummary(
                    e.to_string(),
                ));
                tracing::error!(error = %err, "Timeline summarization failed");
            }
        }

        // Prefer the timeline prompt; fall back to a single final-world
        // scene from the terminal narration when summarization failed.
        let prompt = match &report.timeline {
            Some(timeline) => Some(build_timeline_prompt(timeline, "")),
            None => final_entry
                .and_then(final_description)
                .map(|description| build_final_prompt(&description)),
        };

        let image_bytes = match prompt {
            Some(prompt) => self.generate_image(&prompt).await,
            None => {
                tracing::warn!("No usable prompt, skipping image generation");
                None
            }
        };

        if let Some(bytes) = &image_bytes {
            let metadata = ArtifactMetadata::new(ArtifactKind::Image, "image/png");
            match self.store.store(bytes, &metadata).await {
                Ok(reference) => {
                    tracing::info!(path = %reference.storage_path, "Summary image persisted");
                    report.image_path = Some(reference.storage_path);
                }
                Err(e) => {
                    let err = FinalizationError::new(FinalizationErrorKind::Persistence(
                        e.to_string(),
                    ));
                    tracing::error!(error = %err, "Image persistence failed");
                }
            }
        }

        if let Some(recipient) = email.map(str::trim).filter(|e| !e.is_empty()) {
            self.send_by_email(recipient, image_bytes.as_deref(), &mut report)
                .await;
        }

        report
    }

    async fn generate_image(&self, prompt: &str) -> Option<Vec<u8>> {
        match self.generator.generate(prompt, &self.image_options).await {
            Ok(GeneratedImage::Bytes(bytes)) => Some(bytes),
            Ok(GeneratedImage::Url(url)) => {
                // No bytes to persist locally; keep the URL for the email
                tracing::info!(url = %url, "Generator returned a URL payload");
                None
            }
            Err(e) => {
                let err = FinalizationError::new(FinalizationErrorKind::ImageGeneration(
                    e.to_string(),
                ));
                tracing::error!(error = %err, "Image generation failed");
                None
            }
        }
    }

    async fn send_by_email(
        &self,
        recipient: &str,
        image_bytes: Option<&[u8]>,
        report: &mut FinalizationReport,
    ) {
        let (Some(uploader), Some(mailer)) = (&self.uploader, &self.mailer) else {
            tracing::warn!("Email requested but no upload/mail channel configured");
            return;
        };
        let Some(bytes) = image_bytes else {
            tracing::warn!("Email requested but no image was produced");
            return;
        };

        let url = match uploader.upload(bytes).await {
            Ok(url) => url,
            Err(e) => {
                let err = FinalizationError::new(FinalizationErrorKind::Upload(e.to_string()));
                tracing::error!(error = %err, "Image upload failed");
                return;
            }
        };
        report.image_url = Some(url.clone());

        match mailer.send_image(recipient, &url).await {
            Ok(()) => {
                tracing::info!("Summary email dispatched");
                report.email_sent = true;
            }
            Err(e) => {
                let err = FinalizationError::new(FinalizationErrorKind::Email(e.to_string()));
                tracing::error!(error = %err, "Email dispatch failed");
            }
        }
    }
}

/// Description of the final world used for the fallback image prompt:
/// terminal narration first, serialized world state second.
fn final_description(entry: &StageEntry) -> Option<String> {
    if !entry.narration.trim().is_empty() {
        return Some(entry.narration.clone());
    }
    if !entry.world_state.is_empty() {
        return serde_json::to_string(&entry.world_state).ok();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeline_prompt_carries_all_blocks() {
        let prompt = build_timeline_prompt("floods; migration; recovery", "");
        assert!(prompt.contains("Positive:"));
        assert!(prompt.contains("Keywords:"));
        assert!(prompt.contains("Negative:"));
        assert!(prompt.contains("floods; migration; recovery"));
    }

    #[test]
    fn final_prompt_truncates_long_descriptions() {
        let long = "x".repeat(2_000);
        let prompt = build_final_prompt(&long);
        assert!(prompt.len() < 1_200);
        assert!(prompt.contains("Final world summary:"));
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        let text = "águas subindo";
        assert_eq!(truncate(text, 5), "águas");
        assert_eq!(truncate(text, 100), text);
    }
}
