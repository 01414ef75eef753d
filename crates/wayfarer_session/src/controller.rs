//! Chat loop controller: end-to-end turn sequencing for one session.

use crate::engine::ConversationEngine;
use crate::events::{EventSender, SessionEvent};
use crate::finalize::FinalizationPipeline;
use crate::stage::{StageEntry, WorldState};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use wayfarer_error::WayfarerResult;
use wayfarer_interface::{AudioSink, NarrativeDriver, SpeechCapture, VoiceSynthesizer};

/// Where a session currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum LoopPhase {
    /// `start` has not been called
    NotStarted,
    /// Intro narration is being prepared/spoken
    IntroPending,
    /// The numbered stage is being generated and sequenced
    StagePending(u8),
    /// Terminal stage reached; finalization running
    Finishing,
    /// Session completed, finalization done
    Done,
    /// Cooperative stop consumed before completion
    Aborted,
}

/// Cloneable handle that requests a cooperative stop.
///
/// The flag is checked at the top of each stage iteration only; an
/// in-flight network call or playback runs to completion and its result is
/// discarded.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    flag: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request the loop to stop at the next iteration boundary.
    pub fn stop(&self) {
        self.flag.store(true, Ordering::Release);
    }

    fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Orchestrates the full turn sequence across all stages: narrate, ask,
/// listen, feed the answer back, and finalize after the terminal stage.
pub struct ChatLoopController<D: NarrativeDriver> {
    engine: ConversationEngine<D>,
    synthesizer: Box<dyn VoiceSynthesizer>,
    capture: Box<dyn SpeechCapture>,
    sink: Box<dyn AudioSink>,
    finalizer: Option<FinalizationPipeline>,
    events: Option<EventSender>,
    phase: LoopPhase,
    stop: StopHandle,
}

impl<D: NarrativeDriver> ChatLoopController<D> {
    /// Create a controller over an engine and the speech adapters.
    pub fn new(
        engine: ConversationEngine<D>,
        synthesizer: Box<dyn VoiceSynthesizer>,
        capture: Box<dyn SpeechCapture>,
        sink: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            engine,
            synthesizer,
            capture,
            sink,
            finalizer: None,
            events: None,
            phase: LoopPhase::NotStarted,
            stop: StopHandle::default(),
        }
    }

    /// Attach the finalization pipeline run after the terminal stage.
    pub fn with_finalizer(mut self, finalizer: FinalizationPipeline) -> Self {
        self.finalizer = Some(finalizer);
        self
    }

    /// Attach an observer event channel.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Handle for requesting a cooperative stop from another task.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    /// Current phase of the loop.
    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// The driven engine (read access for inspection after a run).
    pub fn engine(&self) -> &ConversationEngine<D> {
        &self.engine
    }

    /// Run the session from intro through finalization.
    ///
    /// # Errors
    ///
    /// Propagates intro preparation and stage generation failures; the
    /// interactive session fails visibly rather than looping silently.
    /// Playback, capture and finalization failures never abort the run.
    #[tracing::instrument(skip(self), fields(provider = self.engine.driver().provider_name()))]
    pub async fn start(&mut self) -> WayfarerResult<()> {
        self.phase = LoopPhase::IntroPending;
        let intro = self.engine.prepare_intro_context().await?;

        if !intro.narration.trim().is_empty() {
            self.emit(SessionEvent::Narration {
                stage: 0,
                text: intro.narration.clone(),
            });
            self.speak(&intro.narration).await;
        }

        let mut prior_state: WorldState = intro.world_state;
        let mut last_answer = String::new();
        let mut recorded: Vec<StageEntry> = Vec::new();

        loop {
            if self.stop.is_stopped() {
                tracing::info!(stage = self.engine.current_stage(), "Stop requested, halting loop");
                self.phase = LoopPhase::Aborted;
                return Ok(());
            }

            let stage = self.engine.current_stage() + 1;
            self.phase = LoopPhase::StagePending(stage);

            let outcome = self.engine.get_next(&last_answer, &prior_state).await?;

            if outcome.finished {
                self.phase = LoopPhase::Finishing;
                if let Some(finalizer) = &self.finalizer {
                    let report = finalizer
                        .finalize(&recorded, Some(&outcome.entry), self.engine.email())
                        .await;
                    tracing::info!(
                        timeline = report.timeline.is_some(),
                        image = report.image_path.is_some(),
                        email_sent = report.email_sent,
                        "Finalization completed"
                    );
                } else {
                    tracing::warn!("No finalizer configured, skipping finalization");
                }
                self.emit(SessionEvent::SessionFinished);
                self.phase = LoopPhase::Done;
                return Ok(());
            }

            let entry = outcome.entry;
            recorded.push(entry.clone());

            if !entry.narration.trim().is_empty() {
                self.emit(SessionEvent::Narration {
                    stage: entry.stage,
                    text: entry.narration.clone(),
                });
                self.speak(&entry.narration).await;
            }

            match entry.question.as_deref().map(str::trim) {
                Some(question) if !question.is_empty() => {
                    self.emit(SessionEvent::Question {
                        stage: entry.stage,
                        text: question.to_string(),
                    });
                    self.speak(question).await;

                    last_answer = self.listen().await;
                    self.emit(SessionEvent::Transcript {
                        stage: entry.stage,
                        text: last_answer.clone(),
                    });
                }
                _ => {
                    last_answer = String::new();
                }
            }

            prior_state = entry.world_state.clone();
            self.emit(SessionEvent::StageCompleted { stage: entry.stage });
        }
    }

    /// Synthesize and play text; failures are logged and swallowed so the
    /// loop always advances.
    async fn speak(&self, text: &str) {
        let clip = match self
            .synthesizer
            .synthesize(text, &self.engine.config().synthesis)
            .await
        {
            Ok(clip) => clip,
            Err(e) => {
                tracing::warn!(error = %e, "Voice synthesis failed, continuing without audio");
                return;
            }
        };

        if let Err(e) = self.sink.play(&clip).await {
            tracing::warn!(error = %e, "Audio playback failed, continuing");
        }
    }

    /// Capture and transcribe one answer; any failure yields an empty
    /// answer instead of propagating. Parenthetical-only transcripts (non-
    /// speech markers) count as silence.
    async fn listen(&self) -> String {
        let config = self.engine.config();

        let clip = match self.capture.record_utterance(&config.capture).await {
            Ok(clip) => clip,
            Err(e) => {
                tracing::warn!(error = %e, "Utterance capture failed, treating as no answer");
                return String::new();
            }
        };

        let transcript = match self.capture.transcribe(&clip, &config.transcription).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "Transcription failed, treating as no answer");
                return String::new();
            }
        };

        if is_parenthetical_only(&transcript) {
            tracing::debug!(transcript = %transcript, "Parenthetical-only transcript, treating as silence");
            return String::new();
        }

        transcript
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(events) = &self.events {
            let _ = events.send(event);
        }
    }
}

/// True when a transcript is purely a parenthetical annotation such as
/// "(wind noise)".
fn is_parenthetical_only(text: &str) -> bool {
    regex::Regex::new(r"(?s)^\s*\(.*\)\s*$")
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthetical_detection() {
        assert!(is_parenthetical_only("(silence)"));
        assert!(is_parenthetical_only("  (background music)  "));
        assert!(is_parenthetical_only("(multi\nline note)"));
        assert!(!is_parenthetical_only("I choose (mostly) solar power"));
        assert!(!is_parenthetical_only("plant more trees"));
        assert!(!is_parenthetical_only(""));
    }
}
