//! Conversation engine: per-session state and stage generation.

use crate::config::SessionConfig;
use crate::directives::{base_system_prompt, stage_directive};
use crate::parse::parse_stage_response;
use crate::sanitize::sanitize_for_speech;
use crate::stage::{StageEntry, TOTAL_STAGES, TurnOutcome, WorldState};
use serde::Serialize;
use wayfarer_core::{GenerateRequest, Message};
use wayfarer_error::{SessionError, SessionErrorKind, WayfarerResult};
use wayfarer_interface::NarrativeDriver;

/// Marker sent in place of a blank answer so the model never sees an empty
/// field.
const NO_ANSWER_MARKER: &str = "No answer";

/// Intro preparation result: the stage-0 narration and its (empty) world
/// state, used to seed the stage loop.
#[derive(Debug, Clone, PartialEq)]
pub struct IntroContext {
    /// World state seeding stage 1 (empty at the intro)
    pub world_state: WorldState,
    /// Sanitized intro narration
    pub narration: String,
}

/// Serialized context block embedded in every stage prompt.
#[derive(Debug, Serialize)]
struct PromptContext<'a> {
    email: Option<&'a str>,
    current_stage: u8,
    total_stages: u8,
    world_state: &'a WorldState,
    history: Vec<HistoryItem<'a>>,
    intro_narration: &'a str,
}

#[derive(Debug, Serialize)]
struct HistoryItem<'a> {
    stage: u8,
    question: Option<&'a str>,
    user_answer: Option<&'a str>,
    narration: &'a str,
    world_state: &'a WorldState,
}

/// Drives one visitor session across the fixed stage sequence.
///
/// The engine exclusively owns the session state: the stage counter, the
/// append-only stage history, the intro narration and the optional email.
/// All mutation happens inside [`ConversationEngine::prepare_intro_context`]
/// and [`ConversationEngine::get_next`].
pub struct ConversationEngine<D: NarrativeDriver> {
    driver: D,
    config: SessionConfig,
    current_stage: u8,
    stage_history: Vec<StageEntry>,
    intro_narration: String,
    email: Option<String>,
}

impl<D: NarrativeDriver> ConversationEngine<D> {
    /// Create an engine for a fresh session.
    pub fn new(driver: D, config: SessionConfig, email: Option<String>) -> Self {
        Self {
            driver,
            config,
            current_stage: 0,
            stage_history: Vec::with_capacity(usize::from(TOTAL_STAGES) + 1),
            intro_narration: String::new(),
            email,
        }
    }

    /// Completed-stage counter (number of `get_next` calls so far).
    pub fn current_stage(&self) -> u8 {
        self.current_stage
    }

    /// The append-only stage history, in stage order.
    pub fn history(&self) -> &[StageEntry] {
        &self.stage_history
    }

    /// The intro narration, empty until the intro is prepared.
    pub fn intro_narration(&self) -> &str {
        &self.intro_narration
    }

    /// Email supplied at session creation, if any.
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Session configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The underlying narrative driver.
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Generate the stage-0 world contextualization.
    ///
    /// Builds a one-shot prompt from the intro directive alone (no history
    /// exists yet), sanitizes the output and commits it as the stage-0
    /// entry with no question and an empty world state.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidState` when called more than once per session,
    /// and propagates any driver failure without committing an entry.
    #[tracing::instrument(skip(self), fields(provider = self.driver.provider_name()))]
    pub async fn prepare_intro_context(&mut self) -> WayfarerResult<IntroContext> {
        if !self.stage_history.is_empty() {
            return Err(SessionError::new(SessionErrorKind::IntroAlreadyPrepared).into());
        }

        let request = GenerateRequest::builder()
            .messages(vec![
                Message::system(base_system_prompt(&self.config.language)),
                Message::user(stage_directive(0)),
            ])
            .temperature(Some(self.config.intro_temperature))
            .build()
            .map_err(|e| wayfarer_error::BuilderError::new(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        tracing::debug!(raw_len = response.text.len(), "Intro response received");

        let narration = sanitize_for_speech(&response.text);
        self.intro_narration = narration.clone();

        let entry = StageEntry {
            stage: 0,
            question: None,
            narration: narration.clone(),
            world_state: WorldState::new(),
            user_answer: None,
        };
        let world_state = entry.world_state.clone();
        self.stage_history.push(entry);

        tracing::info!(narration_len = narration.len(), "Intro context prepared");
        Ok(IntroContext {
            world_state,
            narration,
        })
    }

    /// Generate the next stage from the previous answer and prior state.
    ///
    /// Nothing is committed to history unless the model call and parse
    /// complete; a driver failure aborts this stage attempt and propagates.
    ///
    /// # Errors
    ///
    /// Fails with `InvalidState` after the terminal stage, and with the
    /// driver's `UpstreamError` on any model failure.
    #[tracing::instrument(
        skip(self, user_answer, prior_state),
        fields(stage = self.current_stage + 1, answer_len = user_answer.len())
    )]
    pub async fn get_next(
        &mut self,
        user_answer: &str,
        prior_state: &WorldState,
    ) -> WayfarerResult<TurnOutcome> {
        if self.current_stage >= TOTAL_STAGES {
            return Err(
                SessionError::new(SessionErrorKind::SessionFinished(self.current_stage)).into(),
            );
        }
        let stage_number = self.current_stage + 1;

        let messages = self.build_messages(stage_number, user_answer, prior_state)?;
        let request = GenerateRequest::builder()
            .messages(messages)
            .temperature(Some(self.config.stage_temperature))
            .build()
            .map_err(|e| wayfarer_error::BuilderError::new(e.to_string()))?;

        let response = self.driver.generate(&request).await?;
        tracing::debug!(raw_len = response.text.len(), "Stage response received");

        let content = sanitize_for_speech(&response.text);
        let parsed = parse_stage_response(stage_number, &content, prior_state);

        let trimmed_answer = user_answer.trim();
        let entry = StageEntry {
            stage: stage_number,
            question: parsed.question,
            narration: parsed.narration,
            world_state: parsed.world_state,
            user_answer: (!trimmed_answer.is_empty()).then(|| trimmed_answer.to_string()),
        };

        self.stage_history.push(entry.clone());
        self.current_stage = stage_number;
        let finished = self.current_stage >= TOTAL_STAGES;

        tracing::info!(
            stage = stage_number,
            finished,
            has_question = entry.question.is_some(),
            "Stage committed"
        );

        Ok(TurnOutcome { finished, entry })
    }

    /// Assemble the full prompt for one stage: fixed system rules, the
    /// stage directive, the serialized context block, and the answer text
    /// (or an explicit no-answer marker).
    fn build_messages(
        &self,
        stage_number: u8,
        user_answer: &str,
        prior_state: &WorldState,
    ) -> WayfarerResult<Vec<Message>> {
        let history: Vec<HistoryItem> = self
            .stage_history
            .iter()
            .map(|entry| HistoryItem {
                stage: entry.stage,
                question: entry.question.as_deref(),
                user_answer: entry.user_answer.as_deref(),
                narration: &entry.narration,
                world_state: &entry.world_state,
            })
            .collect();
        tracing::debug!(history_len = history.len(), "Building stage prompt");

        let context = PromptContext {
            email: self.email.as_deref(),
            current_stage: stage_number,
            total_stages: TOTAL_STAGES,
            world_state: prior_state,
            history,
            intro_narration: &self.intro_narration,
        };
        let context_json = serde_json::to_string(&context).map_err(|e| {
            SessionError::new(SessionErrorKind::ContextSerialization(e.to_string()))
        })?;

        let answer = user_answer.trim();
        let answer_line = if answer.is_empty() {
            NO_ANSWER_MARKER
        } else {
            answer
        };

        let user_block = [
            format!("Stage directive:\n{}", stage_directive(stage_number)),
            format!("Current context: {}", context_json),
            format!("User answer (previous stage): {}", answer_line),
        ]
        .join("\n");

        Ok(vec![
            Message::system(base_system_prompt(&self.config.language)),
            Message::user(user_block),
        ])
    }
}
