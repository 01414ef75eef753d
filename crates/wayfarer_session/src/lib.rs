//! Stage progression engine for the Wayfarer installation.
//!
//! A session walks a visitor through 15 fixed narrative stages. The
//! conversation engine builds stage-specific prompts over the accumulated
//! history, parses model output into narration/question/world-state, and
//! the loop controller sequences narration, question, speech capture and
//! carry-forward until the terminal retrospective, after which the
//! finalization pipeline summarizes the session into a timeline image.
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfarer_session::{ChatLoopController, ConversationEngine, SessionConfig};
//! use wayfarer_models::OpenAiChatClient;
//!
//! # async fn example() -> wayfarer_error::WayfarerResult<()> {
//! let driver = OpenAiChatClient::new("api-key");
//! let engine = ConversationEngine::new(driver, SessionConfig::default(), None);
//! let mut controller = ChatLoopController::new(engine, synthesizer, capture, sink);
//! controller.start().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod controller;
mod directives;
mod engine;
mod events;
mod finalize;
mod parse;
mod sanitize;
mod stage;

pub use config::{SessionConfig, SessionConfigBuilder};
pub use controller::{ChatLoopController, LoopPhase, StopHandle};
pub use directives::{QUESTION_CLOSING_TAG, base_system_prompt, stage_directive};
pub use engine::{ConversationEngine, IntroContext};
pub use events::{EventSender, SessionEvent};
pub use finalize::{
    FinalizationPipeline, FinalizationReport, build_final_prompt, build_timeline_prompt,
};
pub use parse::{ParsedStage, parse_stage_response, split_sentence_units};
pub use sanitize::sanitize_for_speech;
pub use stage::{StageEntry, TOTAL_STAGES, TurnOutcome, WorldState};
