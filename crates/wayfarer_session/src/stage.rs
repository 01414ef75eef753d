//! Stage records and session-level constants.

use serde::{Deserialize, Serialize};

/// Number of interactive stages; stage 0 is the intro, stage 15 terminal.
pub const TOTAL_STAGES: u8 = 15;

/// Carried-forward narrative context, keyed by arbitrary names.
pub type WorldState = serde_json::Map<String, serde_json::Value>;

/// One completed stage's record.
///
/// Entries exist for every stage 0..=15, created in strictly increasing
/// order. Stage 0 and stage 15 never carry a question; stage 1 never
/// carries narration.
#[derive(
    Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct StageEntry {
    /// Stage number, 0 (intro) through 15 (terminal)
    pub(crate) stage: u8,
    /// Question asked at this stage, if any
    pub(crate) question: Option<String>,
    /// Narration spoken before the question (may be empty)
    pub(crate) narration: String,
    /// World state carried into the next stage
    pub(crate) world_state: WorldState,
    /// The answer that preceded generation of this entry's content
    pub(crate) user_answer: Option<String>,
}

/// Result of advancing the session by one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    /// True once the terminal stage has been generated
    pub finished: bool,
    /// The stage entry just committed to history
    pub entry: StageEntry,
}
