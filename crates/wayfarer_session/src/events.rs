//! Session observer events.
//!
//! The loop controller emits these over an optional unbounded channel so a
//! UI layer can mirror the conversation without coupling the engine to
//! notification timing. Sends are best-effort; a dropped receiver never
//! stalls the loop.

use tokio::sync::mpsc;

/// One observable moment in a running session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// Narration text about to be spoken at a stage
    Narration {
        /// Stage number
        stage: u8,
        /// Narration text
        text: String,
    },
    /// Question text about to be asked at a stage
    Question {
        /// Stage number
        stage: u8,
        /// Question text
        text: String,
    },
    /// Transcript of the visitor's captured answer (empty if none)
    Transcript {
        /// Stage number the answer belongs to
        stage: u8,
        /// Transcribed text
        text: String,
    },
    /// A stage entry was committed to history
    StageCompleted {
        /// Stage number
        stage: u8,
    },
    /// The terminal stage was generated and finalization ran
    SessionFinished,
}

/// Sending half of the session event channel.
pub type EventSender = mpsc::UnboundedSender<SessionEvent>;
