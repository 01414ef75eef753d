//! Heuristic parsing of sanitized model output.
//!
//! The model is instructed to answer in plain prose: a short narration
//! followed by exactly one question. The parser splits the text into
//! sentence units and separates the two. World state is never extracted
//! from free text; the prior state is carried forward unchanged.

use crate::stage::{TOTAL_STAGES, WorldState};

/// Question synthesized when a non-terminal stage yields no question mark.
pub(crate) const FALLBACK_QUESTION: &str = "What is your decision?";

/// Parsed stage content.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedStage {
    /// Narration units joined as prose (possibly empty)
    pub narration: String,
    /// The single question, absent at the terminal stage
    pub question: Option<String>,
    /// World state carried into the entry
    pub world_state: WorldState,
}

/// Split text into sentence units, breaking after `.` or `?` followed by
/// whitespace. Units keep their terminal punctuation.
///
/// # Examples
///
/// ```
/// use wayfarer_session::split_sentence_units;
///
/// let units = split_sentence_units("One. Two? Three.");
/// assert_eq!(units, vec!["One.", "Two?", "Three."]);
/// ```
pub fn split_sentence_units(text: &str) -> Vec<String> {
    let mut units = Vec::new();
    let mut start = 0;
    let mut prev_terminal = false;

    for (idx, ch) in text.char_indices() {
        if prev_terminal && ch.is_whitespace() {
            let unit = text[start..idx].trim();
            if !unit.is_empty() {
                units.push(unit.to_string());
            }
            start = idx;
        }
        prev_terminal = matches!(ch, '.' | '?');
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        units.push(tail.to_string());
    }

    units
}

/// Parse sanitized model output for a stage into narration, question and
/// world state.
///
/// Stage 1 treats the whole text as the question (the directive forbids
/// narrating). Later stages scan sentence units from the end for the last
/// one ending in a question mark; the remaining units, in original order
/// and truncated to three, become the narration. A missing question below
/// the terminal stage falls back to a generic one rather than failing; the
/// terminal stage never carries a question, whatever the model returned.
pub fn parse_stage_response(stage: u8, text: &str, prior_state: &WorldState) -> ParsedStage {
    if stage <= 1 {
        return ParsedStage {
            narration: String::new(),
            question: Some(text.trim().to_string()),
            world_state: prior_state.clone(),
        };
    }

    let units = split_sentence_units(text);
    let question = units
        .iter()
        .rev()
        .find(|unit| unit.ends_with('?'))
        .cloned();

    let narration = units
        .iter()
        .filter(|unit| Some(*unit) != question.as_ref())
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string();

    let question = if stage >= TOTAL_STAGES {
        None
    } else {
        question.or_else(|| Some(FALLBACK_QUESTION.to_string()))
    };

    ParsedStage {
        narration,
        question,
        world_state: prior_state.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_co2() -> WorldState {
        let mut state = WorldState::new();
        state.insert("co2".to_string(), serde_json::json!(410));
        state
    }

    #[test]
    fn splits_on_periods_and_question_marks() {
        let units = split_sentence_units("The ice melts. Coasts flood? People move.");
        assert_eq!(units, vec!["The ice melts.", "Coasts flood?", "People move."]);
    }

    #[test]
    fn single_sentence_is_one_unit() {
        assert_eq!(split_sentence_units("No terminal punctuation"), vec![
            "No terminal punctuation"
        ]);
    }

    #[test]
    fn empty_text_yields_no_units() {
        assert!(split_sentence_units("").is_empty());
        assert!(split_sentence_units("   ").is_empty());
    }

    #[test]
    fn stage_one_takes_everything_as_question() {
        let state = state_with_co2();
        let parsed = parse_stage_response(1, "A sentence. What do you choose?", &state);
        assert_eq!(parsed.narration, "");
        assert_eq!(
            parsed.question.as_deref(),
            Some("A sentence. What do you choose?")
        );
        assert_eq!(parsed.world_state, state);
    }

    // Mirrors the canonical mid-session exchange: two narration sentences
    // and a trailing question, with the prior state carried forward.
    #[test]
    fn mid_stage_separates_narration_and_question() {
        let state = state_with_co2();
        let parsed = parse_stage_response(
            5,
            "Narration sentence one. Narration sentence two. Is this good for the planet?",
            &state,
        );
        assert_eq!(parsed.narration, "Narration sentence one. Narration sentence two.");
        assert_eq!(parsed.question.as_deref(), Some("Is this good for the planet?"));
        assert_eq!(parsed.world_state, state);
    }

    #[test]
    fn narration_truncates_to_three_units() {
        let parsed = parse_stage_response(
            4,
            "One. Two. Three. Four. Five. What now?",
            &WorldState::new(),
        );
        assert_eq!(parsed.narration, "One. Two. Three.");
        assert_eq!(parsed.question.as_deref(), Some("What now?"));
    }

    #[test]
    fn question_is_last_interrogative_unit() {
        let parsed = parse_stage_response(
            3,
            "Did it work? It did not. What will you try instead?",
            &WorldState::new(),
        );
        assert_eq!(parsed.question.as_deref(), Some("What will you try instead?"));
        assert_eq!(parsed.narration, "Did it work? It did not.");
    }

    #[test]
    fn missing_question_falls_back_below_terminal() {
        let parsed = parse_stage_response(7, "Only narration here.", &WorldState::new());
        assert_eq!(parsed.question.as_deref(), Some(FALLBACK_QUESTION));
        assert_eq!(parsed.narration, "Only narration here.");
    }

    // P2: the terminal stage never carries a question
    #[test]
    fn terminal_stage_forces_question_absent() {
        let parsed = parse_stage_response(
            15,
            "The world settles into silence. Will anyone remember?",
            &WorldState::new(),
        );
        assert_eq!(parsed.question, None);
        assert_eq!(parsed.narration, "The world settles into silence.");
    }

    #[test]
    fn terminal_stage_without_question_mark_is_fine() {
        let parsed = parse_stage_response(15, "All is quiet now.", &WorldState::new());
        assert_eq!(parsed.question, None);
        assert_eq!(parsed.narration, "All is quiet now.");
    }
}
