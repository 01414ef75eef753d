//! Stage directive construction.
//!
//! A directive is the stage-specific instruction block governing what the
//! narrative model should produce for a given stage number. Building one
//! is pure and deterministic; compliance is enforced (where it is at all)
//! by the parser, not here.

use crate::stage::TOTAL_STAGES;

/// Closing tag the model is instructed to append to every question.
pub const QUESTION_CLOSING_TAG: &str = "What will you do, Traveler?";

/// Fixed system rules sent with every prompt.
///
/// `language` is the spoken language the model must always reply in.
pub fn base_system_prompt(language: &str) -> String {
    [
        "You are the narrator of a simulated world.".to_string(),
        format!("Always reply in {}.", language),
        "Hard formatting rules (MANDATORY):".to_string(),
        "- Output MUST be PLAIN TEXT only (no JSON, no Markdown, no triple backticks)."
            .to_string(),
        "- Decision axis is STRICTLY ENVIRONMENTAL and GLOBAL (for all humanity). Never target local groups or isolated cases. Choices must reflect what the majority of humanity would choose.".to_string(),
        "- If the environment is already irreversibly degraded according to the context, broaden the decision to global survival/remediation (still global, affecting all humanity).".to_string(),
        "- CRITICAL: Each stage must present NEW environmental challenges. When one problem is solved, another must emerge. From stage 10 onwards, problems become more intense and require more difficult, specific solutions.".to_string(),
        "- PAST MISTAKES: If previous decisions created problems, these must resurface and compound with new challenges. Narrate how past errors are now causing consequences.".to_string(),
        "- Stages 2..15: First write a 2-3 sentence NARRATION covering climate, society, culture, economy, technology and biodiversity. The narration MUST explicitly evaluate the PREVIOUS USER ANSWER as if it were adopted by the majority of humanity: state if it worked or not and briefly explain why. Then introduce the NEW environmental challenge that emerged. Then ask EXACTLY ONE objective, GLOBAL, environmental QUESTION (no extra context).".to_string(),
        "- Stage 1: DO NOT narrate; ask ONLY ONE objective, GLOBAL, environmental question based on the initial context provided.".to_string(),
        "- Pre-stage (context setup): write ONLY the initial world narration in 2-4 sentences (plain text).".to_string(),
        "- Never use lists, bullets, or code blocks; only sentences.".to_string(),
        "- In the question, always open with \"What do you think...\" or \"In your opinion...\"".to_string(),
        format!("- Always end the question with \"{}\"", QUESTION_CLOSING_TAG),
    ]
    .join("\n")
}

/// Build the instruction block for a stage number.
///
/// Stage 0 is the intro (narration only), 1 asks without narrating, 2..=9
/// advance the world, 10..=14 intensify and compound problems, 15 closes
/// with a full retrospective and no question.
pub fn stage_directive(stage: u8) -> String {
    if stage == 0 {
        return [
            "Pre-stage 0 (initial world contextualization):",
            "- Build a detailed initial context of the world in 2-4 sentences.",
            "- Do NOT ask questions here. Only contextualize vividly aspects such as climate, society, culture, economy, technology and biodiversity.",
            "- Write only the narration, in PLAIN TEXT.",
        ]
        .join("\n");
    }
    if stage == 1 {
        return [
            "Stage 1 (after the prior contextualization):",
            "- Use the provided initial world context.",
            "- Do NOT narrate again.",
            "- Present ONLY ONE objective ENVIRONMENTAL and GLOBAL question (no extra contextualization), reflecting the decision of the majority of humanity.",
            "- Format: plain text, a single sentence ending with a question mark.",
        ]
        .join("\n");
    }
    if (10..TOTAL_STAGES).contains(&stage) {
        return [
            format!("Stage {} (approaching the ending - INTENSE PROBLEMS):", stage),
            "- Consider all previous answers and advance the narrative, showing cumulative ENVIRONMENTAL effects and their global impact on society/culture/economy/technology/biodiversity.".to_string(),
            "- The narration MUST begin by explicitly evaluating the user's previous answer as if the majority of humanity had adopted it: did it work or not? Why? What immediate environmental effect?".to_string(),
            "- CRITICAL: Present NEW, more intense and complex environmental problems. If past mistakes created problems, they must resurface now with worse consequences.".to_string(),
            "- The problems must demand harder, more specific and technologically advanced solutions.".to_string(),
            "- Propose ONE new complex situation and ask ONE ENVIRONMENTAL and GLOBAL question (majority choice). If the environment has collapsed, focus on global survival/remediation.".to_string(),
        ]
        .join("\n");
    }
    if stage >= TOTAL_STAGES {
        return [
            "Stage 15 (ending):",
            "- Conclude the simulation, describing the user's final world across every aspect (climate, society, culture, economy, technology, biodiversity, quality of life), emphasizing the ENVIRONMENTAL outcomes and their global impact.",
            "- State explicitly whether life remains and how it sustains itself (or does not).",
            "- At this stage, return no question.",
            "- Do NOT ask questions here. Only contextualize vividly aspects such as climate, society, culture, economy, technology and biodiversity.",
            "- Leave an open thought or reflection for the user to ponder about their decisions and the final state of the world.",
        ]
        .join("\n");
    }
    [
        format!("Stage {}:", stage),
        "- Consider previous answers and the accumulated world state.".to_string(),
        "- Build a new NARRATION (2-3 sentences) covering climate, society, culture, economy, technology and biodiversity, always from the ENVIRONMENTAL axis and with GLOBAL scope.".to_string(),
        "- The narration MUST start by explicitly evaluating the user's previous answer as if the majority of humanity had adopted it: did it work or not? Say why and which environmental effects followed.".to_string(),
        "- CRITICAL: Present a NEW environmental problem that emerged. When one problem is solved, another must naturally emerge.".to_string(),
        "- If past mistakes created problems, they must resurface now with consequences.".to_string(),
        "- Propose ONE single STRICTLY ENVIRONMENTAL and GLOBAL question (the user's choice represents the decision of the majority of humanity). If the environment has collapsed, ask about survival/remediation at global scale.".to_string(),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_is_deterministic() {
        for stage in 0..=15 {
            assert_eq!(stage_directive(stage), stage_directive(stage));
        }
    }

    #[test]
    fn intro_forbids_questions() {
        let directive = stage_directive(0);
        assert!(directive.contains("Do NOT ask questions"));
        assert!(directive.contains("2-4 sentences"));
    }

    #[test]
    fn stage_one_forbids_narration() {
        let directive = stage_directive(1);
        assert!(directive.contains("Do NOT narrate"));
        assert!(directive.contains("ONLY ONE"));
    }

    #[test]
    fn middle_stages_demand_new_problems_and_evaluation() {
        for stage in 2..=9 {
            let directive = stage_directive(stage);
            assert!(directive.contains("NEW environmental problem"), "stage {}", stage);
            assert!(directive.contains("previous answer"), "stage {}", stage);
        }
    }

    #[test]
    fn late_stages_intensify() {
        for stage in 10..=14 {
            let directive = stage_directive(stage);
            assert!(directive.contains("INTENSE PROBLEMS"), "stage {}", stage);
            assert!(directive.contains("resurface"), "stage {}", stage);
        }
    }

    #[test]
    fn terminal_stage_asks_nothing() {
        let directive = stage_directive(15);
        assert!(directive.contains("return no question"));
        assert!(directive.contains("biodiversity"));
    }

    #[test]
    fn system_prompt_carries_language_and_closing_tag() {
        let prompt = base_system_prompt("Brazilian Portuguese");
        assert!(prompt.contains("Always reply in Brazilian Portuguese."));
        assert!(prompt.contains(QUESTION_CLOSING_TAG));
    }
}
