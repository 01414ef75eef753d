//! Model output sanitization for speech.
//!
//! Narrative models occasionally wrap plain prose in markdown code fences
//! or prefix it with a `json` language tag despite the prompt rules. The
//! sanitizer strips that wrapping so only speakable prose remains. It is a
//! total function, safe on already-clean input, and idempotent.

/// Strip code-fence wrapping and leading language tags, returning trimmed
/// plain prose.
///
/// # Examples
///
/// ```
/// use wayfarer_session::sanitize_for_speech;
///
/// let raw = "```json\nThe world awakens.\n```";
/// assert_eq!(sanitize_for_speech(raw), "The world awakens.");
/// assert_eq!(sanitize_for_speech("clean text"), "clean text");
/// ```
pub fn sanitize_for_speech(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    // Unwrap every fenced region, keeping its inner content
    while let Some(start) = rest.find("```") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        match after.find("```") {
            Some(end) => {
                out.push_str(strip_language_tag(&after[..end]).trim());
                rest = &after[end + 3..];
            }
            None => {
                // Unterminated fence, keep everything after the marker
                out.push_str(strip_language_tag(after).trim());
                rest = "";
            }
        }
    }
    out.push_str(rest);

    strip_language_tag(&out).trim().to_string()
}

/// Remove leading `json` tags (any case), repeating to a fixed point so
/// the sanitizer stays idempotent.
fn strip_language_tag(text: &str) -> &str {
    let mut t = text.trim_start();
    loop {
        let lowered = t.to_ascii_lowercase();
        if !lowered.starts_with("json") {
            return t;
        }
        t = t[4..].trim_start();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_input_passes_through() {
        assert_eq!(sanitize_for_speech("The seas rise."), "The seas rise.");
    }

    #[test]
    fn strips_fenced_block() {
        let raw = "```\nThe seas rise.\n```";
        assert_eq!(sanitize_for_speech(raw), "The seas rise.");
    }

    #[test]
    fn strips_json_fence_and_tag() {
        let raw = "```json\nThe seas rise. Cities adapt.\n```";
        assert_eq!(sanitize_for_speech(raw), "The seas rise. Cities adapt.");
    }

    #[test]
    fn strips_leading_json_tag_without_fence() {
        assert_eq!(sanitize_for_speech("json The seas rise."), "The seas rise.");
        assert_eq!(sanitize_for_speech("JSON The seas rise."), "The seas rise.");
    }

    #[test]
    fn keeps_text_around_fences() {
        let raw = "Before. ```inner``` After.";
        assert_eq!(sanitize_for_speech(raw), "Before. inner After.");
    }

    #[test]
    fn survives_unterminated_fence() {
        let raw = "```json\nThe story continues";
        assert_eq!(sanitize_for_speech(raw), "The story continues");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_for_speech(""), "");
        assert_eq!(sanitize_for_speech("   \n "), "");
    }

    // P4: sanitize(sanitize(x)) == sanitize(x)
    #[test]
    fn idempotent_on_arbitrary_inputs() {
        let cases = [
            "plain prose stays put.",
            "```json\nwrapped\n```",
            "```half open",
            "json json twice-tagged",
            "mixed ```a``` and ```b```",
            "",
            "  spaced  ",
        ];
        for case in cases {
            let once = sanitize_for_speech(case);
            let twice = sanitize_for_speech(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", case);
        }
    }
}
