use once_cell::sync::Lazy;
use regex::Regex;

// Numbered list markers after a line start or whitespace. Model output
// rarely preserves line structure, so markers in running text count too.
static NUMBERED_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(^|\s)\d{1,3}\.\s+").unwrap());

// Filler phrases summarization models lean on. Word-bounded so that
// "power" or "wet" are never touched.
static FILLER_TERMS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:the\s+paper|this\s+paper|we|our)\b").unwrap());

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Tidy an assembled summary: rewrite numbered-list markers into bullets,
/// delete filler phrases, collapse whitespace.
///
/// Purely textual; there is no check that a deleted filler word was not
/// load-bearing in context.
pub fn post_process(summary: &str) -> String {
    let bulleted = NUMBERED_MARKER.replace_all(summary, "${1}\u{2022} ");
    let stripped = FILLER_TERMS.replace_all(&bulleted, "");
    WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullets_and_filler_removal() {
        let out = post_process("1. We present results. 2. Our method works.");
        assert_eq!(out, "\u{2022} present results. \u{2022} method works.");
    }

    #[test]
    fn filler_matching_is_word_bounded() {
        let out = post_process("The wet towel lost power.");
        assert_eq!(out, "The wet towel lost power.");
    }

    #[test]
    fn filler_matching_is_case_insensitive() {
        let out = post_process("WE did it. THIS PAPER shows that OUR plan held.");
        assert_eq!(out, "did it. shows that plan held.");
    }

    #[test]
    fn numbered_markers_at_line_starts_become_bullets() {
        let out = post_process("1. first point\n2. second point");
        assert_eq!(out, "\u{2022} first point \u{2022} second point");
    }

    #[test]
    fn decimal_numbers_keep_their_digits() {
        // "3.5" has no whitespace after the dot, so it is not a marker.
        let out = post_process("Accuracy rose by 3.5 percent.");
        assert_eq!(out, "Accuracy rose by 3.5 percent.");
    }

    #[test]
    fn whitespace_is_collapsed_and_trimmed() {
        assert_eq!(post_process("  spread   out\ttext \n here "), "spread out text here");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(post_process(""), "");
    }
}
