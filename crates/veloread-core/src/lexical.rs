//! Per-token pacing weights: word counts and duration multipliers.

/// Number of whitespace-separated non-empty segments in a token.
///
/// Fused display tokens report the count of their source words; empty
/// and whitespace-only tokens report 0.
pub fn word_count(token: &str) -> usize {
    token.split_whitespace().count()
}

/// Duration multiplier derived from trailing punctuation.
///
/// The ellipsis check must run before the terminal-sentence class,
/// since `"..."` also ends in `'.'`.
pub fn punctuation_multiplier(token: &str) -> f32 {
    let trimmed = token.trim();
    if trimmed.ends_with("...") {
        2.5
    } else if trimmed.ends_with(['.', '!', '?']) {
        2.0
    } else if trimmed.ends_with([';', ':']) {
        1.75
    } else if trimmed.ends_with(',') {
        1.5
    } else {
        1.0
    }
}

/// Duration multiplier derived from how much alphanumeric content a
/// token carries once punctuation is stripped.
pub fn complexity_multiplier(token: &str) -> f32 {
    let length = token.chars().filter(|ch| ch.is_alphanumeric()).count();
    if length <= 3 {
        0.9
    } else if length <= 6 {
        1.0
    } else if length <= 10 {
        1.2
    } else {
        1.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_handles_plain_and_fused_tokens() {
        assert_eq!(word_count("hello"), 1);
        assert_eq!(word_count("I go"), 2);
        assert_eq!(word_count("  spaced   out  "), 2);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   "), 0);
    }

    #[test]
    fn punctuation_multiplier_priority_order() {
        assert_eq!(punctuation_multiplier("word..."), 2.5);
        assert_eq!(punctuation_multiplier("word."), 2.0);
        assert_eq!(punctuation_multiplier("word!"), 2.0);
        assert_eq!(punctuation_multiplier("word?"), 2.0);
        assert_eq!(punctuation_multiplier("word;"), 1.75);
        assert_eq!(punctuation_multiplier("word:"), 1.75);
        assert_eq!(punctuation_multiplier("word,"), 1.5);
        assert_eq!(punctuation_multiplier("word"), 1.0);
        assert_eq!(punctuation_multiplier(""), 1.0);
    }

    #[test]
    fn punctuation_multiplier_ignores_trailing_whitespace() {
        assert_eq!(punctuation_multiplier("word. "), 2.0);
        assert_eq!(punctuation_multiplier("word... "), 2.5);
    }

    #[test]
    fn complexity_multiplier_length_bands() {
        assert_eq!(complexity_multiplier("a"), 0.9);
        assert_eq!(complexity_multiplier("hello"), 1.0);
        assert_eq!(complexity_multiplier("wonderful"), 1.2);
        assert_eq!(complexity_multiplier("extraordinary"), 1.5);
    }

    #[test]
    fn complexity_multiplier_strips_punctuation() {
        // "word..." cleans to "word", length 4.
        assert_eq!(complexity_multiplier("word..."), 1.0);
        assert_eq!(complexity_multiplier("Hi."), 0.9);
        assert_eq!(complexity_multiplier(""), 0.9);
    }
}
