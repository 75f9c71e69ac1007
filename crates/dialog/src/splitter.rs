//! Lead-sentence / detail split.

use serde::Serialize;

/// An answer broken into its first sentence and the rest.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitAnswer {
    /// First sentence, including its terminal mark
    pub short: String,

    /// Everything after the first sentence, leading separators removed
    pub detail: String,
}

impl SplitAnswer {
    /// Whether there is anything beyond the lead sentence.
    pub fn has_detail(&self) -> bool {
        !self.detail.is_empty()
    }

    /// Lead and detail rejoined with a single space.
    pub fn joined(&self) -> String {
        format!("{} {}", self.short, self.detail).trim().to_string()
    }
}

/// Split `text` at its first `.`, `?` or `!`.
///
/// The lead keeps the mark. The detail is trimmed and loses any leading run
/// of whitespace or `. ; , : -`. Without a mark the whole trimmed text is
/// the lead; whitespace-only input yields two empty strings.
pub fn split_answer(text: &str) -> SplitAnswer {
    if text.is_empty() {
        return SplitAnswer::default();
    }

    // Marks are ASCII, so `p + 1` is always a char boundary
    let Some(p) = text.find(['.', '?', '!']) else {
        return SplitAnswer {
            short: text.trim().to_string(),
            detail: String::new(),
        };
    };

    let short = text[..=p].trim().to_string();
    let detail = text[p + 1..]
        .trim()
        .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ';' | ',' | ':' | '-'))
        .to_string();

    SplitAnswer { short, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> (String, String) {
        let s = split_answer(text);
        (s.short, s.detail)
    }

    #[test]
    fn test_empty() {
        assert_eq!(split(""), (String::new(), String::new()));
        assert_eq!(split("   "), (String::new(), String::new()));
    }

    #[test]
    fn test_no_terminal_mark() {
        assert_eq!(split("Hello"), ("Hello".to_string(), String::new()));
        assert_eq!(
            split("  just some words  "),
            ("just some words".to_string(), String::new())
        );
    }

    #[test]
    fn test_only_first_mark_is_consumed() {
        assert_eq!(split("A. B! C?"), ("A.".to_string(), "B! C?".to_string()));
    }

    #[test]
    fn test_leading_separators_stripped_from_detail() {
        assert_eq!(
            split("Yes... ; - and then more."),
            ("Yes.".to_string(), "and then more.".to_string())
        );
        assert_eq!(
            split("Rust is fast! , : it is also safe."),
            ("Rust is fast!".to_string(), "it is also safe.".to_string())
        );
    }

    #[test]
    fn test_question_mark_lead() {
        assert_eq!(
            split("Why? Because the sky scatters blue light."),
            (
                "Why?".to_string(),
                "Because the sky scatters blue light.".to_string()
            )
        );
    }

    #[test]
    fn test_single_sentence_plus_rest() {
        let lead = "Paris is the capital of France.";
        let rest = "It has been the capital since 987.";
        assert_eq!(
            split(&format!("{} {}", lead, rest)),
            (lead.to_string(), rest.to_string())
        );
    }

    #[test]
    fn test_rest_with_leading_separators() {
        let lead = "Water boils at 100 °C.";
        let rest = "; - at sea level, that is";
        assert_eq!(
            split(&format!("{} {}", lead, rest)),
            (lead.to_string(), "at sea level, that is".to_string())
        );
    }

    #[test]
    fn test_no_mark_texts_are_identity() {
        for text in ["Hello", "a b c", "über cool", "numbers 1 2 3"] {
            assert_eq!(split(text), (text.to_string(), String::new()));
        }
    }

    #[test]
    fn test_short_nonempty_for_nonblank_input() {
        for text in [".", "!!!", "x", "?what"] {
            assert!(!split_answer(text).short.is_empty(), "{:?}", text);
        }
    }

    #[test]
    fn test_multibyte_before_mark() {
        assert_eq!(
            split("Café au lait. Très bon."),
            ("Café au lait.".to_string(), "Très bon.".to_string())
        );
    }

    #[test]
    fn test_joined() {
        assert_eq!(split_answer("A. B.").joined(), "A. B.");
        assert_eq!(split_answer("Only one.").joined(), "Only one.");
        assert!(!split_answer("Only one.").has_detail());
    }
}
