//! Keyword-based classification of follow-up replies.
//!
//! All predicates lower-case their input and look for keywords by substring
//! containment, so "yes please" and "Okay!" both match. "ok" and "okay" sit
//! in both the "more" and the "stop" lists; [`classify`] settles the overlap
//! with an explicit [`IntentPrecedence`].

pub use recall_core::config::IntentPrecedence;

/// Replies asking for the next detail chunk.
pub const MORE_KEYWORDS: &[&str] = &[
    "yes", "sure", "more", "tell me", "explain", "detail", "please", "yeah", "yep", "ok", "okay",
    "go on", "elaborate",
];

/// Replies ending detail delivery.
pub const STOP_KEYWORDS: &[&str] = &[
    "no", "nah", "nope", "not now", "thanks", "enough", "stop", "quit", "done", "fine", "ok",
    "okay",
];

/// Greeting and farewell openers.
pub const GREETINGS: &[&str] = &[
    "hi",
    "hello",
    "hey",
    "bye",
    "goodbye",
    "see you",
    "good night",
    "good morning",
];

/// What a reply means while detail is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Reveal the next chunk
    More,
    /// Stop revealing and acknowledge
    Stop,
    /// Neither; treat the reply as a new question
    Other,
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}

/// True when `text` asks for more detail.
pub fn wants_more(text: &str) -> bool {
    contains_any(text, MORE_KEYWORDS)
}

/// True when `text` declines further detail.
pub fn wants_stop(text: &str) -> bool {
    contains_any(text, STOP_KEYWORDS)
}

/// True when `text` is, or opens with, a greeting or farewell.
///
/// Plain prefix match on the trimmed, lower-cased text, so "hello, how are
/// you" and "heya" are greetings while "well hello" is not.
pub fn is_greeting(text: &str) -> bool {
    let lower = text.trim().to_lowercase();
    GREETINGS.iter().any(|greeting| lower.starts_with(greeting))
}

/// Classify a follow-up reply, resolving overlapping keywords by `precedence`.
pub fn classify(text: &str, precedence: IntentPrecedence) -> Intent {
    let more = wants_more(text);
    let stop = wants_stop(text);

    let intent = match (more, stop, precedence) {
        (true, true, IntentPrecedence::MoreFirst) => Intent::More,
        (true, true, IntentPrecedence::StopFirst) => Intent::Stop,
        (true, false, _) => Intent::More,
        (false, true, _) => Intent::Stop,
        (false, false, _) => Intent::Other,
    };

    tracing::trace!("Classified {:?} as {:?}", text, intent);
    intent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wants_more() {
        assert!(wants_more("yes please"));
        assert!(wants_more("Tell me more"));
        assert!(wants_more("GO ON"));
        assert!(wants_more("could you elaborate?"));
        assert!(!wants_more("what is the capital of spain"));
    }

    #[test]
    fn test_wants_stop() {
        assert!(wants_stop("no thanks"));
        assert!(wants_stop("Nope"));
        assert!(wants_stop("that's enough"));
        assert!(wants_stop("not now"));
        assert!(!wants_stop("yes"));
    }

    #[test]
    fn test_substring_containment() {
        // "no" inside "know" counts
        assert!(wants_stop("I know"));
        // "more" inside "furthermore" counts
        assert!(wants_more("furthermore"));
    }

    #[test]
    fn test_is_greeting() {
        assert!(is_greeting("Hello there"));
        assert!(is_greeting("hello, how are you"));
        assert!(is_greeting("  Hi "));
        assert!(is_greeting("bye"));
        assert!(is_greeting("Good morning!"));
        assert!(is_greeting("see you tomorrow"));
        assert!(!is_greeting("well hello"));
        assert!(!is_greeting("what is the capital of france"));
        assert!(!is_greeting(""));
    }

    #[test]
    fn test_greeting_prefix_is_not_word_bounded() {
        assert!(is_greeting("heya"));
        assert!(is_greeting("hiking trails"));
        assert!(is_greeting("History of Rome"));
    }

    #[test]
    fn test_classify_plain() {
        assert_eq!(classify("yes", IntentPrecedence::MoreFirst), Intent::More);
        assert_eq!(classify("nah", IntentPrecedence::MoreFirst), Intent::Stop);
        assert_eq!(
            classify("what about Germany?", IntentPrecedence::MoreFirst),
            Intent::Other
        );
    }

    #[test]
    fn test_overlap_resolved_by_precedence() {
        assert!(wants_more("okay") && wants_stop("okay"));
        assert_eq!(classify("okay", IntentPrecedence::MoreFirst), Intent::More);
        assert_eq!(classify("okay", IntentPrecedence::StopFirst), Intent::Stop);
        assert_eq!(classify("Ok", IntentPrecedence::default()), Intent::More);
    }

    #[test]
    fn test_unambiguous_replies_ignore_precedence() {
        for precedence in [IntentPrecedence::MoreFirst, IntentPrecedence::StopFirst] {
            assert_eq!(classify("sure", precedence), Intent::More);
            assert_eq!(classify("stop", precedence), Intent::Stop);
        }
    }
}
