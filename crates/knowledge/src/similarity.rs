//! Fuzzy question similarity on a 0-100 scale.

/// Case-insensitive similarity of `a` and `b`, from 0 (nothing in common)
/// to 100 (identical).
///
/// The score is rapidfuzz's normalized Indel ratio over characters. Two
/// empty strings are identical.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }

    let a = a.to_lowercase();
    let b = b.to_lowercase();
    rapidfuzz::fuzz::ratio(a.chars(), b.chars()) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(ratio("capital of france", "capital of france"), 100.0);
        assert_eq!(ratio("", ""), 100.0);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(ratio("abc", "xyz"), 0.0);
        assert_eq!(ratio("abc", ""), 0.0);
    }

    #[test]
    fn test_known_value() {
        // LCS("kitten", "sitting") = "ittn" (4): 200 * 4 / 13
        let score = ratio("kitten", "sitting");
        assert!((score - 61.538).abs() < 0.01, "got {}", score);
    }

    #[test]
    fn test_symmetric() {
        let a = "what is the capital of france";
        let b = "whats the capital of france?";
        assert!((ratio(a, b) - ratio(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_ignores_case() {
        assert_eq!(ratio("Capital of France", "capital of france"), 100.0);
    }

    #[test]
    fn test_small_wording_difference_stays_above_85() {
        let score = ratio("What is the capital of France?", "what is the capital of france");
        assert!(score > 85.0, "got {}", score);
    }

    #[test]
    fn test_unicode_counts_characters() {
        // Multi-byte characters count once each
        assert!((ratio("café", "cafe") - 75.0).abs() < 1e-9);
    }
}
