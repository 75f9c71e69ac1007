//! Sentence-aligned chunking of answer detail.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default maximum chunk length, in characters.
pub const DEFAULT_CHUNK_MAX_LEN: usize = recall_core::config::DEFAULT_CHUNK_MAX_LENGTH;

/// A terminal mark followed by whitespace ends a sentence.
static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]\s+").expect("sentence break regex is valid"));

/// Split `text` into sentences, keeping each terminal mark.
///
/// Sentences that are empty after trimming are dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_BREAK.find_iter(text) {
        // The mark is one ASCII byte
        sentences.push(&text[start..m.start() + 1]);
        start = m.end();
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Pack the sentences of `text` into chunks of at most `max_len` characters.
///
/// Sentences are added greedily, joined by one space, while
/// `current + sentence + 1 <= max_len`. A sentence is never split: one that
/// is longer than `max_len` on its own becomes a single oversized chunk.
/// Empty input yields no chunks.
pub fn chunk_detail(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();

        if current_len + sentence_len + 1 <= max_len {
            if !current.is_empty() {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(sentence);
            current_len += sentence_len;
        } else {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            current.push_str(sentence);
            current_len = sentence_len;
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    tracing::debug!(
        "Chunked {} chars of detail into {} chunk(s) (max {})",
        text.chars().count(),
        chunks.len(),
        max_len
    );

    chunks
}
