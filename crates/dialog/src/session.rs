//! Per-conversation detail delivery state.
//!
//! A session holds the detail chunks of the last answer and a cursor to the
//! next unsent one. Transitions are pure: [`DialogSession::apply`] consumes
//! the session and returns its successor together with what to say.

use crate::intent::Intent;
use rand::Rng;

/// Re-prompt shown while chunks remain.
pub const MORE_PROMPT: &str = "Would you like to hear more?";

/// Acknowledgements for a declined follow-up, one picked at random.
pub const ACKNOWLEDGEMENTS: &[&str] = &[
    "Okay, let me know if you want to learn something else!",
    "Sure thing. Ask me anything else whenever you like.",
    "No problem! What else would you like to know?",
    "Alright, I'll stop there.",
    "Got it. Happy to help with something else.",
    "Fair enough! I'm here if you have another question.",
];

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogState {
    /// No detail pending
    Idle,
    /// Detail chunks remain and the user was asked whether to continue
    AwaitingFollowUp,
}

/// Result of applying a reply to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowUp {
    /// The next chunk was revealed
    Reveal {
        chunk: String,
        /// Zero-based position of `chunk`
        index: usize,
        total: usize,
        /// Whether to re-prompt with [`MORE_PROMPT`]
        more_remaining: bool,
    },
    /// The user declined; the message acknowledges it
    Acknowledge(&'static str),
    /// The reply was not a follow-up; the session was dropped silently
    Abandoned,
}

/// Chunk sequence plus cursor to the next unsent chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DialogSession {
    chunks: Vec<String>,
    cursor: usize,
}

impl DialogSession {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Start delivering `chunks`. An empty sequence stays idle.
    pub fn begin(chunks: Vec<String>) -> Self {
        Self { chunks, cursor: 0 }
    }

    /// Current state. A cursor at or past the end reads as idle.
    pub fn state(&self) -> DialogState {
        if self.cursor < self.chunks.len() {
            DialogState::AwaitingFollowUp
        } else {
            DialogState::Idle
        }
    }

    pub fn is_awaiting(&self) -> bool {
        self.state() == DialogState::AwaitingFollowUp
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Chunks not yet revealed.
    pub fn remaining(&self) -> &[String] {
        self.chunks.get(self.cursor..).unwrap_or(&[])
    }

    /// Apply a classified reply.
    ///
    /// `More` reveals `chunks[cursor]` and advances; after the last chunk the
    /// session is idle and no re-prompt is due. `Stop` picks an
    /// acknowledgement with `rng` and resets. `Other`, or any reply while
    /// idle, resets without a message.
    pub fn apply<R: Rng + ?Sized>(self, intent: Intent, rng: &mut R) -> (Self, FollowUp) {
        if !self.is_awaiting() {
            return (Self::idle(), FollowUp::Abandoned);
        }

        match intent {
            Intent::More => {
                let Self { mut chunks, cursor } = self;
                let total = chunks.len();
                let chunk = std::mem::take(&mut chunks[cursor]);
                let next = cursor + 1;

                let session = if next < total {
                    Self {
                        chunks,
                        cursor: next,
                    }
                } else {
                    Self::idle()
                };

                tracing::debug!("Revealed chunk {}/{}", next, total);

                (
                    session,
                    FollowUp::Reveal {
                        chunk,
                        index: cursor,
                        total,
                        more_remaining: next < total,
                    },
                )
            }
            Intent::Stop => {
                let message = ACKNOWLEDGEMENTS[rng.gen_range(0..ACKNOWLEDGEMENTS.len())];
                tracing::debug!(
                    "Follow-up declined with {} chunk(s) unsent",
                    self.remaining().len()
                );
                (Self::idle(), FollowUp::Acknowledge(message))
            }
            Intent::Other => {
                tracing::debug!("Follow-up abandoned for a new question");
                (Self::idle(), FollowUp::Abandoned)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn chunks(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Chunk {}.", i)).collect()
    }

    #[test]
    fn test_begin() {
        let session = DialogSession::begin(chunks(2));
        assert_eq!(session.state(), DialogState::AwaitingFollowUp);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.chunk_count(), 2);

        assert_eq!(DialogSession::begin(vec![]).state(), DialogState::Idle);
        assert_eq!(DialogSession::default().state(), DialogState::Idle);
    }

    #[test]
    fn test_n_reveals_return_to_idle() {
        let mut rng = StdRng::seed_from_u64(7);

        for n in 1..=5 {
            let mut session = DialogSession::begin(chunks(n));

            for i in 0..n {
                assert!(session.is_awaiting());
                let (next, follow_up) = session.apply(Intent::More, &mut rng);
                match follow_up {
                    FollowUp::Reveal {
                        chunk,
                        index,
                        total,
                        more_remaining,
                    } => {
                        assert_eq!(chunk, format!("Chunk {}.", i));
                        assert_eq!(index, i);
                        assert_eq!(total, n);
                        assert_eq!(more_remaining, i + 1 < n);
                    }
                    other => panic!("expected a reveal, got {:?}", other),
                }
                session = next;
            }

            assert_eq!(session.state(), DialogState::Idle);

            // Nothing past the end
            let (session, follow_up) = session.apply(Intent::More, &mut rng);
            assert_eq!(follow_up, FollowUp::Abandoned);
            assert_eq!(session.state(), DialogState::Idle);
        }
    }

    #[test]
    fn test_stop_acknowledges_and_resets() {
        let mut rng = StdRng::seed_from_u64(42);
        let session = DialogSession::begin(chunks(3));

        let (session, follow_up) = session.apply(Intent::Stop, &mut rng);
        match follow_up {
            FollowUp::Acknowledge(message) => assert!(ACKNOWLEDGEMENTS.contains(&message)),
            other => panic!("expected an acknowledgement, got {:?}", other),
        }
        assert_eq!(session, DialogSession::idle());
    }

    #[test]
    fn test_acknowledgement_is_deterministic_for_a_seed() {
        let pick = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            DialogSession::begin(chunks(1)).apply(Intent::Stop, &mut rng).1
        };
        assert_eq!(pick(3), pick(3));
    }

    #[test]
    fn test_acknowledgement_pool() {
        assert!(ACKNOWLEDGEMENTS.len() >= 5);

        let mut rng = StdRng::seed_from_u64(0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            if let (_, FollowUp::Acknowledge(m)) =
                DialogSession::begin(chunks(1)).apply(Intent::Stop, &mut rng)
            {
                seen.insert(m);
            }
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn test_other_abandons() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = DialogSession::begin(chunks(2));
        let (session, follow_up) = session.apply(Intent::Other, &mut rng);
        assert_eq!(follow_up, FollowUp::Abandoned);
        assert!(!session.is_awaiting());
    }

    #[test]
    fn test_remaining() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = DialogSession::begin(chunks(3));
        assert_eq!(session.remaining().len(), 3);

        let (session, _) = session.apply(Intent::More, &mut rng);
        assert_eq!(session.remaining(), &["Chunk 1.".to_string(), "Chunk 2.".to_string()]);
        assert!(DialogSession::idle().remaining().is_empty());
    }
}
