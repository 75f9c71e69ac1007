//! Answer delivery for the Recall agent.
//!
//! An answer is split into a one-sentence lead and a detail remainder; the
//! detail is paginated into sentence-aligned chunks that are revealed one
//! at a time while the user keeps asking for more.
//!
//! - [`splitter`]: lead sentence / detail split
//! - [`chunker`]: bounded, sentence-respecting chunks
//! - [`intent`]: "more" / "stop" / greeting keyword predicates
//! - [`session`]: per-conversation delivery state machine
//! - [`conversation`]: conversations keyed by id
//! - [`pipeline`]: memory lookup, generation, delivery and learning

pub mod chunker;
pub mod conversation;
pub mod intent;
pub mod pipeline;
pub mod session;
pub mod splitter;

// Re-export the public surface
pub use chunker::{chunk_detail, DEFAULT_CHUNK_MAX_LEN};
pub use conversation::{Conversation, SessionRegistry};
pub use intent::{classify, is_greeting, wants_more, wants_stop, Intent, IntentPrecedence};
pub use pipeline::{
    Answer, AnswerPipeline, AnswerSource, Confirmation, PendingFact, PipelineSettings,
    TurnOutcome,
};
pub use session::{DialogSession, DialogState, FollowUp, ACKNOWLEDGEMENTS, MORE_PROMPT};
pub use splitter::{split_answer, SplitAnswer};
