//! Conversations and their sessions, keyed by id.

use crate::session::DialogSession;
use std::collections::HashMap;

/// One user's conversation. Owns its dialog session exclusively.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    id: String,
    session: DialogSession,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session: DialogSession::idle(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn session(&self) -> &DialogSession {
        &self.session
    }

    /// Take the session out, leaving an idle one behind.
    pub fn take_session(&mut self) -> DialogSession {
        std::mem::take(&mut self.session)
    }

    pub fn set_session(&mut self, session: DialogSession) {
        self.session = session;
    }

    pub fn reset_session(&mut self) {
        self.session = DialogSession::idle();
    }
}

/// Conversations for a multi-user host.
///
/// Each id maps to its own [`Conversation`]; a turn borrows exactly one of
/// them mutably, so sessions never leak between users.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    conversations: HashMap<String, Conversation>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation for `id`, created on first use.
    pub fn get_or_create(&mut self, id: &str) -> &mut Conversation {
        self.conversations
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::debug!("New conversation: {}", id);
                Conversation::new(id)
            })
    }

    pub fn get(&self, id: &str) -> Option<&Conversation> {
        self.conversations.get(id)
    }

    /// Drop a finished conversation.
    pub fn remove(&mut self, id: &str) -> Option<Conversation> {
        self.conversations.remove(id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
