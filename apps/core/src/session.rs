//! Per-conversation state.
//!
//! Everything that changes during a conversation lives here and is passed
//! explicitly to the engine. A host running several conversations keeps one
//! `SessionState` per conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::brain::ConversationContext;
use crate::models::{ChatTurn, Settings};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionState {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub settings: Settings,
    pub context: ConversationContext,
    history: Vec<ChatTurn>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SessionState {
    pub fn new(settings: Settings) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            settings,
            context: ConversationContext::new(),
            history: Vec::new(),
        }
    }

    /// Change the topic domain (books/tv/music)
    pub fn set_mode(&mut self, mode: impl Into<String>) {
        self.settings.mode = mode.into();
    }

    /// Change the age-cohort voice
    pub fn set_generation(&mut self, generation: impl Into<String>) {
        self.settings.generation = generation.into();
    }

    pub fn record_user(&mut self, text: impl Into<String>) {
        self.history.push(ChatTurn::user(text));
    }

    pub fn record_bot(&mut self, text: impl Into<String>) {
        self.history.push(ChatTurn::bot(text));
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Number of recorded turns, user and bot alike
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn has_history(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speaker;

    #[test]
    fn test_new_session_is_empty() {
        let session = SessionState::default();

        assert!(!session.has_history());
        assert_eq!(session.settings, Settings::default());
        assert_eq!(session.context.pattern_len(), 0);
    }

    #[test]
    fn test_settings_changes() {
        let mut session = SessionState::default();
        session.set_mode("music");
        session.set_generation("genZ");

        assert_eq!(session.settings, Settings::new("music", "genZ"));
    }

    #[test]
    fn test_history_order() {
        let mut session = SessionState::default();
        session.record_user("hi");
        session.record_bot("hello!");

        let speakers: Vec<Speaker> = session.history().iter().map(|t| t.speaker).collect();
        assert_eq!(speakers, vec![Speaker::User, Speaker::Bot]);
        assert!(session.history()[0].is_user());
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn test_sessions_have_distinct_ids() {
        assert_ne!(SessionState::default().id, SessionState::default().id);
    }
}
