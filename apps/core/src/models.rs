use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default topic domain of the bot's voice.
pub const DEFAULT_MODE: &str = "tv";
/// Default age-cohort voice.
pub const DEFAULT_GENERATION: &str = "millennial";

/// The user-selected personality axes used to index the response bank.
///
/// Both axes are open sets (`tv`, `books`, `music`, ... and `millennial`,
/// `genZ`, ...); an unknown value simply selects an empty pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Topic domain (e.g., "tv", "books", "music").
    pub mode: String,
    /// Age-cohort voice (e.g., "millennial", "genZ").
    pub generation: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            generation: DEFAULT_GENERATION.to_string(),
        }
    }
}

impl Settings {
    pub fn new(mode: impl Into<String>, generation: impl Into<String>) -> Self {
        Self {
            mode: mode.into(),
            generation: generation.into(),
        }
    }
}

/// Who produced a chat turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// Represents a single message within a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// The sender of the message.
    pub speaker: Speaker,
    /// The text content of the message.
    pub text: String,
    /// When the message was recorded.
    pub at: DateTime<Utc>,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Speaker::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Speaker::Bot, text)
    }

    fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.speaker == Speaker::User
    }
}
