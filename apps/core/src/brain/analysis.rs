//! Analysis - Output structure for message analysis.
//!
//! Contains every signal extracted from a single user message. Created fresh
//! per message; its lasting effects live in the conversation context.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall emotional polarity of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[default]
    Neutral,
}

impl Sentiment {
    /// Key used to index the response bank
    pub fn key(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Coarse escalation level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    #[default]
    Normal,
    High,
    Intense,
}

impl Intensity {
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Normal => "normal",
            Intensity::High => "high",
            Intensity::Intense => "intense",
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete analysis of one user message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sentiment: Sentiment,
    pub intensity: Intensity,

    /// Both positive and negative signals were found
    pub has_mixed_emotions: bool,

    /// A relationship keyword was found
    pub has_person_reference: bool,

    pub is_off_topic: bool,

    /// Every matched keyword, in detection order (duplicates allowed)
    pub keywords: Vec<String>,

    /// Keywords that came from the sentiment or intense-emotion tables
    pub emotional_words: Vec<String>,

    /// Detected activity tags
    pub activities: Vec<String>,

    /// Detected time-of-day tags
    pub time_references: Vec<String>,

    /// Detected relationship tags
    pub people: Vec<String>,

    /// Tagged evidence strings such as `"work: meeting"`
    pub context_clues: Vec<String>,
}

impl Analysis {
    /// First detected activity tag
    pub fn primary_activity(&self) -> Option<&str> {
        self.activities.first().map(String::as_str)
    }

    /// First detected time reference
    pub fn primary_time(&self) -> Option<&str> {
        self.time_references.first().map(String::as_str)
    }

    /// Category prefix of the first context clue (`"work"` for `"work: meeting"`)
    pub fn first_clue_category(&self) -> Option<&str> {
        self.context_clues
            .first()
            .map(|clue| clue.split(':').next().unwrap_or(clue).trim())
    }

    /// Value substituted into `{keyword}` placeholders
    pub fn substitution_word(&self) -> &str {
        self.emotional_words
            .first()
            .or_else(|| self.keywords.first())
            .map(String::as_str)
            .unwrap_or("interesting")
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Sentiment: {}, Intensity: {}, Mixed: {}, Keywords: {}, Clues: {}, OffTopic: {}",
            self.sentiment,
            self.intensity,
            self.has_mixed_emotions,
            self.keywords.len(),
            self.context_clues.len(),
            self.is_off_topic
        )
    }
}
