//! Conversation Context Tracker.
//!
//! Rolling per-conversation state updated after every analyzed message.
//! One instance per conversation; it is never shared between conversations.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::analysis::{Analysis, Intensity, Sentiment};

/// Maximum number of sentiments kept in the emotional pattern
pub const EMOTIONAL_PATTERN_CAPACITY: usize = 10;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Most recent sentiments, oldest first
    emotional_pattern: VecDeque<Sentiment>,
    last_activity: Option<String>,
    time_of_day: Option<String>,
    people_involved: Vec<String>,
    intensity_level: Intensity,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one analysis into the context.
    ///
    /// Activity and time of day only change when the message mentions one, so
    /// they carry over across messages that don't.
    pub fn record(&mut self, analysis: &Analysis) {
        self.push_sentiment(analysis.sentiment);

        if let Some(activity) = analysis.primary_activity() {
            self.last_activity = Some(activity.to_string());
        }
        if let Some(time) = analysis.primary_time() {
            self.time_of_day = Some(time.to_string());
        }
        self.people_involved.extend(analysis.people.iter().cloned());
        self.intensity_level = analysis.intensity;
    }

    fn push_sentiment(&mut self, sentiment: Sentiment) {
        self.emotional_pattern.push_back(sentiment);
        while self.emotional_pattern.len() > EMOTIONAL_PATTERN_CAPACITY {
            self.emotional_pattern.pop_front();
        }
    }

    pub fn emotional_pattern(&self) -> impl Iterator<Item = Sentiment> + '_ {
        self.emotional_pattern.iter().copied()
    }

    pub fn pattern_len(&self) -> usize {
        self.emotional_pattern.len()
    }

    /// The last `n` sentiments, oldest first
    pub fn recent(&self, n: usize) -> impl Iterator<Item = Sentiment> + '_ {
        let skip = self.emotional_pattern.len().saturating_sub(n);
        self.emotional_pattern.iter().skip(skip).copied()
    }

    pub fn last_activity(&self) -> Option<&str> {
        self.last_activity.as_deref()
    }

    pub fn time_of_day(&self) -> Option<&str> {
        self.time_of_day.as_deref()
    }

    pub fn people_involved(&self) -> &[String] {
        &self.people_involved
    }

    pub fn intensity_level(&self) -> Intensity {
        self.intensity_level
    }
}
