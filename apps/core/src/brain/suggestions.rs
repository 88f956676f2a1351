//! Suggestion Generator - quick-reply chips for the UI.
//!
//! Picks one fixed set based on how long the conversation is and where the
//! recent emotional trend points.

use super::analysis::Sentiment;
use super::context::ConversationContext;

/// How many recent sentiments decide the trend
const TREND_WINDOW: usize = 3;

/// Conversations at or below this many turns get the opening set
const OPENING_HISTORY_LEN: usize = 2;

const OPENING: [&str; 4] = [
    "My day was great!",
    "Honestly, pretty rough",
    "Work was a lot today",
    "Just an okay day",
];

const NEGATIVE_COPING: [&str; 4] = [
    "I just need to vent",
    "I'm really exhausted",
    "How do I stop overthinking?",
    "Something good did happen too",
];

const POSITIVE: [&str; 4] = [
    "It just kept getting better!",
    "I'm proud of myself today",
    "Spent time with people I love",
    "What should I do to celebrate?",
];

const WORK: [&str; 4] = [
    "My boss was being difficult",
    "I finished a big project",
    "Meetings all day...",
    "My coworkers were great",
];

const SOCIAL: [&str; 4] = [
    "Hung out with friends",
    "Had some drama with someone",
    "Met someone new",
    "I needed some alone time after",
];

const MORNING: [&str; 4] = [
    "Couldn't get out of bed",
    "Had a really good breakfast",
    "The commute was awful",
    "I'm not a morning person",
];

const EVENING: [&str; 4] = [
    "Finally relaxing now",
    "Can't wait to sleep",
    "Still have stuff to do tonight",
    "Watching something fun later",
];

const TYPICAL_DAY: [&str; 4] = [
    "It was a mixed bag",
    "Nothing special happened",
    "A bit of everything",
    "Tell you about my evening?",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionGenerator;

impl SuggestionGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Quick replies for the current context; always four entries
    pub fn generate(&self, context: &ConversationContext, history_len: usize) -> Vec<String> {
        self.pick(context, history_len)
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn pick(&self, context: &ConversationContext, history_len: usize) -> &'static [&'static str] {
        if history_len <= OPENING_HISTORY_LEN {
            return &OPENING;
        }

        let recent: Vec<Sentiment> = context.recent(TREND_WINDOW).collect();
        if recent.contains(&Sentiment::Negative) {
            return &NEGATIVE_COPING;
        }
        if recent.contains(&Sentiment::Positive) {
            return &POSITIVE;
        }

        match context.last_activity() {
            Some("work") => return &WORK,
            Some("social") => return &SOCIAL,
            _ => {}
        }

        match context.time_of_day() {
            Some("morning") => &MORNING,
            Some("evening") => &EVENING,
            _ => &TYPICAL_DAY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::analysis::Analysis;

    fn record(context: &mut ConversationContext, sentiment: Sentiment, activity: Option<&str>, time: Option<&str>) {
        context.record(&Analysis {
            sentiment,
            activities: activity.map(|a| vec![a.to_string()]).unwrap_or_default(),
            time_references: time.map(|t| vec![t.to_string()]).unwrap_or_default(),
            ..Analysis::default()
        });
    }

    #[test]
    fn test_opening_set() {
        let mut context = ConversationContext::new();
        record(&mut context, Sentiment::Negative, None, None);

        let suggestions = SuggestionGenerator::new().generate(&context, 2);
        assert_eq!(suggestions, OPENING);
    }

    #[test]
    fn test_negative_trend_wins() {
        let mut context = ConversationContext::new();
        record(&mut context, Sentiment::Positive, Some("work"), None);
        record(&mut context, Sentiment::Negative, None, None);

        let suggestions = SuggestionGenerator::new().generate(&context, 4);
        assert_eq!(suggestions, NEGATIVE_COPING);
    }

    #[test]
    fn test_positive_trend() {
        let mut context = ConversationContext::new();
        record(&mut context, Sentiment::Positive, None, None);
        record(&mut context, Sentiment::Neutral, None, None);

        assert_eq!(SuggestionGenerator::new().generate(&context, 4), POSITIVE);
    }

    #[test]
    fn test_old_negatives_fall_out_of_window() {
        let mut context = ConversationContext::new();
        record(&mut context, Sentiment::Negative, None, None);
        for _ in 0..3 {
            record(&mut context, Sentiment::Neutral, None, None);
        }

        assert_eq!(SuggestionGenerator::new().generate(&context, 8), TYPICAL_DAY);
    }

    #[test]
    fn test_activity_then_time() {
        let mut context = ConversationContext::new();
        record(&mut context, Sentiment::Neutral, None, Some("evening"));
        let generator = SuggestionGenerator::new();
        assert_eq!(generator.generate(&context, 4), EVENING);

        record(&mut context, Sentiment::Neutral, Some("social"), None);
        assert_eq!(generator.generate(&context, 6), SOCIAL);

        record(&mut context, Sentiment::Neutral, Some("work"), Some("morning"));
        assert_eq!(generator.generate(&context, 8), WORK);
    }

    #[test]
    fn test_morning() {
        let mut context = ConversationContext::new();
        record(&mut context, Sentiment::Neutral, Some("exercise"), Some("morning"));

        assert_eq!(SuggestionGenerator::new().generate(&context, 3), MORNING);
    }
}
