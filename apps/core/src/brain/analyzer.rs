//! Message Analyzer - keyword-driven classification of a single message.
//!
//! All matching is case-insensitive substring containment against the lexicon.
//! It is not word-boundary aware: `"sad"` matches inside `"saddle"`.
//!
//! The analysis itself is deterministic. Context tracking is a separate step
//! (`analyze_and_track`) so the pure part stays easy to test.

use tracing::debug;

use super::analysis::{Analysis, Intensity, Sentiment};
use super::context::ConversationContext;
use super::lexicon::{Lexicon, TagTable};

/// Weight an intense-emotion hit adds to its polarity counter
const INTENSE_WEIGHT: u32 = 2;

/// Words that suggest the message is about the user's day
const DAY_WORDS: &[&str] = &[
    "today", "tonight", "yesterday", "morning", "afternoon", "evening", "work", "lunch",
    "tired", "stress", "happy", "sad", "went", "did", "was", "been",
];

/// Words that suggest the message drifts away from the user's day
const OFF_TOPIC_WORDS: &[&str] = &[
    "weather", "news", "politics", "sports", "movie", "theory", "general", "abstract",
];

/// Energy words that raise intensity to `High`
const EXHAUSTED_WORDS: &[&str] = &[
    "exhausted", "drained", "burnt out", "burned out", "worn out", "wiped out", "tired",
];

/// Polarity an intense emotion category counts towards, if any
fn intense_polarity(emotion: &str) -> Option<Sentiment> {
    match emotion {
        "joy" | "excitement" | "love" | "pride" | "gratitude" => Some(Sentiment::Positive),
        "anger" | "sadness" | "fear" | "anxiety" | "frustration" | "grief" => {
            Some(Sentiment::Negative)
        }
        _ => None,
    }
}

/// Case-insensitive substring check; empty keywords never match
fn contains_keyword(lower: &str, keyword: &str) -> bool {
    !keyword.is_empty() && lower.contains(keyword.to_lowercase().as_str())
}

/// Per-polarity hit counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentScore {
    pub positive: u32,
    pub negative: u32,
    pub neutral: u32,
}

impl SentimentScore {
    /// Resolve counters into a sentiment and the mixed-emotion flag
    pub fn resolve(&self) -> (Sentiment, bool) {
        if self.positive > 0 && self.negative > 0 {
            let dominant = if self.positive > self.negative {
                Sentiment::Positive
            } else {
                Sentiment::Negative
            };
            (dominant, true)
        } else if self.positive > self.negative {
            (Sentiment::Positive, false)
        } else if self.negative > self.positive {
            (Sentiment::Negative, false)
        } else {
            // Neutral hits and no hits at all resolve the same way
            (Sentiment::Neutral, false)
        }
    }
}

/// Analyzer bound to a lexicon. An unloaded analyzer returns defaults.
#[derive(Debug, Clone, Copy)]
pub struct MessageAnalyzer<'a> {
    lexicon: Option<&'a Lexicon>,
}

impl<'a> MessageAnalyzer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon: Some(lexicon),
        }
    }

    /// Analyzer for a lexicon that has not been loaded yet
    pub fn unloaded() -> Self {
        Self { lexicon: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.lexicon.is_some()
    }

    /// Analyze a message and fold the result into the conversation context.
    ///
    /// Without a lexicon the default analysis is returned and the context is
    /// left untouched.
    pub fn analyze_and_track(&self, message: &str, context: &mut ConversationContext) -> Analysis {
        let analysis = self.analyze(message);
        if self.is_loaded() {
            context.record(&analysis);
        }
        analysis
    }

    /// Analyze a message without touching any context
    pub fn analyze(&self, message: &str) -> Analysis {
        let Some(lexicon) = self.lexicon else {
            debug!("Lexicon not loaded, returning default analysis");
            return Analysis::default();
        };

        let lower = message.to_lowercase();
        let mut analysis = Analysis::default();

        // 1. Sentiment tables and intense emotions
        let score = self.score_into(lexicon, &lower, &mut analysis);

        // 2. Resolve sentiment
        let (sentiment, mixed) = score.resolve();
        analysis.sentiment = sentiment;
        analysis.has_mixed_emotions = mixed;

        // 3. Context categories
        self.detect_context(lexicon, &lower, &mut analysis);

        // 4. Off-topic heuristic
        analysis.is_off_topic = self.is_off_topic(&lower, &analysis);

        debug!("Analyzed message: {}", analysis.summary());
        analysis
    }

    /// Count sentiment hits for a message
    pub fn score(&self, message: &str) -> SentimentScore {
        match self.lexicon {
            Some(lexicon) => {
                let mut scratch = Analysis::default();
                self.score_into(lexicon, &message.to_lowercase(), &mut scratch)
            }
            None => SentimentScore::default(),
        }
    }

    fn score_into(&self, lexicon: &Lexicon, lower: &str, analysis: &mut Analysis) -> SentimentScore {
        let mut score = SentimentScore::default();

        let tables: [(&[String], &mut u32); 3] = [
            (&lexicon.positive, &mut score.positive),
            (&lexicon.negative, &mut score.negative),
            (&lexicon.neutral, &mut score.neutral),
        ];
        for (words, counter) in tables {
            for word in words.iter().filter(|w| contains_keyword(lower, w)) {
                analysis.keywords.push(word.to_lowercase());
                analysis.emotional_words.push(word.to_lowercase());
                *counter += 1;
            }
        }

        for (emotion, words) in lexicon.intense_emotions.iter() {
            for word in words.iter().filter(|w| contains_keyword(lower, w)) {
                analysis.keywords.push(word.to_lowercase());
                analysis.emotional_words.push(word.to_lowercase());
                analysis.intensity = Intensity::Intense;

                match intense_polarity(emotion) {
                    Some(Sentiment::Positive) => score.positive += INTENSE_WEIGHT,
                    Some(Sentiment::Negative) => score.negative += INTENSE_WEIGHT,
                    _ => {}
                }
            }
        }

        score
    }

    fn detect_context(&self, lexicon: &Lexicon, lower: &str, analysis: &mut Analysis) {
        for (tag, word) in first_hits(&lexicon.activities, lower) {
            analysis.activities.push(tag.to_string());
            analysis.context_clues.push(format!("{}: {}", tag, word));
        }

        for (tag, _) in first_hits(&lexicon.time_references, lower) {
            analysis.time_references.push(tag.to_string());
            analysis.context_clues.push(format!("time: {}", tag));
        }

        for (tag, word) in first_hits(&lexicon.relationships, lower) {
            analysis.has_person_reference = true;
            analysis.people.push(tag.to_string());
            analysis.context_clues.push(format!("{}: {}", tag, word));
        }

        for (tag, _) in first_hits(&lexicon.weather, lower) {
            analysis.context_clues.push(format!("weather: {}", tag));
        }

        for (tag, _) in first_hits(&lexicon.food_mood, lower) {
            analysis.context_clues.push(format!("food: {}", tag));
        }

        for (tag, _) in first_hits(&lexicon.energy, lower) {
            analysis.context_clues.push(format!("energy: {}", tag));
        }

        // Any exhausted-like hit counts, not just the tag's first match
        let exhausted = lexicon.energy.iter().any(|(_, words)| {
            words.iter().any(|w| {
                contains_keyword(lower, w) && EXHAUSTED_WORDS.contains(&w.to_lowercase().as_str())
            })
        });
        if exhausted {
            analysis.intensity = analysis.intensity.max(Intensity::High);
        }
    }

    fn is_off_topic(&self, lower: &str, analysis: &Analysis) -> bool {
        let day_score = DAY_WORDS.iter().filter(|w| lower.contains(*w)).count();
        let off_score = OFF_TOPIC_WORDS.iter().filter(|w| lower.contains(*w)).count();

        off_score > day_score
            && !lower.contains("my day")
            && !lower.contains("i ")
            && analysis.context_clues.is_empty()
    }
}

/// For each tag with at least one hit, the tag and its first matching keyword
fn first_hits<'t>(table: &'t TagTable, lower: &str) -> Vec<(&'t str, &'t str)> {
    table
        .iter()
        .filter_map(|(tag, words)| {
            words
                .iter()
                .find(|w| contains_keyword(lower, w))
                .map(|word| (tag, word.as_str()))
        })
        .collect()
}
