//! Lexicon Store - keyword tables and response pools.
//!
//! Loaded once from a JSON document and immutable afterwards. Every section is
//! optional: a missing category reads as an empty list, never as an error.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::analysis::Sentiment;
use crate::error::AppError;

/// Reply used when the document itself could not be loaded
pub const BUILTIN_FALLBACK_REPLY: &str =
    "I'm having trouble loading my responses, but I'm still here to listen! How was your day?";

/// Ordered mapping from a tag (e.g. `work`) to the keywords that signal it.
///
/// Document order is preserved so "first detected tag" is well defined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagTable(Vec<(String, Vec<String>)>);

impl TagTable {
    pub fn new(entries: Vec<(String, Vec<String>)>) -> Self {
        Self(entries)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(tag, words)| (tag.as_str(), words.as_slice()))
    }

    /// Keywords for a tag, empty when the tag is unknown
    pub fn get(&self, tag: &str) -> &[String] {
        self.0
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build a table from borrowed pairs, mostly for hand-written lexicons
    pub fn from_pairs(pairs: Vec<(&str, Vec<&str>)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(tag, words)| {
                    (tag.to_string(), words.into_iter().map(str::to_string).collect())
                })
                .collect(),
        )
    }
}

impl<'de> Deserialize<'de> for TagTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TagTableVisitor;

        impl<'de> Visitor<'de> for TagTableVisitor {
            type Value = TagTable;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of tag to keyword list")
            }

            fn visit_map<A>(self, mut map: A) -> Result<TagTable, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((tag, words)) = map.next_entry::<String, Vec<String>>()? {
                    entries.push((tag, words));
                }
                Ok(TagTable(entries))
            }
        }

        deserializer.deserialize_map(TagTableVisitor)
    }
}

/// Categorized keyword tables used by the analyzer
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    pub neutral: Vec<String>,
    /// emotion (joy, anger, ...) → keywords
    pub intense_emotions: TagTable,
    pub activities: TagTable,
    pub time_references: TagTable,
    pub relationships: TagTable,
    pub weather: TagTable,
    pub food_mood: TagTable,
    pub energy: TagTable,
}

/// mode → templates
pub type ModePools = BTreeMap<String, Vec<String>>;
/// generation → mode → templates
pub type GenerationPools = BTreeMap<String, ModePools>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeoplePools {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsesSection {
    pub positive: GenerationPools,
    pub negative: GenerationPools,
    pub neutral: GenerationPools,
    pub people: PeoplePools,
    pub followup: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecializedResponses {
    pub mixed_emotions: Vec<String>,
    pub intense_emotions: Vec<String>,
    /// time tag → templates
    pub time_specific: BTreeMap<String, Vec<String>>,
}

/// Every reply pool the selector can draw from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponseBank {
    pub responses: ResponsesSection,
    pub specialized_responses: SpecializedResponses,
    /// activity tag → templates
    pub activities: BTreeMap<String, Vec<String>>,
    pub fallback: Vec<String>,
    pub redirect: Vec<String>,
}

impl ResponseBank {
    /// `responses[sentiment][generation][mode]`, empty when any level is missing
    pub fn primary_pool(&self, sentiment: Sentiment, generation: &str, mode: &str) -> &[String] {
        let by_generation = match sentiment {
            Sentiment::Positive => &self.responses.positive,
            Sentiment::Negative => &self.responses.negative,
            Sentiment::Neutral => &self.responses.neutral,
        };
        by_generation
            .get(generation)
            .and_then(|modes| modes.get(mode))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// People pool for a sentiment; neutral draws from both sides
    pub fn people_pool(&self, sentiment: Sentiment) -> Vec<&String> {
        let people = &self.responses.people;
        match sentiment {
            Sentiment::Positive => people.positive.iter().collect(),
            Sentiment::Negative => people.negative.iter().collect(),
            Sentiment::Neutral => people.positive.iter().chain(&people.negative).collect(),
        }
    }

    pub fn time_pool(&self, time: &str) -> &[String] {
        self.specialized_responses
            .time_specific
            .get(time)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn activity_pool(&self, activity: &str) -> &[String] {
        self.activities.get(activity).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Shape of the JSON document on disk
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawDocument {
    keywords: Lexicon,
    responses: ResponsesSection,
    specialized_responses: SpecializedResponses,
    activities: BTreeMap<String, Vec<String>>,
    fallback: Vec<String>,
    redirect: Vec<String>,
}

impl From<RawDocument> for ResponseDocument {
    fn from(raw: RawDocument) -> Self {
        Self {
            lexicon: raw.keywords,
            bank: ResponseBank {
                responses: raw.responses,
                specialized_responses: raw.specialized_responses,
                activities: raw.activities,
                fallback: raw.fallback,
                redirect: raw.redirect,
            },
        }
    }
}

/// The loaded lexicon and response bank
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawDocument")]
pub struct ResponseDocument {
    pub lexicon: Lexicon,
    pub bank: ResponseBank,
}

impl ResponseDocument {
    /// Parse a document from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, AppError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a document from disk
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let unavailable = |reason: String| AppError::LexiconUnavailable {
            path: path.to_path_buf(),
            reason,
        };

        let json = fs::read_to_string(path).map_err(|e| unavailable(e.to_string()))?;
        let document: Self = serde_json::from_str(&json).map_err(|e| unavailable(e.to_string()))?;

        info!(
            "Responses loaded from {} ({} fallback, {} redirect templates)",
            path.display(),
            document.bank.fallback.len(),
            document.bank.redirect.len()
        );
        Ok(document)
    }

    /// Load a document, substituting the built-in one on any failure
    pub fn load_or_builtin(path: &Path) -> Self {
        match Self::load(path) {
            Ok(document) => document,
            Err(e) => {
                warn!("{}. Using built-in responses.", e);
                Self::builtin()
            }
        }
    }

    /// Minimal lexicon and response set used when loading fails
    pub fn builtin() -> Self {
        let words = |list: &[&str]| list.iter().map(|w| w.to_string()).collect::<Vec<_>>();

        Self {
            lexicon: Lexicon {
                positive: words(&["good", "great", "happy"]),
                negative: words(&["bad", "sad", "tired"]),
                neutral: words(&["okay", "fine", "meh"]),
                ..Lexicon::default()
            },
            bank: ResponseBank {
                fallback: vec![BUILTIN_FALLBACK_REPLY.to_string()],
                ..ResponseBank::default()
            },
        }
    }
}
