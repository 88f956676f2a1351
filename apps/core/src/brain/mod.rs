//! # Brain Module
//!
//! Rule-based analysis and reply selection for DayChat.
//! No model inference: every decision comes from the keyword lexicon and the
//! response bank loaded at startup.
//!
//! ## Components
//! - `lexicon`: Keyword tables and response pools (loaded once, immutable)
//! - `analysis`: Per-message output data structure
//! - `analyzer`: Substring-based message classification
//! - `context`: Rolling conversation context
//! - `selector`: Priority cascade and weighted random reply choice
//! - `suggestions`: Quick-reply chips

pub mod analysis;
pub mod analyzer;
pub mod context;
pub mod lexicon;
pub mod selector;
pub mod suggestions;

pub use analysis::{Analysis, Intensity, Sentiment};
pub use analyzer::{MessageAnalyzer, SentimentScore};
pub use context::{ConversationContext, EMOTIONAL_PATTERN_CAPACITY};
pub use lexicon::{Lexicon, ResponseBank, ResponseDocument, TagTable};
pub use selector::{ResponseSelector, Selection, SelectionInput, SelectionRule, DEFAULT_REPLY};
pub use suggestions::SuggestionGenerator;
