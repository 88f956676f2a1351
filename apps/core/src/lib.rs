//! DayChat Core
//!
//! A rule-based "how was your day" companion: classifies each message against
//! a keyword lexicon, tracks the conversation's emotional trend, and picks a
//! reply from weighted template pools.
//!
//! The UI shell (rendering, typing indicator, input handling) is not part of
//! this crate. It calls [`ChatEngine::respond`] with a message and the
//! conversation's [`SessionState`], then renders the returned [`Reply`].

pub mod brain;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod models;
pub mod session;

#[cfg(test)]
mod tests;

pub use config::{EngineConfig, LoggingConfig};
pub use engine::{ChatEngine, Reply};
pub use error::AppError;
pub use models::{ChatTurn, Settings, Speaker};
pub use session::SessionState;
