//! Engine configuration.
//!
//! Defaults suit a local demo; every field can be overridden through
//! `DAYCHAT_*` environment variables (a `.env` file is honoured when present).

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::debug;
use validator::{Validate, ValidationError};

use crate::error::AppError;
use crate::models::{DEFAULT_GENERATION, DEFAULT_MODE};

const DEFAULT_RESPONSES_PATH: &str = "responses.json";

/// Logging output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[validate(length(min = 1))]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

/// Represents the configuration of a chat engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_delay_range"))]
pub struct EngineConfig {
    /// Path of the lexicon/response JSON document.
    pub responses_path: PathBuf,
    /// Mode given to new sessions.
    #[validate(length(min = 1))]
    pub default_mode: String,
    /// Generation given to new sessions.
    #[validate(length(min = 1))]
    pub default_generation: String,
    /// Chance of a follow-up question after a reply. Value between 0.0 and 1.0.
    #[validate(range(min = 0.0, max = 1.0))]
    pub followup_probability: f64,
    /// Lower bound of the simulated typing delay hosts may show.
    pub min_typing_delay_ms: u64,
    /// Upper bound of the simulated typing delay hosts may show.
    pub max_typing_delay_ms: u64,
    /// Fixed seed for reproducible replies; entropy-seeded when absent.
    pub seed: Option<u64>,
    #[validate(nested)]
    pub logging: LoggingConfig,
}

fn validate_delay_range(config: &EngineConfig) -> Result<(), ValidationError> {
    if config.min_typing_delay_ms > config.max_typing_delay_ms {
        return Err(ValidationError::new("inverted_typing_delay_range"));
    }
    Ok(())
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            responses_path: PathBuf::from(DEFAULT_RESPONSES_PATH),
            default_mode: DEFAULT_MODE.to_string(),
            default_generation: DEFAULT_GENERATION.to_string(),
            followup_probability: 0.4,
            min_typing_delay_ms: 800,
            max_typing_delay_ms: 1500,
            seed: None,
            logging: LoggingConfig::default(),
        }
    }
}

/// Read and parse an optional environment variable
fn env_var<T: FromStr>(key: &str) -> Result<Option<T>, AppError>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{}={:?}: {}", key, raw, e))),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

impl EngineConfig {
    /// Build a configuration from defaults overridden by the environment.
    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {}", path.display());
        }

        let mut config = Self::default();
        if let Some(path) = env_var::<PathBuf>("DAYCHAT_RESPONSES_PATH")? {
            config.responses_path = path;
        }
        if let Some(mode) = env_var::<String>("DAYCHAT_MODE")? {
            config.default_mode = mode;
        }
        if let Some(generation) = env_var::<String>("DAYCHAT_GENERATION")? {
            config.default_generation = generation;
        }
        if let Some(probability) = env_var::<f64>("DAYCHAT_FOLLOWUP_PROBABILITY")? {
            config.followup_probability = probability;
        }
        if let Some(seed) = env_var::<u64>("DAYCHAT_SEED")? {
            config.seed = Some(seed);
        }
        if let Some(filter) = env_var::<String>("DAYCHAT_LOG")? {
            config.logging.filter = filter;
        }
        if let Some(json) = env_var::<bool>("DAYCHAT_LOG_JSON")? {
            config.logging.json = json;
        }

        config.validate()?;
        Ok(config)
    }
}
