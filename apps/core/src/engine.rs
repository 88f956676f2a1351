use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Duration;
use tracing::{info, instrument};

use crate::brain::{
    Analysis, MessageAnalyzer, ResponseDocument, ResponseSelector, SelectionInput,
    SuggestionGenerator,
};
use crate::config::EngineConfig;
use crate::models::Settings;
use crate::session::SessionState;

/// Everything the UI shell needs to render one exchange.
#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    /// The main reply. Never empty.
    pub text: String,
    /// An optional follow-up question, shown after the reply.
    pub followup: Option<String>,
    /// Quick-reply chips for the next message.
    pub suggestions: Vec<String>,
    /// The analysis of the user's message.
    pub analysis: Analysis,
    /// Name of the cascade rule that produced `text`.
    pub rule: &'static str,
}

/// The response engine.
///
/// Holds the immutable response document and the random source. All
/// per-conversation state lives in the [`SessionState`] passed to [`respond`],
/// so one engine can serve several sessions one message at a time.
///
/// [`respond`]: ChatEngine::respond
pub struct ChatEngine<R: Rng = StdRng> {
    document: ResponseDocument,
    selector: ResponseSelector,
    suggestions: SuggestionGenerator,
    rng: R,
    default_settings: Settings,
    followup_probability: f64,
    typing_delay_ms: (u64, u64),
}

impl ChatEngine<StdRng> {
    /// Creates an engine from configuration.
    ///
    /// A missing or malformed response document is not an error: the built-in
    /// document is used instead and a warning is logged.
    pub fn from_config(config: &EngineConfig) -> Self {
        let document = ResponseDocument::load_or_builtin(&config.responses_path);
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_document(document, rng).configured(config)
    }
}

impl<R: Rng> ChatEngine<R> {
    /// Creates an engine over an already loaded document and random source.
    pub fn with_document(document: ResponseDocument, rng: R) -> Self {
        Self {
            document,
            selector: ResponseSelector::new(),
            suggestions: SuggestionGenerator::new(),
            rng,
            default_settings: Settings::default(),
            followup_probability: 0.0,
            typing_delay_ms: (0, 0),
        }
        .configured(&EngineConfig::default())
    }

    /// Applies the tunables of `config`; the document and rng are kept.
    pub fn configured(mut self, config: &EngineConfig) -> Self {
        self.default_settings = Settings::new(&config.default_mode, &config.default_generation);
        self.followup_probability = config.followup_probability;
        self.typing_delay_ms = (config.min_typing_delay_ms, config.max_typing_delay_ms);
        self
    }

    pub fn document(&self) -> &ResponseDocument {
        &self.document
    }

    /// Starts a conversation with the configured default mode and generation.
    pub fn new_session(&self) -> SessionState {
        SessionState::new(self.default_settings.clone())
    }

    /// Processes one user message.
    ///
    /// 1. Records the user turn.
    /// 2. Analyzes the message and folds it into the session context.
    /// 3. Selects the reply through the priority cascade.
    /// 4. Maybe selects a follow-up question.
    /// 5. Generates suggestions from the updated context.
    #[instrument(skip(self, session, message), fields(session_id = %session.id))]
    pub fn respond(&mut self, session: &mut SessionState, message: &str) -> Reply {
        // The user turn counts as history, so an off-topic opener is redirected too
        session.record_user(message);
        let has_history = session.has_history();

        let analysis =
            MessageAnalyzer::new(&self.document.lexicon).analyze_and_track(message, &mut session.context);

        let input = SelectionInput {
            analysis: &analysis,
            context: &session.context,
            bank: &self.document.bank,
            settings: &session.settings,
            has_history,
        };
        let selection = self.selector.select(&input, &mut self.rng);
        session.record_bot(&selection.text);

        let followup = self.selector.select_followup(
            &analysis,
            &self.document.bank,
            self.followup_probability,
            &mut self.rng,
        );
        if let Some(followup) = &followup {
            session.record_bot(followup);
        }

        let suggestions = self.suggestions.generate(&session.context, session.history_len());

        info!(
            rule = selection.rule,
            sentiment = %analysis.sentiment,
            intensity = %analysis.intensity,
            followup = followup.is_some(),
            "Replied to message"
        );

        Reply {
            text: selection.text,
            followup,
            suggestions,
            analysis,
            rule: selection.rule,
        }
    }

    /// A random "thinking" delay for hosts that simulate typing.
    ///
    /// The engine never waits itself.
    pub fn typing_delay(&mut self) -> Duration {
        let (min, max) = self.typing_delay_ms;
        if min >= max {
            return Duration::from_millis(min);
        }
        Duration::from_millis(self.rng.gen_range(min..=max))
    }
}
