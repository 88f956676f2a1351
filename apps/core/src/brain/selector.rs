//! Response Selector - picks a reply for an analyzed message.
//!
//! Pool narrowing is an ordered list of [`SelectionRule`]s. The first rule
//! whose predicate holds, whose pool is non-empty and whose coin (if any)
//! passes supplies the template. When nothing matches, a fixed sentence keyed
//! on the first context clue is returned.
//!
//! The random source is always injected so tests can seed it.

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use tracing::{debug, warn};

use super::analysis::{Analysis, Intensity, Sentiment};
use super::context::ConversationContext;
use super::lexicon::ResponseBank;
use crate::error::AppError;
use crate::models::Settings;

/// Placeholder replaced with the detected keyword
pub const KEYWORD_PLACEHOLDER: &str = "{keyword}";

/// Last-resort reply when nothing else applies
pub const DEFAULT_REPLY: &str = "I hear you! Tell me more about what happened today.";

/// Redirect used when the bank has no redirect pool
pub const DEFAULT_REDIRECT: &str = "Let's get back to your day - how's it been?";

const WORK_REPLY: &str =
    "Work can take a lot out of you! How are you feeling about everything that happened there?";
const SOCIAL_REPLY: &str =
    "Sounds like there was some social stuff going on! How did being around people feel?";
const HEALTH_REPLY: &str =
    "Taking care of yourself matters. How is your body holding up today?";
const FAMILY_REPLY: &str =
    "Family stuff can stir up so many feelings. What happened with them?";
const TIME_REPLY: &str =
    "Sounds like that part of the day really stood out. What made it memorable?";
const THEME_REPLY: &str =
    "It sounds like something was a main theme of your day. Tell me more about it!";

/// Probability of using the time-specific pool once it applies
const TIME_POOL_CHANCE: f64 = 0.4;
/// Probability of using the activity pool once it applies
const ACTIVITY_POOL_CHANCE: f64 = 0.5;

const COPING_FOLLOWUPS: &[&str] = &[
    "What usually helps you unwind when things get this heavy?",
    "Is there anything you can do tonight just for yourself?",
    "Who could you lean on while this settles down?",
];

const RELATIONSHIP_FOLLOWUPS: &[&str] = &[
    "How are things between you two usually?",
    "Do you think they know how that made you feel?",
    "Is this someone you see a lot?",
];

const CHALLENGE_FOLLOWUPS: &[&str] = &[
    "What was the hardest part of it?",
    "Was there anything about it you'd do differently next time?",
    "Did anything surprise you while you were at it?",
];

/// Everything a rule can look at
#[derive(Debug, Clone, Copy)]
pub struct SelectionInput<'a> {
    pub analysis: &'a Analysis,
    /// Session context after the current message was tracked. The default
    /// cascade ignores it; rules passed to [`ResponseSelector::with_rules`]
    /// can read the emotional trend from here.
    pub context: &'a ConversationContext,
    pub bank: &'a ResponseBank,
    pub settings: &'a Settings,
    /// The conversation has recorded turns, the current message included
    pub has_history: bool,
}

/// One step of the priority cascade
#[derive(Clone, Copy)]
pub struct SelectionRule {
    pub name: &'static str,
    applies: fn(&SelectionInput<'_>) -> bool,
    /// Probability of using the pool once the rule applies
    chance: Option<f64>,
    pool: for<'a> fn(&SelectionInput<'a>) -> Vec<&'a str>,
}

impl fmt::Debug for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionRule")
            .field("name", &self.name)
            .field("chance", &self.chance)
            .finish()
    }
}

impl SelectionRule {
    pub fn new(
        name: &'static str,
        applies: fn(&SelectionInput<'_>) -> bool,
        chance: Option<f64>,
        pool: for<'a> fn(&SelectionInput<'a>) -> Vec<&'a str>,
    ) -> Self {
        Self {
            name,
            applies,
            chance,
            pool,
        }
    }

    pub fn applies(&self, input: &SelectionInput<'_>) -> bool {
        (self.applies)(input)
    }

    pub fn pool<'a>(&self, input: &SelectionInput<'a>) -> Vec<&'a str> {
        (self.pool)(input)
    }

    pub fn chance(&self) -> Option<f64> {
        self.chance
    }
}

/// Reply text and the rule that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub text: String,
    pub rule: &'static str,
}

fn as_strs(pool: &[String]) -> Vec<&str> {
    pool.iter().map(String::as_str).collect()
}

fn redirect_applies(input: &SelectionInput<'_>) -> bool {
    input.analysis.is_off_topic && input.has_history
}

fn redirect_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    let pool = as_strs(&bank.redirect);
    if pool.is_empty() {
        vec![DEFAULT_REDIRECT]
    } else {
        pool
    }
}

fn mixed_applies(input: &SelectionInput<'_>) -> bool {
    input.analysis.has_mixed_emotions
}

fn mixed_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    as_strs(&bank.specialized_responses.mixed_emotions)
}

fn intense_applies(input: &SelectionInput<'_>) -> bool {
    input.analysis.intensity == Intensity::Intense
}

fn intense_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    as_strs(&bank.specialized_responses.intense_emotions)
}

fn time_applies(input: &SelectionInput<'_>) -> bool {
    input.analysis.primary_time().is_some()
}

fn time_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    input
        .analysis
        .primary_time()
        .map(|time| as_strs(bank.time_pool(time)))
        .unwrap_or_default()
}

fn activity_applies(input: &SelectionInput<'_>) -> bool {
    input.analysis.primary_activity().is_some()
}

fn activity_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    input
        .analysis
        .primary_activity()
        .map(|activity| as_strs(bank.activity_pool(activity)))
        .unwrap_or_default()
}

fn fallback_applies(input: &SelectionInput<'_>) -> bool {
    let analysis = input.analysis;
    let nothing_detected = analysis.keywords.is_empty()
        && !analysis.has_person_reference
        && analysis.context_clues.is_empty();
    let weak_neutral = analysis.sentiment == Sentiment::Neutral && analysis.keywords.len() < 2;
    nothing_detected || weak_neutral
}

fn fallback_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    as_strs(&bank.fallback)
}

fn always(_: &SelectionInput<'_>) -> bool {
    true
}

/// Sentiment × generation × mode pool, plus the people pool twice over when
/// someone was mentioned.
fn primary_pool<'a>(input: &SelectionInput<'a>) -> Vec<&'a str> {
    let bank = input.bank;
    let analysis = input.analysis;
    let settings = input.settings;

    let mut pool = as_strs(bank.primary_pool(
        analysis.sentiment,
        &settings.generation,
        &settings.mode,
    ));
    if analysis.has_person_reference {
        let people = bank.people_pool(analysis.sentiment);
        for _ in 0..2 {
            pool.extend(people.iter().copied().map(String::as_str));
        }
    }
    pool
}

/// The standard cascade, highest priority first
pub fn default_rules() -> Vec<SelectionRule> {
    vec![
        SelectionRule {
            name: "redirect",
            applies: redirect_applies,
            chance: None,
            pool: redirect_pool,
        },
        SelectionRule {
            name: "mixed_emotions",
            applies: mixed_applies,
            chance: None,
            pool: mixed_pool,
        },
        SelectionRule {
            name: "intense_emotions",
            applies: intense_applies,
            chance: None,
            pool: intense_pool,
        },
        SelectionRule {
            name: "time_specific",
            applies: time_applies,
            chance: Some(TIME_POOL_CHANCE),
            pool: time_pool,
        },
        SelectionRule {
            name: "activity",
            applies: activity_applies,
            chance: Some(ACTIVITY_POOL_CHANCE),
            pool: activity_pool,
        },
        SelectionRule {
            name: "fallback",
            applies: fallback_applies,
            chance: None,
            pool: fallback_pool,
        },
        SelectionRule {
            name: "primary",
            applies: always,
            chance: None,
            pool: primary_pool,
        },
    ]
}

/// Fixed reply keyed on the category of the first context clue
pub fn context_fallback(analysis: &Analysis) -> &'static str {
    match analysis.first_clue_category() {
        Some("work") => WORK_REPLY,
        Some("social") => SOCIAL_REPLY,
        Some("health") => HEALTH_REPLY,
        Some("family") => FAMILY_REPLY,
        Some("time") => TIME_REPLY,
        Some(_) => THEME_REPLY,
        None => DEFAULT_REPLY,
    }
}

/// Replace every placeholder with the message's most relevant word
pub fn fill_template(template: &str, analysis: &Analysis) -> String {
    template.replace(KEYWORD_PLACEHOLDER, analysis.substitution_word())
}

/// Coin flip that treats an out-of-range probability as "never"
fn coin<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    (0.0..=1.0).contains(&probability) && rng.gen_bool(probability)
}

pub struct ResponseSelector {
    rules: Vec<SelectionRule>,
}

impl Default for ResponseSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseSelector {
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    pub fn with_rules(rules: Vec<SelectionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    /// Choose a reply. Never fails and never returns an empty string.
    pub fn select_response<R: Rng + ?Sized>(&self, input: &SelectionInput<'_>, rng: &mut R) -> String {
        self.select(input, rng).text
    }

    /// Choose a reply and report which rule produced it
    pub fn select<R: Rng + ?Sized>(&self, input: &SelectionInput<'_>, rng: &mut R) -> Selection {
        match self.try_select(input, rng) {
            Ok(selection) => selection,
            Err(e) => {
                warn!("Response selection failed, using default reply: {}", e);
                Selection {
                    text: DEFAULT_REPLY.to_string(),
                    rule: "default",
                }
            }
        }
    }

    fn try_select<R: Rng + ?Sized>(
        &self,
        input: &SelectionInput<'_>,
        rng: &mut R,
    ) -> Result<Selection, AppError> {
        for rule in &self.rules {
            if !rule.applies(input) {
                continue;
            }

            let pool = rule.pool(input);
            if pool.is_empty() {
                continue;
            }
            if let Some(chance) = rule.chance {
                if !coin(rng, chance) {
                    debug!("Rule {} skipped by coin flip", rule.name);
                    continue;
                }
            }

            let template = pool
                .choose(rng)
                .ok_or_else(|| AppError::Internal(format!("rule {} chose nothing", rule.name)))?;
            let text = fill_template(template, input.analysis);
            if text.trim().is_empty() {
                return Err(AppError::Internal(format!(
                    "rule {} produced an empty reply",
                    rule.name
                )));
            }

            debug!("Reply chosen by rule {}", rule.name);
            return Ok(Selection {
                text,
                rule: rule.name,
            });
        }

        Ok(Selection {
            text: context_fallback(input.analysis).to_string(),
            rule: "context_fallback",
        })
    }

    /// Maybe pick a follow-up question, biased by what the message was about.
    ///
    /// Returns `None` when the coin fails or the general pool is empty.
    pub fn select_followup<R: Rng + ?Sized>(
        &self,
        analysis: &Analysis,
        bank: &ResponseBank,
        probability: f64,
        rng: &mut R,
    ) -> Option<String> {
        if !coin(rng, probability) {
            return None;
        }

        let pool: Vec<&str> = if analysis.intensity == Intensity::Intense {
            COPING_FOLLOWUPS.to_vec()
        } else if analysis.has_person_reference {
            RELATIONSHIP_FOLLOWUPS.to_vec()
        } else if !analysis.activities.is_empty() {
            CHALLENGE_FOLLOWUPS.to_vec()
        } else {
            as_strs(&bank.responses.followup)
        };

        pool.choose(rng)
            .map(|s| s.to_string())
            .filter(|s| !s.trim().is_empty())
    }
}
