//! Integration Tests
//!
//! Full conversation flows through `ChatEngine` with the bundled response
//! document and a seeded random source.

use crate::brain::{Sentiment, EMOTIONAL_PATTERN_CAPACITY};
use crate::config::EngineConfig;
use crate::engine::ChatEngine;
use crate::models::Speaker;
use crate::tests::brain_tests::sample_document;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn engine(seed: u64, followup_probability: f64) -> ChatEngine<StdRng> {
    let config = EngineConfig {
        followup_probability,
        ..EngineConfig::default()
    };
    ChatEngine::with_document(sample_document(), StdRng::seed_from_u64(seed)).configured(&config)
}

/// Fill every template of a pool the way the selector would
fn filled(pool: &[String], word: &str) -> Vec<String> {
    pool.iter().map(|t| t.replace("{keyword}", word)).collect()
}

#[cfg(test)]
mod conversation_tests {
    use super::*;

    #[test]
    fn test_opening_exchange() {
        let mut engine = engine(1, 0.0);
        let mut session = engine.new_session();

        let reply = engine.respond(&mut session, "hey there");

        assert!(!reply.text.is_empty());
        assert_eq!(reply.suggestions.len(), 4);
        assert_eq!(reply.suggestions[0], "My day was great!");
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.history()[0].speaker, Speaker::User);
        assert_eq!(session.history()[1].text, reply.text);
    }

    #[test]
    fn test_off_topic_opener_is_redirected() {
        let mut engine = engine(2, 0.0);
        let mut session = engine.new_session();
        let redirect = engine.document().bank.redirect.clone();

        let first = engine.respond(&mut session, "What's your theory on the weather today");
        assert!(first.analysis.is_off_topic);
        assert_eq!(first.rule, "redirect");
        assert!(redirect.contains(&first.text));

        let second = engine.respond(&mut session, "What's your theory on the weather today");
        assert!(redirect.contains(&second.text));
        assert_eq!(second.rule, "redirect");
    }

    #[test]
    fn test_mode_and_generation_select_pool() {
        let mut engine = engine(3, 0.0);
        let mut session = engine.new_session();
        session.set_mode("books");
        session.set_generation("genZ");

        let reply = engine.respond(&mut session, "Such a great and fun day");
        let pool = engine
            .document()
            .bank
            .primary_pool(Sentiment::Positive, "genZ", "books")
            .to_vec();

        assert_eq!(reply.rule, "primary");
        assert!(filled(&pool, "great").contains(&reply.text));
    }

    #[test]
    fn test_person_reference_adds_people_pool() {
        let mut engine = engine(4, 0.0);
        let mut session = engine.new_session();
        let bank = engine.document().bank.clone();
        let mut allowed = filled(bank.primary_pool(Sentiment::Negative, "millennial", "tv"), "bad");
        allowed.extend(bank.responses.people.negative.iter().cloned());

        for _ in 0..10 {
            let reply = engine.respond(&mut session, "My manager was bad and annoyed");
            assert_eq!(reply.rule, "primary");
            assert!(allowed.contains(&reply.text), "unexpected reply {:?}", reply.text);
        }
    }

    #[test]
    fn test_negative_trend_changes_suggestions() {
        let mut engine = engine(5, 0.0);
        let mut session = engine.new_session();

        engine.respond(&mut session, "hello");
        let reply = engine.respond(&mut session, "Honestly it was awful and I'm upset");

        assert_eq!(reply.analysis.sentiment, Sentiment::Negative);
        assert_eq!(reply.suggestions[0], "I just need to vent");
    }

    #[test]
    fn test_emotional_pattern_stays_bounded() {
        let mut engine = engine(6, 0.5);
        let mut session = engine.new_session();

        for i in 0..40 {
            let message = if i % 2 == 0 { "great day" } else { "awful day" };
            let reply = engine.respond(&mut session, message);
            assert!(!reply.text.is_empty());
            assert!(session.context.pattern_len() <= EMOTIONAL_PATTERN_CAPACITY);
        }
        assert_eq!(session.context.pattern_len(), EMOTIONAL_PATTERN_CAPACITY);
    }

    #[test]
    fn test_followups_are_recorded() {
        let mut engine = engine(7, 1.0);
        let mut session = engine.new_session();

        let reply = engine.respond(&mut session, "Nothing much");

        let followup = reply.followup.expect("followup probability is 1.0");
        assert!(engine.document().bank.responses.followup.contains(&followup));
        assert_eq!(session.history_len(), 3);
        assert_eq!(session.history()[2].text, followup);
    }

    #[test]
    fn test_same_seed_same_conversation() {
        let messages = [
            "Woke up tired",
            "Then a great lunch with my friend",
            "Work was okay",
            "Devastated about the exam",
        ];

        let run = |seed| {
            let mut engine = engine(seed, 0.4);
            let mut session = engine.new_session();
            messages
                .iter()
                .map(|m| {
                    let reply = engine.respond(&mut session, m);
                    (reply.text, reply.followup)
                })
                .collect::<Vec<_>>()
        };

        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut engine = engine(8, 0.0);
        let mut first = engine.new_session();
        let mut second = engine.new_session();

        engine.respond(&mut first, "terrible deadline at work");
        engine.respond(&mut second, "fun party tonight");

        assert_eq!(first.context.last_activity(), Some("work"));
        assert_eq!(second.context.last_activity(), Some("social"));
        assert_eq!(second.context.time_of_day(), Some("evening"));
        assert_eq!(first.history_len(), 2);
    }
}
