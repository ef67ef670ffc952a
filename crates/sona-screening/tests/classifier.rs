//! Answer classification: safety override precedence, canonical-label
//! parsing, and the fail-safe default.

use async_trait::async_trait;
use std::sync::Mutex;

use sona_core::models::severity::SeverityLevel;
use sona_screening::classify::{classification_prompt, AnswerClassifier};
use sona_screening::error::CollaboratorError;
use sona_screening::LanguageModel;

/// Language model stub that replays a fixed reply and records each prompt.
struct StubModel {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().map_err(CollaboratorError)
    }
}

#[tokio::test]
async fn danger_phrase_overrides_low_model_reply() {
    // The stub would classify the answer as harmless; the override must win
    // without consulting it.
    let model = StubModel::replying("not at all");
    let classifier = AnswerClassifier::new(&model);

    let level = classifier
        .classify("honestly I just want to die most days")
        .await;

    assert_eq!(level, SeverityLevel::NearlyEveryDay);
    assert_eq!(model.call_count(), 0, "override must short-circuit the model");
}

#[tokio::test]
async fn canonical_labels_map_to_their_levels() {
    for level in SeverityLevel::ALL {
        let model = StubModel::replying(level.label());
        let classifier = AnswerClassifier::new(&model);
        assert_eq!(classifier.classify("I slept badly sometimes").await, level);
    }
}

#[tokio::test]
async fn reply_with_surrounding_whitespace_still_parses() {
    let model = StubModel::replying("\nnearly every day  ");
    let classifier = AnswerClassifier::new(&model);
    assert_eq!(
        classifier.classify("every day really").await,
        SeverityLevel::NearlyEveryDay
    );
}

#[tokio::test]
async fn off_list_reply_fails_safe_to_lowest_level() {
    for reply in ["maybe", "2", "several", "I think several days fit best", ""] {
        let model = StubModel::replying(reply);
        let classifier = AnswerClassifier::new(&model);
        assert_eq!(
            classifier.classify("hard to say").await,
            SeverityLevel::NotAtAll,
            "reply {reply:?} must fall back to not-at-all"
        );
    }
}

#[tokio::test]
async fn model_error_fails_safe_to_lowest_level() {
    let model = StubModel::failing("throttled");
    let classifier = AnswerClassifier::new(&model);
    assert_eq!(
        classifier.classify("some days are rough").await,
        SeverityLevel::NotAtAll
    );
    assert_eq!(model.call_count(), 1, "no retries after a failure");
}

#[test]
fn prompt_contains_answer_and_all_labels() {
    let prompt = classification_prompt("I barely slept this week");
    assert!(prompt.contains("I barely slept this week"));
    for level in SeverityLevel::ALL {
        assert!(
            prompt.contains(level.label()),
            "prompt must offer {:?}",
            level.label()
        );
    }
}
