//! Hybrid answer classification.
//!
//! The safety override runs first and short-circuits; only then is the
//! language model consulted, constrained to the four canonical labels with
//! few-shot examples. An unparseable or errored reply fails safe to the
//! lowest level — unreadable model output must never stall an assessment,
//! and must never be taken as a sign of elevated risk (that signal belongs
//! to the safety override alone).

use tracing::{debug, warn};

use sona_core::models::severity::SeverityLevel;

use crate::safety;
use crate::LanguageModel;

/// Maps a free-form transcribed answer to one of the four severity levels.
///
/// Stateless apart from the shared danger lexicon; each call is independent,
/// with no caching and no retries.
pub struct AnswerClassifier<'a> {
    model: &'a dyn LanguageModel,
}

impl<'a> AnswerClassifier<'a> {
    pub fn new(model: &'a dyn LanguageModel) -> Self {
        Self { model }
    }

    /// Resolve an answer to a severity level. Always yields a level; every
    /// failure path falls back rather than erroring.
    pub async fn classify(&self, answer: &str) -> SeverityLevel {
        if let Some(level) = safety::evaluate(answer) {
            return level;
        }

        let prompt = classification_prompt(answer);
        let reply = match self.model.complete(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "classifier call failed, falling back to lowest level");
                String::new()
            }
        };

        match SeverityLevel::from_label(&reply) {
            Some(level) => {
                debug!(reply = reply.trim(), score = level.score(), "answer classified");
                level
            }
            None => {
                warn!(reply = reply.trim(), "reply outside canonical labels, falling back");
                SeverityLevel::NotAtAll
            }
        }
    }
}

/// Build the constrained classification prompt for one answer.
///
/// Presents the four canonical labels with their scores and a handful of
/// few-shot examples, and asks for a single-label reply.
pub fn classification_prompt(answer: &str) -> String {
    format!(
        "A person answered a PHQ-9 screening question with: '{answer}'\n\
         \n\
         Decide which PHQ-9 response category fits this answer best:\n\
         \n\
         - not at all (0)\n\
         - several days (1)\n\
         - more than half the days (2)\n\
         - nearly every day (3)\n\
         \n\
         Reply with exactly one of these phrases and nothing else:\n\
         not at all, several days, more than half the days, nearly every day\n\
         \n\
         Examples:\n\
         - \"I couldn't sleep a couple of nights\" -> several days\n\
         - \"almost every single day, I'm exhausted\" -> nearly every day\n\
         - \"I'm okay, nothing like that\" -> not at all\n\
         - \"sometimes, now and then\" -> several days\n\
         - \"a lot, it's been heavy lately\" -> more than half the days\n\
         \n\
         Your reply:"
    )
}
