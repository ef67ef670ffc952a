//! The assessment session state machine.
//!
//! Drives the fixed ordered sequence of nine questions, strictly one at a
//! time: ask, await an answer, re-ask on silence, classify, accumulate.
//! Speech-output failures are best-effort (logged, never fatal); speech-input
//! failures are degraded to the "no input" outcome. The result is finalized
//! exactly once, on completion of all nine questions.

use tracing::{info, warn};

use sona_core::models::result::AssessmentResult;
use sona_core::models::severity::SeverityLevel;
use sona_core::questions::{PHQ9_QUESTIONS, QUESTION_COUNT};

use crate::classify::AnswerClassifier;
use crate::error::ScreeningError;
use crate::{LanguageModel, SpeechInput, SpeechOutput};

/// Spoken before the first question.
pub const INTRO: &str =
    "We'll go through the nine PHQ-9 questions together. Please answer honestly.";

/// Spoken when no usable answer was heard, before the question is re-asked.
pub const REPROMPT: &str = "I didn't catch that. Could you answer again?";

#[derive(Debug, Clone, Copy, Default)]
pub struct SessionConfig {
    /// Maximum listen attempts per question. `None` re-asks indefinitely,
    /// preserving the instrument's behavior of never skipping a question.
    /// When set, exhausting the limit aborts the session rather than
    /// recording a made-up score.
    pub max_attempts: Option<u32>,
}

/// One administration of the PHQ-9 over speech.
///
/// Created per assessment, run to completion, and not reused. All external
/// effects go through the collaborator traits.
pub struct AssessmentSession<'a> {
    config: SessionConfig,
    speech_out: &'a dyn SpeechOutput,
    speech_in: &'a dyn SpeechInput,
    classifier: AnswerClassifier<'a>,
}

impl<'a> AssessmentSession<'a> {
    pub fn new(
        config: SessionConfig,
        speech_out: &'a dyn SpeechOutput,
        speech_in: &'a dyn SpeechInput,
        model: &'a dyn LanguageModel,
    ) -> Self {
        Self {
            config,
            speech_out,
            speech_in,
            classifier: AnswerClassifier::new(model),
        }
    }

    /// Administer all nine questions and return the finalized result.
    ///
    /// Consumes the session. The summary and recommendation are spoken
    /// before the result is returned; handing the result to conversation
    /// state is the caller's single write.
    pub async fn run(self) -> Result<AssessmentResult, ScreeningError> {
        self.speak_best_effort(INTRO).await;

        let mut responses = [SeverityLevel::NotAtAll; QUESTION_COUNT];
        for (index, question) in PHQ9_QUESTIONS.iter().enumerate() {
            responses[index] = self.administer_question(index, question).await?;
        }

        let result = AssessmentResult::from_responses(responses);
        info!(
            total = result.total,
            band = result.band.label(),
            "assessment completed"
        );

        self.speak_best_effort(&result.summary()).await;
        self.speak_best_effort(result.recommendation()).await;

        Ok(result)
    }

    /// Ask one question until a non-empty answer is classified.
    ///
    /// Silence or unintelligible input re-asks the same question with
    /// nothing recorded and nothing skipped.
    async fn administer_question(
        &self,
        index: usize,
        question: &str,
    ) -> Result<SeverityLevel, ScreeningError> {
        let mut attempts = 0u32;

        loop {
            self.speak_best_effort(question).await;

            let heard = match self.speech_in.listen().await {
                Ok(heard) => heard,
                Err(e) => {
                    warn!(
                        error = %e,
                        question = index + 1,
                        "speech input failed, treating as no input"
                    );
                    None
                }
            };

            let Some(answer) = heard.filter(|a| !a.trim().is_empty()) else {
                attempts += 1;
                if let Some(max) = self.config.max_attempts
                    && attempts >= max
                {
                    return Err(ScreeningError::NoResponse {
                        question: index + 1,
                    });
                }
                self.speak_best_effort(REPROMPT).await;
                continue;
            };

            let level = self.classifier.classify(&answer).await;
            info!(
                question = index + 1,
                score = level.score(),
                "answer recorded"
            );
            return Ok(level);
        }
    }

    async fn speak_best_effort(&self, text: &str) {
        if let Err(e) = self.speech_out.speak(text).await {
            warn!(error = %e, "speech output failed, continuing");
        }
    }
}
