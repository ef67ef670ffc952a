use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::severity::{SeverityBand, SeverityLevel};
use crate::questions::QUESTION_COUNT;

/// The outcome of one completed screening session.
///
/// Created only when all nine questions have been answered, and immutable
/// once produced. The total is derived from the responses at construction;
/// the two can never disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub id: Uuid,
    /// Per-question severity levels, in administration order.
    pub responses: [SeverityLevel; QUESTION_COUNT],
    /// Sum of the per-question scores. Always 0..=27.
    pub total: u8,
    pub band: SeverityBand,
    pub completed_at: jiff::Timestamp,
}

impl AssessmentResult {
    /// Finalize a session's responses into a result.
    pub fn from_responses(responses: [SeverityLevel; QUESTION_COUNT]) -> Self {
        let total = responses.iter().map(|r| r.score()).sum();
        Self {
            id: Uuid::new_v4(),
            responses,
            total,
            band: SeverityBand::from_total(total),
            completed_at: jiff::Timestamp::now(),
        }
    }

    /// Spoken summary of the score and band.
    pub fn summary(&self) -> String {
        format!(
            "You scored {} out of 27, which indicates {}.",
            self.total,
            self.band.label()
        )
    }

    /// Recommendation text for the derived band.
    pub fn recommendation(&self) -> &'static str {
        self.band.recommendation()
    }
}
