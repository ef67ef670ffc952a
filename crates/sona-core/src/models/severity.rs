use serde::{Deserialize, Serialize};

/// One of the four canonical PHQ-9 response categories, ordered by severity.
///
/// Every free-form answer ultimately resolves to exactly one of these; there
/// are no partial or fractional scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    NotAtAll,
    SeveralDays,
    MoreThanHalfTheDays,
    NearlyEveryDay,
}

impl SeverityLevel {
    /// All four levels in ascending order.
    pub const ALL: [SeverityLevel; 4] = [
        SeverityLevel::NotAtAll,
        SeverityLevel::SeveralDays,
        SeverityLevel::MoreThanHalfTheDays,
        SeverityLevel::NearlyEveryDay,
    ];

    /// Ordinal score contributed to the PHQ-9 total.
    pub fn score(self) -> u8 {
        match self {
            SeverityLevel::NotAtAll => 0,
            SeverityLevel::SeveralDays => 1,
            SeverityLevel::MoreThanHalfTheDays => 2,
            SeverityLevel::NearlyEveryDay => 3,
        }
    }

    /// Canonical spoken label for this level.
    pub fn label(self) -> &'static str {
        match self {
            SeverityLevel::NotAtAll => "not at all",
            SeverityLevel::SeveralDays => "several days",
            SeverityLevel::MoreThanHalfTheDays => "more than half the days",
            SeverityLevel::NearlyEveryDay => "nearly every day",
        }
    }

    /// Resolve a canonical label back to its level.
    ///
    /// Matching is exact after trimming surrounding whitespace. Anything
    /// else — including close paraphrases — returns `None`; fallback policy
    /// belongs to the caller.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "not at all" => Some(SeverityLevel::NotAtAll),
            "several days" => Some(SeverityLevel::SeveralDays),
            "more than half the days" => Some(SeverityLevel::MoreThanHalfTheDays),
            "nearly every day" => Some(SeverityLevel::NearlyEveryDay),
            _ => None,
        }
    }
}

/// Classification of a PHQ-9 total score into one of five named ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityBand {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl SeverityBand {
    /// Map a total score to its band.
    ///
    /// Thresholds are evaluated low to high with inclusive upper bounds;
    /// first match wins. Totals above 27 cannot occur for a well-formed
    /// result (9 questions × max 3) and fall into `Severe`.
    pub fn from_total(total: u8) -> Self {
        match total {
            0..=4 => SeverityBand::Minimal,
            5..=9 => SeverityBand::Mild,
            10..=14 => SeverityBand::Moderate,
            15..=19 => SeverityBand::ModeratelySevere,
            _ => SeverityBand::Severe,
        }
    }

    /// Human-readable band name, phrased for speech.
    pub fn label(self) -> &'static str {
        match self {
            SeverityBand::Minimal => "minimal or no depression",
            SeverityBand::Mild => "mild depression",
            SeverityBand::Moderate => "moderate depression",
            SeverityBand::ModeratelySevere => "moderately severe depression",
            SeverityBand::Severe => "severe depression",
        }
    }

    /// Whether this band warrants urgent guidance.
    pub fn is_urgent(self) -> bool {
        matches!(self, SeverityBand::ModeratelySevere | SeverityBand::Severe)
    }

    /// Fixed recommendation text for this band.
    ///
    /// The two urgent bands refer to professional care and the 988 crisis
    /// line; the rest get general self-care guidance.
    pub fn recommendation(self) -> &'static str {
        if self.is_urgent() {
            "Your score is on the high side. Please consider seeing a doctor or a \
             mental health professional soon. If you ever have thoughts of hurting \
             yourself, call or text the 988 crisis line right away."
        } else {
            "Your score is not in a severe range. Try to get enough rest and talk \
             with people close to you. If these feelings persist, it is worth \
             speaking with a professional."
        }
    }
}
