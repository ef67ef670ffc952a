//! Deterministic self-harm override.
//!
//! Runs before any model-backed classification and cannot be outvoted by a
//! later step. A missed phrase degrades to normal classification; a hit
//! forces the maximum severity level unconditionally. The rule is a plain
//! substring scan over a fixed lexicon so its behavior is auditable.

use tracing::warn;

use sona_core::models::severity::SeverityLevel;

/// Phrases that force the maximum severity level when present anywhere in an
/// answer. Matching is case-sensitive substring containment.
pub const DANGER_PHRASES: [&str; 10] = [
    "kill myself",
    "want to die",
    "end my life",
    "hurt myself",
    "better off dead",
    "no reason to live",
    "want to disappear",
    "don't want to be alive",
    "end it all",
    "suicide",
];

/// Check an answer for self-harm language.
///
/// Returns `Some(SeverityLevel::NearlyEveryDay)` — a hard override, not a
/// vote — if any danger phrase occurs in the text, and `None` otherwise.
/// Pure function of the input and the static lexicon.
pub fn evaluate(answer: &str) -> Option<SeverityLevel> {
    for phrase in DANGER_PHRASES {
        if answer.contains(phrase) {
            warn!(phrase, "danger phrase detected, forcing maximum severity");
            return Some(SeverityLevel::NearlyEveryDay);
        }
    }
    None
}
