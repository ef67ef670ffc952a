//! sona-emotion
//!
//! Background emotion sampling. A polling task drives an [`EmotionDetector`]
//! and overwrites a process-wide advisory snapshot: latest write wins and
//! readers may observe a stale value. Nothing in the scoring path consults
//! it; it only tints the conversational persona.

pub mod detector;
pub mod monitor;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmotionError {
    #[error("detector error: {0}")]
    Detector(String),

    #[error("detector output parsing failed: {0}")]
    Parse(String),
}

/// A basic emotion category, mirroring common face-expression model outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    #[default]
    Neutral,
}

impl Emotion {
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgusted",
            Emotion::Fear => "fearful",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprised",
            Emotion::Neutral => "neutral",
        }
    }
}

/// One reading from a detector: the dominant emotion of the most prominent
/// face in view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FaceReading {
    pub emotion: Emotion,
}

/// The advisory snapshot readers see.
///
/// Each field is independently overwritten with a self-contained value, so
/// stale reads are benign — there is no partial-update hazard spanning
/// fields that matters to any consumer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionSnapshot {
    pub emotion: Emotion,
    pub face_detected: bool,
    pub last_seen: jiff::Timestamp,
}

impl Default for EmotionSnapshot {
    fn default() -> Self {
        Self {
            emotion: Emotion::Neutral,
            face_detected: false,
            last_seen: jiff::Timestamp::now(),
        }
    }
}
