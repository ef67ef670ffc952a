//! Emotion detector collaborators.
//!
//! The camera and face-expression model live outside this process; the
//! [`CommandDetector`] shells out to a configured external classifier and
//! parses one JSON reading from its stdout:
//!
//! ```json
//! { "emotion": "happy", "face_detected": true }
//! ```

use async_trait::async_trait;
use serde::Deserialize;
use std::process::Stdio;
use tokio::process::Command;

use crate::{Emotion, EmotionError, FaceReading};

/// Source of emotion readings. `Ok(None)` means no face in view.
#[async_trait]
pub trait EmotionDetector: Send + Sync {
    async fn sample(&self) -> Result<Option<FaceReading>, EmotionError>;
}

#[derive(Debug, Deserialize)]
struct DetectorOutput {
    #[serde(default)]
    emotion: Emotion,
    #[serde(default)]
    face_detected: bool,
}

/// Detector that runs an external classifier command per sample.
pub struct CommandDetector {
    program: String,
    args: Vec<String>,
}

impl CommandDetector {
    /// Build from an argv-style command line. Errors on an empty command.
    pub fn new(command: &[String]) -> Result<Self, EmotionError> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| EmotionError::Detector("empty detector command".to_string()))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

#[async_trait]
impl EmotionDetector for CommandDetector {
    async fn sample(&self) -> Result<Option<FaceReading>, EmotionError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| EmotionError::Detector(format!("failed to run detector: {e}")))?;

        if !output.status.success() {
            return Err(EmotionError::Detector(format!(
                "detector exited with status: {}",
                output.status
            )));
        }

        parse_reading(&output.stdout)
    }
}

fn parse_reading(stdout: &[u8]) -> Result<Option<FaceReading>, EmotionError> {
    let parsed: DetectorOutput =
        serde_json::from_slice(stdout).map_err(|e| EmotionError::Parse(e.to_string()))?;

    if !parsed.face_detected {
        return Ok(None);
    }
    Ok(Some(FaceReading {
        emotion: parsed.emotion,
    }))
}
