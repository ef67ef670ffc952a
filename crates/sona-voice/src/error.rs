use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("audio capture error: {0}")]
    Capture(String),

    #[error("audio playback error: {0}")]
    Playback(String),

    #[error("speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("transcription API error: {0}")]
    Api(String),

    #[error("transcription job failed: {0}")]
    JobFailed(String),

    #[error("transcript parsing failed: {0}")]
    Parse(String),
}
