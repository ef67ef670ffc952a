//! sona-voice
//!
//! Speech collaborators for the screening agent: microphone capture via
//! subprocess backends, speech synthesis via Amazon Polly with subprocess
//! playback, and transcription via Amazon Transcribe through S3.

pub mod capture;
pub mod error;
pub mod playback;
pub mod stt;
pub mod tts;
