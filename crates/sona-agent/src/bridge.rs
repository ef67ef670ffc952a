//! Adapters binding the AWS-backed services to the screening collaborator
//! traits. Each adapter maps its service error into [`CollaboratorError`];
//! the screening core decides what failure means.

use async_trait::async_trait;

use sona_bedrock::chat;
use sona_screening::error::CollaboratorError;
use sona_screening::{LanguageModel, SpeechInput, SpeechOutput};
use sona_voice::capture::AudioCapture;
use sona_voice::playback::PlaybackBackend;
use sona_voice::{stt, tts};

/// System prompt for single-shot completions (classification, intent).
const COMPLETION_SYSTEM_PROMPT: &str =
    "You follow the instructions in the user message exactly. \
     Reply with only what is asked for, nothing else.";

/// Speaks through Amazon Polly and the local playback backend.
pub struct PollySpeaker {
    aws: aws_config::SdkConfig,
    voice_id: String,
    backend: PlaybackBackend,
}

impl PollySpeaker {
    pub fn new(aws: aws_config::SdkConfig, voice_id: String, backend: PlaybackBackend) -> Self {
        Self {
            aws,
            voice_id,
            backend,
        }
    }
}

#[async_trait]
impl SpeechOutput for PollySpeaker {
    async fn speak(&self, text: &str) -> Result<(), CollaboratorError> {
        tts::speak(&self.aws, &self.voice_id, self.backend, text)
            .await
            .map_err(|e| CollaboratorError(e.to_string()))
    }
}

/// Listens through the local microphone and Amazon Transcribe.
pub struct TranscribeListener {
    aws: aws_config::SdkConfig,
    bucket: String,
    language_code: String,
    capture: AudioCapture,
}

impl TranscribeListener {
    pub fn new(
        aws: aws_config::SdkConfig,
        bucket: String,
        language_code: String,
        capture: AudioCapture,
    ) -> Self {
        Self {
            aws,
            bucket,
            language_code,
            capture,
        }
    }
}

#[async_trait]
impl SpeechInput for TranscribeListener {
    async fn listen(&self) -> Result<Option<String>, CollaboratorError> {
        stt::listen_once(&self.aws, &self.bucket, &self.language_code, &self.capture)
            .await
            .map_err(|e| CollaboratorError(e.to_string()))
    }
}

/// Completes prompts through a Bedrock model.
pub struct BedrockModel {
    aws: aws_config::SdkConfig,
    model_id: String,
}

impl BedrockModel {
    pub fn new(aws: aws_config::SdkConfig, model_id: String) -> Self {
        Self { aws, model_id }
    }
}

#[async_trait]
impl LanguageModel for BedrockModel {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError> {
        chat::complete(&self.aws, &self.model_id, COMPLETION_SYSTEM_PROMPT, prompt)
            .await
            .map_err(|e| CollaboratorError(e.to_string()))
    }
}
