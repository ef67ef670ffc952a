//! Speech synthesis via Amazon Polly.

use aws_sdk_polly::types::{Engine, OutputFormat, VoiceId};
use tracing::info;

use crate::error::VoiceError;
use crate::playback::{self, PlaybackBackend};

/// Synthesize text to MP3 bytes with the given Polly voice.
pub async fn synthesize(
    config: &aws_config::SdkConfig,
    voice_id: &str,
    text: &str,
) -> Result<Vec<u8>, VoiceError> {
    let client = aws_sdk_polly::Client::new(config);

    let response = client
        .synthesize_speech()
        .engine(Engine::Neural)
        .output_format(OutputFormat::Mp3)
        .voice_id(VoiceId::from(voice_id))
        .text(text)
        .send()
        .await
        .map_err(|e| VoiceError::Synthesis(e.into_service_error().to_string()))?;

    let bytes = response
        .audio_stream
        .collect()
        .await
        .map_err(|e| VoiceError::Synthesis(format!("failed to read audio stream: {e}")))?
        .into_bytes()
        .to_vec();

    info!(voice_id, text_len = text.len(), audio_len = bytes.len(), "speech synthesized");

    Ok(bytes)
}

/// Synthesize and play one utterance.
pub async fn speak(
    config: &aws_config::SdkConfig,
    voice_id: &str,
    backend: PlaybackBackend,
    text: &str,
) -> Result<(), VoiceError> {
    let audio = synthesize(config, voice_id, text).await?;
    playback::play_bytes(&audio, "mp3", backend).await
}
