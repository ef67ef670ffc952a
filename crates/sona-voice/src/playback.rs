//! Audio playback via system commands.
//!
//! Plays synthesized speech through whichever player is installed:
//! macOS `afplay`, SoX `play`, or ALSA `aplay`.

use std::process::Stdio;
use tokio::process::Command;

use crate::capture::command_exists;
use crate::error::VoiceError;

/// Available playback backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackBackend {
    /// macOS `afplay` command.
    Afplay,
    /// SoX `play` command.
    SoxPlay,
    /// Linux ALSA `aplay` command.
    Aplay,
}

impl std::fmt::Display for PlaybackBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackBackend::Afplay => write!(f, "afplay"),
            PlaybackBackend::SoxPlay => write!(f, "play"),
            PlaybackBackend::Aplay => write!(f, "aplay"),
        }
    }
}

/// Detect which playback backend is installed.
pub async fn detect_backend() -> Option<PlaybackBackend> {
    if command_exists("afplay").await {
        return Some(PlaybackBackend::Afplay);
    }
    if command_exists("play").await {
        return Some(PlaybackBackend::SoxPlay);
    }
    if command_exists("aplay").await {
        return Some(PlaybackBackend::Aplay);
    }
    None
}

/// Play audio from a file.
pub async fn play_file(path: &std::path::Path, backend: PlaybackBackend) -> Result<(), VoiceError> {
    let cmd_name = match backend {
        PlaybackBackend::Afplay => "afplay",
        PlaybackBackend::SoxPlay => "play",
        PlaybackBackend::Aplay => "aplay",
    };

    tracing::debug!(backend = %backend, path = %path.display(), "playing audio");

    let status = Command::new(cmd_name)
        .arg(path.to_string_lossy().as_ref())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| VoiceError::Playback(format!("failed to run {cmd_name}: {e}")))?;

    if !status.success() {
        return Err(VoiceError::Playback(format!(
            "{cmd_name} exited with status: {status}"
        )));
    }

    Ok(())
}

/// Play audio bytes by writing to a temp file and playing it.
pub async fn play_bytes(
    audio: &[u8],
    extension: &str,
    backend: PlaybackBackend,
) -> Result<(), VoiceError> {
    let temp_path = std::env::temp_dir().join(format!(
        "sona_speech_{}_{}.{extension}",
        std::process::id(),
        uuid::Uuid::new_v4()
    ));

    tokio::fs::write(&temp_path, audio)
        .await
        .map_err(|e| VoiceError::Playback(format!("failed to write temp audio file: {e}")))?;

    let result = play_file(&temp_path, backend).await;

    let _ = tokio::fs::remove_file(&temp_path).await;

    result
}
