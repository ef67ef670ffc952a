//! Microphone capture via system commands.
//!
//! Records 16-bit signed PCM WAV from the default microphone using whichever
//! subprocess backend is installed: SoX `rec` (preferred) or ALSA `arecord`.
//! Also provides an RMS-based silence check so an empty listening window can
//! be short-circuited without a round trip to the transcription service.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;

use crate::error::VoiceError;

/// Configuration for one listening window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Audio sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Number of channels (1 = mono).
    #[serde(default = "default_channels")]
    pub channels: u16,

    /// Seconds to record per listening window.
    #[serde(default = "default_listen_duration_secs")]
    pub listen_duration_secs: u64,

    /// RMS threshold below which a recording counts as silence.
    #[serde(default = "default_silence_threshold")]
    pub silence_threshold: f32,
}

fn default_sample_rate() -> u32 {
    16000
}

fn default_channels() -> u16 {
    1
}

fn default_listen_duration_secs() -> u64 {
    8
}

fn default_silence_threshold() -> f32 {
    0.01
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            channels: default_channels(),
            listen_duration_secs: default_listen_duration_secs(),
            silence_threshold: default_silence_threshold(),
        }
    }
}

/// Available capture backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureBackend {
    /// SoX `rec` command.
    Sox,
    /// Linux ALSA `arecord` command.
    Arecord,
}

impl std::fmt::Display for CaptureBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaptureBackend::Sox => write!(f, "sox"),
            CaptureBackend::Arecord => write!(f, "arecord"),
        }
    }
}

/// Detect which capture backend is installed. Checks `rec` (SoX) first,
/// then `arecord`.
pub async fn detect_backend() -> Option<CaptureBackend> {
    if command_exists("rec").await {
        return Some(CaptureBackend::Sox);
    }
    if command_exists("arecord").await {
        return Some(CaptureBackend::Arecord);
    }
    None
}

pub(crate) async fn command_exists(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Microphone capture handle.
pub struct AudioCapture {
    config: CaptureConfig,
    backend: CaptureBackend,
}

impl AudioCapture {
    pub fn new(config: CaptureConfig, backend: CaptureBackend) -> Self {
        Self { config, backend }
    }

    /// Create a capture handle, auto-detecting the backend. Errors when no
    /// supported recorder is installed — this is a startup precondition.
    pub async fn auto_detect(config: CaptureConfig) -> Result<Self, VoiceError> {
        let backend = detect_backend().await.ok_or_else(|| {
            VoiceError::Capture(
                "no audio capture backend found. Install SoX (rec) or ALSA (arecord)."
                    .to_string(),
            )
        })?;
        tracing::info!(backend = %backend, "detected audio capture backend");
        Ok(Self::new(config, backend))
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Record one listening window and return the WAV bytes.
    pub async fn record_bytes(&self) -> Result<Vec<u8>, VoiceError> {
        let temp_path = std::env::temp_dir().join(format!(
            "sona_capture_{}_{}.wav",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));

        let result = match self.backend {
            CaptureBackend::Sox => self.record_sox(&temp_path).await,
            CaptureBackend::Arecord => self.record_arecord(&temp_path).await,
        };

        let bytes = match result {
            Ok(()) => tokio::fs::read(&temp_path)
                .await
                .map_err(|e| VoiceError::Capture(format!("failed to read recording: {e}"))),
            Err(e) => Err(e),
        };

        let _ = tokio::fs::remove_file(&temp_path).await;
        bytes
    }

    async fn record_sox(&self, output: &std::path::Path) -> Result<(), VoiceError> {
        let mut cmd = Command::new("rec");
        cmd.arg("-r")
            .arg(self.config.sample_rate.to_string())
            .arg("-c")
            .arg(self.config.channels.to_string())
            .arg("-b")
            .arg("16")
            .arg("-e")
            .arg("signed-integer")
            .arg(output.to_string_lossy().as_ref())
            .arg("trim")
            .arg("0")
            .arg(self.config.listen_duration_secs.to_string());

        run_recorder(cmd, "rec").await
    }

    async fn record_arecord(&self, output: &std::path::Path) -> Result<(), VoiceError> {
        let mut cmd = Command::new("arecord");
        cmd.arg("-f")
            .arg("S16_LE")
            .arg("-r")
            .arg(self.config.sample_rate.to_string())
            .arg("-c")
            .arg(self.config.channels.to_string())
            .arg("-t")
            .arg("wav")
            .arg("-d")
            .arg(self.config.listen_duration_secs.to_string())
            .arg(output.to_string_lossy().as_ref());

        run_recorder(cmd, "arecord").await
    }
}

async fn run_recorder(mut cmd: Command, name: &str) -> Result<(), VoiceError> {
    tracing::debug!(recorder = name, "starting audio capture");

    let status = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map_err(|e| VoiceError::Capture(format!("failed to run {name}: {e}")))?;

    if !status.success() {
        return Err(VoiceError::Capture(format!(
            "{name} exited with status: {status}"
        )));
    }
    Ok(())
}

// ── Silence detection ────────────────────────────────────────────────────────

const WAV_HEADER_SIZE: usize = 44;

/// Normalized RMS energy of a WAV recording, in [0.0, 1.0].
///
/// Skips the standard 44-byte header and reads the rest as little-endian
/// 16-bit signed PCM. Returns 0.0 for recordings too short to hold samples.
pub fn wav_rms(wav_data: &[u8]) -> f32 {
    if wav_data.len() <= WAV_HEADER_SIZE {
        return 0.0;
    }

    let samples: Vec<i16> = wav_data[WAV_HEADER_SIZE..]
        .chunks_exact(2)
        .map(|chunk| i16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    if samples.is_empty() {
        return 0.0;
    }

    let sum_of_squares: f64 = samples
        .iter()
        .map(|&s| {
            let sample = s as f64;
            sample * sample
        })
        .sum();
    let rms = (sum_of_squares / samples.len() as f64).sqrt();

    (rms / 32767.0) as f32
}

/// Whether a recording is quiet enough to count as "no input".
pub fn is_silence(wav_data: &[u8], threshold: f32) -> bool {
    wav_rms(wav_data) < threshold
}
