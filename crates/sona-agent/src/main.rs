use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use sona_agent::bridge::{BedrockModel, PollySpeaker, TranscribeListener};
use sona_agent::conversation::{self, AgentContext};
use sona_agent::journal::SessionJournal;
use sona_agent::state::SharedState;
use sona_agent::{aws, config};
use sona_emotion::detector::CommandDetector;
use sona_emotion::monitor::EmotionMonitor;
use sona_voice::capture::{AudioCapture, CaptureConfig};
use sona_voice::playback;

/// How often the background emotion sampler runs.
const EMOTION_SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if !config::has_config() {
        return Err(eyre::eyre!(
            "no config found. Write one to the platform config directory under \
             com.sona.agent/config.json before starting."
        ));
    }
    let config = config::load_config()?;

    let sdk_config = aws::build_aws_config(&config.region, &config.credentials).await;
    let identity = aws::validate_credentials(&sdk_config).await?;
    info!(account_id = %identity.account_id, region = %config.region, "AWS credentials validated");

    let capture = AudioCapture::auto_detect(CaptureConfig {
        listen_duration_secs: config.listen_duration_secs,
        ..CaptureConfig::default()
    })
    .await?;
    let playback_backend = playback::detect_backend()
        .await
        .ok_or_else(|| eyre::eyre!("no audio playback backend found. Install afplay, SoX (play), or ALSA (aplay)."))?;

    let monitor = EmotionMonitor::new();
    if let Some(command) = &config.emotion_command {
        let detector = Arc::new(CommandDetector::new(command)?);
        // Runs for the life of the process; the handle is not awaited.
        let _ = monitor.spawn(detector, EMOTION_SAMPLE_INTERVAL);
    }

    let journal = SessionJournal::new(
        dirs::data_dir()
            .ok_or_else(|| eyre::eyre!("no data directory found"))?
            .join("com.sona.agent")
            .join("sessions.log"),
    );
    if let Some(dir) = journal.path().parent() {
        std::fs::create_dir_all(dir)?;
    }

    let ctx = AgentContext {
        speaker: PollySpeaker::new(
            sdk_config.clone(),
            config.voice_id.clone(),
            playback_backend,
        ),
        listener: TranscribeListener::new(
            sdk_config.clone(),
            config.bucket.clone(),
            config.language_code.clone(),
            capture,
        ),
        model: BedrockModel::new(sdk_config.clone(), config.model_id.clone()),
        aws: sdk_config,
        config,
        state: SharedState::new(),
        journal,
        monitor,
    };

    conversation::run_loop(&ctx).await
}
