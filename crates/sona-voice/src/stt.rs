//! Speech recognition: capture one utterance and transcribe it.
//!
//! The recording is uploaded to S3, run through an Amazon Transcribe job,
//! and the transcript text is read back from the job output in the same
//! bucket. Temporary objects and the job itself are cleaned up best-effort.
//!
//! The "no input" outcome — a silent recording, an empty transcript, or a
//! polling timeout — is `Ok(None)`, not an error: callers re-ask rather
//! than fail.

use aws_sdk_transcribe::types::{LanguageCode, Media, MediaFormat, TranscriptionJobStatus};
use tracing::{debug, info};
use uuid::Uuid;

use crate::capture::{self, AudioCapture};
use crate::error::VoiceError;

/// How long to wait for a transcription job before treating the utterance
/// as lost.
const POLL_BUDGET_SECS: u64 = 90;
const POLL_INTERVAL_SECS: u64 = 2;

/// Record one listening window and transcribe it.
///
/// Returns `Ok(None)` when nothing usable was heard.
pub async fn listen_once(
    config: &aws_config::SdkConfig,
    bucket: &str,
    language_code: &str,
    capture: &AudioCapture,
) -> Result<Option<String>, VoiceError> {
    let wav = capture.record_bytes().await?;

    if capture::is_silence(&wav, capture.config().silence_threshold) {
        debug!("recording below silence threshold, skipping transcription");
        return Ok(None);
    }

    let text = transcribe_utterance(config, bucket, language_code, wav).await?;
    match text {
        Some(text) => {
            info!(text = %text, "utterance transcribed");
            Ok(Some(text))
        }
        None => Ok(None),
    }
}

/// Upload WAV bytes and run them through an Amazon Transcribe job.
///
/// Directs the job output to the same bucket under `_transcribe/`, polls
/// until completion or the poll budget runs out, then cleans up the audio
/// object, the transcript object, and the job.
pub async fn transcribe_utterance(
    config: &aws_config::SdkConfig,
    bucket: &str,
    language_code: &str,
    wav: Vec<u8>,
) -> Result<Option<String>, VoiceError> {
    let transcribe = aws_sdk_transcribe::Client::new(config);
    let s3 = aws_sdk_s3::Client::new(config);

    let job_name = format!("sona-{}", Uuid::new_v4());
    let audio_key = format!("_utterances/{job_name}.wav");
    let output_key = format!("_transcribe/{job_name}.json");
    let s3_uri = format!("s3://{bucket}/{audio_key}");

    s3.put_object()
        .bucket(bucket)
        .key(&audio_key)
        .content_type("audio/wav")
        .body(wav.into())
        .send()
        .await
        .map_err(|e| VoiceError::Api(format!("failed to upload utterance: {e}")))?;

    // Once the audio object exists, every exit path (failed job start and
    // poll errors included) must fall through to the cleanup below.
    let outcome = run_transcription_job(
        &transcribe,
        &s3,
        bucket,
        language_code,
        &job_name,
        &s3_uri,
        &output_key,
    )
    .await;

    // Clean up: the uploaded audio, the transcript JSON, and the job.
    let _ = s3.delete_object().bucket(bucket).key(&audio_key).send().await;
    let _ = s3.delete_object().bucket(bucket).key(&output_key).send().await;
    let _ = transcribe
        .delete_transcription_job()
        .transcription_job_name(&job_name)
        .send()
        .await;

    outcome
}

/// Start the job and poll it to a terminal outcome. Never deletes anything;
/// the caller owns cleanup.
async fn run_transcription_job(
    transcribe: &aws_sdk_transcribe::Client,
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    language_code: &str,
    job_name: &str,
    s3_uri: &str,
    output_key: &str,
) -> Result<Option<String>, VoiceError> {
    debug!(job_name, s3_uri, "starting transcription job");

    transcribe
        .start_transcription_job()
        .transcription_job_name(job_name)
        .media(Media::builder().media_file_uri(s3_uri).build())
        .media_format(MediaFormat::Wav)
        .language_code(LanguageCode::from(language_code))
        .output_bucket_name(bucket)
        .output_key(output_key)
        .send()
        .await
        .map_err(|e| VoiceError::Api(e.into_service_error().to_string()))?;

    // Poll for completion within the budget; a slow job counts as no input.
    let deadline =
        std::time::Instant::now() + std::time::Duration::from_secs(POLL_BUDGET_SECS);
    loop {
        tokio::time::sleep(std::time::Duration::from_secs(POLL_INTERVAL_SECS)).await;

        if std::time::Instant::now() >= deadline {
            debug!(job_name, "transcription poll budget exhausted");
            return Ok(None);
        }

        let resp = transcribe
            .get_transcription_job()
            .transcription_job_name(job_name)
            .send()
            .await
            .map_err(|e| VoiceError::Api(e.into_service_error().to_string()))?;

        let job = resp
            .transcription_job()
            .ok_or_else(|| VoiceError::Api("no job in response".into()))?;

        match job.transcription_job_status() {
            Some(TranscriptionJobStatus::Completed) => {
                return read_transcript(s3, bucket, output_key).await;
            }
            Some(TranscriptionJobStatus::Failed) => {
                let reason = job.failure_reason().unwrap_or("unknown").to_string();
                return Err(VoiceError::JobFailed(reason));
            }
            _ => continue,
        }
    }
}

async fn read_transcript(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    output_key: &str,
) -> Result<Option<String>, VoiceError> {
    let get_resp = s3
        .get_object()
        .bucket(bucket)
        .key(output_key)
        .send()
        .await
        .map_err(|e| VoiceError::Api(format!("failed to read transcript from S3: {e}")))?;

    let body = get_resp
        .body
        .collect()
        .await
        .map_err(|e| VoiceError::Api(format!("failed to read transcript body: {e}")))?;

    let transcript_json = String::from_utf8(body.into_bytes().to_vec())
        .map_err(|e| VoiceError::Parse(e.to_string()))?;

    let text = extract_transcript_text(&transcript_json)?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(text))
}

/// Extract plain text from the Transcribe JSON response.
///
/// The response format is:
/// ```json
/// { "results": { "transcripts": [{ "transcript": "the text..." }] } }
/// ```
fn extract_transcript_text(json: &str) -> Result<String, VoiceError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| VoiceError::Parse(e.to_string()))?;

    let text = value
        .get("results")
        .and_then(|r| r.get("transcripts"))
        .and_then(|t| t.as_array())
        .and_then(|arr| arr.first())
        .and_then(|t| t.get("transcript"))
        .and_then(|t| t.as_str())
        .unwrap_or("");

    Ok(text.to_string())
}
