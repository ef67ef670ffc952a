//! Live integration tests against S3 and Amazon Transcribe.
//!
//! These tests call real AWS APIs and require valid credentials in the
//! environment (e.g. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`), plus
//! `SONA_TEST_BUCKET` naming a writable scratch bucket.
//!
//! Run with: `cargo test -p sona-voice --test live -- --ignored`

use sona_voice::error::VoiceError;
use sona_voice::stt::transcribe_utterance;

async fn build_config() -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await
}

fn test_bucket() -> String {
    std::env::var("SONA_TEST_BUCKET").expect("set SONA_TEST_BUCKET env var")
}

async fn staged_object_count(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    prefix: &str,
) -> usize {
    let resp = s3
        .list_objects_v2()
        .bucket(bucket)
        .prefix(prefix)
        .send()
        .await
        .expect("list_objects_v2 should succeed");
    resp.contents().len()
}

/// A failed job must still leave the bucket clean: garbage audio makes
/// Transcribe fail the job, and both staged objects are deleted afterwards.
#[tokio::test]
#[ignore]
async fn failed_job_cleans_up_staged_objects() {
    let config = build_config().await;
    let bucket = test_bucket();
    let s3 = aws_sdk_s3::Client::new(&config);

    let before_utterances = staged_object_count(&s3, &bucket, "_utterances/").await;
    let before_transcripts = staged_object_count(&s3, &bucket, "_transcribe/").await;

    // Not a WAV file; Transcribe rejects it and the job fails.
    let garbage = b"definitely not pcm audio".to_vec();
    let outcome = transcribe_utterance(&config, &bucket, "en-US", garbage).await;

    match outcome {
        Err(VoiceError::JobFailed(reason)) => println!("job failed as expected: {reason}"),
        other => panic!("expected JobFailed, got {other:?}"),
    }

    assert_eq!(
        staged_object_count(&s3, &bucket, "_utterances/").await,
        before_utterances,
        "failed job left its audio object behind"
    );
    assert_eq!(
        staged_object_count(&s3, &bucket, "_transcribe/").await,
        before_transcripts,
        "failed job left a transcript object behind"
    );
}

/// A real recording comes back with transcript text.
#[tokio::test]
#[ignore]
async fn real_speech_round_trips() {
    let config = build_config().await;
    let bucket = test_bucket();

    let wav = std::fs::read(
        std::env::var("SONA_TEST_WAV").expect("set SONA_TEST_WAV to a 16kHz mono WAV"),
    )
    .expect("test WAV should be readable");

    let text = transcribe_utterance(&config, &bucket, "en-US", wav)
        .await
        .expect("transcription should succeed");
    println!("transcript: {text:?}");
    assert!(text.is_some());
}
