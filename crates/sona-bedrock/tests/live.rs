//! Live integration tests against the Bedrock Converse API.
//!
//! These tests call real AWS APIs and require valid credentials in the
//! environment (e.g. `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`), plus
//! optionally `SONA_MODEL_ID` to pick the model.
//!
//! Run with: `cargo test -p sona-bedrock --test live -- --ignored`

use sona_bedrock::chat::complete;
use sona_bedrock::intent::{detect_intent, Intent};

async fn build_config() -> aws_config::SdkConfig {
    aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new("us-east-1"))
        .load()
        .await
}

fn model_id() -> String {
    std::env::var("SONA_MODEL_ID")
        .unwrap_or_else(|_| "us.anthropic.claude-3-5-haiku-20241022-v1:0".to_string())
}

#[tokio::test]
#[ignore]
async fn complete_returns_nonempty_text() {
    let config = build_config().await;
    let reply = complete(
        &config,
        &model_id(),
        "You reply with exactly one word.",
        "Reply with the word: ready",
    )
    .await
    .expect("complete should succeed");

    println!("reply: {reply}");
    assert!(!reply.trim().is_empty());
}

#[tokio::test]
#[ignore]
async fn screening_request_is_routed_to_start_screening() {
    let config = build_config().await;
    let intent = detect_intent(
        &config,
        &model_id(),
        "I'd like to do the depression questionnaire now",
    )
    .await;
    assert_eq!(intent, Intent::StartScreening);
}
