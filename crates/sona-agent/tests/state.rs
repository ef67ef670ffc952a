//! Shared conversation state: single-write results, bounded history, reset.

use sona_agent::state::SharedState;
use sona_bedrock::chat::{trim_history, ChatRole, MAX_HISTORY};
use sona_core::models::result::AssessmentResult;
use sona_core::models::severity::{SeverityBand, SeverityLevel};
use sona_core::questions::QUESTION_COUNT;

fn sample_result() -> AssessmentResult {
    AssessmentResult::from_responses([SeverityLevel::SeveralDays; QUESTION_COUNT])
}

#[tokio::test]
async fn last_result_is_absent_until_set() {
    let state = SharedState::new();
    assert!(state.last_result().await.is_none());

    state.set_last_result(sample_result()).await;
    let stored = state.last_result().await.unwrap();
    assert_eq!(stored.total, 9);
    assert_eq!(stored.band, SeverityBand::Mild);
}

#[tokio::test]
async fn a_new_result_replaces_the_old_one() {
    let state = SharedState::new();
    state.set_last_result(sample_result()).await;

    let worse = AssessmentResult::from_responses([SeverityLevel::NearlyEveryDay; QUESTION_COUNT]);
    state.set_last_result(worse).await;

    assert_eq!(state.last_result().await.unwrap().total, 27);
}

#[tokio::test]
async fn history_alternates_and_trims_to_recent_exchanges() {
    let state = SharedState::new();
    for i in 0..5 {
        state.push_user(&format!("question {i}")).await;
        state.push_assistant(&format!("answer {i}")).await;
    }

    let history = state.history().await;
    assert_eq!(history.len(), 10);
    assert_eq!(history[0].role, ChatRole::User);
    assert_eq!(history[1].role, ChatRole::Assistant);

    let trimmed = trim_history(&history);
    assert_eq!(trimmed.len(), MAX_HISTORY * 2);
    assert_eq!(trimmed.last().unwrap().content, "answer 4");
    assert_eq!(trimmed.first().unwrap().content, "question 2");
}

#[tokio::test]
async fn reset_clears_everything() {
    let state = SharedState::new();
    state.set_last_result(sample_result()).await;
    state.push_user("hello").await;

    state.reset().await;

    assert!(state.last_result().await.is_none());
    assert!(state.history().await.is_empty());
}
