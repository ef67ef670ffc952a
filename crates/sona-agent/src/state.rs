//! Conversation state shared across turns.

use std::sync::Arc;

use sona_bedrock::chat::{ChatMessage, ChatRole};
use sona_core::models::result::AssessmentResult;
use tokio::sync::Mutex;

#[derive(Debug, Default)]
struct ConversationState {
    last_result: Option<AssessmentResult>,
    history: Vec<ChatMessage>,
}

/// Cloneable handle to the per-conversation state: the latest completed
/// assessment and the persona chat history.
#[derive(Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<ConversationState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn last_result(&self) -> Option<AssessmentResult> {
        self.inner.lock().await.last_result.clone()
    }

    pub async fn set_last_result(&self, result: AssessmentResult) {
        self.inner.lock().await.last_result = Some(result);
    }

    pub async fn push_user(&self, content: &str) {
        self.inner.lock().await.history.push(ChatMessage {
            role: ChatRole::User,
            content: content.to_string(),
        });
    }

    pub async fn push_assistant(&self, content: &str) {
        self.inner.lock().await.history.push(ChatMessage {
            role: ChatRole::Assistant,
            content: content.to_string(),
        });
    }

    pub async fn history(&self) -> Vec<ChatMessage> {
        self.inner.lock().await.history.clone()
    }

    /// Forget everything. Called when the user says the exit phrase.
    pub async fn reset(&self) {
        let mut state = self.inner.lock().await;
        state.last_result = None;
        state.history.clear();
    }
}
