//! Conversation and completion via the Bedrock Converse API.
//!
//! Two entry points: [`complete`] for single-shot constrained prompts
//! (answer classification, intent detection) and [`chat_converse`] for
//! persona chat carrying a bounded slice of conversation history.

use aws_sdk_bedrockruntime::types::{
    ContentBlock, ConversationRole, Message, SystemContentBlock,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::BedrockError;

/// How many prior exchanges are carried into a persona chat call.
pub const MAX_HISTORY: usize = 3;

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

/// Send a single prompt to Bedrock and return the raw reply text.
pub async fn complete(
    config: &aws_config::SdkConfig,
    model_id: &str,
    system_prompt: &str,
    user_message: &str,
) -> Result<String, BedrockError> {
    let client = aws_sdk_bedrockruntime::Client::new(config);

    let message = Message::builder()
        .role(ConversationRole::User)
        .content(ContentBlock::Text(user_message.to_string()))
        .build()
        .map_err(|e| BedrockError::Invocation(e.to_string()))?;

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .messages(message)
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    response_text(response)
}

/// Send a multi-turn conversation to Bedrock and return the assistant's reply.
///
/// The caller provides the message history (already trimmed to
/// [`MAX_HISTORY`] exchanges) and a persona system prompt.
pub async fn chat_converse(
    config: &aws_config::SdkConfig,
    model_id: &str,
    system_prompt: &str,
    messages: &[ChatMessage],
) -> Result<String, BedrockError> {
    let client = aws_sdk_bedrockruntime::Client::new(config);

    let mut converse_messages: Vec<Message> = Vec::new();
    for msg in messages {
        let role = match msg.role {
            ChatRole::User => ConversationRole::User,
            ChatRole::Assistant => ConversationRole::Assistant,
        };
        let message = Message::builder()
            .role(role)
            .content(ContentBlock::Text(msg.content.clone()))
            .build()
            .map_err(|e| BedrockError::Invocation(e.to_string()))?;
        converse_messages.push(message);
    }

    let response = client
        .converse()
        .model_id(model_id)
        .system(SystemContentBlock::Text(system_prompt.to_string()))
        .set_messages(Some(converse_messages))
        .send()
        .await
        .map_err(|e| BedrockError::Invocation(e.into_service_error().to_string()))?;

    let reply = response_text(response)?;
    info!(model_id, reply_len = reply.len(), "chat reply received");
    Ok(reply)
}

/// Keep only the most recent [`MAX_HISTORY`] exchanges of a conversation.
///
/// An exchange is a user/assistant pair, so up to `2 * MAX_HISTORY` trailing
/// messages survive.
pub fn trim_history(messages: &[ChatMessage]) -> &[ChatMessage] {
    let keep = MAX_HISTORY * 2;
    if messages.len() > keep {
        &messages[messages.len() - keep..]
    } else {
        messages
    }
}

/// Join all text blocks of a Converse response into one string.
fn response_text(
    response: aws_sdk_bedrockruntime::operation::converse::ConverseOutput,
) -> Result<String, BedrockError> {
    let output_message = response
        .output()
        .and_then(|o| o.as_message().ok())
        .ok_or_else(|| BedrockError::ResponseParse("no message in response".to_string()))?;

    let text = output_message
        .content()
        .iter()
        .filter_map(|block| {
            if let ContentBlock::Text(text) = block {
                Some(text.as_str())
            } else {
                None
            }
        })
        .collect::<Vec<_>>()
        .join("");

    Ok(text)
}
