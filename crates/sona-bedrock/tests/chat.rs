//! History trimming for persona chat.

use sona_bedrock::chat::{trim_history, ChatMessage, ChatRole, MAX_HISTORY};

fn exchange(n: usize) -> [ChatMessage; 2] {
    [
        ChatMessage {
            role: ChatRole::User,
            content: format!("user message {n}"),
        },
        ChatMessage {
            role: ChatRole::Assistant,
            content: format!("assistant message {n}"),
        },
    ]
}

#[test]
fn short_history_passes_through_unchanged() {
    let messages: Vec<ChatMessage> = exchange(1).into_iter().collect();
    let trimmed = trim_history(&messages);
    assert_eq!(trimmed.len(), 2);
    assert_eq!(trimmed[0].content, "user message 1");
}

#[test]
fn long_history_keeps_only_recent_exchanges() {
    let messages: Vec<ChatMessage> = (1..=10).flat_map(exchange).collect();
    let trimmed = trim_history(&messages);

    assert_eq!(trimmed.len(), MAX_HISTORY * 2);
    // The oldest surviving message belongs to exchange 8 of 10.
    assert_eq!(trimmed[0].content, "user message 8");
    assert_eq!(trimmed.last().unwrap().content, "assistant message 10");
}

#[test]
fn empty_history_is_fine() {
    assert!(trim_history(&[]).is_empty());
}
