//! Intent detection for the conversational loop.
//!
//! The model is asked to label each utterance with exactly one intent from a
//! closed list. Anything off-list — including model failures — defaults to
//! general chat, so the loop never stalls on a misread intent.

use tracing::warn;

use crate::chat;

const INTENT_SYSTEM_PROMPT: &str = "You are an intent detector. \
Reply with exactly one word from the list you are given, nothing else.";

/// What the user wants from an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// The user wants to begin the PHQ-9 assessment, however they phrase it.
    StartScreening,
    /// Anything else.
    General,
}

/// Build the constrained intent prompt for one utterance.
pub fn intent_prompt(user_text: &str) -> String {
    format!(
        "Message from the user:\n\
         \"{user_text}\"\n\
         \n\
         Reply with exactly one word from this list:\n\
         - start_screening   (the user wants to begin the PHQ-9 assessment, \
         in whatever words)\n\
         - general           (the user wants anything else)\n"
    )
}

/// Parse a model reply into an intent. Off-list replies are `General`.
pub fn parse_intent(reply: &str) -> Intent {
    match reply.replace('\n', "").trim() {
        "start_screening" => Intent::StartScreening,
        _ => Intent::General,
    }
}

/// Classify one utterance. A provider error degrades to `General`.
pub async fn detect_intent(
    config: &aws_config::SdkConfig,
    model_id: &str,
    user_text: &str,
) -> Intent {
    let prompt = intent_prompt(user_text);
    match chat::complete(config, model_id, INTENT_SYSTEM_PROMPT, &prompt).await {
        Ok(reply) => parse_intent(&reply),
        Err(e) => {
            warn!(error = %e, "intent detection failed, assuming general chat");
            Intent::General
        }
    }
}
