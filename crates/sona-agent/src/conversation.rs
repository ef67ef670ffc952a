//! The outer conversational loop.
//!
//! Listens for one utterance at a time and routes it: the exit phrase ends
//! the conversation, a screening intent runs an assessment session, a score
//! question replays the stored result, and everything else goes to persona
//! chat with bounded history.

use tracing::{info, warn};

use sona_bedrock::chat::{self, trim_history};
use sona_bedrock::intent::{detect_intent, Intent};
use sona_emotion::monitor::EmotionMonitor;
use sona_emotion::EmotionSnapshot;
use sona_screening::session::{AssessmentSession, SessionConfig};
use sona_screening::{SpeechInput, SpeechOutput};

use crate::bridge::{BedrockModel, PollySpeaker, TranscribeListener};
use crate::config::SonaConfig;
use crate::journal::SessionJournal;
use crate::state::SharedState;

/// Persona for general chat.
const PERSONA: &str = "You are Sona, a warm and gentle voice assistant for \
mental-health check-ins. Keep every reply short, at most five spoken \
sentences. If the user expresses thoughts of self-harm, gently encourage \
them to call or text the 988 crisis line.";

pub const GREETING: &str =
    "Hi, I'm Sona. You can chat with me, or say you'd like to do a check-in.";
pub const SCREENING_ACK: &str = "Alright, let's do a check-in.";
pub const FAREWELL: &str = "Take care. Goodbye.";
pub const APOLOGY: &str = "Sorry, something went wrong on my end.";
pub const NO_RESULT_YET: &str =
    "You haven't completed a check-in yet. Say so if you'd like to do one.";

/// Everything the loop needs for one conversation.
pub struct AgentContext {
    pub aws: aws_config::SdkConfig,
    pub config: SonaConfig,
    pub speaker: PollySpeaker,
    pub listener: TranscribeListener,
    pub model: BedrockModel,
    pub state: SharedState,
    pub journal: SessionJournal,
    pub monitor: EmotionMonitor,
}

/// Persona system prompt, tinted with the latest emotion reading when a face
/// is in view. The snapshot is advisory; a stale value only softens the tone.
pub fn persona_system_prompt(snapshot: &EmotionSnapshot) -> String {
    if snapshot.face_detected {
        format!(
            "{PERSONA} The user currently looks {}.",
            snapshot.emotion.label()
        )
    } else {
        PERSONA.to_string()
    }
}

/// Whether an utterance is asking about the stored assessment score.
pub fn is_score_query(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("score") && (lower.contains("what") || lower.contains("my"))
}

/// Whether an utterance ends the conversation.
pub fn is_exit(text: &str, exit_phrase: &str) -> bool {
    text.to_lowercase().contains(&exit_phrase.to_lowercase())
}

/// Run the conversation until the user says the exit phrase.
pub async fn run_loop(ctx: &AgentContext) -> eyre::Result<()> {
    speak_best_effort(ctx, GREETING).await;
    ctx.journal.record("conversation started");

    loop {
        let heard = match ctx.listener.listen().await {
            Ok(heard) => heard,
            Err(e) => {
                warn!(error = %e, "listen failed, retrying");
                None
            }
        };
        let Some(user_text) = heard.filter(|t| !t.trim().is_empty()) else {
            continue;
        };
        info!(text = %user_text, "heard");

        if is_exit(&user_text, &ctx.config.exit_phrase) {
            speak_best_effort(ctx, FAREWELL).await;
            ctx.state.reset().await;
            ctx.journal.record("conversation ended");
            return Ok(());
        }

        match detect_intent(&ctx.aws, &ctx.config.model_id, &user_text).await {
            Intent::StartScreening => run_assessment(ctx).await,
            Intent::General => {
                if is_score_query(&user_text) {
                    replay_score(ctx).await;
                } else {
                    general_chat(ctx, &user_text).await;
                }
            }
        }
    }
}

async fn run_assessment(ctx: &AgentContext) {
    speak_best_effort(ctx, SCREENING_ACK).await;
    ctx.journal.record("assessment started");

    let session = AssessmentSession::new(
        SessionConfig {
            max_attempts: ctx.config.max_attempts,
        },
        &ctx.speaker,
        &ctx.listener,
        &ctx.model,
    );

    match session.run().await {
        Ok(result) => {
            let scores: Vec<u8> = result.responses.iter().map(|r| r.score()).collect();
            ctx.journal.record(&format!(
                "assessment completed: scores {scores:?}, total {} ({})",
                result.total,
                result.band.label()
            ));
            ctx.state.set_last_result(result).await;
        }
        Err(e) => {
            warn!(error = %e, "assessment aborted");
            ctx.journal.record(&format!("assessment aborted: {e}"));
            speak_best_effort(ctx, APOLOGY).await;
        }
    }
}

async fn replay_score(ctx: &AgentContext) {
    match ctx.state.last_result().await {
        Some(result) => {
            speak_best_effort(ctx, &result.summary()).await;
        }
        None => speak_best_effort(ctx, NO_RESULT_YET).await,
    }
}

async fn general_chat(ctx: &AgentContext, user_text: &str) {
    ctx.state.push_user(user_text).await;
    let history = ctx.state.history().await;

    let system_prompt = persona_system_prompt(&ctx.monitor.snapshot());
    let reply = match chat::chat_converse(
        &ctx.aws,
        &ctx.config.model_id,
        &system_prompt,
        trim_history(&history),
    )
    .await
    {
        Ok(reply) => reply,
        Err(e) => {
            warn!(error = %e, "chat failed");
            APOLOGY.to_string()
        }
    };

    ctx.state.push_assistant(&reply).await;
    speak_best_effort(ctx, &reply).await;
}

async fn speak_best_effort(ctx: &AgentContext, text: &str) {
    if let Err(e) = ctx.speaker.speak(text).await {
        warn!(error = %e, "speech output failed, continuing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_queries_are_recognized() {
        assert!(is_score_query("What was my score?"));
        assert!(is_score_query("tell me my score"));
        assert!(!is_score_query("I love watching the score of a film"));
        assert!(!is_score_query("how are you"));
    }

    #[test]
    fn exit_phrase_matches_case_insensitively() {
        assert!(is_exit("Okay, Goodbye now", "goodbye"));
        assert!(!is_exit("good morning", "goodbye"));
    }

    #[test]
    fn persona_prompt_mentions_emotion_only_with_a_face() {
        use sona_emotion::Emotion;

        let mut snapshot = EmotionSnapshot::default();
        assert!(!persona_system_prompt(&snapshot).contains("looks"));

        snapshot.face_detected = true;
        snapshot.emotion = Emotion::Sad;
        assert!(persona_system_prompt(&snapshot).contains("looks sad"));
    }
}
