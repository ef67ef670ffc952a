//! sona-screening
//!
//! The PHQ-9 scoring core: safety override, answer classification, and the
//! assessment session state machine. No AWS dependency — the external speech
//! and language-model services sit behind the collaborator traits in this
//! crate, so the whole pipeline can be exercised with scripted stubs.

pub mod classify;
pub mod error;
pub mod safety;
pub mod session;

use async_trait::async_trait;

use crate::error::CollaboratorError;

/// Speech rendering collaborator. Failure is best-effort: callers log and
/// continue.
#[async_trait]
pub trait SpeechOutput: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), CollaboratorError>;
}

/// Speech recognition collaborator.
///
/// Blocks until an utterance is heard or an internal timeout elapses.
/// `Ok(None)` is the explicit "no input" outcome — timeout or unintelligible
/// speech — and is not an error.
#[async_trait]
pub trait SpeechInput: Send + Sync {
    async fn listen(&self) -> Result<Option<String>, CollaboratorError>;
}

/// Natural-language model collaborator.
///
/// A single narrow seam so the non-deterministic model can be stubbed in
/// tests; the safety-override and fallback-default paths carry the
/// guaranteed behavior.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, CollaboratorError>;
}
