use thiserror::Error;

/// Failure reported by an external collaborator (speech or language model).
///
/// The scoring core never propagates these to the user; they are logged at
/// the call boundary and degraded to a safe default outcome.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

#[derive(Debug, Error)]
pub enum ScreeningError {
    #[error("no response for question {question} after the configured attempt limit")]
    NoResponse { question: usize },
}
