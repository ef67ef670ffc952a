//! sona-bedrock
//!
//! Bedrock model invocation for the screening agent: single-shot completion,
//! persona chat with bounded history, and intent detection.

pub mod chat;
pub mod error;
pub mod intent;
