//! sona-agent library root.
//!
//! Re-exports internal modules so integration tests can exercise them
//! directly without going through the binary.

pub mod aws;
pub mod bridge;
pub mod config;
pub mod conversation;
pub mod journal;
pub mod state;
