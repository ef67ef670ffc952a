//! sona-core
//!
//! Pure domain types for the Sona screening agent: severity levels and bands,
//! the PHQ-9 question list, and the assessment result aggregate. No AWS
//! dependency — this is the shared vocabulary of the system.

pub mod models;
pub mod questions;
