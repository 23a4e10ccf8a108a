//! Source-agnostic normalization pipeline.
//!
//! Extractors in [`crate::sources`] produce [`crate::models::Candidate`]s;
//! [`assemble`] scores, classifies, gates and keys them into
//! [`crate::models::UnifiedRecord`]s.

pub mod assemble;
pub mod citation_key;
pub mod classify;
pub mod relevance;

pub use assemble::{AcceptanceGate, PLACEHOLDER_TITLE, assemble, assemble_one};
pub use citation_key::generate_key;
pub use classify::{classify, classify_thesis};
pub use relevance::score;
