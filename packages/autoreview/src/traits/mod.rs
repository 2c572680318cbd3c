//! Trait abstractions for external collaborators.

pub mod client;
pub mod scores;
