//! Value objects shared across the pipeline.

pub mod config;
pub mod decision;
pub mod profile;
pub mod revision;
