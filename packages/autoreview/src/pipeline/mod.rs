//! Evaluation and approval pipeline.
//!
//! `evaluate` runs the rule chain over single revisions, `batch` fans it
//! out over pending pages, `comment` consolidates approvals into one edit
//! summary, and `approve` drives the remote approval action.

pub mod approve;
pub mod batch;
pub mod comment;
pub mod evaluate;
