//! Wiki client trait for the external lookups the rule chain depends on.
//!
//! The evaluator never fetches revision data itself (that is the queue
//! collaborator's job); this trait covers only the point lookups the rules
//! make and the one side-effecting approval action the orchestrator issues.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;
use crate::types::revision::Revision;

/// External wiki operations.
///
/// Implementations wrap the MediaWiki action API (or a dry-run shim).
/// Errors from these calls are recorded in the audit trail as
/// `error`-status checks; they never abort an evaluation.
#[async_trait]
pub trait WikiClient: Send + Sync {
    /// Whether a human reviewer previously un-approved this revision.
    async fn has_manual_unapproval(&self, page_title: &str, revid: u64) -> ClientResult<bool>;

    /// Whether the user was blocked at any point after the given timestamp.
    ///
    /// The evaluator memoizes this per (wiki, username, timestamp); see
    /// [`crate::cache::BlockLookupCache`].
    async fn was_blocked_after(
        &self,
        wiki: &str,
        username: &str,
        timestamp: DateTime<Utc>,
    ) -> ClientResult<bool>;

    /// Whether the edit introduces template/render breakage.
    async fn introduces_render_errors(&self, revision: &Revision) -> ClientResult<bool>;

    /// Perform (or revert) an approval on the remote wiki.
    ///
    /// At-least-once semantics are assumed remotely; the orchestrator
    /// invokes this at most once per page per run.
    async fn approve(
        &self,
        revid: u64,
        comment: &str,
        unapprove: bool,
    ) -> ClientResult<ApprovalResponse>;
}

/// Response from the remote approval action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalResponse {
    /// Outcome reported by the remote wiki.
    pub result: ApprovalStatus,

    /// True when the client is configured not to write.
    pub dry_run: bool,

    /// Human-readable message from the remote action.
    pub message: String,
}

impl ApprovalResponse {
    /// Successful approval response.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            result: ApprovalStatus::Success,
            dry_run: false,
            message: message.into(),
        }
    }

    /// Failed approval response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            result: ApprovalStatus::Error,
            dry_run: false,
            message: message.into(),
        }
    }

    /// Mark the response as produced by a dry run.
    pub fn dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Only a `success` result counts as success.
    pub fn is_success(&self) -> bool {
        self.result == ApprovalStatus::Success
    }
}

/// Wire form: `"success"` or `"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalStatus {
    Success,
    Error,
}
