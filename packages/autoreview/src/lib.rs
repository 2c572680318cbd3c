//! Flagged-Revisions Autoreview Library
//!
//! Evaluates pending wiki revisions against an ordered chain of safety and
//! trust rules, then consolidates the approvable ones into a single
//! approval action with an explanatory edit summary.
//!
//! # Design Philosophy
//!
//! **"Default to a human"**
//!
//! - Explicit rule order, short-circuit on the first conclusive rule
//! - Every evaluation carries its full audit trail
//! - External failures are recorded, never fatal and never an approval
//! - Library handles decisions, the caller handles wiki I/O via traits
//!
//! # Usage
//!
//! ```rust,ignore
//! use autoreview::{RevisionEvaluator, WikiRuleConfig};
//! use autoreview::testing::{MockScoreProvider, MockWikiClient};
//!
//! let evaluator = RevisionEvaluator::new(
//!     "fi",
//!     MockWikiClient::new(),
//!     MockScoreProvider::new(),
//! );
//!
//! let result = evaluator
//!     .evaluate(&revision, Some(&profile), &WikiRuleConfig::new())
//!     .await;
//! if result.is_approved() {
//!     // consolidate and approve via pipeline::approve
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (WikiClient, ScoreProvider)
//! - [`types`] - Revisions, profiles, decisions, per-wiki configuration
//! - [`checks`] - Pure text checks (ISBN validation, link domains)
//! - [`pipeline`] - Rule chain, batch fan-out, comment building, approval
//! - [`cache`] - Bounded memoization for block-log lookups
//! - [`testing`] - Mock collaborators for tests

pub mod cache;
pub mod checks;
pub mod error;
pub mod pipeline;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{AutoreviewError, ClientError, ClientResult, Result};
pub use traits::{
    client::{ApprovalResponse, ApprovalStatus, WikiClient},
    scores::{EditScores, ScoreProvider},
};
pub use types::{
    config::{ScoreThresholds, WikiRuleConfig},
    decision::{CheckResult, CheckStatus, Decision, DecisionStatus, EvaluationResult},
    profile::EditorProfile,
    revision::{PendingPage, Revision},
};

// Re-export the evaluator and pipeline entry points
pub use pipeline::evaluate::RevisionEvaluator;
pub use pipeline::{
    approve::{
        approval_statistics, batch_process_pages, preview_approval, process_and_approve,
        ApprovalOutcome, ApprovalPreview, ApprovalStatistics, DEFAULT_COMMENT_PREFIX,
    },
    batch::{evaluate_page, evaluate_pages, BatchConfig, DEFAULT_MAX_CONCURRENCY},
    comment::{
        approval_summary, generate_approval_comment, normalize_reason, validate_comment_length,
        ApprovalSummary, DEFAULT_MAX_COMMENT_LENGTH,
    },
};

// Re-export checks
pub use checks::{
    domains::DomainVerifier,
    isbn::{find_invalid_isbns, validate_isbn10, validate_isbn13},
};

// Re-export the block-lookup cache
pub use cache::{BlockLookupCache, BlockLookupKey, DEFAULT_BLOCK_CACHE_CAPACITY};
