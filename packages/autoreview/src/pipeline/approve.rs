//! Approval orchestration.
//!
//! Bridges evaluation results to the remote approval action: builds the
//! consolidated comment, issues at most one approval per page, and reports
//! a structured outcome. Client failures become failed outcomes with the
//! page summary attached; they are never propagated as errors, so one bad
//! page cannot abort a batch run.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::pipeline::comment::{
    approval_summary, generate_approval_comment, validate_comment_length, ApprovalSummary,
    DEFAULT_MAX_COMMENT_LENGTH,
};
use crate::traits::client::{ApprovalResponse, WikiClient};
use crate::types::decision::EvaluationResult;

/// Prefix identifying automated approvals in page histories.
pub const DEFAULT_COMMENT_PREFIX: &str = "Autoreview: ";

/// Outcome of one page's approval attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalOutcome {
    /// True only when the remote action reported success.
    pub success: bool,

    /// The revision that was (or would have been) approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_id: Option<u64>,

    /// The comment sent with the approval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Raw response from the remote action, when one was made.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_result: Option<ApprovalResponse>,

    /// Failure description when no action succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Page rollup regardless of outcome.
    pub summary: ApprovalSummary,
}

/// Dry-run preview of what an approval pass would do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalPreview {
    pub can_approve: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rev_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment_length: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    pub summary: ApprovalSummary,
}

/// Aggregated statistics across a batch of pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalStatistics {
    pub total_pages: usize,
    pub pages_with_approvals: usize,
    pub total_revisions: usize,
    pub total_approved: usize,
    pub total_blocked: usize,
    /// 0.0 when there were no revisions.
    pub overall_approval_rate: f64,
    /// 0.0 when there were no pages.
    pub pages_approval_rate: f64,
}

/// Approve the highest approvable revision from one page's results.
///
/// Issues at most one `approve` call. When nothing is approvable the
/// outcome carries "No revisions can be approved"; a client error is
/// caught and reported in the outcome rather than returned.
pub async fn process_and_approve<C: WikiClient>(
    client: &C,
    results: &[EvaluationResult],
    comment_prefix: &str,
) -> ApprovalOutcome {
    let summary = approval_summary(results);

    let Some((highest, comment)) = generate_approval_comment(results) else {
        return ApprovalOutcome {
            success: false,
            rev_id: None,
            comment: None,
            approval_result: None,
            message: Some("No revisions can be approved".to_string()),
            summary,
        };
    };

    let full_comment = format!("{comment_prefix}{comment}");
    let validated = validate_comment_length(&full_comment, DEFAULT_MAX_COMMENT_LENGTH);

    match client.approve(highest, &validated, false).await {
        Ok(response) => {
            let success = response.is_success();
            if success {
                info!(rev_id = highest, "Approved revision");
            } else {
                error!(rev_id = highest, message = %response.message, "Approval rejected");
            }
            ApprovalOutcome {
                success,
                rev_id: Some(highest),
                comment: Some(validated),
                approval_result: Some(response),
                message: None,
                summary,
            }
        }
        Err(e) => {
            error!(rev_id = highest, error = %e, "Approval call failed");
            ApprovalOutcome {
                success: false,
                rev_id: Some(highest),
                comment: Some(validated),
                approval_result: None,
                message: Some(e.to_string()),
                summary,
            }
        }
    }
}

/// Build the comment an approval pass would send, without sending it.
pub fn preview_approval(results: &[EvaluationResult], comment_prefix: &str) -> ApprovalPreview {
    let summary = approval_summary(results);

    let Some((highest, comment)) = generate_approval_comment(results) else {
        return ApprovalPreview {
            can_approve: false,
            rev_id: None,
            comment: None,
            comment_length: None,
            message: Some("No revisions can be approved".to_string()),
            summary,
        };
    };

    let full_comment = format!("{comment_prefix}{comment}");
    let validated = validate_comment_length(&full_comment, DEFAULT_MAX_COMMENT_LENGTH);

    ApprovalPreview {
        can_approve: true,
        rev_id: Some(highest),
        comment_length: Some(validated.len()),
        comment: Some(validated),
        message: None,
        summary,
    }
}

/// Run the approval pass over every page in a batch.
///
/// Pages are processed independently in map order; one page's failure
/// never stops the rest.
pub async fn batch_process_pages<C: WikiClient>(
    client: &C,
    results_by_page: &IndexMap<String, Vec<EvaluationResult>>,
    comment_prefix: &str,
) -> IndexMap<String, ApprovalOutcome> {
    let mut outcomes = IndexMap::with_capacity(results_by_page.len());

    for (title, results) in results_by_page {
        let outcome = process_and_approve(client, results, comment_prefix).await;
        outcomes.insert(title.clone(), outcome);
    }

    info!(
        pages = outcomes.len(),
        approved = outcomes.values().filter(|o| o.success).count(),
        "Batch approval pass complete"
    );
    outcomes
}

/// Aggregate decision counts across a batch of pages.
pub fn approval_statistics(
    results_by_page: &IndexMap<String, Vec<EvaluationResult>>,
) -> ApprovalStatistics {
    let mut pages_with_approvals = 0;
    let mut total_revisions = 0;
    let mut total_approved = 0;
    let mut total_blocked = 0;

    for results in results_by_page.values() {
        let summary = approval_summary(results);
        total_revisions += summary.total_revisions;
        total_approved += summary.approved_count;
        total_blocked += summary.blocked_count;
        if summary.approved_count > 0 {
            pages_with_approvals += 1;
        }
    }

    let total_pages = results_by_page.len();

    ApprovalStatistics {
        total_pages,
        pages_with_approvals,
        total_revisions,
        total_approved,
        total_blocked,
        overall_approval_rate: if total_revisions > 0 {
            total_approved as f64 / total_revisions as f64
        } else {
            0.0
        },
        pages_approval_rate: if total_pages > 0 {
            pages_with_approvals as f64 / total_pages as f64
        } else {
            0.0
        },
    }
}
