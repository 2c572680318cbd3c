//! Consolidated approval comment generation.
//!
//! On a flagged-revisions wiki, approving the highest pending revision
//! implicitly approves everything below it, so the whole page gets one
//! approval action with one comment. The comment names every approved
//! revision and its reason, collapsing adjacent runs that share a reason:
//!
//! `rev_id 12345, 12346 approved because user was a bot, rev_id 12347
//! approved because ORES score goodfaith=0.53, damaging=0.251.`
//!
//! Grouping compares the raw decision reasons byte-for-byte; the
//! normalized phrasing is applied only when the group is rendered, so two
//! reasons that normalize alike but differ in the raw text stay in
//! separate groups.

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::types::decision::{DecisionStatus, EvaluationResult};

/// Wiki edit summaries are capped; everything past this is truncated.
pub const DEFAULT_MAX_COMMENT_LENGTH: usize = 500;

/// Generate the consolidated comment for one page's evaluation results.
///
/// Returns the highest approvable revid and the comment text, or `None`
/// when nothing was approved. The highest approved revision is the
/// approval boundary: every approved revision at or below it is named in
/// the comment, ascending.
pub fn generate_approval_comment(results: &[EvaluationResult]) -> Option<(u64, String)> {
    let mut approved: Vec<&EvaluationResult> = results
        .iter()
        .filter(|r| r.decision.status == DecisionStatus::Approve)
        .collect();

    if approved.is_empty() {
        return None;
    }

    approved.sort_by_key(|r| r.revid);
    let highest = approved.last().map(|r| r.revid)?;

    Some((highest, build_consolidated_comment(&approved)))
}

/// Render sorted approved results into the comma-joined comment body.
fn build_consolidated_comment(approved: &[&EvaluationResult]) -> String {
    let mut parts: Vec<String> = Vec::new();

    for group in group_by_reason(approved) {
        let ids: Vec<String> = group.iter().map(|r| r.revid.to_string()).collect();
        let reason = normalize_reason(&group[0].decision.reason);
        parts.push(format!(
            "rev_id {} approved because {}",
            ids.join(", "),
            reason
        ));
    }

    format!("{}.", parts.join(", "))
}

/// Split into maximal runs of adjacent results with identical raw reasons.
fn group_by_reason<'a>(approved: &[&'a EvaluationResult]) -> Vec<Vec<&'a EvaluationResult>> {
    let mut groups: Vec<Vec<&EvaluationResult>> = Vec::new();

    for result in approved {
        match groups.last_mut() {
            Some(group) if group[0].decision.reason == result.decision.reason => {
                group.push(result);
            }
            _ => groups.push(vec![result]),
        }
    }

    groups
}

/// Map a raw decision reason onto its comment phrasing.
///
/// Known reasons get a canonical lowercase form; ORES reasons are rebuilt
/// from whichever scores the raw text carries; anything unrecognized
/// passes through verbatim.
pub fn normalize_reason(reason: &str) -> String {
    let lower = reason.to_lowercase();

    if lower.contains("user was a bot") {
        "user was a bot".to_string()
    } else if lower.contains("no content change") {
        "no content change in last article".to_string()
    } else if lower.contains("user was auto-reviewed") {
        "user was auto-reviewed".to_string()
    } else if lower.contains("ores") || lower.contains("goodfaith") || lower.contains("damaging") {
        extract_ores_reason(reason)
    } else if lower.contains("revert to previously reviewed content") {
        "revert to previously reviewed content".to_string()
    } else {
        reason.to_string()
    }
}

/// Rebuild an ORES reason from the scores embedded in the raw text.
fn extract_ores_reason(reason: &str) -> String {
    let goodfaith_re = Regex::new(r"(?i)goodfaith[=:]\s*([0-9.]+)").unwrap();
    let damaging_re = Regex::new(r"(?i)damaging[=:]\s*([0-9.]+)").unwrap();

    let goodfaith = goodfaith_re
        .captures(reason)
        .map(|c| c[1].to_string());
    let damaging = damaging_re.captures(reason).map(|c| c[1].to_string());

    match (goodfaith, damaging) {
        (Some(g), Some(d)) => format!("ORES score goodfaith={g}, damaging={d}"),
        (Some(g), None) => format!("ORES score goodfaith={g}"),
        (None, Some(d)) => format!("ORES score damaging={d}"),
        (None, None) => "ORES score threshold met".to_string(),
    }
}

/// Truncate a comment that exceeds the wiki's summary limit.
///
/// Oversized comments are cut to `max_length - 3` characters plus `"..."`,
/// so the result is exactly `max_length` long.
pub fn validate_comment_length(comment: &str, max_length: usize) -> String {
    if comment.chars().count() <= max_length {
        return comment.to_string();
    }

    let truncated: String = comment
        .chars()
        .take(max_length.saturating_sub(3))
        .chain("...".chars())
        .collect();
    warn!(
        original = comment.chars().count(),
        truncated = truncated.chars().count(),
        "Approval comment truncated"
    );
    truncated
}

/// Per-page rollup of one evaluation pass, for logging and reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalSummary {
    pub total_revisions: usize,
    pub approved_count: usize,
    pub blocked_count: usize,
    /// 0.0 when there were no revisions at all.
    pub approval_rate: f64,
    pub highest_approved_revid: Option<u64>,
}

/// Summarize one page's evaluation results.
pub fn approval_summary(results: &[EvaluationResult]) -> ApprovalSummary {
    let approved: Vec<&EvaluationResult> = results
        .iter()
        .filter(|r| r.decision.status == DecisionStatus::Approve)
        .collect();
    let blocked_count = results
        .iter()
        .filter(|r| r.decision.status == DecisionStatus::Blocked)
        .count();

    let approval_rate = if results.is_empty() {
        0.0
    } else {
        approved.len() as f64 / results.len() as f64
    };

    ApprovalSummary {
        total_revisions: results.len(),
        approved_count: approved.len(),
        blocked_count,
        approval_rate,
        highest_approved_revid: approved.iter().map(|r| r.revid).max(),
    }
}
