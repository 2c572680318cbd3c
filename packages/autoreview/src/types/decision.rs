//! Decision and audit-trail types.
//!
//! These types form the audit contract consumed by UI and log consumers:
//! an [`EvaluationResult`] serializes as
//! `{revid, tests: [{id, status, message?, details?}], decision: {status, label, reason}}`
//! with `tests` in pipeline execution order. The string status values are
//! the serialized wire form only; in code the statuses are closed enums so
//! match arms stay exhaustive.

use serde::{Deserialize, Serialize};

/// Outcome of a single rule in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check passed (or, for an approve-if-matched rule, matched).
    Ok,

    /// An approve-if-matched rule did not match; pipeline continues.
    NotOk,

    /// The check conclusively failed; the revision is blocked.
    Fail,

    /// The check found something a human must look at.
    Manual,

    /// The check's external dependency errored; pipeline continues.
    Error,
}

/// Terminal classification of a revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionStatus {
    /// Safe to approve without human review.
    Approve,

    /// Conclusively unsafe; never auto-approved.
    Blocked,

    /// Requires human review.
    Manual,
}

/// One entry in a revision's audit trail.
///
/// Appended, never removed. The trail is a strict prefix of the full rule
/// order; its last entry is the one that determined the decision, except
/// when no rule fired conclusively and the decision defaulted to manual.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Rule identifier (e.g. "bot-user", "blocked-user").
    pub id: String,

    /// Outcome of this rule.
    pub status: CheckStatus,

    /// Human-readable explanation of the outcome.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Optional structured payload (e.g. offending URLs or ISBNs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CheckResult {
    /// Create a check result with a message and no details.
    pub fn new(id: impl Into<String>, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a structured details payload.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Terminal decision for a revision, recomputed on every evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Decision {
    /// Three-way classification.
    pub status: DecisionStatus,

    /// Short human label for UI display.
    pub label: String,

    /// Reason text; approve reasons feed the consolidated comment.
    pub reason: String,
}

impl Decision {
    /// Decision to auto-approve.
    pub fn approve(reason: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Approve,
            label: "Would be auto-approved".to_string(),
            reason: reason.into(),
        }
    }

    /// Decision that the revision can never be auto-approved.
    pub fn blocked(reason: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Blocked,
            label: "Cannot be auto-approved".to_string(),
            reason: reason.into(),
        }
    }

    /// Decision that a human must review the revision.
    pub fn manual(reason: impl Into<String>) -> Self {
        Self {
            status: DecisionStatus::Manual,
            label: "Requires human review".to_string(),
            reason: reason.into(),
        }
    }
}

/// Result of evaluating one revision: the full audit trail plus the decision.
///
/// Field names and the `tests` ordering are part of the audit contract and
/// must be preserved exactly for UI consumers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Revision this result belongs to.
    pub revid: u64,

    /// Executed checks, in pipeline execution order.
    pub tests: Vec<CheckResult>,

    /// Terminal decision.
    pub decision: Decision,
}

impl EvaluationResult {
    /// Whether the decision is an approval.
    pub fn is_approved(&self) -> bool {
        self.decision.status == DecisionStatus::Approve
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_string(&CheckStatus::NotOk).unwrap(),
            "\"not_ok\""
        );
        assert_eq!(serde_json::to_string(&CheckStatus::Ok).unwrap(), "\"ok\"");
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Approve).unwrap(),
            "\"approve\""
        );
        assert_eq!(
            serde_json::to_string(&DecisionStatus::Blocked).unwrap(),
            "\"blocked\""
        );
    }

    #[test]
    fn test_evaluation_result_wire_shape() {
        let result = EvaluationResult {
            revid: 12345,
            tests: vec![CheckResult::new("bot-user", CheckStatus::NotOk, "")],
            decision: Decision::manual("requires human review"),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["revid"], 12345);
        assert_eq!(json["tests"][0]["id"], "bot-user");
        assert_eq!(json["tests"][0]["status"], "not_ok");
        // Empty message is omitted from the wire form
        assert!(json["tests"][0].get("message").is_none());
        assert_eq!(json["decision"]["status"], "manual");
        assert_eq!(json["decision"]["label"], "Requires human review");
    }

    #[test]
    fn test_check_result_details_payload() {
        let check = CheckResult::new("isbn-validation", CheckStatus::Manual, "invalid ISBNs")
            .with_details(serde_json::json!({"invalid_isbns": ["123-456"]}));

        let json = serde_json::to_value(&check).unwrap();
        assert_eq!(json["details"]["invalid_isbns"][0], "123-456");
    }
}
