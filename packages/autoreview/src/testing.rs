//! Mock collaborators for tests.
//!
//! Mocks share their state through `Arc`, so a test can keep a clone for
//! assertions after handing one to an evaluator. Every external call is
//! recorded, which is how the memoization tests count lookups.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{ClientError, ClientResult};
use crate::traits::client::{ApprovalResponse, WikiClient};
use crate::traits::scores::{EditScores, ScoreProvider};
use crate::types::revision::Revision;

/// In-memory [`WikiClient`] with scriptable lookups.
#[derive(Clone, Default)]
pub struct MockWikiClient {
    manual_unapprovals: Arc<RwLock<HashSet<u64>>>,
    blocked_users: Arc<RwLock<HashSet<String>>>,
    render_error_revids: Arc<RwLock<HashSet<u64>>>,
    approval_response: Arc<RwLock<Option<ApprovalResponse>>>,
    fail_block_lookups: Arc<RwLock<bool>>,
    fail_approvals: Arc<RwLock<bool>>,
    block_lookups: Arc<RwLock<Vec<String>>>,
    approvals: Arc<RwLock<Vec<(u64, String, bool)>>>,
}

impl MockWikiClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a revision as manually un-approved.
    pub fn with_manual_unapproval(self, revid: u64) -> Self {
        self.manual_unapprovals.write().unwrap().insert(revid);
        self
    }

    /// Mark a user as blocked after their edits.
    pub fn with_blocked_user(self, username: impl Into<String>) -> Self {
        self.blocked_users.write().unwrap().insert(username.into());
        self
    }

    /// Mark a revision as introducing render errors.
    pub fn with_render_errors(self, revid: u64) -> Self {
        self.render_error_revids.write().unwrap().insert(revid);
        self
    }

    /// Script the response returned by `approve`.
    pub fn with_approval_response(self, response: ApprovalResponse) -> Self {
        *self.approval_response.write().unwrap() = Some(response);
        self
    }

    /// Make every block lookup return an error.
    pub fn failing_block_lookups(self) -> Self {
        *self.fail_block_lookups.write().unwrap() = true;
        self
    }

    /// Make every approval call return an error.
    pub fn failing_approvals(self) -> Self {
        *self.fail_approvals.write().unwrap() = true;
        self
    }

    /// How many block lookups reached the client (cache misses).
    pub fn block_lookup_count(&self) -> usize {
        self.block_lookups.read().unwrap().len()
    }

    /// Recorded approval calls as (revid, comment, unapprove).
    pub fn approvals(&self) -> Vec<(u64, String, bool)> {
        self.approvals.read().unwrap().clone()
    }
}

#[async_trait]
impl WikiClient for MockWikiClient {
    async fn has_manual_unapproval(&self, _page_title: &str, revid: u64) -> ClientResult<bool> {
        Ok(self.manual_unapprovals.read().unwrap().contains(&revid))
    }

    async fn was_blocked_after(
        &self,
        _wiki: &str,
        username: &str,
        _timestamp: DateTime<Utc>,
    ) -> ClientResult<bool> {
        self.block_lookups
            .write()
            .unwrap()
            .push(username.to_string());

        if *self.fail_block_lookups.read().unwrap() {
            return Err(ClientError::Unavailable(
                "block log unavailable".to_string(),
            ));
        }
        Ok(self.blocked_users.read().unwrap().contains(username))
    }

    async fn introduces_render_errors(&self, revision: &Revision) -> ClientResult<bool> {
        Ok(self
            .render_error_revids
            .read()
            .unwrap()
            .contains(&revision.revid))
    }

    async fn approve(
        &self,
        revid: u64,
        comment: &str,
        unapprove: bool,
    ) -> ClientResult<ApprovalResponse> {
        self.approvals
            .write()
            .unwrap()
            .push((revid, comment.to_string(), unapprove));

        if *self.fail_approvals.read().unwrap() {
            return Err(ClientError::Unavailable(
                "approval endpoint unavailable".to_string(),
            ));
        }

        Ok(self
            .approval_response
            .read()
            .unwrap()
            .clone()
            .unwrap_or_else(|| {
                ApprovalResponse::success(format!("Successfully approved revision {revid}"))
            }))
    }
}

/// In-memory [`ScoreProvider`] with per-revision scripted scores.
///
/// Revisions without scripted scores get empty scores, which the score
/// rule treats as non-conclusive.
#[derive(Clone, Default)]
pub struct MockScoreProvider {
    scores: Arc<RwLock<HashMap<u64, EditScores>>>,
    fail: Arc<RwLock<bool>>,
    fetches: Arc<RwLock<Vec<u64>>>,
}

impl MockScoreProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the scores returned for a revision.
    pub fn with_scores(self, revid: u64, scores: EditScores) -> Self {
        self.scores.write().unwrap().insert(revid, scores);
        self
    }

    /// Make every fetch return an error.
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }

    /// How many score fetches were made.
    pub fn fetch_count(&self) -> usize {
        self.fetches.read().unwrap().len()
    }
}

#[async_trait]
impl ScoreProvider for MockScoreProvider {
    async fn scores(&self, revid: u64) -> ClientResult<EditScores> {
        self.fetches.write().unwrap().push(revid);

        if *self.fail.read().unwrap() {
            return Err(ClientError::Unavailable("scoring unavailable".to_string()));
        }
        Ok(self
            .scores
            .read()
            .unwrap()
            .get(&revid)
            .copied()
            .unwrap_or_default())
    }
}
