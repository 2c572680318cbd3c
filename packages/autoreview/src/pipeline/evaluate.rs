//! The revision rule chain.
//!
//! [`RevisionEvaluator::evaluate`] runs an explicit ordered sequence of
//! checks over one pending revision. Each check either appends a
//! non-conclusive entry to the audit trail and continues, or halts the
//! chain with a conclusive entry plus the terminal [`Decision`]. The trail
//! is therefore always a strict prefix of the rule order, and its last
//! entry is the one that decided — except when no rule fires and the
//! decision defaults to manual review.
//!
//! External lookups (manual un-approval, block log, render check, ML
//! scores) that error are recorded as `error`-status entries and the chain
//! moves on; a dependency failure never crashes an evaluation and never
//! turns into a silent approve.

use serde_json::json;
use tracing::{debug, warn};

use crate::cache::{BlockLookupCache, BlockLookupKey};
use crate::checks::domains::DomainVerifier;
use crate::checks::isbn::find_invalid_isbns;
use crate::error::ClientResult;
use crate::traits::client::WikiClient;
use crate::traits::scores::{EditScores, ScoreProvider};
use crate::types::config::{ScoreThresholds, WikiRuleConfig};
use crate::types::decision::{CheckResult, CheckStatus, Decision, EvaluationResult};
use crate::types::profile::EditorProfile;
use crate::types::revision::Revision;

/// What one rule contributed: keep going, or stop with a decision.
enum CheckOutcome {
    Continue(CheckResult),
    Halt {
        check: CheckResult,
        decision: Decision,
    },
}

/// Rule-chain engine for one wiki.
///
/// Owns the external collaborators and the block-lookup memoization cache;
/// holds no other cross-call state. Evaluations of different revisions are
/// independent and may run concurrently.
pub struct RevisionEvaluator<C: WikiClient, S: ScoreProvider> {
    wiki: String,
    client: C,
    scores: S,
    domains: DomainVerifier,
    block_cache: BlockLookupCache,
}

impl<C: WikiClient, S: ScoreProvider> RevisionEvaluator<C, S> {
    /// Create an evaluator for the given wiki code.
    pub fn new(wiki: impl Into<String>, client: C, scores: S) -> Self {
        Self {
            wiki: wiki.into(),
            client,
            scores,
            domains: DomainVerifier::new(),
            block_cache: BlockLookupCache::default(),
        }
    }

    /// Replace the default block-lookup cache (e.g. to bound it differently).
    pub fn with_block_cache(mut self, cache: BlockLookupCache) -> Self {
        self.block_cache = cache;
        self
    }

    /// The wiki this evaluator serves.
    pub fn wiki(&self) -> &str {
        &self.wiki
    }

    /// The block-lookup memoization cache.
    pub fn block_cache(&self) -> &BlockLookupCache {
        &self.block_cache
    }

    /// Drop all memoized block lookups (tests, configuration changes).
    pub fn clear_block_cache(&self) {
        self.block_cache.clear();
    }

    /// Run the full rule chain over one revision.
    ///
    /// Deterministic given identical inputs, apart from the memoized
    /// block-log lookup. `profile` is `None` for editors the profile
    /// collaborator does not know.
    pub async fn evaluate(
        &self,
        revision: &Revision,
        profile: Option<&EditorProfile>,
        config: &WikiRuleConfig,
    ) -> EvaluationResult {
        debug!(revid = revision.revid, page = %revision.page_title, "Evaluating revision");

        let mut tests: Vec<CheckResult> = Vec::new();

        // Short-circuit: once a rule halts, no later check runs and no
        // later external call is made.
        macro_rules! run_check {
            ($outcome:expr) => {
                match $outcome {
                    CheckOutcome::Continue(check) => tests.push(check),
                    CheckOutcome::Halt { check, decision } => {
                        tests.push(check);
                        return EvaluationResult {
                            revid: revision.revid,
                            tests,
                            decision,
                        };
                    }
                }
            };
        }

        run_check!(self.check_manual_unapproval(revision).await);
        run_check!(Self::check_bot_user(profile));
        run_check!(self.check_blocked_user(revision).await);
        run_check!(Self::check_auto_approved(revision, profile, config));
        run_check!(Self::check_blocking_category(revision, config));
        run_check!(Self::check_isbns(revision));
        run_check!(self.check_domains(revision));
        run_check!(self.check_render_errors(revision).await);
        run_check!(Self::check_no_content_change(revision));
        run_check!(self.check_scores(revision, &config.thresholds).await);

        EvaluationResult {
            revid: revision.revid,
            tests,
            decision: Decision::manual("requires human review"),
        }
    }

    /// Rule 1: a human reviewer already rejected this revision.
    async fn check_manual_unapproval(&self, revision: &Revision) -> CheckOutcome {
        match self
            .client
            .has_manual_unapproval(&revision.page_title, revision.revid)
            .await
        {
            Ok(true) => CheckOutcome::Halt {
                check: CheckResult::new(
                    "manual-unapproval",
                    CheckStatus::Fail,
                    "Revision was manually un-approved",
                ),
                decision: Decision::blocked("Revision was manually un-approved"),
            },
            Ok(false) => CheckOutcome::Continue(CheckResult::new(
                "manual-unapproval",
                CheckStatus::Ok,
                "No manual un-approval found",
            )),
            Err(e) => {
                warn!(revid = revision.revid, error = %e, "Manual un-approval lookup failed");
                CheckOutcome::Continue(CheckResult::new(
                    "manual-unapproval",
                    CheckStatus::Error,
                    format!("Manual un-approval lookup failed: {e}"),
                ))
            }
        }
    }

    /// Rule 2: recognized bots are trusted outright. A non-bot is `not_ok`,
    /// never a halt.
    fn check_bot_user(profile: Option<&EditorProfile>) -> CheckOutcome {
        if profile.is_some_and(EditorProfile::is_any_bot) {
            CheckOutcome::Halt {
                check: CheckResult::new(
                    "bot-user",
                    CheckStatus::Ok,
                    "user is recognized as a bot",
                ),
                decision: Decision::approve("user is recognized as a bot"),
            }
        } else {
            CheckOutcome::Continue(CheckResult::new(
                "bot-user",
                CheckStatus::NotOk,
                "User is not recognized as a bot",
            ))
        }
    }

    /// Rule 3: the editor was blocked after making this edit. Memoized per
    /// (wiki, username, timestamp).
    async fn check_blocked_user(&self, revision: &Revision) -> CheckOutcome {
        match self
            .was_blocked_after_cached(&revision.user_name, revision)
            .await
        {
            Ok(true) => CheckOutcome::Halt {
                check: CheckResult::new(
                    "blocked-user",
                    CheckStatus::Fail,
                    "User was blocked after making this edit.",
                ),
                decision: Decision::blocked("User was blocked after making this edit."),
            },
            Ok(false) => CheckOutcome::Continue(CheckResult::new(
                "blocked-user",
                CheckStatus::Ok,
                "User was not blocked after making this edit",
            )),
            Err(e) => {
                warn!(revid = revision.revid, error = %e, "Block-log lookup failed");
                CheckOutcome::Continue(CheckResult::new(
                    "blocked-user",
                    CheckStatus::Error,
                    format!("Block-log lookup failed: {e}"),
                ))
            }
        }
    }

    /// Rule 4: members of auto-approved groups, and redirects using a known
    /// directive, are approved.
    fn check_auto_approved(
        revision: &Revision,
        profile: Option<&EditorProfile>,
        config: &WikiRuleConfig,
    ) -> CheckOutcome {
        let in_auto_group = profile.is_some_and(|p| {
            p.usergroups
                .iter()
                .any(|g| config.auto_approved_groups.contains(g))
        });

        if in_auto_group {
            return CheckOutcome::Halt {
                check: CheckResult::new(
                    "auto-approved",
                    CheckStatus::Ok,
                    "User belongs to an auto-approved group",
                ),
                decision: Decision::approve("User was auto-reviewed"),
            };
        }

        if is_redirect(&revision.wikitext, &config.redirect_aliases) {
            return CheckOutcome::Halt {
                check: CheckResult::new(
                    "auto-approved",
                    CheckStatus::Ok,
                    "Edit is a redirect using a known directive",
                ),
                decision: Decision::approve("Edit is a redirect"),
            };
        }

        CheckOutcome::Continue(CheckResult::new(
            "auto-approved",
            CheckStatus::NotOk,
            "User is not in an auto-approved group and edit is not a redirect",
        ))
    }

    /// Rule 5: pages in sensitive categories are never silently approved.
    fn check_blocking_category(revision: &Revision, config: &WikiRuleConfig) -> CheckOutcome {
        let matched: Vec<&String> = revision
            .categories
            .iter()
            .filter(|c| config.blocking_categories.contains(*c))
            .collect();

        if matched.is_empty() {
            CheckOutcome::Continue(CheckResult::new(
                "blocking-category",
                CheckStatus::Ok,
                "Page is not in any blocking category",
            ))
        } else {
            CheckOutcome::Halt {
                check: CheckResult::new(
                    "blocking-category",
                    CheckStatus::Manual,
                    format!(
                        "Page is in blocking categories: {}",
                        matched
                            .iter()
                            .map(|c| c.as_str())
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                )
                .with_details(json!({ "blocking_categories": matched })),
                decision: Decision::manual("Page is in a blocking category"),
            }
        }
    }

    /// Rule 6: malformed ISBNs in the wikitext need a human eye.
    fn check_isbns(revision: &Revision) -> CheckOutcome {
        let invalid = find_invalid_isbns(&revision.wikitext);

        if invalid.is_empty() {
            CheckOutcome::Continue(CheckResult::new(
                "isbn-validation",
                CheckStatus::Ok,
                "No invalid ISBNs found",
            ))
        } else {
            CheckOutcome::Halt {
                check: CheckResult::new(
                    "isbn-validation",
                    CheckStatus::Manual,
                    format!("Invalid ISBNs found: {}", invalid.join(", ")),
                )
                .with_details(json!({ "invalid_isbns": invalid })),
                decision: Decision::manual("Invalid ISBNs found"),
            }
        }
    }

    /// Rule 7: newly added links with suspicious domains need review; a
    /// verifier failure also halts — never approve on an inconclusive link
    /// check.
    fn check_domains(&self, revision: &Revision) -> CheckOutcome {
        let parent = revision.parent_wikitext.as_deref().unwrap_or("");
        let result = self.domains.check(parent, &revision.wikitext);

        match result.status {
            CheckStatus::Manual => {
                let reason = result.message.clone();
                CheckOutcome::Halt {
                    check: result,
                    decision: Decision::manual(reason),
                }
            }
            CheckStatus::Error => CheckOutcome::Halt {
                check: result,
                decision: Decision::manual("Domain verification failed"),
            },
            _ => CheckOutcome::Continue(result),
        }
    }

    /// Rule 8: edits that break template rendering need review.
    async fn check_render_errors(&self, revision: &Revision) -> CheckOutcome {
        match self.client.introduces_render_errors(revision).await {
            Ok(true) => CheckOutcome::Halt {
                check: CheckResult::new(
                    "render-errors",
                    CheckStatus::Manual,
                    "Edit introduces render errors",
                ),
                decision: Decision::manual("Edit introduces render errors"),
            },
            Ok(false) => CheckOutcome::Continue(CheckResult::new(
                "render-errors",
                CheckStatus::Ok,
                "No new render errors",
            )),
            Err(e) => {
                warn!(revid = revision.revid, error = %e, "Render-error check failed");
                CheckOutcome::Continue(CheckResult::new(
                    "render-errors",
                    CheckStatus::Error,
                    format!("Render-error check failed: {e}"),
                ))
            }
        }
    }

    /// Rule 9: an edit whose text matches the prior revision (metadata-only
    /// change) is safe. Unknown prior text cannot conclude anything.
    fn check_no_content_change(revision: &Revision) -> CheckOutcome {
        let unchanged = revision
            .parent_wikitext
            .as_deref()
            .is_some_and(|parent| Revision::hash_content(parent) == revision.content_hash());

        if unchanged {
            CheckOutcome::Halt {
                check: CheckResult::new(
                    "no-content-change",
                    CheckStatus::Ok,
                    "No content change in last article",
                ),
                decision: Decision::approve("No content change in last article"),
            }
        } else {
            CheckOutcome::Continue(CheckResult::new(
                "no-content-change",
                CheckStatus::NotOk,
                "Edit changes article content",
            ))
        }
    }

    /// Rule 10: ORES/LiftWing scores against the configured thresholds.
    async fn check_scores(&self, revision: &Revision, thresholds: &ScoreThresholds) -> CheckOutcome {
        let scores = match self.scores.scores(revision.revid).await {
            Ok(scores) => scores,
            Err(e) => {
                warn!(revid = revision.revid, error = %e, "Score fetch failed");
                return CheckOutcome::Continue(CheckResult::new(
                    "ores-scores",
                    CheckStatus::Error,
                    format!("Score fetch failed: {e}"),
                ));
            }
        };

        if scores.is_empty() {
            return CheckOutcome::Continue(CheckResult::new(
                "ores-scores",
                CheckStatus::NotOk,
                "No ORES scores available",
            ));
        }

        if let (Some(risk), Some(damaging)) = (thresholds.risk_damaging, scores.damaging) {
            if damaging >= risk {
                return CheckOutcome::Halt {
                    check: CheckResult::new(
                        "ores-scores",
                        CheckStatus::Manual,
                        format!("ORES damaging score {damaging} indicates risk"),
                    ),
                    decision: Decision::manual(format!(
                        "ORES damaging score {damaging} indicates risk"
                    )),
                };
            }
        }

        let mut satisfied = false;
        let mut violated = false;
        if let (Some(min), Some(goodfaith)) = (thresholds.min_goodfaith, scores.goodfaith) {
            if goodfaith >= min {
                satisfied = true;
            } else {
                violated = true;
            }
        }
        if let (Some(max), Some(damaging)) = (thresholds.max_damaging, scores.damaging) {
            if damaging <= max {
                satisfied = true;
            } else {
                violated = true;
            }
        }

        if satisfied && !violated {
            let reason = ores_reason(&scores);
            CheckOutcome::Halt {
                check: CheckResult::new("ores-scores", CheckStatus::Ok, reason.clone()),
                decision: Decision::approve(reason),
            }
        } else {
            CheckOutcome::Continue(CheckResult::new(
                "ores-scores",
                CheckStatus::NotOk,
                format!("{} below auto-approval thresholds", ores_reason(&scores)),
            ))
        }
    }

    /// Memoized block-log lookup keyed on (wiki, username, edit timestamp).
    async fn was_blocked_after_cached(
        &self,
        username: &str,
        revision: &Revision,
    ) -> ClientResult<bool> {
        let key = BlockLookupKey::new(&self.wiki, username, revision.timestamp);
        if let Some(hit) = self.block_cache.get(&key) {
            return Ok(hit);
        }

        let blocked = self
            .client
            .was_blocked_after(&self.wiki, username, revision.timestamp)
            .await?;
        self.block_cache.insert(key, blocked);
        Ok(blocked)
    }
}

/// Whether the wikitext is a redirect using one of the configured
/// directives (checked case-insensitively against the first non-blank
/// line).
fn is_redirect(wikitext: &str, aliases: &[String]) -> bool {
    let first_line = wikitext
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("")
        .trim()
        .to_lowercase();

    !first_line.is_empty()
        && aliases
            .iter()
            .any(|alias| first_line.starts_with(&alias.to_lowercase()))
}

/// Render an approval reason embedding whichever scores are present.
fn ores_reason(scores: &EditScores) -> String {
    match (scores.goodfaith, scores.damaging) {
        (Some(g), Some(d)) => format!("ORES score goodfaith={g}, damaging={d}"),
        (Some(g), None) => format!("ORES score goodfaith={g}"),
        (None, Some(d)) => format!("ORES score damaging={d}"),
        (None, None) => "ORES score threshold met".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockScoreProvider, MockWikiClient};
    use crate::types::decision::DecisionStatus;
    use chrono::Utc;

    fn revision(revid: u64, user: &str) -> Revision {
        Revision::new(revid, "Test Page", user, Utc::now())
            .with_wikitext("Some harmless article text")
            .with_parent_wikitext("Older harmless article text")
    }

    fn evaluator() -> RevisionEvaluator<MockWikiClient, MockScoreProvider> {
        RevisionEvaluator::new("testwiki", MockWikiClient::new(), MockScoreProvider::new())
    }

    #[tokio::test]
    async fn test_global_bot_is_auto_approved() {
        let profile = EditorProfile::new("GlobalBotUser").global_bot();
        let result = evaluator()
            .evaluate(
                &revision(12345, "GlobalBotUser"),
                Some(&profile),
                &WikiRuleConfig::new(),
            )
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert!(result.decision.reason.contains("user is recognized as a bot"));
        let bot_test = result.tests.iter().find(|t| t.id == "bot-user").unwrap();
        assert_eq!(bot_test.status, CheckStatus::Ok);
    }

    #[tokio::test]
    async fn test_former_global_bot_is_auto_approved() {
        let profile = EditorProfile::new("FormerGlobalBotUser").former_global_bot();
        let result = evaluator()
            .evaluate(
                &revision(12345, "FormerGlobalBotUser"),
                Some(&profile),
                &WikiRuleConfig::new(),
            )
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert!(result.decision.reason.contains("user is recognized as a bot"));
    }

    #[tokio::test]
    async fn test_regular_user_is_not_approved_as_bot() {
        let profile = EditorProfile::new("RegularUser");
        let result = evaluator()
            .evaluate(
                &revision(12345, "RegularUser"),
                Some(&profile),
                &WikiRuleConfig::new(),
            )
            .await;

        let bot_test = result.tests.iter().find(|t| t.id == "bot-user").unwrap();
        assert_eq!(bot_test.status, CheckStatus::NotOk);
        assert_eq!(result.decision.status, DecisionStatus::Manual);
    }

    #[tokio::test]
    async fn test_blocked_user_audit_trail() {
        let client = MockWikiClient::new().with_blocked_user("BlockedUser");
        let eval =
            RevisionEvaluator::new("fi", client, MockScoreProvider::new());
        let profile = EditorProfile::new("BlockedUser");

        let result = eval
            .evaluate(
                &revision(123, "BlockedUser"),
                Some(&profile),
                &WikiRuleConfig::new(),
            )
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Blocked);
        assert_eq!(
            result.decision.reason,
            "User was blocked after making this edit."
        );

        // The trail for this path is exactly these three entries.
        assert_eq!(result.tests.len(), 3);
        assert_eq!(result.tests[0].id, "manual-unapproval");
        assert_eq!(result.tests[0].status, CheckStatus::Ok);
        assert_eq!(result.tests[1].id, "bot-user");
        assert_eq!(result.tests[1].status, CheckStatus::NotOk);
        assert_eq!(result.tests[2].id, "blocked-user");
        assert_eq!(result.tests[2].status, CheckStatus::Fail);
    }

    #[tokio::test]
    async fn test_block_lookup_is_memoized() {
        let client = MockWikiClient::new();
        let eval = RevisionEvaluator::new("fi", client.clone(), MockScoreProvider::new());
        let profile = EditorProfile::new("User");
        let rev = revision(1, "User");

        eval.evaluate(&rev, Some(&profile), &WikiRuleConfig::new())
            .await;
        eval.evaluate(&rev, Some(&profile), &WikiRuleConfig::new())
            .await;

        assert_eq!(client.block_lookup_count(), 1);
        assert_eq!(eval.block_cache().len(), 1);

        eval.clear_block_cache();
        eval.evaluate(&rev, Some(&profile), &WikiRuleConfig::new())
            .await;
        assert_eq!(client.block_lookup_count(), 2);
    }

    #[tokio::test]
    async fn test_manual_unapproval_blocks_and_short_circuits() {
        let client = MockWikiClient::new().with_manual_unapproval(555);
        let scores = MockScoreProvider::new();
        let eval = RevisionEvaluator::new("testwiki", client.clone(), scores.clone());

        let result = eval
            .evaluate(&revision(555, "User"), None, &WikiRuleConfig::new())
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Blocked);
        assert_eq!(result.decision.reason, "Revision was manually un-approved");
        assert_eq!(result.tests.len(), 1);

        // Halting at the first rule means no later external call is made.
        assert_eq!(client.block_lookup_count(), 0);
        assert_eq!(scores.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_auto_approved_group_member() {
        let config = WikiRuleConfig::new().with_auto_approved_group("autoreview");
        let profile = EditorProfile::new("Trusted").with_group("autoreview");

        let result = evaluator()
            .evaluate(&revision(1, "Trusted"), Some(&profile), &config)
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert_eq!(result.decision.reason, "User was auto-reviewed");
    }

    #[tokio::test]
    async fn test_redirect_edit_is_approved() {
        let config = WikiRuleConfig::new().with_redirect_alias("#REDIRECT");
        let rev = Revision::new(1, "Page", "User", Utc::now())
            .with_wikitext("#redirect [[Main Page]]")
            .with_parent_wikitext("old text");

        let result = evaluator().evaluate(&rev, None, &config).await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert_eq!(result.decision.reason, "Edit is a redirect");
    }

    #[tokio::test]
    async fn test_blocking_category_forces_manual() {
        let config = WikiRuleConfig::new().with_blocking_category("Living people");
        let rev = revision(1, "User").with_categories(["Living people", "Scientists"]);

        let result = evaluator().evaluate(&rev, None, &config).await;

        assert_eq!(result.decision.status, DecisionStatus::Manual);
        assert_eq!(result.decision.reason, "Page is in a blocking category");
        let last = result.tests.last().unwrap();
        assert_eq!(last.id, "blocking-category");
        assert_eq!(last.status, CheckStatus::Manual);
    }

    #[tokio::test]
    async fn test_invalid_isbn_forces_manual() {
        let rev = Revision::new(1, "Page", "User", Utc::now())
            .with_wikitext("Citation isbn: 0-306-40615-3 here")
            .with_parent_wikitext("old");

        let result = evaluator().evaluate(&rev, None, &WikiRuleConfig::new()).await;

        assert_eq!(result.decision.status, DecisionStatus::Manual);
        assert_eq!(result.decision.reason, "Invalid ISBNs found");
        let last = result.tests.last().unwrap();
        assert!(last.message.contains("0-306-40615-3"));
    }

    #[tokio::test]
    async fn test_suspicious_new_link_forces_manual() {
        let rev = Revision::new(1, "Page", "User", Utc::now())
            .with_wikitext("See https://localhost for details")
            .with_parent_wikitext("no links before");

        let result = evaluator().evaluate(&rev, None, &WikiRuleConfig::new()).await;

        assert_eq!(result.decision.status, DecisionStatus::Manual);
        assert!(result.decision.reason.contains("https://localhost"));
        assert_eq!(result.tests.last().unwrap().id, "domain-verification");
    }

    #[tokio::test]
    async fn test_render_errors_force_manual() {
        let client = MockWikiClient::new().with_render_errors(42);
        let eval = RevisionEvaluator::new("testwiki", client, MockScoreProvider::new());

        let result = eval
            .evaluate(&revision(42, "User"), None, &WikiRuleConfig::new())
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Manual);
        assert_eq!(result.decision.reason, "Edit introduces render errors");
    }

    #[tokio::test]
    async fn test_no_content_change_approves() {
        let rev = Revision::new(1, "Page", "User", Utc::now())
            .with_wikitext("identical text")
            .with_parent_wikitext("identical text");

        let result = evaluator().evaluate(&rev, None, &WikiRuleConfig::new()).await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert_eq!(result.decision.reason, "No content change in last article");
    }

    #[tokio::test]
    async fn test_scores_approve_with_reason_embedding_both() {
        let scores = MockScoreProvider::new().with_scores(7, EditScores::new(0.53, 0.251));
        let eval = RevisionEvaluator::new("testwiki", MockWikiClient::new(), scores);

        let result = eval
            .evaluate(&revision(7, "User"), None, &WikiRuleConfig::new())
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert_eq!(
            result.decision.reason,
            "ORES score goodfaith=0.53, damaging=0.251"
        );
    }

    #[tokio::test]
    async fn test_scores_approve_goodfaith_only() {
        let scores = MockScoreProvider::new().with_scores(7, EditScores::goodfaith_only(0.61));
        let eval = RevisionEvaluator::new("testwiki", MockWikiClient::new(), scores);

        let result = eval
            .evaluate(&revision(7, "User"), None, &WikiRuleConfig::new())
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Approve);
        assert_eq!(result.decision.reason, "ORES score goodfaith=0.61");
    }

    #[tokio::test]
    async fn test_risky_damaging_score_forces_manual() {
        let scores = MockScoreProvider::new().with_scores(7, EditScores::new(0.9, 0.85));
        let eval = RevisionEvaluator::new("testwiki", MockWikiClient::new(), scores);

        let result = eval
            .evaluate(&revision(7, "User"), None, &WikiRuleConfig::new())
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Manual);
        assert!(result.decision.reason.contains("indicates risk"));
    }

    #[tokio::test]
    async fn test_low_goodfaith_continues_to_default_manual() {
        let scores = MockScoreProvider::new().with_scores(7, EditScores::new(0.2, 0.1));
        let eval = RevisionEvaluator::new("testwiki", MockWikiClient::new(), scores);

        let result = eval
            .evaluate(&revision(7, "User"), None, &WikiRuleConfig::new())
            .await;

        assert_eq!(result.decision.status, DecisionStatus::Manual);
        assert_eq!(result.decision.reason, "requires human review");
        // Full chain executed, nothing halted.
        assert_eq!(result.tests.len(), 10);
    }

    #[tokio::test]
    async fn test_client_error_recorded_and_chain_continues() {
        let client = MockWikiClient::new().failing_block_lookups();
        let eval = RevisionEvaluator::new("testwiki", client, MockScoreProvider::new());

        let result = eval
            .evaluate(&revision(9, "User"), None, &WikiRuleConfig::new())
            .await;

        let blocked = result.tests.iter().find(|t| t.id == "blocked-user").unwrap();
        assert_eq!(blocked.status, CheckStatus::Error);
        // Default-safe: ambiguity never becomes an approval.
        assert_eq!(result.decision.status, DecisionStatus::Manual);
    }
}
