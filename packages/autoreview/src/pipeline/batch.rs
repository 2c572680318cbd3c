//! Concurrent evaluation over pending pages.
//!
//! Fan-out is bounded by a semaphore so a large review backlog cannot
//! flood the wiki APIs behind the collaborators. Results come back keyed
//! and ordered deterministically regardless of task interleaving.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use indexmap::IndexMap;
use tokio::sync::Semaphore;
use tracing::{debug, info};

use crate::pipeline::evaluate::RevisionEvaluator;
use crate::traits::client::WikiClient;
use crate::traits::scores::ScoreProvider;
use crate::types::config::WikiRuleConfig;
use crate::types::decision::EvaluationResult;
use crate::types::profile::EditorProfile;
use crate::types::revision::PendingPage;

/// Default cap on concurrently evaluating revisions.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Tuning for batch evaluation.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum revisions evaluated at once.
    pub max_concurrency: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}

impl BatchConfig {
    /// Set the concurrency cap.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }
}

/// Evaluate every pending revision of one page concurrently.
///
/// Results are sorted by ascending revid, so downstream consolidation sees
/// page history order no matter how tasks interleaved. Editors missing from
/// `profiles` are evaluated without a profile.
pub async fn evaluate_page<C, S>(
    evaluator: &RevisionEvaluator<C, S>,
    page: &PendingPage,
    profiles: &HashMap<String, EditorProfile>,
    config: &WikiRuleConfig,
    batch: &BatchConfig,
) -> Vec<EvaluationResult>
where
    C: WikiClient,
    S: ScoreProvider,
{
    let semaphore = Arc::new(Semaphore::new(batch.max_concurrency.max(1)));

    let futures = page.pending_revisions().map(|revision| {
        let semaphore = Arc::clone(&semaphore);
        async move {
            // Closing the semaphore is not part of this flow; acquire
            // cannot fail here.
            let _permit = semaphore.acquire().await.expect("semaphore closed");
            let profile = profiles.get(&revision.user_name);
            evaluator.evaluate(revision, profile, config).await
        }
    });

    let mut results = join_all(futures).await;
    results.sort_by_key(|r| r.revid);

    debug!(
        page = %page.title,
        evaluated = results.len(),
        "Evaluated pending revisions"
    );
    results
}

/// Evaluate a set of pages, preserving input page order.
///
/// Pages run sequentially; revisions within a page fan out per
/// [`evaluate_page`]. The returned map is keyed by page title.
pub async fn evaluate_pages<C, S>(
    evaluator: &RevisionEvaluator<C, S>,
    pages: &[PendingPage],
    profiles: &HashMap<String, EditorProfile>,
    config: &WikiRuleConfig,
    batch: &BatchConfig,
) -> IndexMap<String, Vec<EvaluationResult>>
where
    C: WikiClient,
    S: ScoreProvider,
{
    let mut by_page = IndexMap::with_capacity(pages.len());

    for page in pages {
        let results = evaluate_page(evaluator, page, profiles, config, batch).await;
        by_page.insert(page.title.clone(), results);
    }

    info!(pages = by_page.len(), "Batch evaluation complete");
    by_page
}
