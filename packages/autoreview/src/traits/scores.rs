//! Score provider trait for ORES/LiftWing edit predictions.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ClientResult;

/// Supplier of per-revision ML scores.
///
/// Implementations call the LiftWing inference API upstream; the evaluator
/// consumes only the numbers and compares them against the configured
/// [`crate::types::config::ScoreThresholds`].
#[async_trait]
pub trait ScoreProvider: Send + Sync {
    /// Fetch goodfaith/damaging scores for a revision.
    async fn scores(&self, revid: u64) -> ClientResult<EditScores>;
}

/// Goodfaith/damaging predictions for one edit.
///
/// Either score may be absent when the wiki has no model for it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EditScores {
    /// Probability the edit was made in good faith.
    pub goodfaith: Option<f64>,

    /// Probability the edit is damaging.
    pub damaging: Option<f64>,
}

impl EditScores {
    /// Create scores with both models present.
    pub fn new(goodfaith: f64, damaging: f64) -> Self {
        Self {
            goodfaith: Some(goodfaith),
            damaging: Some(damaging),
        }
    }

    /// Scores with only a goodfaith prediction.
    pub fn goodfaith_only(goodfaith: f64) -> Self {
        Self {
            goodfaith: Some(goodfaith),
            damaging: None,
        }
    }

    /// Scores with only a damaging prediction.
    pub fn damaging_only(damaging: f64) -> Self {
        Self {
            goodfaith: None,
            damaging: Some(damaging),
        }
    }

    /// Whether neither model produced a score.
    pub fn is_empty(&self) -> bool {
        self.goodfaith.is_none() && self.damaging.is_none()
    }
}
