//! Per-wiki rule configuration.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configuration supplied per evaluation call; never mutated by the engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiRuleConfig {
    /// Categories whose pages always require human review.
    #[serde(default)]
    pub blocking_categories: HashSet<String>,

    /// User groups whose members' edits are auto-approved.
    #[serde(default)]
    pub auto_approved_groups: HashSet<String>,

    /// Localized redirect directives (e.g. "#REDIRECT", "#OHJAUS"),
    /// checked in order.
    #[serde(default)]
    pub redirect_aliases: Vec<String>,

    /// ORES/LiftWing score thresholds for the ML rule.
    #[serde(default)]
    pub thresholds: ScoreThresholds,
}

impl WikiRuleConfig {
    /// Create an empty configuration (no blocking categories, no auto
    /// groups, default thresholds).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a blocking category.
    pub fn with_blocking_category(mut self, category: impl Into<String>) -> Self {
        self.blocking_categories.insert(category.into());
        self
    }

    /// Add an auto-approved group.
    pub fn with_auto_approved_group(mut self, group: impl Into<String>) -> Self {
        self.auto_approved_groups.insert(group.into());
        self
    }

    /// Add a redirect alias.
    pub fn with_redirect_alias(mut self, alias: impl Into<String>) -> Self {
        self.redirect_aliases.push(alias.into());
        self
    }

    /// Set score thresholds.
    pub fn with_thresholds(mut self, thresholds: ScoreThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }
}

/// Numeric bounds for the ORES/LiftWing score rule.
///
/// A bound set to `None` is not enforced. These are editorial inputs, not
/// part of the algorithm; each wiki tunes its own.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreThresholds {
    /// Minimum goodfaith score for auto-approval.
    pub min_goodfaith: Option<f64>,

    /// Maximum damaging score for auto-approval.
    pub max_damaging: Option<f64>,

    /// Damaging score at or above which the edit is routed to manual review.
    pub risk_damaging: Option<f64>,
}

impl Default for ScoreThresholds {
    fn default() -> Self {
        Self {
            min_goodfaith: Some(0.5),
            max_damaging: Some(0.3),
            risk_damaging: Some(0.7),
        }
    }
}

impl ScoreThresholds {
    /// Thresholds that never approve and never flag (the ML rule becomes a
    /// pass-through).
    pub fn disabled() -> Self {
        Self {
            min_goodfaith: None,
            max_damaging: None,
            risk_damaging: None,
        }
    }

    /// Set the minimum goodfaith bound.
    pub fn with_min_goodfaith(mut self, value: f64) -> Self {
        self.min_goodfaith = Some(value);
        self
    }

    /// Set the maximum damaging bound.
    pub fn with_max_damaging(mut self, value: f64) -> Self {
        self.max_damaging = Some(value);
        self
    }

    /// Set the manual-review damaging floor.
    pub fn with_risk_damaging(mut self, value: f64) -> Self {
        self.risk_damaging = Some(value);
        self
    }
}
