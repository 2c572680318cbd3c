//! Editor profiles supplied by the profile collaborator.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per (wiki, username) editor record.
///
/// Refreshed periodically by an external collaborator; the evaluator treats
/// it as a read-only input and never writes it back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorProfile {
    /// Username on the wiki.
    pub username: String,

    /// Currently flagged as a bot.
    #[serde(default)]
    pub is_bot: bool,

    /// Previously flagged as a bot.
    #[serde(default)]
    pub is_former_bot: bool,

    /// Flagged as a global bot across wikis.
    #[serde(default)]
    pub is_global_bot: bool,

    /// Previously flagged as a global bot.
    #[serde(default)]
    pub is_former_global_bot: bool,

    /// Holds the autoreview right.
    #[serde(default)]
    pub is_autoreviewed: bool,

    /// Holds the autopatrol right.
    #[serde(default)]
    pub is_autopatrolled: bool,

    /// Currently blocked on the wiki.
    #[serde(default)]
    pub is_blocked: bool,

    /// Raw user groups (e.g. "sysop", "editor", "bot").
    #[serde(default)]
    pub usergroups: HashSet<String>,
}

impl EditorProfile {
    /// Create a profile with all flags cleared.
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            ..Default::default()
        }
    }

    /// Mark as a bot.
    pub fn bot(mut self) -> Self {
        self.is_bot = true;
        self
    }

    /// Mark as a former bot.
    pub fn former_bot(mut self) -> Self {
        self.is_former_bot = true;
        self
    }

    /// Mark as a global bot.
    pub fn global_bot(mut self) -> Self {
        self.is_global_bot = true;
        self
    }

    /// Mark as a former global bot.
    pub fn former_global_bot(mut self) -> Self {
        self.is_former_global_bot = true;
        self
    }

    /// Mark as auto-reviewed.
    pub fn autoreviewed(mut self) -> Self {
        self.is_autoreviewed = true;
        self
    }

    /// Add a user group.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.usergroups.insert(group.into());
        self
    }

    /// Whether any of the bot flags is set, past or present, local or global.
    pub fn is_any_bot(&self) -> bool {
        self.is_bot || self.is_former_bot || self.is_global_bot || self.is_former_global_bot
    }
}
