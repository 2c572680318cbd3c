//! Revision and pending-page snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Immutable snapshot of one pending revision.
///
/// A new edit produces a new `Revision`; snapshots are never mutated after
/// creation. The prior-revision wikitext is carried alongside so the text
/// checks (link diff, no-content-change) need no fetching of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Revision {
    /// Globally unique, monotonically increasing within a page's history.
    pub revid: u64,

    /// Parent revision id, if any (None for page creations).
    pub parentid: Option<u64>,

    /// Title of the page this revision belongs to.
    pub page_title: String,

    /// Username of the editor.
    pub user_name: String,

    /// When the edit was made.
    pub timestamp: DateTime<Utc>,

    /// Full wikitext of this revision.
    pub wikitext: String,

    /// Wikitext of the prior revision; None when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_wikitext: Option<String>,

    /// MediaWiki change tags on this edit.
    #[serde(default)]
    pub change_tags: HashSet<String>,

    /// Categories of the page at this revision, in page order.
    #[serde(default)]
    pub categories: Vec<String>,
}

impl Revision {
    /// Create a new revision snapshot with minimal fields.
    pub fn new(
        revid: u64,
        page_title: impl Into<String>,
        user_name: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            revid,
            parentid: None,
            page_title: page_title.into(),
            user_name: user_name.into(),
            timestamp,
            wikitext: String::new(),
            parent_wikitext: None,
            change_tags: HashSet::new(),
            categories: Vec::new(),
        }
    }

    /// Set the parent revision id.
    pub fn with_parentid(mut self, parentid: u64) -> Self {
        self.parentid = Some(parentid);
        self
    }

    /// Set the revision wikitext.
    pub fn with_wikitext(mut self, wikitext: impl Into<String>) -> Self {
        self.wikitext = wikitext.into();
        self
    }

    /// Set the prior revision's wikitext.
    pub fn with_parent_wikitext(mut self, wikitext: impl Into<String>) -> Self {
        self.parent_wikitext = Some(wikitext.into());
        self
    }

    /// Add a change tag.
    pub fn with_change_tag(mut self, tag: impl Into<String>) -> Self {
        self.change_tags.insert(tag.into());
        self
    }

    /// Set the page categories at this revision.
    pub fn with_categories(
        mut self,
        categories: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.categories = categories.into_iter().map(|c| c.into()).collect();
        self
    }

    /// Hex SHA-256 of the revision wikitext.
    pub fn content_hash(&self) -> String {
        Self::hash_content(&self.wikitext)
    }

    /// Hash arbitrary wikitext the same way `content_hash` does.
    pub fn hash_content(text: &str) -> String {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

/// A page with unreviewed revisions queued for evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingPage {
    /// MediaWiki page id.
    pub pageid: u64,

    /// Page title.
    pub title: String,

    /// The latest reviewed (stable) revision, if the page has one.
    pub stable_revid: Option<u64>,

    /// Pending revisions, oldest first.
    pub revisions: Vec<Revision>,
}

impl PendingPage {
    /// Create a new pending page.
    pub fn new(pageid: u64, title: impl Into<String>) -> Self {
        Self {
            pageid,
            title: title.into(),
            stable_revid: None,
            revisions: Vec::new(),
        }
    }

    /// Set the stable revision id.
    pub fn with_stable_revid(mut self, revid: u64) -> Self {
        self.stable_revid = Some(revid);
        self
    }

    /// Append a pending revision.
    pub fn with_revision(mut self, revision: Revision) -> Self {
        self.revisions.push(revision);
        self
    }

    /// Revisions that actually await review (the stable revision itself is
    /// not pending even when the queue collaborator includes it).
    pub fn pending_revisions(&self) -> impl Iterator<Item = &Revision> {
        self.revisions
            .iter()
            .filter(|r| Some(r.revid) != self.stable_revid)
    }
}
