//! Structural validation of newly added external-link domains.
//!
//! Compares the previous and current wikitext of a revision, extracts the
//! external links the edit introduced, and classifies each link's host as
//! valid or suspicious using shape heuristics and an exact-match blacklist.
//! Pure text work over the supplied wikitext; no network I/O.

use regex::Regex;
use serde_json::json;
use std::collections::HashSet;
use url::Url;

use crate::types::decision::{CheckResult, CheckStatus};

/// Check id recorded in the audit trail.
pub const DOMAIN_CHECK_ID: &str = "domain-verification";

/// Links terminate at whitespace or bracket/quote/angle/pipe characters.
const URL_PATTERN: &str = r#"(?i)https?://[^\s\[\]{}|`<>"]+"#;

/// Hosts rejected outright regardless of shape (exact match only;
/// `sub.example.com` is not blacklisted by `example.com`).
const DOMAIN_BLACKLIST: &[&str] = &["localhost", "127.0.0.1", "0.0.0.0", "example.com", "test.com"];

/// A host shorter than this cannot be a real registrable domain.
const MIN_DOMAIN_LEN: usize = 4;

/// Verifier for the domains of newly added external links.
#[derive(Debug, Clone, Default)]
pub struct DomainVerifier;

impl DomainVerifier {
    /// Create a verifier with the default heuristics.
    pub fn new() -> Self {
        Self
    }

    /// Compare parent and current wikitext and validate every newly added
    /// link's host.
    ///
    /// Never panics and never propagates: an internal failure is reported
    /// as an `error`-status result so the caller cannot mistake it for a
    /// clean pass.
    pub fn check(&self, parent_wikitext: &str, current_wikitext: &str) -> CheckResult {
        let pattern = match Regex::new(URL_PATTERN) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::error!(error = %e, "Domain verification check failed");
                return CheckResult::new(
                    DOMAIN_CHECK_ID,
                    CheckStatus::Error,
                    "Domain verification check failed",
                );
            }
        };

        let parent_links = extract_urls(&pattern, parent_wikitext);
        let current_links = extract_urls(&pattern, current_wikitext);
        let mut new_links: Vec<&String> = current_links.difference(&parent_links).collect();
        new_links.sort();

        if new_links.is_empty() {
            return CheckResult::new(
                DOMAIN_CHECK_ID,
                CheckStatus::Ok,
                "No new external links added",
            );
        }

        let invalid_urls: Vec<String> = new_links
            .iter()
            .filter(|link| !is_valid_domain(&extract_domain(link)))
            .map(|link| link.to_string())
            .collect();

        if invalid_urls.is_empty() {
            return CheckResult::new(
                DOMAIN_CHECK_ID,
                CheckStatus::Ok,
                format!(
                    "All {} new external links have valid domains",
                    new_links.len()
                ),
            );
        }

        tracing::debug!(invalid = ?invalid_urls, "New links with suspicious domains");
        CheckResult::new(
            DOMAIN_CHECK_ID,
            CheckStatus::Manual,
            format!(
                "New external links with potentially invalid domains: {}",
                invalid_urls.join(", ")
            ),
        )
        .with_details(json!({ "invalid_urls": invalid_urls }))
    }
}

/// All http(s) URLs in the text, with sentence punctuation trimmed.
fn extract_urls(pattern: &Regex, text: &str) -> HashSet<String> {
    pattern
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches([',', '.', ';']).to_string())
        .collect()
}

/// Parse the host out of a URL, stripping any port. Returns `""` when the
/// URL does not parse.
pub fn extract_domain(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => String::new(),
    }
}

/// Structural validity of a host.
///
/// Rejects: empty or too-short hosts, hosts without a top-level segment of
/// at least 2 characters, blacklisted hosts, IPv4 literals, consecutive
/// dots, and characters outside the letters/digits/hyphen/dot set.
pub fn is_valid_domain(host: &str) -> bool {
    if host.is_empty() || host.len() < MIN_DOMAIN_LEN {
        return false;
    }

    if DOMAIN_BLACKLIST.contains(&host) {
        return false;
    }

    if host.contains("..") {
        return false;
    }

    if !host
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.')
    {
        return false;
    }

    // IPv4 literals are never a legitimate citation host
    let ipv4 = Regex::new(r"^\d{1,3}(\.\d{1,3}){3}$").unwrap();
    if ipv4.is_match(host) {
        return false;
    }

    // Needs a dot-separated TLD of at least 2 characters
    match host.rsplit_once('.') {
        Some((name, tld)) => !name.is_empty() && tld.len() >= 2,
        None => false,
    }
}
