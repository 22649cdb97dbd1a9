use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListFormat {
    /// `<ip> <domain>` lines, as published by hosts-file list maintainers.
    Hosts,
    /// One domain per line.
    Domains,
}

impl ListFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            ListFormat::Hosts => "hosts",
            ListFormat::Domains => "domains",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlocklistSource {
    pub name: String,
    pub url: String,
    pub format: ListFormat,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl BlocklistSource {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Blocklist source name cannot be empty".to_string());
        }
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(format!(
                "Blocklist source '{}' must use an http(s) URL",
                self.name
            ));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

/// Trims and lowercases a domain taken from user input or a downloaded
/// list. A URL scheme, path, port and trailing dot are dropped. The result
/// still has to pass [`crate::BlockEntry::validate_domain`].
pub fn normalize_domain(raw: &str) -> String {
    let mut domain = raw.trim();
    if let Some(idx) = domain.find("://") {
        domain = &domain[idx + 3..];
    }
    if let Some(idx) = domain.find(|c| matches!(c, '/' | '?' | '#')) {
        domain = &domain[..idx];
    }
    if let Some(idx) = domain.find(':') {
        domain = &domain[..idx];
    }
    domain.trim_end_matches('.').to_ascii_lowercase()
}

/// `www.<domain>` when the domain does not already carry the prefix and the
/// variant is itself a valid domain.
pub fn www_variant(domain: &str) -> Option<String> {
    if domain.starts_with("www.") {
        return None;
    }
    let variant = format!("www.{}", domain);
    crate::BlockEntry::validate_domain(&variant)
        .ok()
        .map(|_| variant)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedSource {
    pub domains: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

/// Last successful download per source, keyed by source name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCache {
    #[serde(default)]
    pub sources: BTreeMap<String, CachedSource>,
}

impl SourceCache {
    pub fn fresh(&self, name: &str, max_age: Duration, now: DateTime<Utc>) -> Option<&CachedSource> {
        self.sources
            .get(name)
            .filter(|cached| now.signed_duration_since(cached.fetched_at) < max_age)
    }

    pub fn insert(&mut self, name: &str, domains: Vec<String>, fetched_at: DateTime<Utc>) {
        self.sources.insert(
            name.to_string(),
            CachedSource {
                domains,
                fetched_at,
            },
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceOrigin {
    Downloaded,
    Cache,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceReport {
    pub name: String,
    pub origin: SourceOrigin,
    pub domains: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSummary {
    pub total_domains: usize,
    pub additional_domains: usize,
    pub sources: Vec<SourceReport>,
    pub updated_at: DateTime<Utc>,
}

impl UpdateSummary {
    pub fn failed_sources(&self) -> impl Iterator<Item = &SourceReport> {
        self.sources
            .iter()
            .filter(|s| s.origin == SourceOrigin::Failed)
    }
}
