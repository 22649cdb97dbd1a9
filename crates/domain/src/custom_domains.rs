use crate::blocklist::{normalize_domain, www_variant};
use crate::block_entry::BlockEntry;
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Hand edits layered over the downloaded blocklist. They survive every
/// refresh because they are stored apart from the consolidated list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomDomains {
    /// Blocked in addition to the downloaded list.
    #[serde(default)]
    pub added: BTreeSet<String>,
    /// Never blocked, even when a source publishes them.
    #[serde(default)]
    pub removed: BTreeSet<String>,
}

impl CustomDomains {
    /// Normalises `raw` and rejects it unless it is a valid domain name.
    pub fn parse_domain(raw: &str) -> Result<String, DomainError> {
        let domain = normalize_domain(raw);
        BlockEntry::validate_domain(&domain).map_err(|e| DomainError::Validation {
            reason: "invalid domain".to_string(),
            invalid: vec![format!("'{}': {}", raw.trim(), e)],
        })?;
        Ok(domain)
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// Blocks `domain`, lifting an earlier exclusion. Returns whether
    /// anything changed.
    pub fn add(&mut self, domain: &str) -> bool {
        let lifted = self.removed.remove(domain);
        let added = self.added.insert(domain.to_string());
        lifted || added
    }

    /// Unblocks `domain`. A hand-added domain is simply dropped; one that
    /// the downloaded list blocks is remembered as an exclusion.
    pub fn remove(&mut self, domain: &str, in_downloaded_list: bool) -> bool {
        let dropped = self.added.remove(domain);
        let excluded = in_downloaded_list && self.removed.insert(domain.to_string());
        dropped || excluded
    }

    /// Additions go in first (with their `www.` variant when asked), then
    /// exclusions come out together with their `www.` variant unless that
    /// variant was added by hand.
    pub fn apply_to(&self, domains: &mut BTreeSet<String>, include_www_variants: bool) {
        for domain in &self.added {
            domains.insert(domain.clone());
            if include_www_variants {
                domains.extend(www_variant(domain));
            }
        }
        for domain in &self.removed {
            domains.remove(domain);
            if let Some(variant) = www_variant(domain) {
                if !self.added.contains(&variant) {
                    domains.remove(&variant);
                }
            }
        }
    }
}

/// Outcome of `add-domain` / `remove-domain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainEdit {
    pub domain: String,
    pub changed: bool,
    pub custom_added: usize,
    pub custom_removed: usize,
}

impl DomainEdit {
    pub fn new(domain: String, changed: bool, custom: &CustomDomains) -> Self {
        Self {
            domain,
            changed,
            custom_added: custom.added.len(),
            custom_removed: custom.removed.len(),
        }
    }
}
