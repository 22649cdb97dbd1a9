use chrono::{DateTime, Utc};
use hostguard_domain::{CustomDomains, DomainError, SourceCache};
use std::collections::BTreeSet;

/// Local persistence of the consolidated blocklist, the per-source cache and
/// the hand-edited custom domains.
pub trait BlocklistStore: Send + Sync {
    /// `None` until a list has been saved once.
    fn load_domains(&self) -> Result<Option<BTreeSet<String>>, DomainError>;
    fn save_domains(
        &self,
        domains: &BTreeSet<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError>;
    fn last_updated(&self) -> Result<Option<DateTime<Utc>>, DomainError>;

    fn load_cache(&self) -> Result<SourceCache, DomainError>;
    fn save_cache(&self, cache: &SourceCache) -> Result<(), DomainError>;

    /// Empty until the first `add-domain` / `remove-domain`.
    fn load_custom_domains(&self) -> Result<CustomDomains, DomainError>;
    fn save_custom_domains(&self, custom: &CustomDomains) -> Result<(), DomainError>;
}
