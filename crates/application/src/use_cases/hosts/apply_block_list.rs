use hostguard_domain::{normalize_domain, ApplyResult, DomainError, HostsConfig};
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::use_cases::flush_resolver_cache;
use crate::ports::{HostsSectionPort, ResolverCachePort};

pub struct ApplyBlockListUseCase {
    hosts: Arc<dyn HostsSectionPort>,
    resolver: Arc<dyn ResolverCachePort>,
    hosts_path: PathBuf,
    address_mappings: Vec<String>,
    flush_resolver_cache: bool,
}

impl ApplyBlockListUseCase {
    pub fn new(
        hosts: Arc<dyn HostsSectionPort>,
        resolver: Arc<dyn ResolverCachePort>,
        config: &HostsConfig,
    ) -> Self {
        Self {
            hosts,
            resolver,
            hosts_path: config.path.clone(),
            address_mappings: config.address_mappings.clone(),
            flush_resolver_cache: config.flush_resolver_cache,
        }
    }

    /// Replaces the managed block with `domains`. Input is normalised
    /// (trimmed, lowercased) before validation; invalid values reject the
    /// whole request.
    #[instrument(skip(self, domains), fields(path = %self.hosts_path.display(), requested = domains.len()))]
    pub fn execute(&self, domains: &BTreeSet<String>) -> Result<ApplyResult, DomainError> {
        let normalized: BTreeSet<String> = domains.iter().map(|d| normalize_domain(d)).collect();

        let result = self
            .hosts
            .apply(&self.hosts_path, &normalized, &self.address_mappings)?;

        if result.repaired_duplicates {
            warn!("Collapsed duplicated managed blocks into one");
        }

        if result.changed {
            info!(
                added = result.entries_added,
                removed = result.entries_removed,
                total = result.final_entry_count,
                backup = ?result.backup_path,
                "Managed block updated"
            );
            flush_resolver_cache(self.resolver.as_ref(), self.flush_resolver_cache);
        } else {
            info!(total = result.final_entry_count, "Managed block already up to date");
        }

        Ok(result)
    }
}
