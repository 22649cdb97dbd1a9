use hostguard_domain::{ApplyResult, DomainError, HostsConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::use_cases::flush_resolver_cache;
use crate::ports::{HostsSectionPort, ResolverCachePort};

pub struct RemoveBlockUseCase {
    hosts: Arc<dyn HostsSectionPort>,
    resolver: Arc<dyn ResolverCachePort>,
    hosts_path: PathBuf,
    flush_resolver_cache: bool,
}

impl RemoveBlockUseCase {
    pub fn new(
        hosts: Arc<dyn HostsSectionPort>,
        resolver: Arc<dyn ResolverCachePort>,
        config: &HostsConfig,
    ) -> Self {
        Self {
            hosts,
            resolver,
            hosts_path: config.path.clone(),
            flush_resolver_cache: config.flush_resolver_cache,
        }
    }

    #[instrument(skip(self), fields(path = %self.hosts_path.display()))]
    pub fn execute(&self) -> Result<ApplyResult, DomainError> {
        let result = self.hosts.remove_block(&self.hosts_path)?;

        if result.changed {
            info!(removed = result.entries_removed, "Managed block removed");
            flush_resolver_cache(self.resolver.as_ref(), self.flush_resolver_cache);
        } else {
            info!("No managed block present");
        }

        Ok(result)
    }
}
