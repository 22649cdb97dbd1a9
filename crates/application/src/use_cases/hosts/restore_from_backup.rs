use hostguard_domain::{DomainError, HostsConfig};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::use_cases::flush_resolver_cache;
use crate::ports::{HostsSectionPort, ResolverCachePort};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreOutcome {
    pub hosts_path: PathBuf,
    pub restored_from: PathBuf,
}

pub struct RestoreFromBackupUseCase {
    hosts: Arc<dyn HostsSectionPort>,
    resolver: Arc<dyn ResolverCachePort>,
    hosts_path: PathBuf,
    flush_resolver_cache: bool,
}

impl RestoreFromBackupUseCase {
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

    /// Restores `backup`, or the newest backup of the hosts file when `None`.
    #[instrument(skip(self), fields(path = %self.hosts_path.display()))]
    pub fn execute(&self, backup: Option<PathBuf>) -> Result<RestoreOutcome, DomainError> {
        let backup = match backup {
            Some(path) => path,
            None => self
                .hosts
                .list_backups(&self.hosts_path)?
                .into_iter()
                .next()
                .map(|b| b.path)
                .ok_or_else(|| {
                    DomainError::NotFound(format!("no backups of {}", self.hosts_path.display()))
                })?,
        };

        self.hosts.restore(&backup, &self.hosts_path)?;

        info!(backup = %backup.display(), "Hosts file restored from backup");
        flush_resolver_cache(self.resolver.as_ref(), self.flush_resolver_cache);

        Ok(RestoreOutcome {
            hosts_path: self.hosts_path.clone(),
            restored_from: backup,
        })
    }
}
