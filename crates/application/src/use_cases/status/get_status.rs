use chrono::{DateTime, Duration, Utc};
use hostguard_domain::{BlocklistStatus, Config, DomainError, HostsStatus, Status};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{instrument, warn};

use crate::ports::{BlocklistStore, HostsSectionPort};
use crate::use_cases::GetDnsStatusUseCase;

pub struct GetStatusUseCase {
    hosts: Arc<dyn HostsSectionPort>,
    store: Arc<dyn BlocklistStore>,
    dns: Arc<GetDnsStatusUseCase>,
    hosts_path: PathBuf,
    update_interval: Duration,
    enabled_sources: usize,
}

impl GetStatusUseCase {
    pub fn new(
        hosts: Arc<dyn HostsSectionPort>,
        store: Arc<dyn BlocklistStore>,
        dns: Arc<GetDnsStatusUseCase>,
        config: &Config,
    ) -> Self {
        Self {
            hosts,
            store,
            dns,
            hosts_path: config.hosts.path.clone(),
            update_interval: config.blocklist.update_interval(),
            enabled_sources: config.blocklist.enabled_sources().count(),
        }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, now: DateTime<Utc>) -> Result<Status, DomainError> {
        let info = self.hosts.file_info(&self.hosts_path)?;
        let block = self.hosts.read_current_block(&self.hosts_path)?;
        let backups = self.hosts.list_backups(&self.hosts_path)?;

        let hosts = HostsStatus {
            hosts_path: self.hosts_path.clone(),
            block_present: block.is_some(),
            entry_count: block.as_ref().map_or(0, |b| b.entry_count()),
            blocked_domains: block.as_ref().map_or(0, |b| b.domains().len()),
            non_conforming_lines: block.as_ref().map_or(0, |b| b.non_conforming().len()),
            file_size: info.size,
            last_modified: info.modified,
            backups: backups.len(),
            latest_backup: backups.first().map(|b| b.path.clone()),
        };

        let last_updated = self.store.last_updated()?;
        let custom = self.store.load_custom_domains()?;
        let blocklist = BlocklistStatus {
            domains: self.store.load_domains()?.map_or(0, |d| d.len()),
            last_updated,
            update_needed: last_updated
                .map_or(true, |t| now.signed_duration_since(t) >= self.update_interval),
            enabled_sources: self.enabled_sources,
            custom_added: custom.added.len(),
            custom_removed: custom.removed.len(),
        };

        let dns = match self.dns.execute() {
            Ok(dns) => Some(dns),
            Err(e) => {
                warn!(error = %e, "Cannot read system DNS settings");
                None
            }
        };

        Ok(Status {
            hosts,
            blocklist,
            dns,
        })
    }
}
