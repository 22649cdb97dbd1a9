use hostguard_domain::{Backup, DomainError};
use std::path::PathBuf;
use std::sync::Arc;

use crate::ports::HostsSectionPort;

pub struct ListBackupsUseCase {
    hosts: Arc<dyn HostsSectionPort>,
    hosts_path: PathBuf,
}

impl ListBackupsUseCase {
    pub fn new(hosts: Arc<dyn HostsSectionPort>, hosts_path: PathBuf) -> Self {
        Self { hosts, hosts_path }
    }

    pub fn execute(&self) -> Result<Vec<Backup>, DomainError> {
        self.hosts.list_backups(&self.hosts_path)
    }
}
