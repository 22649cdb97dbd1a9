use hostguard_domain::{DomainError, ManagedBlock};
use std::path::PathBuf;
use std::sync::Arc;

use crate::ports::HostsSectionPort;

pub struct ShowCurrentBlockUseCase {
    hosts: Arc<dyn HostsSectionPort>,
    hosts_path: PathBuf,
}

impl ShowCurrentBlockUseCase {
    pub fn new(hosts: Arc<dyn HostsSectionPort>, hosts_path: PathBuf) -> Self {
        Self { hosts, hosts_path }
    }

    pub fn execute(&self) -> Result<Option<ManagedBlock>, DomainError> {
        self.hosts.read_current_block(&self.hosts_path)
    }
}
