use hostguard_domain::{DnsConfig, DnsProvider, DnsStatus, DomainError};
use std::sync::Arc;

use crate::ports::DnsConfigPort;

pub struct GetDnsStatusUseCase {
    dns: Arc<dyn DnsConfigPort>,
    providers: Vec<DnsProvider>,
}

impl GetDnsStatusUseCase {
    pub fn new(dns: Arc<dyn DnsConfigPort>, config: &DnsConfig) -> Self {
        Self {
            dns,
            providers: config.all_providers(),
        }
    }

    pub fn providers(&self) -> &[DnsProvider] {
        &self.providers
    }

    pub fn execute(&self) -> Result<DnsStatus, DomainError> {
        Ok(DnsStatus::from_interfaces(
            self.dns.interfaces()?,
            &self.providers,
        ))
    }
}
