use hostguard_domain::{Config, DnsChange, DomainError};
use std::sync::Arc;
use tracing::instrument;

use super::{change_each, target_interfaces};
use crate::ports::{DnsConfigPort, ResolverCachePort};
use crate::use_cases::flush_resolver_cache;

pub struct ResetDnsUseCase {
    dns: Arc<dyn DnsConfigPort>,
    resolver: Arc<dyn ResolverCachePort>,
    interfaces: Vec<String>,
    flush_resolver_cache: bool,
}

impl ResetDnsUseCase {
    pub fn new(
        dns: Arc<dyn DnsConfigPort>,
        resolver: Arc<dyn ResolverCachePort>,
        config: &Config,
    ) -> Self {
        Self {
            dns,
            resolver,
            interfaces: config.dns.interfaces.clone(),
            flush_resolver_cache: config.hosts.flush_resolver_cache,
        }
    }

    /// Returns the target interfaces to automatic (DHCP) resolvers.
    #[instrument(skip(self))]
    pub fn execute(&self, interface: Option<&str>) -> Result<DnsChange, DomainError> {
        let targets = target_interfaces(self.dns.as_ref(), interface, &self.interfaces)?;

        let (changed, failed) = change_each(targets, "reset", |iface| self.dns.reset(iface))?;
        flush_resolver_cache(self.resolver.as_ref(), self.flush_resolver_cache);

        Ok(DnsChange {
            provider: None,
            servers: vec![],
            changed,
            failed,
        })
    }
}
