use hostguard_domain::{Config, DnsChange, DnsConfig, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use super::{change_each, target_interfaces};
use crate::ports::{DnsConfigPort, ResolverCachePort};
use crate::use_cases::flush_resolver_cache;

pub struct SetDnsUseCase {
    dns: Arc<dyn DnsConfigPort>,
    resolver: Arc<dyn ResolverCachePort>,
    config: DnsConfig,
    flush_resolver_cache: bool,
}

impl SetDnsUseCase {
    pub fn new(
        dns: Arc<dyn DnsConfigPort>,
        resolver: Arc<dyn ResolverCachePort>,
        config: &Config,
    ) -> Self {
        Self {
            dns,
            resolver,
            config: config.dns.clone(),
            flush_resolver_cache: config.hosts.flush_resolver_cache,
        }
    }

    /// Points the target interfaces at `provider` (the configured default
    /// when `None`).
    #[instrument(skip(self))]
    pub fn execute(
        &self,
        provider: Option<&str>,
        interface: Option<&str>,
    ) -> Result<DnsChange, DomainError> {
        let name = provider.unwrap_or(&self.config.provider);
        let provider = self
            .config
            .find_provider(name)
            .ok_or_else(|| DomainError::Validation {
                reason: "unknown DNS provider".to_string(),
                invalid: vec![name.to_string()],
            })?;

        let targets = target_interfaces(self.dns.as_ref(), interface, &self.config.interfaces)?;
        info!(provider = %provider.name, servers = ?provider.servers, "Setting DNS servers");

        let (changed, failed) = change_each(targets, "set", |iface| {
            self.dns.set_servers(iface, &provider.servers)
        })?;
        flush_resolver_cache(self.resolver.as_ref(), self.flush_resolver_cache);

        Ok(DnsChange {
            provider: Some(provider.name),
            servers: provider.servers,
            changed,
            failed,
        })
    }
}
