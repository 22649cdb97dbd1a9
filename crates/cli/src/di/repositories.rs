use hostguard_domain::{Config, DomainError};
use hostguard_infrastructure::blocklist::{FileBlocklistStore, HttpBlocklistFetcher};
use hostguard_infrastructure::hosts::HostsSectionManager;
use hostguard_infrastructure::system::{SystemDnsConfig, SystemResolverCache};
use std::sync::Arc;

pub struct Repositories {
    pub hosts: Arc<HostsSectionManager>,
    pub resolver: Arc<SystemResolverCache>,
    pub dns: Arc<SystemDnsConfig>,
    pub blocklist_store: Arc<FileBlocklistStore>,
    pub blocklist_fetcher: Arc<HttpBlocklistFetcher>,
}

impl Repositories {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        Ok(Self {
            hosts: Arc::new(HostsSectionManager::new(&config.hosts)),
            resolver: Arc::new(SystemResolverCache::new()),
            dns: Arc::new(SystemDnsConfig::new()),
            blocklist_store: Arc::new(FileBlocklistStore::new(&config.blocklist.data_dir)),
            blocklist_fetcher: Arc::new(HttpBlocklistFetcher::new(&config.blocklist)?),
        })
    }
}
