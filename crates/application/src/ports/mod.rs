mod blocklist_fetcher;
mod blocklist_store;
mod dns_config_port;
mod hosts_section_port;
mod resolver_cache_port;

pub use blocklist_fetcher::BlocklistFetcher;
pub use blocklist_store::BlocklistStore;
pub use dns_config_port::DnsConfigPort;
pub use hosts_section_port::{HostsFileInfo, HostsSectionPort};
pub use resolver_cache_port::ResolverCachePort;
