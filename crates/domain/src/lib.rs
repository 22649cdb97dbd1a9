//! hostguard domain layer
pub mod apply_result;
pub mod backup;
pub mod block_entry;
pub mod blocklist;
pub mod config;
pub mod custom_domains;
pub mod dns;
pub mod errors;
pub mod hosts_document;
pub mod managed_block;
pub mod markers;
pub mod status;

pub use apply_result::ApplyResult;
pub use backup::Backup;
pub use block_entry::BlockEntry;
pub use blocklist::{
    normalize_domain, www_variant, BlocklistSource, CachedSource, ListFormat, SourceCache,
    SourceOrigin, SourceReport, UpdateSummary,
};
pub use config::{
    BlocklistConfig, CliOverrides, Config, ConfigError, DnsConfig, HostsConfig, LoggingConfig,
};
pub use custom_domains::{CustomDomains, DomainEdit};
pub use dns::{
    builtin_dns_providers, DnsChange, DnsProvider, DnsStatus, InterfaceDns, InterfaceDnsStatus,
    InterfaceFailure,
};
pub use errors::{DomainError, MarkerLine};
pub use hosts_document::{BlockUpdate, HostsDocument, LineEnding};
pub use managed_block::{BlockLine, LineSpan, ManagedBlock};
pub use markers::{MarkerPair, MarkerSet};
pub use status::{BlocklistStatus, HostsStatus, Status};
