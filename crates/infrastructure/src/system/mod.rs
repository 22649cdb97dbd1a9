mod command;
pub mod dns_settings;
pub mod resolver_cache;

pub use dns_settings::{DnsTool, SystemDnsConfig};
pub use resolver_cache::SystemResolverCache;
