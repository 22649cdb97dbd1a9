pub mod blocklist;
pub mod dns;
pub mod errors;
pub mod hosts;
pub mod logging;
pub mod root;

pub use blocklist::BlocklistConfig;
pub use dns::DnsConfig;
pub use errors::ConfigError;
pub use hosts::HostsConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use root::{CliOverrides, Config};
