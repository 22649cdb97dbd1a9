use hostguard_domain::{DomainError, InterfaceDns};
use std::net::IpAddr;

/// Reads and changes the DNS servers of the system's network interfaces.
pub trait DnsConfigPort: Send + Sync {
    /// Active interfaces with the servers each one is configured with.
    fn interfaces(&self) -> Result<Vec<InterfaceDns>, DomainError>;

    fn set_servers(&self, interface: &str, servers: &[IpAddr]) -> Result<(), DomainError>;

    /// Returns the interface to the resolvers handed out by DHCP.
    fn reset(&self, interface: &str) -> Result<(), DomainError>;
}
