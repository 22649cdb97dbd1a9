//! Family-safe DNS resolvers and the per-interface view of the system DNS
//! settings.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsProvider {
    pub name: String,
    /// Primary first.
    pub servers: Vec<IpAddr>,
    #[serde(default)]
    pub description: String,
}

impl DnsProvider {
    fn builtin(name: &str, primary: [u8; 4], secondary: [u8; 4], description: &str) -> Self {
        Self {
            name: name.to_string(),
            servers: vec![
                IpAddr::V4(Ipv4Addr::from(primary)),
                IpAddr::V4(Ipv4Addr::from(secondary)),
            ],
            description: description.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("DNS provider name cannot be empty".to_string());
        }
        if self.servers.is_empty() {
            return Err(format!("DNS provider '{}' has no servers", self.name));
        }
        Ok(())
    }

    pub fn serves(&self, server: &IpAddr) -> bool {
        self.servers.contains(server)
    }
}

pub const DEFAULT_DNS_PROVIDER: &str = "CleanBrowsing";

pub fn builtin_dns_providers() -> Vec<DnsProvider> {
    vec![
        DnsProvider::builtin(
            "CleanBrowsing",
            [185, 228, 168, 168],
            [185, 228, 169, 168],
            "CleanBrowsing Family Filter, blocks adult content",
        ),
        DnsProvider::builtin(
            "OpenDNS Family",
            [208, 67, 222, 123],
            [208, 67, 220, 123],
            "OpenDNS FamilyShield",
        ),
        DnsProvider::builtin(
            "Cloudflare for Families",
            [1, 1, 1, 3],
            [1, 0, 0, 3],
            "Cloudflare for Families, blocks malware and adult content",
        ),
        DnsProvider::builtin(
            "Quad9 Family",
            [9, 9, 9, 11],
            [149, 112, 112, 11],
            "Quad9 with malware and adult content blocking",
        ),
        DnsProvider::builtin(
            "AdGuard Family",
            [94, 140, 14, 15],
            [94, 140, 15, 16],
            "AdGuard DNS Family Protection",
        ),
    ]
}

/// DNS servers currently configured on one network interface. An empty
/// list means the interface takes its resolvers from DHCP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDns {
    pub interface: String,
    pub servers: Vec<IpAddr>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceDnsStatus {
    pub interface: String,
    pub servers: Vec<IpAddr>,
    /// Known provider serving every configured server.
    pub provider: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsStatus {
    pub interfaces: Vec<InterfaceDnsStatus>,
    /// At least one interface resolves through a known family-safe server.
    pub family_safe_active: bool,
}

impl DnsStatus {
    pub fn from_interfaces(current: Vec<InterfaceDns>, providers: &[DnsProvider]) -> Self {
        let family_safe_active = current
            .iter()
            .flat_map(|i| i.servers.iter())
            .any(|server| providers.iter().any(|p| p.serves(server)));

        let interfaces = current
            .into_iter()
            .map(|i| {
                let provider = providers
                    .iter()
                    .find(|p| !i.servers.is_empty() && i.servers.iter().all(|s| p.serves(s)))
                    .map(|p| p.name.clone());
                InterfaceDnsStatus {
                    interface: i.interface,
                    servers: i.servers,
                    provider,
                }
            })
            .collect();

        Self {
            interfaces,
            family_safe_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceFailure {
    pub interface: String,
    pub error: String,
}

/// Outcome of `set-dns` / `reset-dns`. `provider` is `None` after a reset
/// to automatic (DHCP) resolvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DnsChange {
    pub provider: Option<String>,
    pub servers: Vec<IpAddr>,
    pub changed: Vec<String>,
    pub failed: Vec<InterfaceFailure>,
}
