use crate::dns::{builtin_dns_providers, DnsProvider, DEFAULT_DNS_PROVIDER};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Provider used by `set-dns` when none is named.
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Interfaces to change. Empty means every active interface.
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Extra providers next to the built-in family-safe ones.
    #[serde(default)]
    pub providers: Vec<DnsProvider>,
}

impl DnsConfig {
    /// Configured providers first, then the built-in ones.
    pub fn all_providers(&self) -> Vec<DnsProvider> {
        let mut all = self.providers.clone();
        all.extend(
            builtin_dns_providers()
                .into_iter()
                .filter(|b| !self.providers.iter().any(|p| p.name.eq_ignore_ascii_case(&b.name))),
        );
        all
    }

    /// Case-insensitive lookup by name.
    pub fn find_provider(&self, name: &str) -> Option<DnsProvider> {
        self.all_providers()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
    }
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            interfaces: vec![],
            providers: vec![],
        }
    }
}

fn default_provider() -> String {
    DEFAULT_DNS_PROVIDER.to_string()
}
