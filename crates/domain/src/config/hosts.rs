use crate::markers::{MarkerPair, MarkerSet, DEFAULT_END_MARKER, DEFAULT_START_MARKER};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HostsConfig {
    #[serde(default = "default_hosts_path")]
    pub path: PathBuf,

    /// Where backups go. Defaults to the hosts file's directory.
    #[serde(default)]
    pub backup_dir: Option<PathBuf>,

    #[serde(default = "default_start_marker")]
    pub start_marker: String,

    #[serde(default = "default_end_marker")]
    pub end_marker: String,

    /// Older marker pairs that are still recognised and migrated on apply.
    #[serde(default = "default_legacy_markers")]
    pub legacy_markers: Vec<MarkerPair>,

    /// Addresses emitted for every blocked domain, in this order.
    #[serde(default = "default_address_mappings")]
    pub address_mappings: Vec<String>,

    #[serde(default = "default_lock_retries")]
    pub lock_retries: u32,

    #[serde(default = "default_lock_initial_backoff_ms")]
    pub lock_initial_backoff_ms: u64,

    #[serde(default = "default_lock_max_backoff_ms")]
    pub lock_max_backoff_ms: u64,

    #[serde(default = "default_true")]
    pub flush_resolver_cache: bool,
}

impl HostsConfig {
    pub fn markers(&self) -> MarkerSet {
        MarkerSet::new(
            MarkerPair::new(self.start_marker.clone(), self.end_marker.clone()),
            self.legacy_markers.clone(),
        )
    }
}

impl Default for HostsConfig {
    fn default() -> Self {
        Self {
            path: default_hosts_path(),
            backup_dir: None,
            start_marker: default_start_marker(),
            end_marker: default_end_marker(),
            legacy_markers: default_legacy_markers(),
            address_mappings: default_address_mappings(),
            lock_retries: default_lock_retries(),
            lock_initial_backoff_ms: default_lock_initial_backoff_ms(),
            lock_max_backoff_ms: default_lock_max_backoff_ms(),
            flush_resolver_cache: true,
        }
    }
}

#[cfg(windows)]
fn default_hosts_path() -> PathBuf {
    let windir = std::env::var_os("WINDIR").unwrap_or_else(|| "C:\\Windows".into());
    PathBuf::from(windir)
        .join("System32")
        .join("drivers")
        .join("etc")
        .join("hosts")
}

#[cfg(not(windows))]
fn default_hosts_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

fn default_start_marker() -> String {
    DEFAULT_START_MARKER.to_string()
}

fn default_end_marker() -> String {
    DEFAULT_END_MARKER.to_string()
}

fn default_legacy_markers() -> Vec<MarkerPair> {
    vec![MarkerPair::legacy_default()]
}

fn default_address_mappings() -> Vec<String> {
    vec!["0.0.0.0".to_string(), "::".to_string()]
}

fn default_lock_retries() -> u32 {
    10
}

fn default_lock_initial_backoff_ms() -> u64 {
    50
}

fn default_lock_max_backoff_ms() -> u64 {
    1000
}

fn default_true() -> bool {
    true
}
