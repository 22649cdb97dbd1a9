use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::blocklist::BlocklistConfig;
use super::dns::DnsConfig;
use super::errors::ConfigError;
use super::hosts::HostsConfig;
use super::logging::LoggingConfig;
use crate::block_entry::BlockEntry;

const LOCAL_CONFIG: &str = "hostguard.toml";

/// Main configuration structure for hostguard
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Hosts file location, markers, address mappings and locking
    #[serde(default)]
    pub hosts: HostsConfig,

    /// Remote list sources and local list storage
    #[serde(default)]
    pub blocklist: BlocklistConfig,

    /// Family-safe resolvers for `set-dns`
    #[serde(default)]
    pub dns: DnsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. hostguard.toml in current directory
    /// 3. System-wide config (/etc/hostguard/config.toml)
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(Path::new(path))?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.hosts_path {
            self.hosts.path = path;
        }
        if let Some(dir) = overrides.backup_dir {
            self.hosts.backup_dir = Some(dir);
        }
        if let Some(dir) = overrides.data_dir {
            self.blocklist.data_dir = dir;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let hosts = &self.hosts;

        for (name, marker) in [("start", &hosts.start_marker), ("end", &hosts.end_marker)] {
            if !marker.trim_start().starts_with('#') {
                return Err(ConfigError::Validation(format!(
                    "{} marker must be a comment line starting with '#'",
                    name
                )));
            }
            if marker.trim_end() != marker.as_str() {
                return Err(ConfigError::Validation(format!(
                    "{} marker cannot end with whitespace",
                    name
                )));
            }
        }
        if hosts.start_marker == hosts.end_marker {
            return Err(ConfigError::Validation(
                "start and end markers must differ".to_string(),
            ));
        }

        if hosts.address_mappings.is_empty() {
            return Err(ConfigError::Validation(
                "at least one address mapping is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for address in &hosts.address_mappings {
            let ip = BlockEntry::validate_address(address).map_err(ConfigError::Validation)?;
            if !seen.insert(ip) {
                return Err(ConfigError::Validation(format!(
                    "duplicate address mapping: {}",
                    address
                )));
            }
        }

        if hosts.lock_retries == 0 {
            return Err(ConfigError::Validation(
                "lock_retries must be at least 1".to_string(),
            ));
        }

        let blocklist = &self.blocklist;
        if blocklist.update_interval_hours == 0 {
            return Err(ConfigError::Validation(
                "update_interval_hours cannot be 0".to_string(),
            ));
        }
        for (name, hours) in [
            ("update_interval_hours", blocklist.update_interval_hours),
            ("max_cache_age_hours", blocklist.max_cache_age_hours),
        ] {
            if hours > BlocklistConfig::MAX_HOURS {
                return Err(ConfigError::Validation(format!(
                    "{} cannot exceed {}",
                    name,
                    BlocklistConfig::MAX_HOURS
                )));
            }
        }
        if blocklist.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "timeout_secs cannot be 0".to_string(),
            ));
        }
        let mut names = HashSet::new();
        for source in &blocklist.sources {
            source.validate().map_err(ConfigError::Validation)?;
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate blocklist source name: {}",
                    source.name
                )));
            }
        }

        let dns = &self.dns;
        let mut providers = HashSet::new();
        for provider in &dns.providers {
            provider.validate().map_err(ConfigError::Validation)?;
            if !providers.insert(provider.name.to_ascii_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate DNS provider: {}",
                    provider.name
                )));
            }
        }
        if dns.find_provider(&dns.provider).is_none() {
            return Err(ConfigError::Validation(format!(
                "unknown DNS provider: {}",
                dns.provider
            )));
        }

        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.display().to_string(), e.to_string()))?;
        Ok(())
    }

    /// Get the path to the configuration file that `load` would pick up
    pub fn get_config_path() -> Option<PathBuf> {
        [PathBuf::from(LOCAL_CONFIG), system_config_path()]
            .into_iter()
            .find(|p| p.exists())
    }
}

#[cfg(windows)]
fn system_config_path() -> PathBuf {
    let base = std::env::var_os("ProgramData").unwrap_or_else(|| "C:\\ProgramData".into());
    PathBuf::from(base).join("hostguard").join("config.toml")
}

#[cfg(not(windows))]
fn system_config_path() -> PathBuf {
    PathBuf::from("/etc/hostguard/config.toml")
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub hosts_path: Option<PathBuf>,
    pub backup_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
}
