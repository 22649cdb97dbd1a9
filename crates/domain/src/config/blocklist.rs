use crate::blocklist::{BlocklistSource, ListFormat};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlocklistConfig {
    #[serde(default = "default_sources")]
    pub sources: Vec<BlocklistSource>,

    /// Domains blocked regardless of what the sources publish.
    #[serde(default)]
    pub additional_domains: Vec<String>,

    /// Also block `www.<domain>` for every domain without that prefix.
    #[serde(default = "default_true")]
    pub include_www_variants: bool,

    #[serde(default = "default_update_interval_hours")]
    pub update_interval_hours: u64,

    #[serde(default = "default_max_cache_age_hours")]
    pub max_cache_age_hours: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Holds `blocklist.txt` and `blocklist_cache.json`.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl BlocklistConfig {
    /// Upper bound for the hour-valued settings (ten years).
    pub const MAX_HOURS: u64 = 87_600;

    pub fn enabled_sources(&self) -> impl Iterator<Item = &BlocklistSource> {
        self.sources.iter().filter(|s| s.enabled)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::hours(self.update_interval_hours.min(Self::MAX_HOURS) as i64)
    }

    pub fn max_cache_age(&self) -> Duration {
        Duration::hours(self.max_cache_age_hours.min(Self::MAX_HOURS) as i64)
    }
}

impl Default for BlocklistConfig {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            additional_domains: vec![],
            include_www_variants: true,
            update_interval_hours: default_update_interval_hours(),
            max_cache_age_hours: default_max_cache_age_hours(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            data_dir: default_data_dir(),
        }
    }
}

fn default_sources() -> Vec<BlocklistSource> {
    vec![
        BlocklistSource {
            name: "StevenBlack Porn".to_string(),
            url: "https://raw.githubusercontent.com/StevenBlack/hosts/master/alternates/porn/hosts"
                .to_string(),
            format: ListFormat::Hosts,
            enabled: true,
        },
        BlocklistSource {
            name: "chadmayfield NSFW".to_string(),
            url: "https://raw.githubusercontent.com/chadmayfield/my-pihole-blocklists/master/lists/pi_blocklist_porn_all.list"
                .to_string(),
            format: ListFormat::Domains,
            enabled: true,
        },
    ]
}

fn default_update_interval_hours() -> u64 {
    24
}

fn default_max_cache_age_hours() -> u64 {
    48
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("hostguard/{}", env!("CARGO_PKG_VERSION"))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./hostguard-data")
}

fn default_true() -> bool {
    true
}
