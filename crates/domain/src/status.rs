use crate::dns::DnsStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostsStatus {
    pub hosts_path: PathBuf,
    pub block_present: bool,
    pub entry_count: usize,
    pub blocked_domains: usize,
    pub non_conforming_lines: usize,
    pub file_size: u64,
    pub last_modified: Option<DateTime<Utc>>,
    pub backups: usize,
    pub latest_backup: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlocklistStatus {
    pub domains: usize,
    pub last_updated: Option<DateTime<Utc>>,
    pub update_needed: bool,
    pub enabled_sources: usize,
    pub custom_added: usize,
    pub custom_removed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub hosts: HostsStatus,
    pub blocklist: BlocklistStatus,
    /// `None` when the system DNS settings could not be read.
    pub dns: Option<DnsStatus>,
}
