use chrono::{DateTime, Utc};
use hostguard_domain::{ApplyResult, Backup, DomainError, ManagedBlock};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostsFileInfo {
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// Read-modify-write access to the managed block of a hosts file.
///
/// Every mutating call holds the inter-process lock for its whole duration,
/// re-reads the file, and replaces it atomically. The first mutation of a
/// given path through one implementation instance takes a backup.
pub trait HostsSectionPort: Send + Sync {
    fn read_current_block(&self, path: &Path) -> Result<Option<ManagedBlock>, DomainError>;

    fn apply(
        &self,
        path: &Path,
        domains: &BTreeSet<String>,
        address_mappings: &[String],
    ) -> Result<ApplyResult, DomainError>;

    fn restore(&self, backup_path: &Path, path: &Path) -> Result<(), DomainError>;

    fn remove_block(&self, path: &Path) -> Result<ApplyResult, DomainError>;

    /// Newest first.
    fn list_backups(&self, path: &Path) -> Result<Vec<Backup>, DomainError>;

    fn file_info(&self, path: &Path) -> Result<HostsFileInfo, DomainError>;
}
