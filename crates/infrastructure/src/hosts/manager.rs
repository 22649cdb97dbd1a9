use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use hostguard_application::ports::{HostsFileInfo, HostsSectionPort};
use hostguard_domain::hosts_document::{build_entries, plan_block_removal, plan_block_update};
use hostguard_domain::{
    ApplyResult, Backup, BlockUpdate, DomainError, HostsConfig, HostsDocument, ManagedBlock,
    MarkerSet,
};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use super::encoding::{decode, encode, TextEncoding};
use super::lock::{HostsLock, LockPolicy};
use crate::atomic_file::write_atomic;

struct HostsContent {
    raw: Vec<u8>,
    text: String,
    encoding: TextEncoding,
}

/// Owns read-modify-write access to hosts files.
///
/// The first mutation of each hosts path through one manager takes a
/// backup; later mutations in the same session reuse it.
pub struct HostsSectionManager {
    markers: MarkerSet,
    backup_dir: Option<PathBuf>,
    lock_policy: LockPolicy,
    session_backups: DashMap<PathBuf, PathBuf>,
}

impl HostsSectionManager {
    pub fn new(config: &HostsConfig) -> Self {
        Self {
            markers: config.markers(),
            backup_dir: config.backup_dir.clone(),
            lock_policy: LockPolicy::from_config(config),
            session_backups: DashMap::new(),
        }
    }

    /// Backup taken by this manager for `path`, if any.
    pub fn session_backup(&self, path: &Path) -> Option<PathBuf> {
        self.session_backups.get(path).map(|b| b.value().clone())
    }

    fn backup_dir_for(&self, path: &Path) -> PathBuf {
        self.backup_dir
            .clone()
            .or_else(|| {
                path.parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(Path::to_path_buf)
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn read(&self, path: &Path) -> Result<HostsContent, DomainError> {
        let raw = fs::read(path).map_err(|e| DomainError::from_io(path.display(), &e))?;
        let (text, encoding) = decode(raw.clone(), &path.display().to_string());
        Ok(HostsContent {
            raw,
            text,
            encoding,
        })
    }

    /// Takes the session backup of `raw` unless one exists already.
    /// Returns the backup path and whether it was created by this call.
    fn ensure_backup(&self, path: &Path, raw: &[u8]) -> Result<(PathBuf, bool), DomainError> {
        if let Some(existing) = self.session_backup(path) {
            return Ok((existing, false));
        }

        let dir = self.backup_dir_for(path);
        fs::create_dir_all(&dir).map_err(|e| DomainError::from_io(dir.display(), &e))?;

        let mut at = Utc::now();
        let mut backup = Backup::new(path, Some(dir.as_path()), at);
        while backup.path.exists() {
            at += Duration::milliseconds(1);
            backup = Backup::new(path, Some(dir.as_path()), at);
        }

        write_atomic(&backup.path, raw)?;
        info!(path = %path.display(), backup = %backup.path.display(), "Backup created");

        self.session_backups
            .insert(path.to_path_buf(), backup.path.clone());
        Ok((backup.path, true))
    }

    /// Writes a planned update, backing up the current content first.
    fn commit(
        &self,
        path: &Path,
        current: &HostsContent,
        update: BlockUpdate,
    ) -> Result<ApplyResult, DomainError> {
        let Some(new_text) = update.content else {
            return Ok(ApplyResult {
                final_entry_count: update.final_entry_count,
                ..Default::default()
            });
        };

        let (backup_path, backup_created) = self.ensure_backup(path, &current.raw)?;
        write_atomic(path, &encode(&new_text, current.encoding))?;

        Ok(ApplyResult {
            entries_added: update.entries_added,
            entries_removed: update.entries_removed,
            final_entry_count: update.final_entry_count,
            changed: true,
            backup_created,
            backup_path: Some(backup_path),
            repaired_duplicates: update.repaired_duplicates,
            migrated_legacy_markers: update.migrated_legacy_markers,
        })
    }

    fn log_block_state(&self, path: &Path, text: &str) {
        let located = HostsDocument::parse(text).locate_block(&self.markers, "");
        let Ok(Some(block)) = located else {
            return;
        };
        if block.is_duplicated() {
            warn!(
                path = %path.display(),
                pairs = block.spans.len(),
                "Duplicated managed blocks found, collapsing into one"
            );
        }
        if block.legacy_markers {
            info!(path = %path.display(), "Migrating legacy block markers");
        }
        for (line, raw) in block.non_conforming() {
            warn!(path = %path.display(), line, content = %raw, "Dropping non-conforming line from managed block");
        }
    }
}

impl HostsSectionPort for HostsSectionManager {
    #[instrument(skip_all, fields(path = %path.display()))]
    fn read_current_block(&self, path: &Path) -> Result<Option<ManagedBlock>, DomainError> {
        let content = self.read(path)?;
        let block = HostsDocument::parse(&content.text)
            .locate_block(&self.markers, &path.display().to_string())?;

        if let Some(block) = &block {
            for (line, raw) in block.non_conforming() {
                warn!(line, content = %raw, "Non-conforming line inside managed block");
            }
        }
        Ok(block)
    }

    #[instrument(skip_all, fields(path = %path.display(), domains = domains.len()))]
    fn apply(
        &self,
        path: &Path,
        domains: &BTreeSet<String>,
        address_mappings: &[String],
    ) -> Result<ApplyResult, DomainError> {
        let entries = build_entries(domains, address_mappings)?;

        let _lock = HostsLock::acquire(path, self.lock_policy)?;
        let current = self.read(path)?;
        let update = plan_block_update(
            &current.text,
            &path.display().to_string(),
            &self.markers,
            &entries,
            Utc::now(),
        )?;

        if update.content.is_none() {
            debug!(entries = update.final_entry_count, "Managed block unchanged, nothing written");
        } else {
            self.log_block_state(path, &current.text);
        }

        self.commit(path, &current, update)
    }

    #[instrument(skip_all, fields(path = %path.display(), backup = %backup_path.display()))]
    fn restore(&self, backup_path: &Path, path: &Path) -> Result<(), DomainError> {
        if !backup_path.is_file() {
            return Err(DomainError::NotFound(backup_path.display().to_string()));
        }

        let _lock = HostsLock::acquire(path, self.lock_policy)?;
        let bytes =
            fs::read(backup_path).map_err(|e| DomainError::from_io(backup_path.display(), &e))?;
        write_atomic(path, &bytes)?;

        info!(bytes = bytes.len(), "Hosts file restored");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %path.display()))]
    fn remove_block(&self, path: &Path) -> Result<ApplyResult, DomainError> {
        let _lock = HostsLock::acquire(path, self.lock_policy)?;
        let current = self.read(path)?;
        let update =
            plan_block_removal(&current.text, &path.display().to_string(), &self.markers)?;

        self.commit(path, &current, update)
    }

    fn list_backups(&self, path: &Path) -> Result<Vec<Backup>, DomainError> {
        let dir = self.backup_dir_for(path);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(DomainError::from_io(dir.display(), &e)),
        };

        let mut backups: Vec<Backup> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let candidate = entry.path();
                Backup::parse_file_name(path, &candidate).map(|created_at| Backup {
                    source: path.to_path_buf(),
                    path: candidate,
                    created_at,
                })
            })
            .collect();

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(backups)
    }

    fn file_info(&self, path: &Path) -> Result<HostsFileInfo, DomainError> {
        let meta = fs::metadata(path).map_err(|e| DomainError::from_io(path.display(), &e))?;
        Ok(HostsFileInfo {
            size: meta.len(),
            modified: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }
}
