use chrono::{DateTime, Utc};
use hostguard_application::ports::BlocklistStore;
use hostguard_domain::{CustomDomains, DomainError, SourceCache};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::atomic_file::write_atomic;

const LIST_FILE: &str = "blocklist.txt";
const CACHE_FILE: &str = "blocklist_cache.json";
const CUSTOM_FILE: &str = "custom_domains.json";
const UPDATED_PREFIX: &str = "# Updated: ";

/// Keeps `blocklist.txt` (one domain per line under a comment header),
/// `blocklist_cache.json` and `custom_domains.json` in a data directory.
pub struct FileBlocklistStore {
    data_dir: PathBuf,
}

impl FileBlocklistStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn list_path(&self) -> PathBuf {
        self.data_dir.join(LIST_FILE)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE)
    }

    pub fn custom_path(&self) -> PathBuf {
        self.data_dir.join(CUSTOM_FILE)
    }

    fn read_optional(path: &Path) -> Result<Option<String>, DomainError> {
        match fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DomainError::BlocklistStore(format!(
                "cannot read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<(), DomainError> {
        fs::create_dir_all(&self.data_dir).map_err(|e| {
            DomainError::BlocklistStore(format!(
                "cannot create {}: {}",
                self.data_dir.display(),
                e
            ))
        })?;
        write_atomic(path, bytes)
    }
}

impl BlocklistStore for FileBlocklistStore {
    fn load_domains(&self) -> Result<Option<BTreeSet<String>>, DomainError> {
        let Some(text) = Self::read_optional(&self.list_path())? else {
            return Ok(None);
        };
        Ok(Some(
            text.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_string)
                .collect(),
        ))
    }

    fn save_domains(
        &self,
        domains: &BTreeSet<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let mut out = String::with_capacity(domains.len() * 24 + 128);
        out.push_str("# hostguard consolidated blocklist\n");
        out.push_str(UPDATED_PREFIX);
        out.push_str(&updated_at.to_rfc3339());
        out.push('\n');
        out.push_str(&format!("# Domains: {}\n", domains.len()));
        for domain in domains {
            out.push_str(domain);
            out.push('\n');
        }

        let path = self.list_path();
        self.write(&path, out.as_bytes())?;
        debug!(path = %path.display(), domains = domains.len(), "Blocklist saved");
        Ok(())
    }

    fn last_updated(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        let Some(text) = Self::read_optional(&self.list_path())? else {
            return Ok(None);
        };
        Ok(text
            .lines()
            .take_while(|l| l.starts_with('#'))
            .find_map(|l| l.strip_prefix(UPDATED_PREFIX))
            .and_then(|stamp| DateTime::parse_from_rfc3339(stamp.trim()).ok())
            .map(|t| t.with_timezone(&Utc)))
    }

    fn load_cache(&self) -> Result<SourceCache, DomainError> {
        let path = self.cache_path();
        match Self::read_optional(&path)? {
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                DomainError::BlocklistStore(format!("invalid cache {}: {}", path.display(), e))
            }),
            None => Ok(SourceCache::default()),
        }
    }

    fn save_cache(&self, cache: &SourceCache) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(cache)
            .map_err(|e| DomainError::BlocklistStore(format!("cannot encode cache: {}", e)))?;
        self.write(&self.cache_path(), &json)
    }

    fn load_custom_domains(&self) -> Result<CustomDomains, DomainError> {
        let path = self.custom_path();
        match Self::read_optional(&path)? {
            Some(text) => serde_json::from_str(&text).map_err(|e| {
                DomainError::BlocklistStore(format!(
                    "invalid custom domains {}: {}",
                    path.display(),
                    e
                ))
            }),
            None => Ok(CustomDomains::default()),
        }
    }

    fn save_custom_domains(&self, custom: &CustomDomains) -> Result<(), DomainError> {
        let json = serde_json::to_vec_pretty(custom).map_err(|e| {
            DomainError::BlocklistStore(format!("cannot encode custom domains: {}", e))
        })?;
        let path = self.custom_path();
        self.write(&path, &json)?;
        debug!(
            path = %path.display(),
            added = custom.added.len(),
            removed = custom.removed.len(),
            "Custom domains saved"
        );
        Ok(())
    }
}
