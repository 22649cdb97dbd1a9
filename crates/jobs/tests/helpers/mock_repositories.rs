#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hostguard_application::ports::{
    BlocklistFetcher, BlocklistStore, HostsFileInfo, HostsSectionPort, ResolverCachePort,
};
use hostguard_domain::{
    ApplyResult, Backup, BlocklistSource, CustomDomains, DomainError, ManagedBlock, SourceCache,
};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── MockHostsSection ──────────────────────────────────────────────────────────

/// Records every applied domain set instead of touching a file.
#[derive(Clone, Default)]
pub struct MockHostsSection {
    applied: Arc<Mutex<Vec<BTreeSet<String>>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockHostsSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock().unwrap() = fail;
    }

    pub fn applied(&self) -> Vec<BTreeSet<String>> {
        self.applied.lock().unwrap().clone()
    }

    pub fn apply_count(&self) -> usize {
        self.applied.lock().unwrap().len()
    }
}

impl HostsSectionPort for MockHostsSection {
    fn read_current_block(&self, _path: &Path) -> Result<Option<ManagedBlock>, DomainError> {
        Ok(None)
    }

    fn apply(
        &self,
        path: &Path,
        domains: &BTreeSet<String>,
        address_mappings: &[String],
    ) -> Result<ApplyResult, DomainError> {
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::LockTimeout {
                path: path.display().to_string(),
                attempts: 1,
            });
        }
        let mut applied = self.applied.lock().unwrap();
        let changed = applied.last() != Some(domains);
        applied.push(domains.clone());
        Ok(ApplyResult {
            changed,
            final_entry_count: domains.len() * address_mappings.len(),
            ..Default::default()
        })
    }

    fn restore(&self, _backup_path: &Path, _path: &Path) -> Result<(), DomainError> {
        Ok(())
    }

    fn remove_block(&self, _path: &Path) -> Result<ApplyResult, DomainError> {
        Ok(ApplyResult::default())
    }

    fn list_backups(&self, _path: &Path) -> Result<Vec<Backup>, DomainError> {
        Ok(vec![])
    }

    fn file_info(&self, _path: &Path) -> Result<HostsFileInfo, DomainError> {
        Ok(HostsFileInfo {
            size: 0,
            modified: None,
        })
    }
}

// ── MockResolverCache ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockResolverCache {
    flushes: Arc<AtomicUsize>,
}

impl MockResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl ResolverCachePort for MockResolverCache {
    fn flush(&self) -> Result<(), DomainError> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ── MockBlocklistFetcher ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBlocklistFetcher {
    domains: Arc<Mutex<HashMap<String, Vec<String>>>>,
    calls: Arc<AtomicUsize>,
}

impl MockBlocklistFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_domains(&self, source: &str, domains: &[&str]) {
        self.domains.lock().unwrap().insert(
            source.to_string(),
            domains.iter().map(|d| d.to_string()).collect(),
        );
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlocklistFetcher for MockBlocklistFetcher {
    async fn fetch_domains(&self, source: &BlocklistSource) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.domains
            .lock()
            .unwrap()
            .get(&source.name)
            .cloned()
            .ok_or_else(|| DomainError::BlocklistFetch(format!("{} unreachable", source.name)))
    }
}

// ── MockBlocklistStore ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBlocklistStore {
    domains: Arc<Mutex<Option<(BTreeSet<String>, DateTime<Utc>)>>>,
    cache: Arc<Mutex<SourceCache>>,
    custom: Arc<Mutex<CustomDomains>>,
}

impl MockBlocklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_custom(&self, domain: &str) {
        self.custom.lock().unwrap().add(domain);
    }

    pub fn saved_domains(&self) -> Option<BTreeSet<String>> {
        self.domains.lock().unwrap().as_ref().map(|(d, _)| d.clone())
    }
}

impl BlocklistStore for MockBlocklistStore {
    fn load_domains(&self) -> Result<Option<BTreeSet<String>>, DomainError> {
        Ok(self.saved_domains())
    }

    fn save_domains(
        &self,
        domains: &BTreeSet<String>,
        updated_at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        *self.domains.lock().unwrap() = Some((domains.clone(), updated_at));
        Ok(())
    }

    fn last_updated(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        Ok(self.domains.lock().unwrap().as_ref().map(|(_, t)| *t))
    }

    fn load_cache(&self) -> Result<SourceCache, DomainError> {
        Ok(self.cache.lock().unwrap().clone())
    }

    fn save_cache(&self, cache: &SourceCache) -> Result<(), DomainError> {
        *self.cache.lock().unwrap() = cache.clone();
        Ok(())
    }

    fn load_custom_domains(&self) -> Result<CustomDomains, DomainError> {
        Ok(self.custom.lock().unwrap().clone())
    }

    fn save_custom_domains(&self, custom: &CustomDomains) -> Result<(), DomainError> {
        *self.custom.lock().unwrap() = custom.clone();
        Ok(())
    }
}
