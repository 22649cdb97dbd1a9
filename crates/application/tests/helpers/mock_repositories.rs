#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use hostguard_application::ports::{
    BlocklistFetcher, BlocklistStore, DnsConfigPort, HostsFileInfo, HostsSectionPort,
    ResolverCachePort,
};
use hostguard_domain::hosts_document::{build_entries, plan_block_removal, plan_block_update};
use hostguard_domain::{
    ApplyResult, Backup, BlocklistSource, CustomDomains, DomainError, HostsDocument,
    InterfaceDns, ManagedBlock, MarkerSet, SourceCache,
};
use std::net::IpAddr;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── MockHostsSection ──────────────────────────────────────────────────────────

/// In-memory hosts files driven by the real marker scan-and-splice.
#[derive(Clone, Default)]
pub struct MockHostsSection {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    backups: Arc<Mutex<Vec<Backup>>>,
    backup_contents: Arc<Mutex<HashMap<PathBuf, String>>>,
    restores: Arc<Mutex<Vec<(PathBuf, PathBuf)>>>,
}

impl MockHostsSection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(path: &str, content: &str) -> Self {
        let mock = Self::new();
        mock.set_file(path, content);
        mock
    }

    pub fn set_file(&self, path: &str, content: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), content.to_string());
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(Path::new(path)).cloned()
    }

    pub fn add_backup(&self, source: &str, at: DateTime<Utc>, content: &str) -> PathBuf {
        let backup = Backup::new(Path::new(source), None, at);
        let path = backup.path.clone();
        self.backup_contents
            .lock()
            .unwrap()
            .insert(path.clone(), content.to_string());
        let mut backups = self.backups.lock().unwrap();
        backups.push(backup);
        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        path
    }

    pub fn restores(&self) -> Vec<(PathBuf, PathBuf)> {
        self.restores.lock().unwrap().clone()
    }

    fn content(&self, path: &Path) -> Result<String, DomainError> {
        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(path.display().to_string()))
    }
}

impl HostsSectionPort for MockHostsSection {
    fn read_current_block(&self, path: &Path) -> Result<Option<ManagedBlock>, DomainError> {
        let content = self.content(path)?;
        HostsDocument::parse(&content).locate_block(&MarkerSet::default(), &path.display().to_string())
    }

    fn apply(
        &self,
        path: &Path,
        domains: &BTreeSet<String>,
        address_mappings: &[String],
    ) -> Result<ApplyResult, DomainError> {
        let entries = build_entries(domains, address_mappings)?;
        let content = self.content(path)?;
        let update = plan_block_update(
            &content,
            &path.display().to_string(),
            &MarkerSet::default(),
            &entries,
            Utc::now(),
        )?;
        let changed = update.content.is_some();
        if let Some(new_content) = update.content {
            self.set_file(&path.display().to_string(), &new_content);
        }
        Ok(ApplyResult {
            entries_added: update.entries_added,
            entries_removed: update.entries_removed,
            final_entry_count: update.final_entry_count,
            changed,
            repaired_duplicates: update.repaired_duplicates,
            migrated_legacy_markers: update.migrated_legacy_markers,
            ..Default::default()
        })
    }

    fn restore(&self, backup_path: &Path, path: &Path) -> Result<(), DomainError> {
        let content = self
            .backup_contents
            .lock()
            .unwrap()
            .get(backup_path)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(backup_path.display().to_string()))?;
        self.set_file(&path.display().to_string(), &content);
        self.restores
            .lock()
            .unwrap()
            .push((backup_path.to_path_buf(), path.to_path_buf()));
        Ok(())
    }

    fn remove_block(&self, path: &Path) -> Result<ApplyResult, DomainError> {
        let content = self.content(path)?;
        let update = plan_block_removal(
            &content,
            &path.display().to_string(),
            &MarkerSet::default(),
        )?;
        let changed = update.content.is_some();
        if let Some(new_content) = update.content {
            self.set_file(&path.display().to_string(), &new_content);
        }
        Ok(ApplyResult {
            entries_removed: update.entries_removed,
            changed,
            ..Default::default()
        })
    }

    fn list_backups(&self, path: &Path) -> Result<Vec<Backup>, DomainError> {
        Ok(self
            .backups
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.source == path)
            .cloned()
            .collect())
    }

    fn file_info(&self, path: &Path) -> Result<HostsFileInfo, DomainError> {
        let content = self.content(path)?;
        Ok(HostsFileInfo {
            size: content.len() as u64,
            modified: None,
        })
    }
}

// ── MockResolverCache ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockResolverCache {
    flushes: Arc<AtomicUsize>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockResolverCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let mock = Self::new();
        *mock.should_fail.lock().unwrap() = true;
        mock
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.load(Ordering::SeqCst)
    }
}

impl ResolverCachePort for MockResolverCache {
    fn flush(&self) -> Result<(), DomainError> {
        self.flushes.fetch_add(1, Ordering::SeqCst);
        if *self.should_fail.lock().unwrap() {
            return Err(DomainError::ResolverFlush("mock flush failure".to_string()));
        }
        Ok(())
    }
}

// ── MockBlocklistFetcher ──────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBlocklistFetcher {
    responses: Arc<Mutex<HashMap<String, Result<Vec<String>, DomainError>>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockBlocklistFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_domains(&self, source: &str, domains: &[&str]) {
        self.responses.lock().unwrap().insert(
            source.to_string(),
            Ok(domains.iter().map(|d| d.to_string()).collect()),
        );
    }

    pub fn set_error(&self, source: &str, message: &str) {
        self.responses.lock().unwrap().insert(
            source.to_string(),
            Err(DomainError::BlocklistFetch(message.to_string())),
        );
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlocklistFetcher for MockBlocklistFetcher {
    async fn fetch_domains(&self, source: &BlocklistSource) -> Result<Vec<String>, DomainError> {
        self.calls.lock().unwrap().push(source.name.clone());
        self.responses
            .lock()
            .unwrap()
            .get(&source.name)
            .cloned()
            .unwrap_or_else(|| {
                Err(DomainError::BlocklistFetch(format!(
                    "no mock response for {}",
                    source.name
                )))
            })
    }
}

// ── MockBlocklistStore ────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBlocklistStore {
    domains: Arc<Mutex<Option<(BTreeSet<String>, DateTime<Utc>)>>>,
    cache: Arc<Mutex<SourceCache>>,
    custom: Arc<Mutex<CustomDomains>>,
    saves: Arc<AtomicUsize>,
    custom_saves: Arc<AtomicUsize>,
}

impl MockBlocklistStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domains(domains: &[&str], updated_at: DateTime<Utc>) -> Self {
        let store = Self::new();
        *store.domains.lock().unwrap() = Some((
            domains.iter().map(|d| d.to_string()).collect(),
            updated_at,
        ));
        store
    }

    pub fn cache_source(&self, name: &str, domains: &[&str], age: Duration) {
        self.cache.lock().unwrap().insert(
            name,
            domains.iter().map(|d| d.to_string()).collect(),
            Utc::now() - age,
        );
    }

    pub fn saved_domains(&self) -> Option<BTreeSet<String>> {
        self.domains.lock().unwrap().as_ref().map(|(d, _)| d.clone())
    }

    pub fn cache(&self) -> SourceCache {
        self.cache.lock().unwrap().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn custom(&self) -> CustomDomains {
        self.custom.lock().unwrap().clone()
    }

    pub fn set_custom(&self, added: &[&str], removed: &[&str]) {
        *self.custom.lock().unwrap() = CustomDomains {
            added: added.iter().map(|d| d.to_string()).collect(),
            removed: removed.iter().map(|d| d.to_string()).collect(),
        };
    }

    pub fn custom_save_count(&self) -> usize {
        self.custom_saves.load(Ordering::SeqCst)
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
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.domains.lock().unwrap() = Some((domains.clone(), updated_at));
        Ok(())
    }

    fn last_updated(&self) -> Result<Option<DateTime<Utc>>, DomainError> {
        Ok(self.domains.lock().unwrap().as_ref().map(|(_, t)| *t))
    }

    fn load_cache(&self) -> Result<SourceCache, DomainError> {
        Ok(self.cache())
    }

    fn save_cache(&self, cache: &SourceCache) -> Result<(), DomainError> {
        *self.cache.lock().unwrap() = cache.clone();
        Ok(())
    }
    fn load_custom_domains(&self) -> Result<CustomDomains, DomainError> {
        Ok(self.custom())
    }

    fn save_custom_domains(&self, custom: &CustomDomains) -> Result<(), DomainError> {
        self.custom_saves.fetch_add(1, Ordering::SeqCst);
        *self.custom.lock().unwrap() = custom.clone();
        Ok(())
    }
}

// ── MockDnsConfig ─────────────────────────────────────────────────────────────

/// Interfaces held in memory. Interfaces listed in `failing` reject every
/// change with a permission error.
#[derive(Clone, Default)]
pub struct MockDnsConfig {
    interfaces: Arc<Mutex<Vec<InterfaceDns>>>,
    failing: Arc<Mutex<Vec<String>>>,
    unreadable: Arc<Mutex<bool>>,
}

impl MockDnsConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_interfaces(names: &[&str]) -> Self {
        let mock = Self::new();
        *mock.interfaces.lock().unwrap() = names
            .iter()
            .map(|n| InterfaceDns {
                interface: n.to_string(),
                servers: vec![],
            })
            .collect();
        mock
    }

    pub fn fail_on(&self, interface: &str) {
        self.failing.lock().unwrap().push(interface.to_string());
    }

    pub fn set_unreadable(&self) {
        *self.unreadable.lock().unwrap() = true;
    }

    pub fn servers(&self, interface: &str) -> Vec<IpAddr> {
        self.interfaces
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.interface == interface)
            .map(|i| i.servers.clone())
            .unwrap_or_default()
    }

    fn change(&self, interface: &str, servers: &[IpAddr]) -> Result<(), DomainError> {
        if self.failing.lock().unwrap().iter().any(|f| f == interface) {
            return Err(DomainError::Permission {
                path: interface.to_string(),
                reason: "administrator rights required".to_string(),
            });
        }
        let mut interfaces = self.interfaces.lock().unwrap();
        match interfaces.iter_mut().find(|i| i.interface == interface) {
            Some(existing) => existing.servers = servers.to_vec(),
            None => interfaces.push(InterfaceDns {
                interface: interface.to_string(),
                servers: servers.to_vec(),
            }),
        }
        Ok(())
    }
}

impl DnsConfigPort for MockDnsConfig {
    fn interfaces(&self) -> Result<Vec<InterfaceDns>, DomainError> {
        if *self.unreadable.lock().unwrap() {
            return Err(DomainError::DnsConfig("mock tool missing".to_string()));
        }
        Ok(self.interfaces.lock().unwrap().clone())
    }

    fn set_servers(&self, interface: &str, servers: &[IpAddr]) -> Result<(), DomainError> {
        self.change(interface, servers)
    }

    fn reset(&self, interface: &str) -> Result<(), DomainError> {
        self.change(interface, &[])
    }
}
