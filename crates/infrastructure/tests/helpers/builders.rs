#![allow(dead_code)]
use hostguard_domain::HostsConfig;
use hostguard_infrastructure::hosts::HostsSectionManager;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tempfile::TempDir;

pub const SYSTEM_HOSTS: &str = "\
# Static table lookup for hostnames.
127.0.0.1 localhost
::1 localhost ip6-localhost ip6-loopback
192.168.1.10 nas.lan nas
";

/// A hosts file inside its own temporary directory.
pub struct HostsFixture {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl HostsFixture {
    pub fn new(content: &str) -> Self {
        Self::with_bytes(content.as_bytes())
    }

    pub fn with_bytes(content: &[u8]) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, content).unwrap();
        Self { dir, path }
    }

    pub fn system() -> Self {
        Self::new(SYSTEM_HOSTS)
    }

    pub fn read(&self) -> String {
        std::fs::read_to_string(&self.path).unwrap()
    }

    pub fn read_bytes(&self) -> Vec<u8> {
        std::fs::read(&self.path).unwrap()
    }

    pub fn config(&self) -> HostsConfig {
        HostsConfig {
            path: self.path.clone(),
            address_mappings: vec!["0.0.0.0".to_string()],
            lock_retries: 3,
            lock_initial_backoff_ms: 5,
            lock_max_backoff_ms: 20,
            flush_resolver_cache: false,
            ..Default::default()
        }
    }

    pub fn manager(&self) -> HostsSectionManager {
        HostsSectionManager::new(&self.config())
    }

    /// Backup files next to the hosts file.
    pub fn backup_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(self.dir.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "bak"))
            .collect();
        files.sort();
        files
    }
}

pub fn domains(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|d| d.to_string()).collect()
}

pub fn addresses(list: &[&str]) -> Vec<String> {
    list.iter().map(|a| a.to_string()).collect()
}
