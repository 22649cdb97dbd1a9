use fs2::FileExt;
use hostguard_domain::{DomainError, HostsConfig};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry policy for taking the hosts lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockPolicy {
    pub attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl LockPolicy {
    pub fn from_config(config: &HostsConfig) -> Self {
        Self {
            attempts: config.lock_retries.max(1),
            initial_backoff: Duration::from_millis(config.lock_initial_backoff_ms),
            max_backoff: Duration::from_millis(config.lock_max_backoff_ms),
        }
    }
}

/// Exclusive advisory lock on `<hosts>.lock`, held until dropped.
///
/// The hosts file itself is replaced by rename on every write, so the lock
/// lives on a sidecar file whose inode never changes.
pub struct HostsLock {
    file: File,
    path: PathBuf,
}

impl HostsLock {
    pub fn lock_path(hosts: &Path) -> PathBuf {
        let mut name = hosts
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "hosts".into());
        name.push(".lock");
        hosts.with_file_name(name)
    }

    pub fn acquire(hosts: &Path, policy: LockPolicy) -> Result<Self, DomainError> {
        let path = Self::lock_path(hosts);
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|e| DomainError::from_io(path.display(), &e))?;

        let mut backoff = policy.initial_backoff;
        for attempt in 1..=policy.attempts {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    debug!(lock = %path.display(), attempt, "Hosts lock acquired");
                    return Ok(Self { file, path });
                }
                Err(e) if is_contended(&e) => {
                    if attempt < policy.attempts {
                        debug!(
                            lock = %path.display(),
                            attempt,
                            backoff_ms = backoff.as_millis() as u64,
                            "Hosts lock busy, retrying"
                        );
                        thread::sleep(backoff);
                        backoff = (backoff * 2).min(policy.max_backoff);
                    }
                }
                Err(e) => return Err(DomainError::from_io(path.display(), &e)),
            }
        }

        warn!(lock = %path.display(), attempts = policy.attempts, "Gave up waiting for hosts lock");
        Err(DomainError::LockTimeout {
            path: hosts.display().to_string(),
            attempts: policy.attempts,
        })
    }
}

impl Drop for HostsLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(lock = %self.path.display(), error = %e, "Failed to release hosts lock");
        }
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock
        || err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
}
