use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A marker line reported back to the caller when the managed block cannot
/// be located unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerLine {
    /// 1-based line number in the hosts file.
    pub line: usize,
    pub content: String,
}

impl fmt::Display for MarkerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.content)
    }
}

fn join_markers(markers: &[MarkerLine]) -> String {
    markers
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Permission denied for {path}: {reason}")]
    Permission { path: String, reason: String },

    #[error("Managed block in {path} is corrupted: {reason} [{}]", join_markers(.markers))]
    Corruption {
        path: String,
        reason: String,
        markers: Vec<MarkerLine>,
    },

    #[error("Validation failed: {reason} ({})", .invalid.join(", "))]
    Validation { reason: String, invalid: Vec<String> },

    #[error("Timed out waiting for lock on {path} after {attempts} attempts")]
    LockTimeout { path: String, attempts: u32 },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Blocklist fetch error: {0}")]
    BlocklistFetch(String),

    #[error("Blocklist store error: {0}")]
    BlocklistStore(String),

    #[error("Resolver cache flush failed: {0}")]
    ResolverFlush(String),

    #[error("DNS settings error: {0}")]
    DnsConfig(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Stable, machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Permission { .. } => "permission",
            DomainError::Corruption { .. } => "corruption",
            DomainError::Validation { .. } => "validation",
            DomainError::LockTimeout { .. } => "lock_timeout",
            DomainError::NotFound(_) => "not_found",
            DomainError::Io { .. } => "io",
            DomainError::BlocklistFetch(_) => "blocklist_fetch",
            DomainError::BlocklistStore(_) => "blocklist_store",
            DomainError::ResolverFlush(_) => "resolver_flush",
            DomainError::DnsConfig(_) => "dns_config",
            DomainError::ConfigError(_) => "config",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::LockTimeout { .. })
    }

    /// Maps an I/O error on `path` to the matching domain error, keeping
    /// permission failures distinguishable from other I/O failures.
    pub fn from_io(path: impl fmt::Display, err: &std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => DomainError::Permission {
                path: path.to_string(),
                reason: err.to_string(),
            },
            std::io::ErrorKind::NotFound => DomainError::NotFound(path.to_string()),
            _ => DomainError::Io {
                path: path.to_string(),
                reason: err.to_string(),
            },
        }
    }
}
