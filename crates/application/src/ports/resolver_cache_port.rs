use hostguard_domain::DomainError;

/// Invalidates the operating system's DNS resolver cache so that hosts
/// changes take effect immediately.
pub trait ResolverCachePort: Send + Sync {
    fn flush(&self) -> Result<(), DomainError>;
}
