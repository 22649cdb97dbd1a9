pub mod blocklist;
pub mod dns;
pub mod hosts;
pub mod status;

pub use blocklist::{
    AddDomainUseCase, GetBlocklistUseCase, RemoveDomainUseCase, UpdateBlocklistUseCase,
};
pub use dns::{GetDnsStatusUseCase, ResetDnsUseCase, SetDnsUseCase};
pub use hosts::{
    ApplyBlockListUseCase, ListBackupsUseCase, RemoveBlockUseCase, RestoreFromBackupUseCase,
    RestoreOutcome, ShowCurrentBlockUseCase,
};
pub use status::GetStatusUseCase;

use crate::ports::ResolverCachePort;
use tracing::{debug, warn};

/// Flushes the resolver cache after the hosts file or the DNS servers
/// changed. A failed flush never fails the operation that triggered it.
fn flush_resolver_cache(resolver: &dyn ResolverCachePort, enabled: bool) {
    if !enabled {
        return;
    }
    match resolver.flush() {
        Ok(()) => debug!("Resolver cache flushed"),
        Err(e) => warn!(error = %e, "Failed to flush resolver cache"),
    }
}
