mod add_domain;
mod get_blocklist;
mod remove_domain;
mod update_blocklist;

pub use add_domain::AddDomainUseCase;
pub use get_blocklist::GetBlocklistUseCase;
pub use remove_domain::RemoveDomainUseCase;
pub use update_blocklist::UpdateBlocklistUseCase;

use hostguard_domain::{normalize_domain, BlockEntry, DomainError};
use std::collections::BTreeSet;
use tracing::warn;

use crate::ports::BlocklistStore;

/// The persisted list, or only the configured additional domains when
/// nothing has been downloaded yet. Custom edits are not applied.
fn downloaded_domains(
    store: &dyn BlocklistStore,
    additional: &[String],
) -> Result<BTreeSet<String>, DomainError> {
    Ok(match store.load_domains()? {
        Some(domains) => domains,
        None => additional_domains(additional),
    })
}

/// Configured extra domains, normalised; invalid ones are logged and skipped.
fn additional_domains(raw: &[String]) -> BTreeSet<String> {
    raw.iter()
        .filter_map(|d| {
            let domain = normalize_domain(d);
            match BlockEntry::validate_domain(&domain) {
                Ok(()) => Some(domain),
                Err(e) => {
                    warn!(domain = %d, error = %e, "Skipping invalid additional domain");
                    None
                }
            }
        })
        .collect()
}
