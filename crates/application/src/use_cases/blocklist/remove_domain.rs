use hostguard_domain::{BlocklistConfig, CustomDomains, DomainEdit, DomainError};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::downloaded_domains;
use crate::ports::BlocklistStore;

pub struct RemoveDomainUseCase {
    store: Arc<dyn BlocklistStore>,
    additional_domains: Vec<String>,
}

impl RemoveDomainUseCase {
    pub fn new(store: Arc<dyn BlocklistStore>, config: &BlocklistConfig) -> Self {
        Self {
            store,
            additional_domains: config.additional_domains.clone(),
        }
    }

    /// Stops blocking `domain`. A domain that came from the downloaded list
    /// is excluded so the next refresh does not bring it back.
    #[instrument(skip(self))]
    pub fn execute(&self, domain: &str) -> Result<DomainEdit, DomainError> {
        let domain = CustomDomains::parse_domain(domain)?;
        let downloaded = downloaded_domains(self.store.as_ref(), &self.additional_domains)?;
        let mut custom = self.store.load_custom_domains()?;

        let changed = custom.remove(&domain, downloaded.contains(&domain));
        if changed {
            self.store.save_custom_domains(&custom)?;
            info!(domain = %domain, "Removed domain from blocklist");
        } else {
            warn!(domain = %domain, "Domain not found in blocklist");
        }

        Ok(DomainEdit::new(domain, changed, &custom))
    }
}
