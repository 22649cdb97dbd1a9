use hostguard_domain::{CustomDomains, DomainEdit, DomainError};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::BlocklistStore;

pub struct AddDomainUseCase {
    store: Arc<dyn BlocklistStore>,
}

impl AddDomainUseCase {
    pub fn new(store: Arc<dyn BlocklistStore>) -> Self {
        Self { store }
    }

    /// Adds `domain` to the custom list. Adding a domain that is already
    /// there writes nothing.
    #[instrument(skip(self))]
    pub fn execute(&self, domain: &str) -> Result<DomainEdit, DomainError> {
        let domain = CustomDomains::parse_domain(domain)?;
        let mut custom = self.store.load_custom_domains()?;

        let changed = custom.add(&domain);
        if changed {
            self.store.save_custom_domains(&custom)?;
            info!(domain = %domain, "Added domain to blocklist");
        } else {
            info!(domain = %domain, "Domain already in custom blocklist");
        }

        Ok(DomainEdit::new(domain, changed, &custom))
    }
}
