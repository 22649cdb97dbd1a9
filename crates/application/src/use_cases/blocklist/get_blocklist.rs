use chrono::{DateTime, Duration, Utc};
use hostguard_domain::{BlocklistConfig, DomainError};
use std::collections::BTreeSet;
use std::sync::Arc;

use super::downloaded_domains;
use crate::ports::BlocklistStore;

pub struct GetBlocklistUseCase {
    store: Arc<dyn BlocklistStore>,
    additional_domains: Vec<String>,
    include_www_variants: bool,
    update_interval: Duration,
}

impl GetBlocklistUseCase {
    pub fn new(store: Arc<dyn BlocklistStore>, config: &BlocklistConfig) -> Self {
        Self {
            store,
            additional_domains: config.additional_domains.clone(),
            include_www_variants: config.include_www_variants,
            update_interval: config.update_interval(),
        }
    }

    /// The persisted list (or only the configured additional domains when
    /// nothing has been downloaded yet) with the custom edits applied.
    pub fn execute(&self) -> Result<BTreeSet<String>, DomainError> {
        let mut domains = downloaded_domains(self.store.as_ref(), &self.additional_domains)?;
        let custom = self.store.load_custom_domains()?;
        custom.apply_to(&mut domains, self.include_www_variants);
        Ok(domains)
    }

    pub fn is_update_needed(&self, now: DateTime<Utc>) -> Result<bool, DomainError> {
        Ok(match self.store.last_updated()? {
            Some(updated) => now.signed_duration_since(updated) >= self.update_interval,
            None => true,
        })
    }
}
