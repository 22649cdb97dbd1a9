use async_trait::async_trait;
use hostguard_domain::{BlocklistSource, DomainError};

#[async_trait]
pub trait BlocklistFetcher: Send + Sync {
    /// Downloads `source` and returns its valid, normalised domains.
    async fn fetch_domains(&self, source: &BlocklistSource) -> Result<Vec<String>, DomainError>;
}
