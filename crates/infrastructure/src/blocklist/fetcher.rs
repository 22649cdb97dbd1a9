use async_trait::async_trait;
use hostguard_application::ports::BlocklistFetcher;
use hostguard_domain::{BlocklistConfig, BlocklistSource, DomainError};
use std::time::Duration;
use tracing::{debug, warn};

use super::parser::parse_list_text;

pub struct HttpBlocklistFetcher {
    client: reqwest::Client,
}

impl HttpBlocklistFetcher {
    pub fn new(config: &BlocklistConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DomainError::BlocklistFetch(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self { client })
    }

    async fn fetch_url(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::BlocklistFetch(format!("fetch error for {}: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(DomainError::BlocklistFetch(format!(
                "HTTP {} for {}",
                response.status().as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::BlocklistFetch(format!("read error for {}: {}", url, e)))
    }
}

#[async_trait]
impl BlocklistFetcher for HttpBlocklistFetcher {
    async fn fetch_domains(&self, source: &BlocklistSource) -> Result<Vec<String>, DomainError> {
        let text = self.fetch_url(&source.url).await?;
        let domains = parse_list_text(&text, source.format);

        debug!(
            source = %source.name,
            format = source.format.to_str(),
            bytes = text.len(),
            domains = domains.len(),
            "Blocklist source parsed"
        );
        if domains.is_empty() {
            warn!(source = %source.name, "Blocklist source contained no usable domains");
        }

        Ok(domains)
    }
}
