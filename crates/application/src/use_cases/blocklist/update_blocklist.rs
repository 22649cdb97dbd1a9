use chrono::Utc;
use futures::future::join_all;
use hostguard_domain::{
    www_variant, BlocklistConfig, BlocklistSource, DomainError, SourceCache, SourceOrigin,
    SourceReport, UpdateSummary,
};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::additional_domains;
use crate::ports::{BlocklistFetcher, BlocklistStore};

pub struct UpdateBlocklistUseCase {
    fetcher: Arc<dyn BlocklistFetcher>,
    store: Arc<dyn BlocklistStore>,
    config: BlocklistConfig,
}

impl UpdateBlocklistUseCase {
    pub fn new(
        fetcher: Arc<dyn BlocklistFetcher>,
        store: Arc<dyn BlocklistStore>,
        config: BlocklistConfig,
    ) -> Self {
        Self {
            fetcher,
            store,
            config,
        }
    }

    /// Rebuilds the consolidated list from every enabled source.
    ///
    /// Sources with a cache entry younger than `max_cache_age_hours` are not
    /// downloaded unless `force` is set. A failing source is reported and
    /// skipped; when every enabled source fails nothing is persisted.
    #[instrument(skip(self))]
    pub async fn execute(&self, force: bool) -> Result<UpdateSummary, DomainError> {
        let now = Utc::now();
        let max_age = self.config.max_cache_age();

        let mut cache = self.store.load_cache().unwrap_or_else(|e| {
            warn!(error = %e, "Ignoring unreadable blocklist cache");
            SourceCache::default()
        });

        let sources: Vec<&BlocklistSource> = self.config.enabled_sources().collect();
        let to_fetch: Vec<&BlocklistSource> = sources
            .iter()
            .copied()
            .filter(|s| force || cache.fresh(&s.name, max_age, now).is_none())
            .collect();

        let fetched = join_all(to_fetch.iter().map(|s| self.fetcher.fetch_domains(s))).await;
        let mut fetched: HashMap<&str, Result<Vec<String>, DomainError>> = to_fetch
            .iter()
            .map(|s| s.name.as_str())
            .zip(fetched)
            .collect();

        let mut domains = BTreeSet::new();
        let mut reports = Vec::with_capacity(sources.len());

        for source in &sources {
            let report = match fetched.remove(source.name.as_str()) {
                Some(Ok(list)) => {
                    info!(source = %source.name, domains = list.len(), "Blocklist source downloaded");
                    let count = list.len();
                    domains.extend(list.iter().cloned());
                    cache.insert(&source.name, list, now);
                    SourceReport {
                        name: source.name.clone(),
                        origin: SourceOrigin::Downloaded,
                        domains: count,
                        error: None,
                    }
                }
                Some(Err(e)) => {
                    warn!(source = %source.name, error = %e, "Blocklist source failed, skipping");
                    SourceReport {
                        name: source.name.clone(),
                        origin: SourceOrigin::Failed,
                        domains: 0,
                        error: Some(e.to_string()),
                    }
                }
                None => {
                    let count = match cache.fresh(&source.name, max_age, now) {
                        Some(cached) => {
                            domains.extend(cached.domains.iter().cloned());
                            cached.domains.len()
                        }
                        None => 0,
                    };
                    info!(source = %source.name, domains = count, "Blocklist source served from cache");
                    SourceReport {
                        name: source.name.clone(),
                        origin: SourceOrigin::Cache,
                        domains: count,
                        error: None,
                    }
                }
            };
            reports.push(report);
        }

        if !sources.is_empty() && reports.iter().all(|r| r.origin == SourceOrigin::Failed) {
            return Err(DomainError::BlocklistFetch(format!(
                "all {} blocklist sources failed",
                sources.len()
            )));
        }

        let extra = additional_domains(&self.config.additional_domains);
        let additional_count = extra.len();
        domains.extend(extra);

        if self.config.include_www_variants {
            let variants: Vec<String> = domains.iter().filter_map(|d| www_variant(d)).collect();
            domains.extend(variants);
        }

        self.store.save_cache(&cache)?;
        self.store.save_domains(&domains, now)?;

        let summary = UpdateSummary {
            total_domains: domains.len(),
            additional_domains: additional_count,
            sources: reports,
            updated_at: now,
        };

        info!(
            total = summary.total_domains,
            failed = summary.failed_sources().count(),
            "Blocklist updated"
        );

        Ok(summary)
    }
}
