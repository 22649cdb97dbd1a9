use hostguard_application::use_cases::{
    ApplyBlockListUseCase, GetBlocklistUseCase, UpdateBlocklistUseCase,
};
use hostguard_domain::{ApplyResult, DomainError};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 86_400;

/// Background job that refreshes the blocklist and re-applies it to the
/// hosts file.
///
/// The first interval tick is consumed immediately, so nothing runs at
/// startup; callers that want an initial refresh call [`run_once`].
///
/// [`run_once`]: BlocklistSyncJob::run_once
pub struct BlocklistSyncJob {
    update: Arc<UpdateBlocklistUseCase>,
    get: Arc<GetBlocklistUseCase>,
    apply: Arc<ApplyBlockListUseCase>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl BlocklistSyncJob {
    pub fn new(
        update: Arc<UpdateBlocklistUseCase>,
        get: Arc<GetBlocklistUseCase>,
        apply: Arc<ApplyBlockListUseCase>,
    ) -> Self {
        Self {
            update,
            get,
            apply,
            interval_secs: DEFAULT_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// One refresh cycle: update the persisted list, then apply it. The
    /// hosts write is blocking file I/O and runs on the blocking pool.
    pub async fn run_once(&self) -> Result<ApplyResult, DomainError> {
        let summary = self.update.execute(false).await?;
        info!(
            total = summary.total_domains,
            failed = summary.failed_sources().count(),
            "BlocklistSyncJob: blocklist refreshed"
        );

        let get = Arc::clone(&self.get);
        let apply = Arc::clone(&self.apply);
        tokio::task::spawn_blocking(move || {
            let domains = get.execute()?;
            apply.execute(&domains)
        })
        .await
        .map_err(|e| DomainError::Io {
            path: "hosts".to_string(),
            reason: format!("apply task failed: {}", e),
        })?
    }

    pub fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_secs = self.interval_secs,
            "Starting blocklist sync job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BlocklistSyncJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        info!("BlocklistSyncJob: refreshing blocklist");
                        match self.run_once().await {
                            Ok(result) => info!(
                                changed = result.changed,
                                entries = result.final_entry_count,
                                "BlocklistSyncJob: cycle completed"
                            ),
                            Err(e) => error!(error = %e, kind = e.kind(), "BlocklistSyncJob: cycle failed"),
                        }
                    }
                }
            }
        })
    }
}
