use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use umbra_dns_application::ports::CacheMaintenancePort;

const DEFAULT_REAP_INTERVAL_SECS: u64 = 60;

/// Periodically ages the query cache and evicts spent entries.
///
/// The cache already decrements TTLs just in time on every hit; this job only
/// bounds memory growth from entries nobody asks for again.
pub struct CacheReaperJob {
    maintenance: Arc<dyn CacheMaintenancePort>,
    reap_interval_secs: u64,
    shutdown: CancellationToken,
}

impl CacheReaperJob {
    pub fn new(maintenance: Arc<dyn CacheMaintenancePort>) -> Self {
        Self {
            maintenance,
            reap_interval_secs: DEFAULT_REAP_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, reap_secs: u64) -> Self {
        self.reap_interval_secs = reap_secs;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.reap_interval_secs,
            "Starting cache reaper job"
        );

        let job = Arc::clone(&self);
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(job.reap_interval_secs));
            // interval's first tick completes immediately.
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => {
                        info!("CacheReaperJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match job.maintenance.run_reap_cycle().await {
                            Ok(outcome) => {
                                if outcome.entries_removed > 0 {
                                    info!(
                                        entries_removed = outcome.entries_removed,
                                        entries_remaining = outcome.entries_remaining,
                                        "Cache reap cycle completed"
                                    );
                                }
                            }
                            Err(e) => {
                                error!(error = %e, "Cache reap cycle failed");
                            }
                        }
                    }
                }
            }
        });
    }
}
