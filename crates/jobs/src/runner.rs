use crate::CacheReaperJob;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Collects the background jobs the process should run and starts them with
/// a shared shutdown token.
pub struct JobRunner {
    cache_reaper: Option<CacheReaperJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            cache_reaper: None,
            shutdown: None,
        }
    }

    pub fn with_cache_reaper(mut self, job: CacheReaperJob) -> Self {
        self.cache_reaper = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    pub async fn start(self) {
        info!("Starting background job runner");

        if let Some(job) = self.cache_reaper {
            let job = match &self.shutdown {
                Some(token) => job.with_cancellation(token.clone()),
                None => job,
            };
            Arc::new(job).start().await;
        }

        info!("All background jobs started");
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
