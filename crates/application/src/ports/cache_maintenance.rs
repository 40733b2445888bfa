use async_trait::async_trait;
use umbra_dns_domain::DomainError;

/// Outcome of one reaper pass over the query cache.
#[derive(Debug, Default, Clone)]
pub struct CacheReapOutcome {
    pub entries_removed: usize,
    pub entries_remaining: usize,
}

/// Port for periodic query-cache maintenance.
#[async_trait]
pub trait CacheMaintenancePort: Send + Sync {
    /// Age every entry and evict the ones whose TTLs are exhausted.
    async fn run_reap_cycle(&self) -> Result<CacheReapOutcome, DomainError>;
}
