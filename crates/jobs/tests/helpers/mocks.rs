#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use umbra_dns_application::ports::{CacheMaintenancePort, CacheReapOutcome};
use umbra_dns_domain::DomainError;

pub struct MockCacheMaintenancePort {
    reap_calls: AtomicU64,
    should_fail: AtomicBool,
}

impl MockCacheMaintenancePort {
    pub fn new() -> Self {
        Self {
            reap_calls: AtomicU64::new(0),
            should_fail: AtomicBool::new(false),
        }
    }

    pub fn reap_call_count(&self) -> u64 {
        self.reap_calls.load(Ordering::Relaxed)
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl CacheMaintenancePort for MockCacheMaintenancePort {
    async fn run_reap_cycle(&self) -> Result<CacheReapOutcome, DomainError> {
        self.reap_calls.fetch_add(1, Ordering::Relaxed);

        if self.should_fail.load(Ordering::Relaxed) {
            return Err(DomainError::ProblemParsingOffsets);
        }

        Ok(CacheReapOutcome {
            entries_removed: 1,
            entries_remaining: 2,
        })
    }
}
