//! TTL-aware cache of upstream responses, keyed by question fingerprint.

use super::answer::CachedAnswer;
use crate::dns::codec;
use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;
use tracing::{debug, warn};
use umbra_dns_application::ports::{AnswerCachePort, CacheMaintenancePort, CacheReapOutcome};
use umbra_dns_domain::{DomainError, Fingerprint};

/// Process-wide response cache.
///
/// One mutex guards the map and every byte buffer it owns; it is held for the
/// whole of a fetch, insert, or reaper pass so readers never observe a
/// half-rewritten TTL. Capacity is unbounded: the no-empty-offsets rule at
/// insertion guarantees every entry will eventually age out.
pub struct QueryCache {
    entries: Mutex<FxHashMap<Fingerprint, CachedAnswer>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(FxHashMap::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<Fingerprint, CachedAnswer>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a response, keyed by the fingerprint of its question section.
    /// Answers without a single TTL to decrement are refused: they could
    /// never be evicted.
    pub fn insert(&self, answer: CachedAnswer) {
        if answer.ttl_offsets().is_empty() {
            return;
        }

        let Some(key) = question_fingerprint(answer.data()) else {
            warn!("Dropping response with unparseable question section");
            return;
        };

        self.lock().insert(key, answer);
    }

    /// Convenience wrapper over [`insert`](Self::insert) stamping the answer
    /// with the current time.
    pub fn store(&self, data: Vec<u8>, ttl_offsets: Vec<usize>) {
        self.insert(CachedAnswer::new(data, ttl_offsets, Instant::now()));
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Write one `hostname, rtype, [ttls]` line per entry, with the TTLs
    /// decremented to the moment of the call.
    pub fn entries(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        let entries = self.lock();
        let now = Instant::now();

        for answer in entries.values() {
            let Ok(question) = codec::parse_question(&answer.data()[codec::HEADER_LEN..]) else {
                continue;
            };
            let age = answer.age_secs(now);
            let ttls: Vec<u32> = answer
                .ttls()
                .iter()
                .map(|ttl| ttl.saturating_sub(age))
                .collect();
            writeln!(
                writer,
                "{}, {}, {:?}",
                question.hostname(),
                question.record_type(),
                ttls
            )?;
        }

        Ok(())
    }

    /// One reaper pass: age every entry in place, evict the spent ones, and
    /// restart the clock on survivors.
    pub fn reap(&self) -> CacheReapOutcome {
        let started = Instant::now();
        let mut entries = self.lock();
        let before = entries.len();

        let now = Instant::now();
        entries.retain(|key, answer| {
            let age = answer.age_secs(now);
            if answer.refresh(age, now) {
                true
            } else {
                debug!(key = %key, "Removing expired entry");
                false
            }
        });

        let outcome = CacheReapOutcome {
            entries_removed: before - entries.len(),
            entries_remaining: entries.len(),
        };
        debug!(
            elapsed = ?started.elapsed(),
            entries = outcome.entries_remaining,
            "Reaper pass complete"
        );
        outcome
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl AnswerCachePort for QueryCache {
    fn fetch(&self, key: Fingerprint, transaction_id: [u8; 2]) -> Option<Vec<u8>> {
        let mut entries = self.lock();
        let answer = entries.get(&key)?;

        let age = answer.age_secs(Instant::now());
        match answer.decremented(age) {
            Some(mut response) => {
                response[0] = transaction_id[0];
                response[1] = transaction_id[1];
                Some(response)
            }
            None => {
                debug!(key = %key, "Removing expired entry");
                entries.remove(&key);
                None
            }
        }
    }
}

#[async_trait]
impl CacheMaintenancePort for QueryCache {
    async fn run_reap_cycle(&self) -> Result<CacheReapOutcome, DomainError> {
        Ok(self.reap())
    }
}

/// Fingerprint of the QNAME + QTYPE bytes of a full DNS message.
fn question_fingerprint(data: &[u8]) -> Option<Fingerprint> {
    let section = data.get(codec::HEADER_LEN..)?;
    codec::slice_question(section).ok().map(Fingerprint::of)
}
