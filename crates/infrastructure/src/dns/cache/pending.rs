//! Table pairing upstream replies with the clients still waiting on them.

use crate::dns::request::ClientRequest;
use rustc_hash::FxHashMap;
use std::sync::{Mutex, MutexGuard};
use umbra_dns_domain::Fingerprint;

/// In-flight requests of a single upstream connection, keyed by the
/// fingerprint of the 2-byte transaction ID.
///
/// The table is scoped to one connection: transaction IDs are only 16 bits,
/// so a table shared across upstreams would pair replies with the wrong
/// clients under modest load. Entries left behind when the connection dies
/// are dropped with it.
pub struct PendingTable {
    requests: Mutex<FxHashMap<Fingerprint, ClientRequest>>,
}

impl PendingTable {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(FxHashMap::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FxHashMap<Fingerprint, ClientRequest>> {
        self.requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record a request at send time, keyed by its transaction ID.
    pub fn put(&self, request: ClientRequest) {
        let key = request.transaction_fingerprint();
        self.lock().insert(key, request);
    }

    /// Remove and return the request matching `key`.
    pub fn take(&self, key: Fingerprint) -> Option<ClientRequest> {
        self.lock().remove(&key)
    }

    /// Non-destructive probe.
    pub fn exists(&self, key: Fingerprint) -> bool {
        self.lock().contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for PendingTable {
    fn default() -> Self {
        Self::new()
    }
}
