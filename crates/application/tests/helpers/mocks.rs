#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use umbra_dns_application::ports::{AnswerCachePort, BlocklistPort};
use umbra_dns_domain::Fingerprint;

pub struct MockBlocklist {
    hosts: HashSet<String>,
}

impl MockBlocklist {
    pub fn with_hosts(hosts: &[&str]) -> Self {
        Self {
            hosts: hosts.iter().map(|h| h.to_string()).collect(),
        }
    }
}

impl BlocklistPort for MockBlocklist {
    fn contains(&self, hostname: &str) -> bool {
        self.hosts.contains(hostname)
    }

    fn len(&self) -> usize {
        self.hosts.len()
    }
}

pub struct MockAnswerCache {
    responses: HashMap<u64, Vec<u8>>,
    fetch_count: AtomicU64,
}

impl MockAnswerCache {
    pub fn empty() -> Self {
        Self {
            responses: HashMap::new(),
            fetch_count: AtomicU64::new(0),
        }
    }

    pub fn with_response(key: Fingerprint, response: Vec<u8>) -> Self {
        let mut responses = HashMap::new();
        responses.insert(key.as_u64(), response);
        Self {
            responses,
            fetch_count: AtomicU64::new(0),
        }
    }

    pub fn fetch_count(&self) -> u64 {
        self.fetch_count.load(Ordering::Relaxed)
    }
}

impl AnswerCachePort for MockAnswerCache {
    fn fetch(&self, key: Fingerprint, transaction_id: [u8; 2]) -> Option<Vec<u8>> {
        self.fetch_count.fetch_add(1, Ordering::Relaxed);
        self.responses.get(&key.as_u64()).map(|cached| {
            let mut response = cached.clone();
            response[0] = transaction_id[0];
            response[1] = transaction_id[1];
            response
        })
    }
}
