use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsConfig {
    /// Path to the resolvers file. Falls back to the built-in list when unset.
    #[serde(default)]
    pub resolvers_file: Option<String>,

    /// Capacity of the inbound request queue. When full, the oldest queued
    /// request is evicted to make room for the newest.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl Default for DnsConfig {
    fn default() -> Self {
        Self {
            resolvers_file: None,
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_queue_capacity() -> usize {
    128
}
