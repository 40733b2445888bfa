use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Seconds between reaper passes over the query cache.
    #[serde(default = "default_reap_interval_secs")]
    pub reap_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            reap_interval_secs: default_reap_interval_secs(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_reap_interval_secs() -> u64 {
    60
}
