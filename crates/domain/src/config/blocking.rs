use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BlockingConfig {
    /// Hosts-style file of domains to sink. Blocking is enabled when set.
    #[serde(default)]
    pub blocklist_file: Option<String>,
}

impl BlockingConfig {
    pub fn enabled(&self) -> bool {
        self.blocklist_file.is_some()
    }
}
