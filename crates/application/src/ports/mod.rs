mod answer_cache;
mod blocklist;
mod cache_maintenance;

pub use answer_cache::AnswerCachePort;
pub use blocklist::BlocklistPort;
pub use cache_maintenance::{CacheMaintenancePort, CacheReapOutcome};
