mod answer;
mod pending;
mod query_cache;

pub use answer::CachedAnswer;
pub use pending::PendingTable;
pub use query_cache::QueryCache;
