use std::sync::Arc;
use tracing::info;
use umbra_dns_application::ports::BlocklistPort;
use umbra_dns_application::HandleQueryUseCase;
use umbra_dns_domain::Config;
use umbra_dns_infrastructure::dns::{Blocklist, Pool, QueryCache};

/// Wires the block list, the query cache, the connection pool, and the
/// per-request use case from configuration.
pub struct DnsServices {
    pub cache: Option<Arc<QueryCache>>,
    pub pool: Arc<Pool>,
    pub use_case: Arc<HandleQueryUseCase>,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut use_case = HandleQueryUseCase::new();

        if let Some(path) = &config.blocking.blocklist_file {
            info!(path = %path, "Loading block list");
            let blocklist = Arc::new(Blocklist::from_file(path)?);
            info!(entries = blocklist.len(), "Block list ready");
            use_case = use_case.with_blocklist(blocklist);
        }

        let cache = if config.cache.enabled {
            let cache = Arc::new(QueryCache::new());
            use_case = use_case.with_cache(cache.clone());
            Some(cache)
        } else {
            info!("Caching off");
            None
        };

        let pool = Pool::start(config.dns.queue_capacity, cache.clone());

        Ok(Self {
            cache,
            pool,
            use_case: Arc::new(use_case),
        })
    }
}
