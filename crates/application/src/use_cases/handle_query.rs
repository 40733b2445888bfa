use crate::ports::{AnswerCachePort, BlocklistPort};
use std::sync::Arc;
use tracing::{debug, info};
use umbra_dns_domain::Question;

/// What the front end should do with an inbound query.
#[derive(Debug, PartialEq, Eq)]
pub enum QueryAction {
    /// Send these bytes straight back to the client.
    Respond(Vec<u8>),
    /// Hand the request to the connection pool.
    Forward,
}

/// Per-request decision logic: block list first, then the query cache, then
/// forwarding. Blocking and caching are each enabled by wiring the matching
/// port in; there is no process-wide flag.
pub struct HandleQueryUseCase {
    blocklist: Option<Arc<dyn BlocklistPort>>,
    cache: Option<Arc<dyn AnswerCachePort>>,
}

impl HandleQueryUseCase {
    pub fn new() -> Self {
        Self {
            blocklist: None,
            cache: None,
        }
    }

    pub fn with_blocklist(mut self, blocklist: Arc<dyn BlocklistPort>) -> Self {
        self.blocklist = Some(blocklist);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn AnswerCachePort>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Decide the fate of one inbound query.
    ///
    /// `packet` is the full DNS message (at least the 12-byte header, as
    /// guaranteed by the listener); `question` is its parsed question section.
    pub fn execute(&self, packet: &[u8], question: &Question) -> QueryAction {
        if let Some(blocklist) = &self.blocklist {
            if blocklist.contains(question.hostname()) {
                info!(host = %question.hostname(), "Block list match");
                return QueryAction::Respond(refusal_for(packet));
            }
        }

        if let Some(cache) = &self.cache {
            let transaction_id = [packet[0], packet[1]];
            if let Some(response) = cache.fetch(question.fingerprint(), transaction_id) {
                debug!(
                    host = %question.hostname(),
                    rtype = %question.record_type(),
                    "Cache hit"
                );
                return QueryAction::Respond(response);
            }
        }

        QueryAction::Forward
    }
}

impl Default for HandleQueryUseCase {
    fn default() -> Self {
        Self::new()
    }
}

/// Reshape a query into a response with zero answers: QR and RA set, RCODE
/// signalling refusal. Only bytes 2..4 change; the transaction ID and the
/// question section ride along untouched.
fn refusal_for(packet: &[u8]) -> Vec<u8> {
    let mut reply = packet.to_vec();
    reply[2] = 0x81;
    reply[3] = 0x83;
    reply
}
