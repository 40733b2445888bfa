use umbra_dns_domain::Fingerprint;

/// Read side of the query cache as seen by the front end.
pub trait AnswerCachePort: Send + Sync {
    /// Look up a cached response by question fingerprint.
    ///
    /// On a hit the returned bytes are a complete DNS response with
    /// `transaction_id` spliced over the first two bytes and every TTL
    /// decremented by the entry's age. An entry whose TTLs cannot survive the
    /// decrement is evicted and reported as a miss.
    fn fetch(&self, key: Fingerprint, transaction_id: [u8; 2]) -> Option<Vec<u8>>;
}
