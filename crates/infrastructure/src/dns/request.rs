use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;
use umbra_dns_domain::Fingerprint;

/// One in-flight client query: where it came from, the socket to answer on,
/// and the raw bytes as received. The first two bytes of `data` are the DNS
/// transaction ID.
#[derive(Debug, Clone)]
pub struct ClientRequest {
    pub client_addr: SocketAddr,
    pub socket: Arc<UdpSocket>,
    pub data: Vec<u8>,
    pub received_at: Instant,
}

impl ClientRequest {
    /// Fingerprint of the 2-byte transaction ID, the pending-table key.
    pub fn transaction_fingerprint(&self) -> Fingerprint {
        Fingerprint::of(&self.data[..2])
    }
}
