//! UDP front end: the listener loop and per-request tasks.

use crate::dns::codec;
use crate::dns::pool::Pool;
use crate::dns::request::ClientRequest;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::net::UdpSocket;
use tracing::{debug, info, warn};
use umbra_dns_application::{HandleQueryUseCase, QueryAction};
use umbra_dns_domain::DomainError;

pub struct UdpFrontend {
    socket: Arc<UdpSocket>,
    use_case: Arc<HandleQueryUseCase>,
    pool: Arc<Pool>,
    requests_served: AtomicU64,
}

impl UdpFrontend {
    pub async fn bind(
        addr: SocketAddr,
        use_case: Arc<HandleQueryUseCase>,
        pool: Arc<Pool>,
    ) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr).await?;
        info!(host = %addr, "Adding listener");

        Ok(Self {
            socket: Arc::new(socket),
            use_case,
            pool,
            requests_served: AtomicU64::new(0),
        })
    }

    /// Total datagrams accepted since startup.
    pub fn request_count(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    /// Listener loop: one short-lived task per datagram. Runs until the
    /// process exits.
    pub async fn run(self: Arc<Self>) {
        let mut buffer = [0u8; codec::MAX_PACKET_LEN];

        loop {
            let (length, client_addr) = match self.socket.recv_from(&mut buffer).await {
                Ok(received) => received,
                Err(e) => {
                    warn!(error = %e, "Error reading from listener");
                    continue;
                }
            };

            if length < codec::HEADER_LEN {
                warn!(length, "Packet length too small");
                continue;
            }

            let count = self.requests_served.fetch_add(1, Ordering::Relaxed) + 1;
            debug!(requests = count, "Requests served");

            let data = buffer[..length].to_vec();
            let frontend = Arc::clone(&self);
            tokio::spawn(async move {
                frontend.handle(data, client_addr).await;
            });
        }
    }

    async fn handle(&self, data: Vec<u8>, client_addr: SocketAddr) {
        let question = match codec::parse_question(&data[codec::HEADER_LEN..]) {
            Ok(question) => question,
            Err(e) => {
                warn!(error = %e, client = %client_addr, "Problem parsing question");
                return;
            }
        };

        info!(host = %question.hostname(), rtype = %question.record_type(), "New request");

        match self.use_case.execute(&data, &question) {
            QueryAction::Respond(reply) => {
                if let Err(e) = self.socket.send_to(&reply, client_addr).await {
                    warn!(error = %e, client = %client_addr, "Error replying to client");
                }
            }
            QueryAction::Forward => {
                self.pool.enqueue(ClientRequest {
                    client_addr,
                    socket: Arc::clone(&self.socket),
                    data,
                    received_at: Instant::now(),
                });
            }
        }
    }
}
