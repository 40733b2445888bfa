//! One persistent connection to a DNS-over-TLS upstream.
//!
//! A connection runs two tasks over the same TLS stream: a writer that
//! frames outbound queries and records them in the pending table, and a
//! reader that pairs framed replies back to waiting clients. An I/O error on
//! either side tears the whole connection down; the pool notices through the
//! close token and asks for a reconnect.

use crate::dns::cache::{PendingTable, QueryCache};
use crate::dns::codec;
use crate::dns::request::ClientRequest;
use crate::dns::transport;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::io::{ReadHalf, WriteHalf};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_rustls::client::TlsStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use umbra_dns_domain::{Fingerprint, ResolverEntry};

/// Backoff seconds double on every failed dial and reset at this bound.
const BACKOFF_RESET_SECS: u64 = 1024;

struct ConnectionTimes {
    opened_at: Instant,
    last_request_at: Instant,
}

struct Shared {
    entry: ResolverEntry,
    pending: Arc<PendingTable>,
    cache: Option<Arc<QueryCache>>,
    times: Mutex<ConnectionTimes>,
    closed: CancellationToken,
}

impl Shared {
    fn log_teardown(&self, side: &str) {
        let times = self
            .times
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        info!(
            host = %self.entry.address,
            last_request = ?times.last_request_at.elapsed(),
            lasted = ?times.opened_at.elapsed(),
            "Closing connection from {side} side"
        );
    }
}

pub struct UpstreamConnection {
    write_tx: mpsc::Sender<ClientRequest>,
    closed: CancellationToken,
}

impl UpstreamConnection {
    /// Dial until the upstream answers (exponential backoff), then start the
    /// reader and writer tasks.
    pub async fn open(
        entry: ResolverEntry,
        pending: Arc<PendingTable>,
        cache: Option<Arc<QueryCache>>,
    ) -> Self {
        let stream = dial_with_backoff(&entry).await;
        let (read_half, write_half) = tokio::io::split(stream);

        let (write_tx, write_rx) = mpsc::channel(1);
        let closed = CancellationToken::new();
        let now = Instant::now();

        let shared = Arc::new(Shared {
            entry,
            pending,
            cache,
            times: Mutex::new(ConnectionTimes {
                opened_at: now,
                last_request_at: now,
            }),
            closed: closed.clone(),
        });

        tokio::spawn(read_loop(Arc::clone(&shared), read_half));
        tokio::spawn(write_loop(shared, write_half, write_rx));

        Self { write_tx, closed }
    }

    /// Token cancelled once either side of the connection has torn down.
    pub fn closed(&self) -> CancellationToken {
        self.closed.clone()
    }

    /// Queue a request for the writer. On a dead connection the request is
    /// handed back to the caller.
    pub async fn send(&self, request: ClientRequest) -> Result<(), ClientRequest> {
        self.write_tx.send(request).await.map_err(|rejected| rejected.0)
    }
}

async fn dial_with_backoff(entry: &ResolverEntry) -> TlsStream<TcpStream> {
    let mut backoff = 1u64;

    loop {
        info!(host = %entry.address, "Dialing connection");
        match transport::tls::dial(entry).await {
            Ok(stream) => {
                debug!(host = %entry.address, "Dial complete");
                return stream;
            }
            Err(e) => {
                warn!(
                    host = %entry.address,
                    error = %e,
                    reconnecting_in = backoff,
                    "Failed to connect"
                );
                tokio::time::sleep(Duration::from_secs(backoff)).await;
                backoff <<= 1;
                if backoff >= BACKOFF_RESET_SECS {
                    backoff = 1;
                }
            }
        }
    }
}

/// Pair framed replies with pending requests and answer the clients.
async fn read_loop(shared: Arc<Shared>, mut read_half: ReadHalf<TlsStream<TcpStream>>) {
    loop {
        let message = tokio::select! {
            _ = shared.closed.cancelled() => break,
            result = transport::read_frame(&mut read_half) => match result {
                Ok(message) => message,
                Err(e) => {
                    info!(host = %shared.entry.address, error = %e, "Connection gone away");
                    break;
                }
            },
        };

        if message.len() < codec::HEADER_LEN {
            warn!(host = %shared.entry.address, length = message.len(), "Short reply discarded");
            continue;
        }

        let transaction_id = [message[0], message[1]];
        let key = Fingerprint::of(&transaction_id);

        let Some(request) = shared.pending.take(key) else {
            warn!(
                host = %shared.entry.address,
                trx_id = %hex_id(transaction_id),
                "No matching pending request"
            );
            continue;
        };

        if let Some(cache) = &shared.cache {
            match codec::ttl_offsets(&message) {
                // Only answers with at least one TTL can ever be evicted
                // again, so only those are worth storing.
                Ok(offsets) if !offsets.is_empty() => cache.store(message.clone(), offsets),
                Ok(_) => {}
                Err(e) => warn!(error = %e, "Error parsing ttl offsets"),
            }
        }

        if let Err(e) = request.socket.send_to(&message, request.client_addr).await {
            warn!(error = %e, client = %request.client_addr, "Error writing back to client");
            break;
        }

        info!(
            host = %shared.entry.address,
            trx_id = %hex_id(transaction_id),
            elapsed = ?request.received_at.elapsed(),
            "Processed request"
        );
    }

    shared.log_teardown("read");
    shared.closed.cancel();
}

/// Frame queued requests onto the TLS stream and record them as pending.
async fn write_loop(
    shared: Arc<Shared>,
    mut write_half: WriteHalf<TlsStream<TcpStream>>,
    mut write_rx: mpsc::Receiver<ClientRequest>,
) {
    loop {
        let request = tokio::select! {
            _ = shared.closed.cancelled() => break,
            request = write_rx.recv() => match request {
                Some(request) => request,
                None => break,
            },
        };

        {
            let mut times = shared
                .times
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            times.last_request_at = Instant::now();
        }

        if let Err(e) = transport::write_frame(&mut write_half, &request.data).await {
            warn!(host = %shared.entry.address, error = %e, "Error passing request to upstream");
            break;
        }
        debug!(host = %shared.entry.address, bytes = request.data.len(), "Wrote request to upstream");

        shared.pending.put(request);
    }

    shared.log_teardown("write");
    shared.closed.cancel();
}

fn hex_id(id: [u8; 2]) -> String {
    format!("0x{:02x}{:02x}", id[0], id[1])
}
