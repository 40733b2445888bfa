//! Connection pool: one worker per upstream, a dispatcher feeding them, and
//! a reconnect path for workers whose connection died.

use crate::dns::cache::{PendingTable, QueryCache};
use crate::dns::queue::RequestQueue;
use crate::dns::request::ClientRequest;
use crate::dns::upstream::UpstreamConnection;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use umbra_dns_domain::ResolverEntry;

const CHANNEL_CAPACITY: usize = 32;

/// How long the dispatcher sits idle before probing a worker, keeping dead
/// connections from lingering in the ready channel.
const IDLE_PROBE_INTERVAL: Duration = Duration::from_secs(5);

/// How long the dispatcher backs off when every worker is busy or gone.
const NO_WORKER_BACKOFF: Duration = Duration::from_secs(2);

/// Handle the pool keeps for one upstream worker.
struct Worker {
    entry: ResolverEntry,
    requests: mpsc::Sender<ClientRequest>,
    done: CancellationToken,
}

impl Worker {
    fn is_done(&self) -> bool {
        self.done.is_cancelled()
    }
}

pub struct Pool {
    requests: RequestQueue<ClientRequest>,
    workers_tx: mpsc::Sender<Worker>,
    reconnect_tx: mpsc::Sender<ResolverEntry>,
    cache: Option<Arc<QueryCache>>,
}

impl Pool {
    /// Create the pool and start its dispatcher and connection-management
    /// tasks.
    pub fn start(queue_capacity: usize, cache: Option<Arc<QueryCache>>) -> Arc<Self> {
        let (workers_tx, workers_rx) = mpsc::channel(CHANNEL_CAPACITY);
        let (reconnect_tx, reconnect_rx) = mpsc::channel(CHANNEL_CAPACITY);

        let pool = Arc::new(Self {
            requests: RequestQueue::new(queue_capacity),
            workers_tx,
            reconnect_tx,
            cache,
        });

        tokio::spawn(Arc::clone(&pool).dispatch(workers_rx));
        tokio::spawn(Arc::clone(&pool).connection_management(reconnect_rx));

        pool
    }

    /// Register a new upstream: spawn its worker and hand it to the
    /// dispatcher.
    pub async fn add_upstream(&self, entry: ResolverEntry) {
        let worker = self.spawn_worker(entry);
        if self.workers_tx.send(worker).await.is_err() {
            warn!("Worker channel closed, dropping upstream");
        }
    }

    /// Queue one inbound request. A full queue sheds its oldest entry.
    pub fn enqueue(&self, request: ClientRequest) {
        if self.requests.push(request).is_some() {
            debug!("Dropping oldest queued request");
        }
    }

    fn spawn_worker(&self, entry: ResolverEntry) -> Worker {
        let (request_tx, request_rx) = mpsc::channel(1);
        let done = CancellationToken::new();

        tokio::spawn(worker_task(
            entry.clone(),
            request_rx,
            done.clone(),
            self.cache.clone(),
        ));

        Worker {
            entry,
            requests: request_tx,
            done,
        }
    }

    /// Single loop pairing queued requests with ready workers.
    async fn dispatch(self: Arc<Self>, mut workers_rx: mpsc::Receiver<Worker>) {
        loop {
            tokio::select! {
                request = self.requests.pop() => {
                    match workers_rx.try_recv() {
                        Ok(worker) => self.hand_off(request, worker).await,
                        Err(_) => {
                            self.requests.push(request);
                            debug!(queued = self.requests.len(), "No workers available");
                            tokio::time::sleep(NO_WORKER_BACKOFF).await;
                        }
                    }
                }
                _ = tokio::time::sleep(IDLE_PROBE_INTERVAL) => {
                    if let Ok(worker) = workers_rx.try_recv() {
                        if worker.is_done() {
                            info!(host = %worker.entry.address, "Worker gone, reconnecting");
                            let _ = self.reconnect_tx.send(worker.entry).await;
                        } else {
                            let _ = self.workers_tx.send(worker).await;
                        }
                    }
                }
            }
        }
    }

    async fn hand_off(&self, request: ClientRequest, worker: Worker) {
        if worker.is_done() {
            info!(host = %worker.entry.address, "Worker down, reconnecting");
            let _ = self.reconnect_tx.send(worker.entry).await;
            self.requests.push(request);
            return;
        }

        debug!(host = %worker.entry.address, "Dispatching to worker");
        if let Err(rejected) = worker.requests.send(request).await {
            // The worker died between the probe and the hand-off.
            self.requests.push(rejected.0);
            let _ = self.reconnect_tx.send(worker.entry).await;
            return;
        }

        let _ = self.workers_tx.send(worker).await;
    }

    /// Consume the reconnect channel, spawning a fresh worker per entry.
    async fn connection_management(self: Arc<Self>, mut reconnect_rx: mpsc::Receiver<ResolverEntry>) {
        while let Some(entry) = reconnect_rx.recv().await {
            info!(host = %entry.address, "Reconnecting");
            self.add_upstream(entry).await;
        }
    }
}

/// Supervises one upstream connection, pumping requests into it until it
/// dies, then flags the worker handle as done.
async fn worker_task(
    entry: ResolverEntry,
    mut requests: mpsc::Receiver<ClientRequest>,
    done: CancellationToken,
    cache: Option<Arc<QueryCache>>,
) {
    let pending = Arc::new(PendingTable::new());
    let connection = UpstreamConnection::open(entry.clone(), pending, cache).await;
    let closed = connection.closed();

    loop {
        tokio::select! {
            _ = closed.cancelled() => {
                info!(host = %entry.address, "Upstream connection gone");
                break;
            }
            request = requests.recv() => {
                let Some(request) = request else { break };
                if connection.send(request).await.is_err() {
                    break;
                }
            }
        }
    }

    done.cancel();
}
