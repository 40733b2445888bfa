//! Bounded inbound request queue.
//!
//! The listener must never block on a full queue: pushing onto a full queue
//! evicts the oldest entry instead. An mpsc channel cannot express that from
//! the sender side, hence the explicit deque.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

pub struct RequestQueue<T> {
    items: Mutex<VecDeque<T>>,
    notify: Notify,
    capacity: usize,
}

impl<T> RequestQueue<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            notify: Notify::new(),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<T>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Enqueue at the tail. When the queue is full the oldest item is evicted
    /// to make room and returned to the caller.
    pub fn push(&self, item: T) -> Option<T> {
        let evicted = {
            let mut items = self.lock();
            let evicted = if items.len() >= self.capacity {
                items.pop_front()
            } else {
                None
            };
            items.push_back(item);
            evicted
        };

        self.notify.notify_one();
        evicted
    }

    /// Wait for the next item.
    pub async fn pop(&self) -> T {
        loop {
            // Register interest before checking, so a push landing between
            // the check and the await still wakes us.
            let notified = self.notify.notified();
            if let Some(item) = self.lock().pop_front() {
                return item;
            }
            notified.await;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
