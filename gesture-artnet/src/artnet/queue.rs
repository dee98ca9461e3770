//! Bounded outbound queue between the frame loop and the sender task
//!
//! Pushing never blocks. When the sender falls behind and the queue is
//! full, the oldest entry is discarded: DMX slots hold absolute values,
//! so only the newest frame matters once a backlog forms.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;

use crate::error::{GestureLinkError, Result};

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Single-consumer FIFO with drop-oldest overflow
pub struct OutboundQueue<T> {
    state: Mutex<QueueState<T>>,
    notify: Notify,
    capacity: usize,
}

impl<T> OutboundQueue<T> {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                closed: false,
            }),
            notify: Notify::new(),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Enqueue `item`, returning the entry evicted to make room (if any)
    pub fn push(&self, item: T) -> Result<Option<T>> {
        let evicted = {
            let mut state = self.lock();
            if state.closed {
                return Err(GestureLinkError::QueueClosed);
            }
            let evicted = if state.items.len() >= self.capacity {
                state.items.pop_front()
            } else {
                None
            };
            state.items.push_back(item);
            evicted
        };
        self.notify.notify_one();
        Ok(evicted)
    }

    /// Wait for the next entry. Returns `None` once closed and drained.
    pub async fn pop(&self) -> Option<T> {
        loop {
            {
                let mut state = self.lock();
                if let Some(item) = state.items.pop_front() {
                    return Some(item);
                }
                if state.closed {
                    return None;
                }
            }
            self.notify.notified().await;
        }
    }

    /// Stop accepting entries; queued ones are still delivered
    pub fn close(&self) {
        self.lock().closed = true;
        self.notify.notify_one();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_holds_one() {
        let queue: OutboundQueue<u8> = OutboundQueue::new(0);
        assert_eq!(queue.capacity(), 1);
    }

    #[tokio::test]
    async fn test_fifo_order() {
        let queue = OutboundQueue::new(4);
        for i in 0..3 {
            queue.push(i).unwrap();
        }
        assert_eq!(queue.pop().await, Some(0));
        assert_eq!(queue.pop().await, Some(1));
        assert_eq!(queue.pop().await, Some(2));
    }

    #[tokio::test]
    async fn test_full_queue_drops_oldest() {
        let queue = OutboundQueue::new(2);
        assert_eq!(queue.capacity(), 2);
        assert_eq!(queue.push(1).unwrap(), None);
        assert_eq!(queue.push(2).unwrap(), None);
        assert_eq!(queue.push(3).unwrap(), Some(1));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop().await, Some(2));
        assert_eq!(queue.pop().await, Some(3));
    }

    #[tokio::test]
    async fn test_close_drains_then_ends() {
        let queue = OutboundQueue::new(4);
        queue.push("a").unwrap();
        assert!(!queue.is_closed());
        queue.close();
        assert!(queue.is_closed());
        assert!(matches!(queue.push("b"), Err(GestureLinkError::QueueClosed)));
        assert_eq!(queue.pop().await, Some("a"));
        assert_eq!(queue.pop().await, None);
    }

    #[tokio::test]
    async fn test_pop_wakes_on_push() {
        let queue = std::sync::Arc::new(OutboundQueue::new(4));
        let consumer = {
            let queue = queue.clone();
            tokio::spawn(async move { queue.pop().await })
        };
        tokio::task::yield_now().await;
        queue.push(42u8).unwrap();
        assert_eq!(consumer.await.unwrap(), Some(42));
    }
}
