//! Blocking FIFO work queue with cooperative shutdown.
//!
//! [`WorkQueue`] is the only mutual-exclusion region of the concurrent
//! engine. The pending items and the `stopping` flag live behind one mutex;
//! consumers block on a condition variable until an item arrives or the
//! queue is both empty and stopping.
//!
//! Stopping is "stop after drain": items enqueued before
//! [`request_stop`](WorkQueue::request_stop) are still delivered.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

struct QueueState<T> {
    items: VecDeque<T>,
    stopping: bool,
}

/// Thread-safe FIFO queue with a monotonic stop signal.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::WorkQueue;
///
/// let queue = WorkQueue::new();
/// queue.push(1);
/// queue.push(2);
/// queue.request_stop();
///
/// assert_eq!(queue.pop(), Some(1));
/// assert_eq!(queue.pop(), Some(2));
/// assert_eq!(queue.pop(), None);
/// ```
pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    available: Condvar,
}

impl<T> WorkQueue<T> {
    /// Creates an empty, running queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                stopping: false,
            }),
            available: Condvar::new(),
        }
    }

    // Every critical section leaves the state consistent, so a poisoned
    // lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Appends an item at the tail and wakes one waiting consumer.
    ///
    /// Never blocks beyond the brief critical section. Pushing after
    /// [`request_stop`](Self::request_stop) violates the producer contract.
    pub fn push(&self, item: T) {
        {
            let mut state = self.lock();
            debug_assert!(!state.stopping, "push after request_stop");
            state.items.push_back(item);
        }
        self.available.notify_one();
    }

    /// Removes and returns the head item, blocking while the queue is empty.
    ///
    /// Returns `None` only when the queue is empty and stopping. Remaining
    /// items are always delivered first, whatever the interleaving with
    /// [`request_stop`](Self::request_stop).
    pub fn pop(&self) -> Option<T> {
        let mut state = self
            .available
            .wait_while(self.lock(), |state| {
                state.items.is_empty() && !state.stopping
            })
            .unwrap_or_else(PoisonError::into_inner);

        state.items.pop_front()
    }

    /// Sets the stopping flag and wakes every waiting consumer. Idempotent.
    pub fn request_stop(&self) {
        {
            let mut state = self.lock();
            state.stopping = true;
        }
        self.available.notify_all();
    }

    /// Returns whether stop has been requested.
    pub fn is_stopping(&self) -> bool {
        self.lock().stopping
    }

    /// Number of items not yet popped.
    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    /// Returns whether no items are pending.
    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for WorkQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.lock();
        f.debug_struct("WorkQueue")
            .field("pending", &state.items.len())
            .field("stopping", &state.stopping)
            .finish()
    }
}
