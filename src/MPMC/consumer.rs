// src/MPMC/consumer.rs

use crate::error::GetError;
use crate::Core::wait::Deadline;
use crate::MPMC::Buffer::RingQueue;
use log::trace;
use std::sync::Arc;
use std::time::Duration;

/// The receiving half of a queue.
///
/// Cheap to clone; every clone gets from the same ring.
pub struct Consumer<T> {
    queue: Arc<RingQueue<T>>,
}

impl<T> Consumer<T> {
    pub fn new(queue: Arc<RingQueue<T>>) -> Self {
        Self { queue }
    }

    /// One get attempt. See [`RingQueue::get`].
    pub fn receive(&self) -> Result<T, GetError> {
        self.queue.get().map(|(value, _)| value)
    }

    /// Receives a message, retrying with backoff until one arrives or the
    /// timeout is reached.
    ///
    /// # Returns
    /// * `Some(value)` if a message was received
    /// * `None` if the timeout was reached
    pub fn receive_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Deadline::after(timeout);
        loop {
            match self.queue.get() {
                Ok((value, _)) => return Some(value),
                Err(err) if deadline.expired() => {
                    trace!("receive_timeout gave up after {timeout:?}: {err}");
                    return None;
                }
                // The slot was consumed; the next one may already be ready.
                Err(GetError::Placeholder { .. } | GetError::Evicted { .. }) => {}
                Err(_) => deadline.pause(),
            }
        }
    }

    /// Drains up to `max` values without waiting for new ones.
    ///
    /// Lost races and slots emptied by the starvation valve are skipped; the first
    /// `Empty` ends the batch.
    pub fn receive_batch(&self, max: usize) -> Vec<T> {
        let mut out = Vec::with_capacity(max.min(self.queue.capacity() as usize));
        while out.len() < max {
            match self.queue.get() {
                Ok((value, _)) => out.push(value),
                Err(GetError::Empty { .. }) => break,
                Err(
                    GetError::Contended { .. }
                    | GetError::Placeholder { .. }
                    | GetError::Evicted { .. },
                ) => {}
            }
        }
        out
    }

    /// The shared ring behind this handle.
    pub fn queue(&self) -> &Arc<RingQueue<T>> {
        &self.queue
    }
}

impl<T> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}
