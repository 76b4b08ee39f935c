// In src/MPMC/producer.rs
use crate::error::PutError;
use crate::Core::wait::Deadline;
use crate::MPMC::Buffer::RingQueue;
use log::trace;
use std::sync::Arc;
use std::time::Duration;

/// The sending half of a queue.
///
/// Cheap to clone; every clone puts into the same ring. `send` is a single
/// non-blocking attempt, the other methods layer caller-side retry on top.
pub struct Producer<T> {
    queue: Arc<RingQueue<T>>,
}

impl<T> Producer<T> {
    pub fn new(queue: Arc<RingQueue<T>>) -> Self {
        Self { queue }
    }

    /// One put attempt. See [`RingQueue::put`].
    pub fn send(&self, value: T) -> Result<u32, PutError<T>> {
        self.queue.put(value)
    }

    /// Sends a message, retrying with backoff until it lands or `timeout`
    /// elapses.
    ///
    /// # Returns
    /// * `Ok(count)` with the occupancy estimate after the put
    /// * `Err(PutError)` from the last attempt, carrying the value back
    pub fn send_timeout(&self, value: T, timeout: Duration) -> Result<u32, PutError<T>> {
        let deadline = Deadline::after(timeout);
        let mut value = value;
        loop {
            match self.queue.put(value) {
                Ok(count) => return Ok(count),
                Err(err) if deadline.expired() => {
                    trace!("send_timeout gave up after {timeout:?}: {err}");
                    return Err(err);
                }
                Err(err) => {
                    value = err.into_inner();
                    deadline.pause();
                }
            }
        }
    }

    /// Sends items in order. Lost cursor races and displaced slots are
    /// retried; the first
    /// `Full` stops the batch.
    ///
    /// Not atomic: other producers may interleave with the batch.
    ///
    /// # Returns
    /// * `Ok(())` if every item was sent
    /// * `Err(rest)` with the unsent items, in their original order
    pub fn send_batch(&self, items: Vec<T>) -> Result<(), Vec<T>> {
        let mut items = items.into_iter();
        while let Some(mut value) = items.next() {
            loop {
                match self.queue.put(value) {
                    Ok(_) => break,
                    Err(
                        PutError::Contended { value: back, .. }
                        | PutError::Displaced { value: back, .. },
                    ) => value = back,
                    Err(PutError::Full { value: back, .. }) => {
                        let mut rest = Vec::with_capacity(items.len() + 1);
                        rest.push(back);
                        rest.extend(items);
                        return Err(rest);
                    }
                }
            }
        }
        Ok(())
    }

    /// The shared ring behind this handle.
    pub fn queue(&self) -> &Arc<RingQueue<T>> {
        &self.queue
    }
}

impl<T> Clone for Producer<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}
