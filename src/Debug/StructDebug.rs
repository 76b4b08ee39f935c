use std::fmt;

use crate::MPMC::Buffer::layout::CursorPair;
use crate::MPMC::Buffer::RingQueue;
use crate::MPMC::{Consumer, Producer};

#[cfg(not(loom))]
use std::sync::atomic::Ordering;

#[cfg(loom)]
use loom::sync::atomic::Ordering;

/// Debug for RingQueue
///
/// Shows capacity, a cursor snapshot and the configuration. Slot payloads are
/// never read, so `T` needs no `Debug` bound.
impl<T> fmt::Debug for RingQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let snap = self.cursors.snapshot();
        f.debug_struct("RingQueue")
            .field("capacity", &self.capacity)
            .field("read", &snap.read)
            .field("write", &snap.write)
            .field("count", &self.count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for CursorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorPair")
            .field("write", &self.write.load(Ordering::Relaxed))
            .field("read", &self.read.load(Ordering::Relaxed))
            .finish()
    }
}

impl<T> fmt::Debug for Producer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("queue", self.queue())
            .finish()
    }
}

impl<T> fmt::Debug for Consumer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("queue", self.queue())
            .finish()
    }
}
