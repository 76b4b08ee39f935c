// Diagnostic counters of a ring. No atomics are exposed in QueueStats; it is a plain copy.

#[cfg(not(loom))]
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of a queue, for diagnostics only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Fixed power-of-two capacity.
    pub capacity: u32,
    /// Approximate occupancy, in `[0, capacity)`.
    pub count: u32,
    /// Values dropped by stuck producers (starvation valve).
    pub evicted: u64,
    /// Empty placeholders published by stuck consumers (starvation valve).
    pub placeholders: u64,
}

/// Running totals of starvation valve activity.
pub(crate) struct StarvationCounters {
    evicted: AtomicU64,
    placeholders: AtomicU64,
}

impl StarvationCounters {
    pub(crate) fn new() -> Self {
        Self {
            evicted: AtomicU64::new(0),
            placeholders: AtomicU64::new(0),
        }
    }

    pub(crate) fn record_eviction(&self) -> u64 {
        self.evicted.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn record_placeholder(&self) -> u64 {
        self.placeholders.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn evicted(&self) -> u64 {
        self.evicted.load(Ordering::Relaxed)
    }

    pub(crate) fn placeholders(&self) -> u64 {
        self.placeholders.load(Ordering::Relaxed)
    }
}
