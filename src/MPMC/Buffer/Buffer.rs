// This is the in-process ring shared by every producer and consumer of a queue

use super::layout::CursorPair;
use crate::Core::QueueConfig;
use crate::MPMC::Structs::Buffer_Structs::StarvationCounters;

use std::cell::UnsafeCell;

#[cfg(not(loom))]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(loom)]
use loom::sync::atomic::{AtomicU32, Ordering};

/// A single cell of the ring.
///
/// Aligned to a cache line so neighbouring slots touched by different threads
/// do not false-share.
#[repr(C, align(64))]
pub struct Slot<T> {
    /// Write generation. This is the core of the synchronization.
    /// - A producer holding cursor target `t` waits until `write_gen == t`
    ///   and `read_gen == write_gen` (its lap, slot empty).
    /// - It then claims the lap by moving `write_gen` to `t + 1`, stores the
    ///   payload and sets `write_gen = t + capacity`, which publishes the
    ///   value: `write_gen` is now exactly one lap ahead of `read_gen`.
    pub(crate) write_gen: AtomicU32,

    /// Read generation.
    /// - A consumer holding cursor target `t` waits until `read_gen == t`
    ///   and `read_gen + capacity == write_gen` (one unread value this lap).
    /// - It claims the lap with `read_gen = t + 1`, takes the payload and sets
    ///   `read_gen = t + capacity`, handing the slot to the next lap's producer.
    ///
    /// Generations of slot `i` are always congruent to `i` modulo capacity,
    /// so a claimed value (`lap + 1`) never equals any lap.
    pub(crate) read_gen: AtomicU32,

    /// `None` is the empty marker. Only the thread whose cursor target matches
    /// the current lap of this slot may touch it.
    pub(crate) payload: UnsafeCell<Option<T>>,
}

impl<T> Slot<T> {
    pub(crate) fn new(generation: u32) -> Self {
        Slot {
            write_gen: AtomicU32::new(generation),
            read_gen: AtomicU32::new(generation),
            payload: UnsafeCell::new(None),
        }
    }

    /// Takes the producer side of `lap`. Fails if anyone else already did.
    #[inline]
    pub(crate) fn claim_write(&self, lap: u32) -> bool {
        self.write_gen
            .compare_exchange(lap, lap.wrapping_add(1), Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }

    /// Takes the consumer side of `lap`. Fails if anyone else already did.
    #[inline]
    pub(crate) fn claim_read(&self, lap: u32) -> bool {
        self.read_gen
            .compare_exchange(lap, lap.wrapping_add(1), Ordering::AcqRel, Ordering::Relaxed)
            .is_ok()
    }
}

/// True once `generation` has moved past `lap`, i.e. the lap was claimed or
/// completed by somebody else.
#[inline]
pub(crate) fn lap_passed(generation: u32, lap: u32) -> bool {
    (generation.wrapping_sub(lap) as i32) > 0
}

// Payload access is serialized by the generation protocol: exactly one thread
// holds the matching generation for a slot at any lap.
unsafe impl<T: Send> Sync for Slot<T> {}

/// A fixed-capacity, lock-free, multi-producer multi-consumer ring queue.
///
/// ### Concurrency Design:
/// - **Producers (`put`)**: check the occupancy estimate, claim cursor target
///   `write + 1` with a CAS on the write cursor, then wait on the claimed
///   slot's generations until the previous lap's consumer is done with it.
/// - **Consumers (`get`)**: same on the read cursor, waiting until the
///   claimed slot holds exactly one published value for this lap.
///
/// A failed admission check or a lost CAS mutates nothing and is reported to
/// the caller, who owns the retry policy. The wait on a claimed slot is the
/// only loop that does not return; see
/// [`StarvationPolicy`](crate::StarvationPolicy) for the opt-in escape.
///
/// Capacity is fixed at construction and the slots are never reallocated.
/// Share it behind an `Arc` (or the [`Producer`](crate::Producer) and
/// [`Consumer`](crate::Consumer) handles); it is deliberately not `Clone`.
pub struct RingQueue<T> {
    /// Write and read cursors, on separate cache lines.
    pub(crate) cursors: CursorPair,

    /// `capacity` cells, indexed by `cursor & mask`.
    pub(crate) slots: Box<[Slot<T>]>,

    /// Power of two, at least the configured minimum.
    pub(crate) capacity: u32,

    /// `capacity - 1`.
    pub(crate) mask: u32,

    pub(crate) config: QueueConfig,

    /// Starvation valve activity, for logging and [`QueueStats`](crate::QueueStats).
    pub(crate) counters: StarvationCounters,
}
