use log::{debug, warn};

#[cfg(not(loom))]
use std::sync::atomic::Ordering::{Acquire, Release};

#[cfg(loom)]
use loom::sync::atomic::Ordering::{Acquire, Release};

use super::layout::CursorPair;
use super::Buffer::{lap_passed, RingQueue, Slot};
use crate::error::{ConfigError, GetError, PutError};
use crate::Core::capacity::resolve_capacity;
use crate::Core::occupancy::estimate_clamped;
use crate::Core::wait::{self, Waiter};
use crate::Core::QueueConfig;
use crate::MPMC::Structs::Buffer_Structs::{QueueStats, StarvationCounters};

/// Why a reservation attempt made no progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refusal {
    /// Admission control said full (put) or empty (get).
    Admission { count: u32 },
    /// Lost the cursor CAS.
    Race { count: u32 },
}

/// Outcome of waiting on a reserved read slot.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Drained<T> {
    Value(T),
    /// The lap was closed by a starvation valve without a value.
    Placeholder,
    /// The lap's value was dropped by a starvation valve.
    Evicted,
}

impl<T> RingQueue<T> {
    /// Creates a queue with the default configuration.
    ///
    /// The capacity is the smallest power of two `>= max(requested, 8)`;
    /// `0` means "use the minimum".
    pub fn new(requested: usize) -> Self {
        let config = QueueConfig::default();
        let capacity = resolve_capacity(requested, config.min_capacity);
        Self::from_parts(capacity, config, 0)
    }

    /// Creates a queue with an explicit configuration.
    pub fn with_config(requested: usize, config: QueueConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let capacity = resolve_capacity(requested, config.min_capacity);
        Ok(Self::from_parts(capacity, config, 0))
    }

    /// Builds the ring with both cursors at `origin`.
    ///
    /// Cursor targets are `cursor + 1`, so each slot is seeded with the first
    /// target that maps onto it. With `origin == 0` slot `i` starts at `i`,
    /// except slot 0 which starts at `capacity`.
    pub(crate) fn from_parts(capacity: u32, config: QueueConfig, origin: u32) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let mask = capacity - 1;
        let first_target = origin.wrapping_add(1);
        let slots = (0..capacity)
            .map(|index| {
                let lag = index.wrapping_sub(first_target) & mask;
                Slot::new(first_target.wrapping_add(lag))
            })
            .collect::<Vec<_>>()
            .into_boxed_slice();

        debug!(
            "ring queue created: capacity={capacity}, wait={:?}, starvation={:?}",
            config.wait_strategy, config.starvation
        );

        Self {
            cursors: CursorPair::starting_at(origin),
            slots,
            capacity,
            mask,
            config,
            counters: StarvationCounters::new(),
        }
    }

    /// Attempts to enqueue `value`.
    ///
    /// Returns the occupancy estimate after the put. On failure the value is
    /// handed back inside the error; `Full` and `Contended` mutate nothing.
    pub fn put(&self, value: T) -> Result<u32, PutError<T>> {
        match self.reserve_put() {
            Ok((target, count)) => match self.publish(target, value) {
                Ok(()) => Ok(count + 1),
                Err(value) => Err(PutError::Displaced { value, count }),
            },
            Err(Refusal::Admission { count }) => Err(PutError::Full { value, count }),
            Err(Refusal::Race { count }) => Err(PutError::Contended { value, count }),
        }
    }

    /// Attempts to dequeue the oldest value.
    ///
    /// Returns the value and the occupancy estimate after the get.
    pub fn get(&self) -> Result<(T, u32), GetError> {
        match self.reserve_get() {
            Ok((target, count)) => {
                let count = count - 1;
                match self.consume(target) {
                    Drained::Value(value) => Ok((value, count)),
                    Drained::Placeholder => Err(GetError::Placeholder { count }),
                    Drained::Evicted => Err(GetError::Evicted { count }),
                }
            }
            Err(Refusal::Admission { count }) => Err(GetError::Empty { count }),
            Err(Refusal::Race { count }) => Err(GetError::Contended { count }),
        }
    }

    /// The fixed power-of-two capacity.
    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Approximate number of buffered items, in `[0, capacity)`.
    /// Racy by nature: it may be stale as soon as it returns.
    #[inline]
    pub fn count(&self) -> u32 {
        let snap = self.cursors.snapshot();
        estimate_clamped(snap.read, snap.write, self.capacity)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    pub fn stats(&self) -> QueueStats {
        QueueStats {
            capacity: self.capacity,
            count: self.count(),
            evicted: self.counters.evicted(),
            placeholders: self.counters.placeholders(),
        }
    }

    #[inline]
    fn slot(&self, target: u32) -> &Slot<T> {
        &self.slots[(target & self.mask) as usize]
    }

    #[inline]
    fn refuse(&self, refusal: Refusal) -> Refusal {
        if self.config.yield_on_failure {
            wait::yield_now();
        }
        refusal
    }

    /// Admission check plus write-cursor CAS.
    fn reserve_put(&self) -> Result<(u32, u32), Refusal> {
        let snap = self.cursors.snapshot();
        let count = estimate_clamped(snap.read, snap.write, self.capacity);

        // Two slots of headroom below raw capacity.
        if count >= self.capacity - 2 {
            return Err(self.refuse(Refusal::Admission { count }));
        }
        match self.cursors.reserve_write(snap.write) {
            Some(target) => Ok((target, count)),
            None => Err(self.refuse(Refusal::Race { count })),
        }
    }

    /// Admission check plus read-cursor CAS.
    fn reserve_get(&self) -> Result<(u32, u32), Refusal> {
        let snap = self.cursors.snapshot();
        let count = estimate_clamped(snap.read, snap.write, self.capacity);

        if count < 1 {
            return Err(self.refuse(Refusal::Admission { count }));
        }
        match self.cursors.reserve_read(snap.read) {
            Some(target) => Ok((target, count)),
            None => Err(self.refuse(Refusal::Race { count })),
        }
    }

    /// Waits for the slot of `target` to be empty on this lap, stores the
    /// value and publishes it.
    ///
    /// Hands the value back if the lap was taken over by a starvation valve.
    pub(crate) fn publish(&self, target: u32, value: T) -> Result<(), T> {
        let slot = self.slot(target);
        let waiter = Waiter::new(self.config.wait_strategy);
        let mut valve = self.config.starvation.spin_limit();
        let mut spins = 0u32;

        loop {
            let write_gen = slot.write_gen.load(Acquire);
            let read_gen = slot.read_gen.load(Acquire);
            if write_gen == target && read_gen == target {
                if slot.claim_write(target) {
                    // SAFETY: the claim gives this producer sole access to the
                    // payload until `write_gen` is advanced, and the previous
                    // lap's consumer released it before advancing `read_gen`.
                    unsafe {
                        *slot.payload.get() = Some(value);
                    }
                    slot.write_gen.store(target.wrapping_add(self.capacity), Release);
                    return Ok(());
                }
                continue;
            }
            if lap_passed(write_gen, target) {
                return Err(value);
            }

            spins += 1;
            if valve.is_some_and(|limit| spins >= limit) {
                valve = None;
                warn!("put starved on cursor target {target} after {spins} checks");
                self.force_slot(slot, |write_gen, read_gen| {
                    (write_gen == target && read_gen == target) || lap_passed(write_gen, target)
                });
                continue;
            }
            waiter.wait();
        }
    }

    /// Waits for the slot of `target` to hold this lap's value, takes it and
    /// hands the slot to the next lap.
    pub(crate) fn consume(&self, target: u32) -> Drained<T> {
        let slot = self.slot(target);
        let waiter = Waiter::new(self.config.wait_strategy);
        let mut valve = self.config.starvation.spin_limit();
        let mut spins = 0u32;
        let published = target.wrapping_add(self.capacity);

        loop {
            let read_gen = slot.read_gen.load(Acquire);
            let write_gen = slot.write_gen.load(Acquire);
            if read_gen == target && write_gen == published {
                if slot.claim_read(target) {
                    // SAFETY: the claim gives this consumer sole access to the
                    // payload, and the producer's release on `write_gen` makes
                    // its store visible here.
                    let payload = unsafe { (*slot.payload.get()).take() };
                    slot.read_gen.store(published, Release);
                    return match payload {
                        Some(value) => Drained::Value(value),
                        None => Drained::Placeholder,
                    };
                }
                continue;
            }
            if lap_passed(read_gen, target) {
                return Drained::Evicted;
            }

            spins += 1;
            if valve.is_some_and(|limit| spins >= limit) {
                valve = None;
                warn!("get starved on cursor target {target} after {spins} checks");
                self.force_slot(slot, |write_gen, read_gen| {
                    (read_gen == target && write_gen == published) || lap_passed(read_gen, target)
                });
                continue;
            }
            waiter.wait();
        }
    }

    /// Starvation valve: completes, on behalf of stalled callers, every lap
    /// that keeps `slot` from reaching the state `ready` accepts.
    ///
    /// An unpublished lap is closed with an empty placeholder and an unread
    /// value is dropped. Stops early when the slot is mid-handoff, since the
    /// thread holding the claim is running.
    #[cold]
    fn force_slot(&self, slot: &Slot<T>, ready: impl Fn(u32, u32) -> bool) {
        loop {
            let write_gen = slot.write_gen.load(Acquire);
            let read_gen = slot.read_gen.load(Acquire);
            if ready(write_gen, read_gen) {
                return;
            }

            if write_gen == read_gen {
                // Empty, waiting on the producer of this lap.
                let lap = write_gen;
                if !slot.claim_write(lap) {
                    return;
                }
                slot.write_gen.store(lap.wrapping_add(self.capacity), Release);
                let total = self.counters.record_placeholder();
                warn!("starvation valve closed lap {lap} with a placeholder (placeholders so far: {total})");
            } else if write_gen == read_gen.wrapping_add(self.capacity) {
                // Published, waiting on the consumer of this lap.
                let lap = read_gen;
                if !slot.claim_read(lap) {
                    return;
                }
                // SAFETY: the claim excludes the lap's own consumer, and the
                // acquire load of `write_gen` made the payload visible.
                let payload = unsafe { (*slot.payload.get()).take() };
                slot.read_gen.store(write_gen, Release);
                match payload {
                    Some(dropped) => {
                        drop(dropped);
                        let total = self.counters.record_eviction();
                        warn!("starvation valve evicted the value of lap {lap} (evictions so far: {total})");
                    }
                    None => debug!("starvation valve drained the placeholder of lap {lap}"),
                }
            } else {
                return;
            }
        }
    }
}
