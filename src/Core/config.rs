use super::capacity::{MAX_CAPACITY, MIN_CAPACITY, MIN_CAPACITY_FLOOR};
use super::wait::WaitStrategy;
use crate::error::ConfigError;

/// Spin bound used when the starvation valve is enabled without an explicit limit.
pub const DEFAULT_STARVATION_SPIN_LIMIT: u32 = 100;

/// What a caller does once its reserved slot has been unavailable for too long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StarvationPolicy {
    /// Keep waiting forever. No value is ever dropped or fabricated.
    #[default]
    Disabled,
    /// LOSSY. After `spin_limit` failed checks of its reserved slot, a caller
    /// fires the valve once and finishes the laps still holding that slot on
    /// behalf of whoever stalled on them:
    /// - an unread value from an earlier lap is dropped, and its consumer
    ///   later gets [`GetError::Evicted`](crate::GetError::Evicted);
    /// - an unpublished lap is closed with an empty placeholder, its producer
    ///   later gets [`PutError::Displaced`](crate::PutError::Displaced) with
    ///   the value back, and its consumer gets
    ///   [`GetError::Placeholder`](crate::GetError::Placeholder).
    ///
    /// A slot in the middle of a handoff is left alone; the caller then keeps
    /// waiting on the running thread that holds it.
    Evict { spin_limit: u32 },
}

impl StarvationPolicy {
    /// `Evict` with [`DEFAULT_STARVATION_SPIN_LIMIT`].
    pub const fn evict() -> Self {
        StarvationPolicy::Evict {
            spin_limit: DEFAULT_STARVATION_SPIN_LIMIT,
        }
    }

    pub(crate) fn spin_limit(&self) -> Option<u32> {
        match *self {
            StarvationPolicy::Disabled => None,
            StarvationPolicy::Evict { spin_limit } => Some(spin_limit),
        }
    }
}

/// Tunables of a [`RingQueue`](crate::RingQueue), fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Floor applied to the requested capacity before rounding.
    pub min_capacity: u32,
    /// How to wait on a reserved slot.
    pub wait_strategy: WaitStrategy,
    /// Liveness-over-correctness escape for stuck slot waits.
    pub starvation: StarvationPolicy,
    /// Yield the time slice after a denied admission or a lost CAS.
    pub yield_on_failure: bool,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            min_capacity: MIN_CAPACITY,
            wait_strategy: WaitStrategy::default(),
            starvation: StarvationPolicy::default(),
            yield_on_failure: true,
        }
    }
}

impl QueueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_capacity < MIN_CAPACITY_FLOOR {
            return Err(ConfigError::MinCapacityTooSmall {
                requested: self.min_capacity,
                floor: MIN_CAPACITY_FLOOR,
            });
        }
        if self.min_capacity > MAX_CAPACITY {
            return Err(ConfigError::MinCapacityTooLarge {
                requested: self.min_capacity,
                max: MAX_CAPACITY,
            });
        }
        if let WaitStrategy::Sleep(interval) = self.wait_strategy {
            if interval.is_zero() {
                return Err(ConfigError::ZeroSleepInterval);
            }
        }
        if self.starvation.spin_limit() == Some(0) {
            return Err(ConfigError::ZeroSpinLimit);
        }
        Ok(())
    }
}
