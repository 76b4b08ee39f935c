use std::time::{Duration, Instant};

use crossbeam_utils::Backoff;

/// How a caller waits while its reserved slot is still owned by the other
/// side from a previous lap.
///
/// These are scheduler hints, not blocking waits: a starved thread still
/// polls the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WaitStrategy {
    /// Exponential busy-spin, then yield the time slice on every retry.
    #[default]
    SpinThenYield,
    /// Yield the time slice on every retry.
    Yield,
    /// Sleep for a fixed interval on every retry.
    Sleep(Duration),
}

/// Per-call wait state. One is created for every reserved slot.
pub(crate) struct Waiter {
    strategy: WaitStrategy,
    backoff: Backoff,
}

impl Waiter {
    pub(crate) fn new(strategy: WaitStrategy) -> Self {
        Self {
            strategy,
            backoff: Backoff::new(),
        }
    }

    /// Starts over after the starvation valve fired.
    pub(crate) fn reset(&self) {
        self.backoff.reset();
    }

    #[cfg(not(loom))]
    pub(crate) fn wait(&self) {
        match self.strategy {
            WaitStrategy::SpinThenYield => self.backoff.snooze(),
            WaitStrategy::Yield => std::thread::yield_now(),
            WaitStrategy::Sleep(interval) => std::thread::sleep(interval),
        }
    }

    // loom can only explore a spin loop that yields to its scheduler.
    #[cfg(loom)]
    pub(crate) fn wait(&self) {
        let _ = self.strategy;
        loom::thread::yield_now();
    }
}

/// Gives up the rest of the time slice after a failed admission or a lost
/// reservation.
#[inline]
pub(crate) fn yield_now() {
    #[cfg(not(loom))]
    std::thread::yield_now();
    #[cfg(loom)]
    loom::thread::yield_now();
}

/// Longest nap a caller-side retry loop takes once spinning stops paying off.
const MAX_RETRY_SLEEP: Duration = Duration::from_millis(1);

/// Retry-with-deadline state for the producer and consumer helpers.
pub(crate) struct Deadline {
    start: Instant,
    timeout: Duration,
    backoff: Backoff,
}

impl Deadline {
    pub(crate) fn after(timeout: Duration) -> Self {
        Self {
            start: Instant::now(),
            timeout,
            backoff: Backoff::new(),
        }
    }

    pub(crate) fn expired(&self) -> bool {
        self.start.elapsed() >= self.timeout
    }

    /// Backs off before the next attempt: spin, then yield, then short sleeps
    /// that never overshoot the deadline.
    #[cfg(not(loom))]
    pub(crate) fn pause(&self) {
        if !self.backoff.is_completed() {
            self.backoff.snooze();
            return;
        }
        let remaining = self.timeout.saturating_sub(self.start.elapsed());
        std::thread::sleep(remaining.min(MAX_RETRY_SLEEP));
    }

    #[cfg(loom)]
    pub(crate) fn pause(&self) {
        let _ = (&self.backoff, MAX_RETRY_SLEEP);
        loom::thread::yield_now();
    }
}
