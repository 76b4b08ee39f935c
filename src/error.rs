use std::fmt;

use thiserror::Error;

/// A put that made no progress. The value is handed back to the caller.
///
/// Both variants are expected, frequent outcomes under load; the caller
/// decides whether to retry, back off, or give up.
#[derive(Error, Clone, Copy, PartialEq, Eq)]
pub enum PutError<T> {
    /// Admission check found the queue apparently full. Nothing was mutated.
    #[error("queue is full ({count} items buffered)")]
    Full { value: T, count: u32 },
    /// Another producer advanced the write cursor first. Nothing was mutated.
    #[error("lost the write cursor race ({count} items buffered)")]
    Contended { value: T, count: u32 },
    /// The reserved slot was handed on by another caller's starvation valve
    /// while this put was stalled. The value was never stored.
    #[error("reserved slot was taken over by the starvation valve ({count} items buffered)")]
    Displaced { value: T, count: u32 },
}

impl<T> PutError<T> {
    /// Recovers the rejected value.
    pub fn into_inner(self) -> T {
        match self {
            PutError::Full { value, .. }
            | PutError::Contended { value, .. }
            | PutError::Displaced { value, .. } => value,
        }
    }

    /// Occupancy estimate taken by the failed attempt.
    pub fn count(&self) -> u32 {
        match *self {
            PutError::Full { count, .. }
            | PutError::Contended { count, .. }
            | PutError::Displaced { count, .. } => count,
        }
    }

    pub fn is_full(&self) -> bool {
        matches!(self, PutError::Full { .. })
    }
}

// Payloads need not be Debug.
impl<T> fmt::Debug for PutError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PutError::Full { count, .. } => f
                .debug_struct("Full")
                .field("count", count)
                .finish_non_exhaustive(),
            PutError::Contended { count, .. } => f
                .debug_struct("Contended")
                .field("count", count)
                .finish_non_exhaustive(),
            PutError::Displaced { count, .. } => f
                .debug_struct("Displaced")
                .field("count", count)
                .finish_non_exhaustive(),
        }
    }
}

/// A get that returned no value.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GetError {
    /// Admission check found the queue apparently empty. Nothing was mutated.
    #[error("queue is empty")]
    Empty { count: u32 },
    /// Another consumer advanced the read cursor first. Nothing was mutated.
    #[error("lost the read cursor race ({count} items buffered)")]
    Contended { count: u32 },
    /// The reserved slot held a placeholder injected by the starvation valve.
    /// The slot was consumed; retry to reach the next real value.
    #[error("slot held a starvation placeholder ({count} items buffered)")]
    Placeholder { count: u32 },
    /// The value reserved by this get was evicted by a stalled producer's
    /// starvation valve. The slot was consumed; retry for the next value.
    #[error("reserved value was evicted by the starvation valve ({count} items buffered)")]
    Evicted { count: u32 },
}

impl GetError {
    /// Occupancy estimate taken by the failed attempt.
    pub fn count(&self) -> u32 {
        match *self {
            GetError::Empty { count }
            | GetError::Contended { count }
            | GetError::Placeholder { count }
            | GetError::Evicted { count } => count,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, GetError::Empty { .. })
    }
}

/// Rejected queue configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("minimum capacity {requested} is below the floor of {floor}")]
    MinCapacityTooSmall { requested: u32, floor: u32 },
    #[error("minimum capacity {requested} exceeds the maximum of {max}")]
    MinCapacityTooLarge { requested: u32, max: u32 },
    #[error("sleep wait strategy needs a non-zero interval")]
    ZeroSleepInterval,
    #[error("starvation spin limit must be non-zero")]
    ZeroSpinLimit,
}
