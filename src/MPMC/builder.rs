use std::sync::Arc;

use super::{Consumer, Producer};
use crate::error::ConfigError;
use crate::Core::{QueueConfig, StarvationPolicy, WaitStrategy};
use crate::MPMC::Buffer::RingQueue;

/// Builder for [`RingQueue`] and its [`Producer`]/[`Consumer`] handles.
#[derive(Debug, Clone)]
pub struct QueueBuilder {
    capacity: usize,
    config: QueueConfig,
}

impl Default for QueueBuilder {
    fn default() -> Self {
        Self {
            capacity: 1024, // 1024 slots
            config: QueueConfig::default(),
        }
    }
}

impl QueueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requested capacity; rounded up to a power of two at build time.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Floor applied before rounding. Defaults to 8.
    pub fn with_min_capacity(mut self, min_capacity: u32) -> Self {
        self.config.min_capacity = min_capacity;
        self
    }

    pub fn with_wait_strategy(mut self, wait_strategy: WaitStrategy) -> Self {
        self.config.wait_strategy = wait_strategy;
        self
    }

    /// Opt into the lossy starvation valve. Off by default.
    pub fn with_starvation_policy(mut self, starvation: StarvationPolicy) -> Self {
        self.config.starvation = starvation;
        self
    }

    pub fn with_yield_on_failure(mut self, yield_on_failure: bool) -> Self {
        self.config.yield_on_failure = yield_on_failure;
        self
    }

    pub fn build<T>(self) -> Result<RingQueue<T>, ConfigError> {
        RingQueue::with_config(self.capacity, self.config)
    }

    pub fn build_channel<T>(self) -> Result<(Producer<T>, Consumer<T>), ConfigError> {
        let queue = Arc::new(self.build()?);
        Ok((Producer::new(Arc::clone(&queue)), Consumer::new(queue)))
    }
}
