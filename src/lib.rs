//! quequ - a fixed-capacity, lock-free MPMC ring-buffer queue.
//!
//! Producers and consumers reserve a cursor position with a single CAS and
//! then wait on the per-slot generation counters of the reserved cell. See
//! [`RingQueue`] for the protocol and [`QueueBuilder`] for the tunables.

// Module naming follows project convention (MPMC = Multi-Producer Multi-Consumer)
#[allow(non_snake_case)]
pub mod MPMC {
    pub mod Buffer {
        pub mod Buffer;
        pub mod Buffer_impl;
        pub mod layout;
        pub use Buffer::{RingQueue, Slot}; // re-export for stable path
    }
    pub mod Structs {
        pub mod Buffer_Structs;
        pub use Buffer_Structs::QueueStats; // re-export for stable path
    }

    mod builder;
    mod consumer;
    mod producer;

    pub use builder::QueueBuilder;
    pub use consumer::Consumer;
    pub use producer::Producer;
}
#[allow(non_snake_case)]
pub mod Core {
    pub mod capacity;
    pub mod config;
    pub mod occupancy;
    pub mod wait;
    pub use capacity::{resolve_capacity, MAX_CAPACITY, MIN_CAPACITY, MIN_CAPACITY_FLOOR};
    pub use config::{QueueConfig, StarvationPolicy, DEFAULT_STARVATION_SPIN_LIMIT};
    pub use wait::WaitStrategy;
}
#[allow(non_snake_case)]
mod Debug {
    pub(crate) mod StructDebug;
}
pub mod error;

pub use error::{ConfigError, GetError, PutError};
pub use Core::{QueueConfig, StarvationPolicy, WaitStrategy};
pub use MPMC::Buffer::RingQueue;
pub use MPMC::Structs::QueueStats;
pub use MPMC::{Consumer, Producer, QueueBuilder};
