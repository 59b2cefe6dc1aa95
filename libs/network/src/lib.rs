//! Epoch Network Transports
//!
//! Moves [`types::Message`] values between processes through a
//! publish/subscribe fabric that may push back. Two transports share one
//! capability ([`Transport`]): an unbounded in-memory FIFO used as a test
//! double, and [`ManagedTransport`], which wraps an injected offer/poll
//! primitive ([`PubSubChannel`]) with bounded retry, failure classification and
//! counters.

pub mod error;
pub mod test_utils;
pub mod transports;

pub use error::{Result, TransportError};
pub use transports::{
    BusySpinIdle, IdleStrategy, IdleStrategyKind, InMemoryTransport, LoopbackChannel,
    ManagedTransport, ManagedTransportConfig, OfferFailure, PubSubChannel, SleepBackoffIdle,
    StatsTracker, Transport, TransportStats, YieldingIdle,
};

pub const DEFAULT_FRAGMENT_LIMIT: usize = 64;
pub const DEFAULT_OFFER_MAX_ATTEMPTS: u32 = 10;
