//! Unified Transport Layer
//!
//! One capability, [`Transport`], with two implementations:
//!
//! ```text
//!   producer ──send──▶ ┌──────────────────────┐ ──offer──▶ ┌───────────────┐
//!                      │ ManagedTransport<C>  │            │ PubSubChannel │
//!   consumer ◀──poll── │ frame buffer + stats │ ◀──poll─── │  (injected)   │
//!                      └──────────────────────┘            └───────────────┘
//! ```
//!
//! Neither implementation is internally synchronized. Each instance is owned
//! by one thread; only [`StatsTracker`] handles may be read from elsewhere.

use types::Message;

use crate::Result;

pub mod channel;
pub mod config;
pub mod idle;
pub mod loopback;
pub mod managed;
pub mod memory;
pub mod metrics;


pub use channel::{OfferFailure, PubSubChannel};
pub use config::ManagedTransportConfig;
pub use idle::{BusySpinIdle, IdleStrategy, IdleStrategyKind, SleepBackoffIdle, YieldingIdle};
pub use loopback::LoopbackChannel;
pub use managed::ManagedTransport;
pub use memory::InMemoryTransport;
pub use metrics::{StatsTracker, TransportStats};

/// Send/poll/close contract shared by every transport.
pub trait Transport {
    /// Hand one message to the transport. May block while retrying.
    fn send(&mut self, message: &Message) -> Result<()>;

    /// Return up to `max_fragments` inbound messages without blocking.
    ///
    /// `poll(0)` returns an empty batch and has no side effects. Fails with
    /// [`TransportError::Protocol`](crate::TransportError::Protocol) when an
    /// inbound frame carries an unsupported version.
    fn poll(&mut self, max_fragments: usize) -> Result<Vec<Message>>;

    /// Release resources. Safe to call more than once; the transport must not
    /// be reused afterwards.
    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
