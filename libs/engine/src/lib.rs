//! # Epoch Aggregation Engine
//!
//! Converts an unordered batch of [`types::Message`] values into ordered
//! [`types::EpochResult`] values, each carrying an FNV-1a fingerprint of the
//! running state.
//!
//! The engine is a pure function of its input: no shared state, no I/O. It
//! may run on any single worker as long as the batch is not mutated during
//! the call.
//!
//! **Note**: the running `state` is cumulative over the whole batch. It is
//! not reset at epoch boundaries.

pub mod aggregate;
pub mod error;
pub mod fingerprint;
pub mod vectors;

pub use aggregate::{aggregate, epoch_result};
pub use error::VectorError;
pub use fingerprint::{fnv1a64, fnv1a64_hex, state_hash};
pub use vectors::VectorSet;
