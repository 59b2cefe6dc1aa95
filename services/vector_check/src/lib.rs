//! Vector check service
//!
//! Loads a vector file, aggregates it in process (`verify`) or after a round
//! trip through a managed loopback transport (`replay`), and compares the
//! results with the expected records.

pub mod config;
pub mod replay;

pub use config::{ReplaySettings, VectorCheckConfig};
pub use replay::{replay, replay_over, ReplayOutcome};
