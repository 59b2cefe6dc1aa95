//! # Epoch Types
//!
//! Pure data structures shared by every layer of the epoch pipeline:
//!
//! ```text
//! libs/types → libs/codec → libs/network → libs/engine
//!     ↑             ↓              ↓             ↓
//! Message      Wire frames    Send / poll    EpochResult
//! ActorIdParts Actor ids      Retry, stats   Fingerprints
//! ```
//!
//! This crate holds no encoding rules and no transport logic. Validation of
//! actor identifier fields lives in `codec`, aggregation lives in `engine`.

pub mod actor;
pub mod message;

pub use actor::{
    ActorIdParts, ACTOR_INDEX_BITS, ACTOR_INDEX_MAX, PROCESS_INDEX_BITS, PROCESS_INDEX_MAX,
    PROCESS_TYPE_BITS, PROCESS_TYPE_MAX, REGION_BITS, REGION_MAX, SERVER_BITS, SERVER_MAX,
};
pub use message::{EpochResult, Message};

/// Version of the epoch crates, as reported by tooling.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_semver() {
        let parts: Vec<&str> = version().split('.').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p.parse::<u32>().is_ok()));
    }
}
