//! Actor identifier components and their fixed bit allocation.
//!
//! ```text
//!  63        54 53          42 41    36 35        26 25                        0
//! ┌───────────┬──────────────┬────────┬────────────┬───────────────────────────┐
//! │ region 10 │  server 12   │ type 6 │  index 10  │      actor index 26       │
//! └───────────┴──────────────┴────────┴────────────┴───────────────────────────┘
//! ```
//!
//! The layout is a persisted contract: consumers compare raw `u64` values to
//! order identifiers without decoding them. Do not change a width without a
//! version bump visible to every reader of raw identifiers.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

pub const REGION_BITS: u32 = 10;
pub const SERVER_BITS: u32 = 12;
pub const PROCESS_TYPE_BITS: u32 = 6;
pub const PROCESS_INDEX_BITS: u32 = 10;
pub const ACTOR_INDEX_BITS: u32 = 26;

pub const REGION_MAX: u64 = (1 << REGION_BITS) - 1;
pub const SERVER_MAX: u64 = (1 << SERVER_BITS) - 1;
pub const PROCESS_TYPE_MAX: u64 = (1 << PROCESS_TYPE_BITS) - 1;
pub const PROCESS_INDEX_MAX: u64 = (1 << PROCESS_INDEX_BITS) - 1;
pub const ACTOR_INDEX_MAX: u64 = (1 << ACTOR_INDEX_BITS) - 1;

/// Unpacked actor identifier.
///
/// Field types are the narrowest unsigned integers that hold each width, so
/// a value may still exceed its allocation (e.g. `region = 1024`). `codec`
/// rejects those before packing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ActorIdParts {
    pub region: u16,
    pub server: u16,
    pub process_type: u8,
    pub process_index: u16,
    pub actor_index: u32,
}

impl ActorIdParts {
    pub fn new(
        region: u16,
        server: u16,
        process_type: u8,
        process_index: u16,
        actor_index: u32,
    ) -> Self {
        Self {
            region,
            server,
            process_type,
            process_index,
            actor_index,
        }
    }

    /// Field values in packing order, most significant first.
    #[inline]
    pub fn to_array(&self) -> [u64; 5] {
        [
            self.region as u64,
            self.server as u64,
            self.process_type as u64,
            self.process_index as u64,
            self.actor_index as u64,
        ]
    }
}
