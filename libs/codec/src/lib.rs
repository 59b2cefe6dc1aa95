//! # Epoch Codec
//!
//! ## Purpose
//!
//! Encoding rules for the two binary contracts shared between processes:
//! - **Actor identifiers**: five bounded integers packed into one comparable `u64`
//! - **Wire frames**: a fixed 56-byte little-endian encoding of one [`Message`]
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → libs/network
//!     ↑           ↓            ↓
//! Pure Data   Pack/Frame   Offer/Poll
//! Message     ActorId      Retry loop
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - Transport, retry or backpressure logic (belongs in network/)
//! - Aggregation of decoded batches (belongs in engine/)
//!
//! [`Message`]: types::Message

pub mod actor_id;
pub mod constants;
pub mod error;
pub mod frame;

pub use actor_id::{ActorId, ActorIdCodec, BitField, DefaultActorIdCodec, ACTOR_ID_FIELDS};
pub use constants::*;
pub use error::{ProtocolError, ProtocolResult};
pub use frame::{decode_frame, encode_frame, encode_frame_into, WireFrame};
