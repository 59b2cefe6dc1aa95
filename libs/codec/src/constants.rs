//! # Wire Constants
//!
//! Fixed values of the wire frame contract. They must remain stable across
//! every process that exchanges frames; a layout change requires a new
//! [`FRAME_VERSION`].

/// Only frame version this codec reads or writes.
pub const FRAME_VERSION: u8 = 1;

/// Every frame is exactly this long. No length prefix is carried.
pub const FRAME_LENGTH: usize = 56;

pub const VERSION_OFFSET: usize = 0;
pub const QOS_OFFSET: usize = 1;
pub const EPOCH_OFFSET: usize = 8;
pub const CHANNEL_ID_OFFSET: usize = 16;
pub const SOURCE_ID_OFFSET: usize = 24;
pub const SOURCE_SEQ_OFFSET: usize = 32;
pub const SCHEMA_ID_OFFSET: usize = 40;
pub const PAYLOAD_OFFSET: usize = 48;
