//! # Wire Frame
//!
//! Fixed 56-byte encoding of one [`Message`]:
//!
//! ```text
//! 0        1     2           8        16          24         32          40         48        56
//! ┌────────┬─────┬───────────┬────────┬───────────┬──────────┬───────────┬──────────┬─────────┐
//! │version │ qos │ reserved  │ epoch  │ channelId │ sourceId │ sourceSeq │ schemaId │ payload │
//! │   u8   │ u8  │ 6 × 0x00  │  i64   │    i64    │   i64    │    i64    │   i64    │   i64   │
//! └────────┴─────┴───────────┴────────┴───────────┴──────────┴───────────┴──────────┴─────────┘
//! ```
//!
//! All integers are little-endian. There is no length prefix: every payload is
//! fixed width, so encode and decode are branch-free copies.

use types::Message;
use zerocopy::byteorder::{LittleEndian, I64};
use zerocopy::{AsBytes, FromBytes, FromZeroes, Unaligned};

use crate::constants::{FRAME_LENGTH, FRAME_VERSION, VERSION_OFFSET};
use crate::error::{ProtocolError, ProtocolResult};

/// Byte-exact frame layout.
///
/// **CRITICAL**: every field is alignment 1, so `#[repr(C)]` adds no padding
/// and the struct is exactly [`FRAME_LENGTH`] bytes. DO NOT REORDER.
#[repr(C)]
#[derive(Debug, Clone, Copy, AsBytes, FromBytes, FromZeroes, Unaligned)]
pub struct WireFrame {
    pub version: u8,
    pub qos: u8,
    pub reserved: [u8; 6],
    pub epoch: I64<LittleEndian>,
    pub channel_id: I64<LittleEndian>,
    pub source_id: I64<LittleEndian>,
    pub source_seq: I64<LittleEndian>,
    pub schema_id: I64<LittleEndian>,
    pub payload: I64<LittleEndian>,
}

impl WireFrame {
    pub const SIZE: usize = FRAME_LENGTH;

    /// Frame stamped with the current [`FRAME_VERSION`].
    pub fn from_message(message: &Message) -> Self {
        Self {
            version: FRAME_VERSION,
            qos: message.qos,
            reserved: [0; 6],
            epoch: I64::new(message.epoch),
            channel_id: I64::new(message.channel_id),
            source_id: I64::new(message.source_id),
            source_seq: I64::new(message.source_seq),
            schema_id: I64::new(message.schema_id),
            payload: I64::new(message.payload),
        }
    }

    pub fn to_message(&self) -> Message {
        Message {
            epoch: self.epoch.get(),
            channel_id: self.channel_id.get(),
            source_id: self.source_id.get(),
            source_seq: self.source_seq.get(),
            schema_id: self.schema_id.get(),
            qos: self.qos,
            payload: self.payload.get(),
        }
    }
}

const _: () = assert!(std::mem::size_of::<WireFrame>() == FRAME_LENGTH);

/// Encode into a caller-owned buffer, typically reused across sends.
#[inline]
pub fn encode_frame_into(message: &Message, buffer: &mut [u8; FRAME_LENGTH]) {
    buffer.copy_from_slice(WireFrame::from_message(message).as_bytes());
}

pub fn encode_frame(message: &Message) -> [u8; FRAME_LENGTH] {
    let mut buffer = [0u8; FRAME_LENGTH];
    encode_frame_into(message, &mut buffer);
    buffer
}

/// Decode one frame from the front of `bytes`.
///
/// The version byte is checked before any other field is read. Bytes past
/// [`FRAME_LENGTH`] are ignored.
pub fn decode_frame(bytes: &[u8]) -> ProtocolResult<Message> {
    if bytes.len() < FRAME_LENGTH {
        return Err(ProtocolError::message_too_small(
            FRAME_LENGTH,
            bytes.len(),
            "wire frame",
        ));
    }

    let version = bytes[VERSION_OFFSET];
    if version != FRAME_VERSION {
        return Err(ProtocolError::unsupported_version(version));
    }

    WireFrame::read_from_prefix(bytes)
        .map(|frame| frame.to_message())
        .ok_or_else(|| ProtocolError::message_too_small(FRAME_LENGTH, bytes.len(), "wire frame"))
}
