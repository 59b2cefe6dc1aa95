//! # Packed Actor Identifier
//!
//! ## Purpose
//!
//! Bijective packing of an [`ActorIdParts`] tuple into a single `u64`. The
//! allocation is fixed (see `types::actor`), so packing and unpacking are a
//! handful of shifts and masks, and the raw integer orders identifiers the same
//! way as comparing `(region, server, process_type, process_index, actor_index)`
//! lexicographically.
//!
//! ## Integration Points
//!
//! - **Routing**: raw `u64` keys compare without decoding
//! - **Untrusted input**: [`ActorId::try_from_signed`] for values parsed from text
//!
//! Every field is range checked before any shift so an oversized value can
//! never bleed into its neighbour.

use std::fmt;

use types::{
    ActorIdParts, ACTOR_INDEX_BITS, PROCESS_INDEX_BITS, PROCESS_TYPE_BITS, REGION_BITS,
    SERVER_BITS,
};

use crate::error::{ProtocolError, ProtocolResult};

/// One named slot of the identifier layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitField {
    pub name: &'static str,
    pub bits: u32,
}

impl BitField {
    /// Largest value the field can hold (inclusive).
    #[inline]
    pub const fn max(&self) -> u64 {
        (1u64 << self.bits) - 1
    }
}

/// Identifier layout, most significant field first.
pub const ACTOR_ID_FIELDS: [BitField; 5] = [
    BitField { name: "region", bits: REGION_BITS },
    BitField { name: "server", bits: SERVER_BITS },
    BitField { name: "process_type", bits: PROCESS_TYPE_BITS },
    BitField { name: "process_index", bits: PROCESS_INDEX_BITS },
    BitField { name: "actor_index", bits: ACTOR_INDEX_BITS },
];

const fn total_bits() -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < ACTOR_ID_FIELDS.len() {
        total += ACTOR_ID_FIELDS[i].bits;
        i += 1;
    }
    total
}

// Sum of the widths of every field less significant than `index`.
const fn shift_of(index: usize) -> u32 {
    let mut shift = 0;
    let mut i = index + 1;
    while i < ACTOR_ID_FIELDS.len() {
        shift += ACTOR_ID_FIELDS[i].bits;
        i += 1;
    }
    shift
}

const _: () = assert!(total_bits() == 64, "actor id layout must fill exactly 64 bits");

const SHIFTS: [u32; 5] = [shift_of(0), shift_of(1), shift_of(2), shift_of(3), shift_of(4)];

/// Packing strategy for actor identifiers.
pub trait ActorIdCodec {
    fn encode(&self, parts: &ActorIdParts) -> ProtocolResult<u64>;
    fn decode(&self, value: u64) -> ActorIdParts;
    fn name(&self) -> &'static str;
}

/// Fixed 10/12/6/10/26 layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultActorIdCodec;

impl ActorIdCodec for DefaultActorIdCodec {
    fn encode(&self, parts: &ActorIdParts) -> ProtocolResult<u64> {
        let values = parts.to_array();
        for (field, &value) in ACTOR_ID_FIELDS.iter().zip(values.iter()) {
            if value > field.max() {
                return Err(ProtocolError::field_out_of_range(
                    field.name,
                    value as i64,
                    field.max(),
                ));
            }
        }

        Ok(values
            .iter()
            .zip(SHIFTS.iter())
            .fold(0u64, |packed, (&value, &shift)| packed | (value << shift)))
    }

    fn decode(&self, value: u64) -> ActorIdParts {
        let field = |index: usize| (value >> SHIFTS[index]) & ACTOR_ID_FIELDS[index].max();
        ActorIdParts {
            region: field(0) as u16,
            server: field(1) as u16,
            process_type: field(2) as u8,
            process_index: field(3) as u16,
            actor_index: field(4) as u32,
        }
    }

    fn name(&self) -> &'static str {
        "default"
    }
}

/// Packed actor identifier.
///
/// Ordering on `ActorId` is ordering on the raw integer, which matches field
/// order because fields are packed most significant first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActorId(u64);

impl ActorId {
    pub fn new(parts: ActorIdParts) -> ProtocolResult<Self> {
        DefaultActorIdCodec.encode(&parts).map(Self)
    }

    /// Any `u64` is a valid identifier; every bit belongs to some field.
    #[inline]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Build from signed values, e.g. parsed from text or a CLI.
    ///
    /// Fails on the first negative or oversized field in layout order.
    pub fn try_from_signed(values: [i64; 5]) -> ProtocolResult<Self> {
        for (field, &value) in ACTOR_ID_FIELDS.iter().zip(values.iter()) {
            if value < 0 || value as u64 > field.max() {
                return Err(ProtocolError::field_out_of_range(field.name, value, field.max()));
            }
        }
        // Every value now fits its field, and every field fits its Rust type.
        Self::new(ActorIdParts {
            region: values[0] as u16,
            server: values[1] as u16,
            process_type: values[2] as u8,
            process_index: values[3] as u16,
            actor_index: values[4] as u32,
        })
    }

    #[inline]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub fn parts(&self) -> ActorIdParts {
        DefaultActorIdCodec.decode(self.0)
    }
}

impl From<ActorId> for u64 {
    fn from(id: ActorId) -> Self {
        id.0
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.parts();
        write!(
            f,
            "{}:{}:{}:{}:{}",
            p.region, p.server, p.process_type, p.process_index, p.actor_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::{ACTOR_INDEX_MAX, PROCESS_INDEX_MAX, PROCESS_TYPE_MAX, REGION_MAX, SERVER_MAX};

    fn max_parts() -> ActorIdParts {
        ActorIdParts::new(
            REGION_MAX as u16,
            SERVER_MAX as u16,
            PROCESS_TYPE_MAX as u8,
            PROCESS_INDEX_MAX as u16,
            ACTOR_INDEX_MAX as u32,
        )
    }

    #[test]
    fn test_shifts() {
        assert_eq!(SHIFTS, [54, 42, 36, 26, 0]);
    }

    #[test]
    fn test_zero_and_max() {
        let codec = DefaultActorIdCodec;
        assert_eq!(codec.encode(&ActorIdParts::default()).unwrap(), 0);
        assert_eq!(codec.encode(&max_parts()).unwrap(), u64::MAX);
        assert_eq!(codec.decode(u64::MAX), max_parts());
    }

    #[test]
    fn test_single_field_positions() {
        let codec = DefaultActorIdCodec;
        assert_eq!(codec.encode(&ActorIdParts::new(0, 0, 0, 0, 1)).unwrap(), 1);
        assert_eq!(codec.encode(&ActorIdParts::new(0, 0, 0, 1, 0)).unwrap(), 1 << 26);
        assert_eq!(codec.encode(&ActorIdParts::new(0, 0, 1, 0, 0)).unwrap(), 1 << 36);
        assert_eq!(codec.encode(&ActorIdParts::new(0, 1, 0, 0, 0)).unwrap(), 1 << 42);
        assert_eq!(codec.encode(&ActorIdParts::new(1, 0, 0, 0, 0)).unwrap(), 1 << 54);
    }

    #[test]
    fn test_each_field_rejects_max_plus_one() {
        let codec = DefaultActorIdCodec;
        let cases = [
            (ActorIdParts::new(1024, 0, 0, 0, 0), "region"),
            (ActorIdParts::new(0, 4096, 0, 0, 0), "server"),
            (ActorIdParts::new(0, 0, 64, 0, 0), "process_type"),
            (ActorIdParts::new(0, 0, 0, 1024, 0), "process_index"),
            (ActorIdParts::new(0, 0, 0, 0, 1 << 26), "actor_index"),
        ];
        for (parts, expected_field) in cases {
            match codec.encode(&parts) {
                Err(ProtocolError::FieldOutOfRange { field, .. }) => {
                    assert_eq!(field, expected_field)
                }
                other => panic!("expected range error for {expected_field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_try_from_signed_rejects_negative() {
        let err = ActorId::try_from_signed([1, -1, 0, 0, 0]).unwrap_err();
        assert_eq!(err, ProtocolError::field_out_of_range("server", -1, SERVER_MAX));

        let err = ActorId::try_from_signed([0, 0, 0, 0, i64::MIN]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_try_from_signed_matches_new() {
        let from_signed = ActorId::try_from_signed([5, 300, 7, 12, 99_999]).unwrap();
        let from_parts = ActorId::new(ActorIdParts::new(5, 300, 7, 12, 99_999)).unwrap();
        assert_eq!(from_signed, from_parts);
        assert_eq!(from_signed.to_string(), "5:300:7:12:99999");
    }

    #[test]
    fn test_raw_order_matches_field_order() {
        let a = ActorId::new(ActorIdParts::new(1, 0, 0, 0, ACTOR_INDEX_MAX as u32)).unwrap();
        let b = ActorId::new(ActorIdParts::new(1, 0, 0, 1, 0)).unwrap();
        let c = ActorId::new(ActorIdParts::new(2, 0, 0, 0, 0)).unwrap();
        assert!(a < b && b < c);
        assert!(a.parts() < b.parts() && b.parts() < c.parts());
    }

    #[test]
    fn test_codec_name() {
        assert_eq!(DefaultActorIdCodec.name(), "default");
    }
}
