//! Message and per-epoch result value types.

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A per-actor state delta.
///
/// Every identifier except `epoch` is opaque to this workspace; `epoch` is the
/// grouping and ordering key used by aggregation. `qos` is carried on the wire
/// but never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Message {
    pub epoch: i64,
    pub channel_id: i64,
    pub source_id: i64,
    pub source_seq: i64,
    pub schema_id: i64,
    pub qos: u8,
    pub payload: i64,
}

impl Message {
    pub fn new(
        epoch: i64,
        channel_id: i64,
        source_id: i64,
        source_seq: i64,
        schema_id: i64,
        qos: u8,
        payload: i64,
    ) -> Self {
        Self {
            epoch,
            channel_id,
            source_id,
            source_seq,
            schema_id,
            qos,
            payload,
        }
    }

    /// Composite key used to order a batch before folding.
    ///
    /// `schema_id`, `qos` and `payload` do not participate.
    #[inline]
    pub fn ordering_key(&self) -> (i64, i64, i64, i64) {
        (self.epoch, self.channel_id, self.source_id, self.source_seq)
    }
}

/// Aggregated state at the end of one epoch.
///
/// `state` is cumulative over the whole batch, not per epoch. `hash` is the
/// 16 digit lowercase hex fingerprint of `"state:" + state`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct EpochResult {
    pub epoch: i64,
    pub state: i64,
    pub hash: String,
}
