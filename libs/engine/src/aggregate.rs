//! Sort-then-fold aggregation.
//!
//! 1. Stable sort by `(epoch, channel_id, source_id, source_seq)`.
//! 2. Fold payloads into one wrapping `i64` accumulator, emitting a result
//!    each time the epoch changes and once more after the last message.

use tracing::debug;
use types::{EpochResult, Message};

use crate::fingerprint::state_hash;

/// Result for `epoch` with the fingerprint of `state`.
pub fn epoch_result(epoch: i64, state: i64) -> EpochResult {
    EpochResult {
        epoch,
        state,
        hash: state_hash(state),
    }
}

/// Aggregate a batch into one result per distinct epoch, ascending.
///
/// The input is left untouched; ordering happens on a copy. Payload
/// overflow wraps (two's complement) rather than failing.
pub fn aggregate(messages: &[Message]) -> Vec<EpochResult> {
    let mut ordered = messages.to_vec();
    ordered.sort_by_key(Message::ordering_key);

    let mut results = Vec::new();
    let mut state: i64 = 0;
    let mut current_epoch: Option<i64> = None;

    for message in &ordered {
        match current_epoch {
            None => current_epoch = Some(message.epoch),
            Some(epoch) if epoch != message.epoch => {
                results.push(epoch_result(epoch, state));
                current_epoch = Some(message.epoch);
            }
            Some(_) => {}
        }
        state = state.wrapping_add(message.payload);
    }

    if let Some(epoch) = current_epoch {
        results.push(epoch_result(epoch, state));
    }

    debug!(
        messages = messages.len(),
        epochs = results.len(),
        "aggregated batch"
    );
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(epoch: i64, channel: i64, source: i64, seq: i64, payload: i64) -> Message {
        Message::new(epoch, channel, source, seq, 100, 0, payload)
    }

    #[test]
    fn test_empty_batch() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_reference_batch() {
        let batch = vec![
            m(2, 2, 1, 2, 5),
            m(1, 1, 2, 1, 2),
            m(1, 1, 1, 2, -1),
            m(3, 1, 1, 1, 4),
        ];
        let results = aggregate(&batch);
        assert_eq!(
            results,
            vec![epoch_result(1, 1), epoch_result(2, 6), epoch_result(3, 10)]
        );
        assert_eq!(results[0].hash, "c3c43ef01be7b74f");
        assert_eq!(results[1].hash, "c3c43bf01be7b236");
        assert_eq!(results[2].hash, "8e2e70ff6abccccd");
    }

    #[test]
    fn test_state_is_cumulative_across_epochs() {
        let batch = vec![m(1, 0, 0, 0, 10), m(2, 0, 0, 0, 0), m(3, 0, 0, 0, -3)];
        let states: Vec<i64> = aggregate(&batch).iter().map(|r| r.state).collect();
        assert_eq!(states, vec![10, 10, 7]);
    }

    #[test]
    fn test_single_message() {
        assert_eq!(aggregate(&[m(42, 1, 1, 1, -4)]), vec![epoch_result(42, -4)]);
    }

    #[test]
    fn test_overflow_wraps() {
        let batch = vec![m(1, 0, 0, 0, i64::MAX), m(1, 0, 0, 1, 1)];
        assert_eq!(aggregate(&batch), vec![epoch_result(1, i64::MIN)]);
    }

    #[test]
    fn test_negative_epochs_sort_first() {
        let batch = vec![m(0, 0, 0, 0, 1), m(-5, 0, 0, 0, 2)];
        let epochs: Vec<i64> = aggregate(&batch).iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, vec![-5, 0]);
    }

    #[test]
    fn test_input_not_reordered() {
        let batch = vec![m(2, 0, 0, 0, 1), m(1, 0, 0, 0, 1)];
        let copy = batch.clone();
        aggregate(&batch);
        assert_eq!(batch, copy);
    }
}
