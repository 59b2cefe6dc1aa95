//! End-to-end transport tests: producers send, the consumer polls decoded
//! messages and hands the batch to the aggregation engine.

use engine::{aggregate, state_hash};
use network::test_utils::ScriptedChannel;
use network::{
    InMemoryTransport, LoopbackChannel, ManagedTransport, ManagedTransportConfig, OfferFailure,
    Transport, TransportError,
};
use codec::encode_frame;
use proptest::prelude::*;
use types::Message;

fn sample_batch() -> Vec<Message> {
    vec![
        Message::new(2, 2, 1, 2, 100, 0, 5),
        Message::new(1, 1, 2, 1, 100, 0, 2),
        Message::new(1, 1, 1, 2, 100, 0, -1),
        Message::new(3, 1, 1, 1, 100, 0, 4),
    ]
}

fn drain(transport: &mut dyn Transport, batch: usize) -> Vec<Message> {
    let mut out = Vec::new();
    loop {
        let polled = transport.poll(batch).unwrap();
        if polled.is_empty() {
            return out;
        }
        out.extend(polled);
    }
}

fn assert_sample_results(received: &[Message]) {
    let results = aggregate(received);
    let summary: Vec<(i64, i64)> = results.iter().map(|r| (r.epoch, r.state)).collect();
    assert_eq!(summary, vec![(1, 1), (2, 6), (3, 10)]);
    for result in &results {
        assert_eq!(result.hash, state_hash(result.state));
    }
}

#[test_log::test]
fn test_in_memory_pipeline() {
    let mut transport = InMemoryTransport::new();
    for message in sample_batch() {
        transport.send(&message).unwrap();
    }
    let received = drain(&mut transport, 3);
    assert_eq!(received, sample_batch());
    assert_sample_results(&received);
}

#[test_log::test]
fn test_managed_pipeline_over_loopback() {
    let mut transport = ManagedTransport::new(
        LoopbackChannel::with_capacity(16),
        ManagedTransportConfig::default(),
    );
    for message in sample_batch() {
        transport.send(&message).unwrap();
    }
    let received = drain(&mut transport, 64);
    assert_eq!(received, sample_batch());
    assert_sample_results(&received);

    let stats = transport.stats();
    assert_eq!((stats.sent, stats.received, stats.failed_offers()), (4, 4, 0));
}

#[test_log::test]
fn test_back_pressure_then_drain_and_resend() {
    let config = ManagedTransportConfig::default().with_offer_max_attempts(3);
    let mut transport = ManagedTransport::new(LoopbackChannel::with_capacity(2), config);
    let mut received = Vec::new();

    for message in sample_batch() {
        match transport.send(&message) {
            Ok(()) => {}
            Err(e) if e.is_back_pressure() => {
                received.extend(drain(&mut transport, 64));
                transport.send(&message).unwrap();
            }
            Err(e) => panic!("unexpected send failure: {e}"),
        }
    }
    received.extend(drain(&mut transport, 64));

    assert_eq!(received, sample_batch());
    assert_sample_results(&received);

    let stats = transport.stats();
    assert_eq!(stats.sent, 4);
    assert_eq!(stats.back_pressure, 3);
    assert_eq!(stats.failed_offers(), stats.back_pressure);
}

#[test_log::test]
fn test_disconnected_subscriber_exhausts() {
    let mut channel = LoopbackChannel::with_capacity(4);
    channel.set_connected(false);
    let config = ManagedTransportConfig::default().with_offer_max_attempts(5);
    let mut transport = ManagedTransport::new(channel, config);

    let err = transport.send(&sample_batch()[0]).unwrap_err();
    assert_eq!(err, TransportError::exhausted(5, OfferFailure::NotConnected));
    assert_eq!(transport.stats().not_connected, 5);

    transport.channel_mut().set_connected(true);
    transport.send(&sample_batch()[0]).unwrap();
    assert_eq!(transport.stats().sent, 1);
}

#[test_log::test]
fn test_failure_counters_sum_to_attempts() {
    let script = [-1, -2, -3, -4, -5, -2, -1, -7];
    let channel = ScriptedChannel::new().with_offer_results(script);
    let config = ManagedTransportConfig::default().with_offer_max_attempts(script.len() as i64);
    let mut transport = ManagedTransport::new(channel, config);

    assert!(transport.send(&sample_batch()[0]).is_err());
    let stats = transport.stats();
    assert_eq!(stats.failed_offers(), script.len() as u64);
    assert_eq!(transport.channel().offer_calls(), script.len());
    assert_eq!(
        (stats.not_connected, stats.back_pressure, stats.admin_action, stats.closed, stats.other),
        (2, 2, 1, 1, 2)
    );
}

#[test_log::test]
fn test_version_mismatch_surfaces_to_consumer() {
    let mut bad = encode_frame(&sample_batch()[0]);
    bad[0] = 2;
    let mut channel = ScriptedChannel::new();
    channel.push_inbound(encode_frame(&sample_batch()[1]).to_vec());
    channel.push_inbound(bad.to_vec());
    let mut transport = ManagedTransport::new(channel, ManagedTransportConfig::default());

    let err = transport.poll(64).unwrap_err();
    assert!(matches!(err, TransportError::Protocol(_)));
    assert_eq!(drain(&mut transport, 64), vec![sample_batch()[1]]);
}

fn any_message() -> impl Strategy<Value = Message> {
    (
        any::<i64>(),
        any::<i64>(),
        any::<i64>(),
        any::<i64>(),
        any::<i64>(),
        any::<u8>(),
        any::<i64>(),
    )
        .prop_map(|(e, c, s, q, schema, qos, p)| Message::new(e, c, s, q, schema, qos, p))
}

proptest! {
    #[test]
    fn managed_loopback_preserves_messages(
        messages in prop::collection::vec(any_message(), 0..32),
        fragment_limit in 1i64..8,
        batch in 1usize..16,
    ) {
        let config = ManagedTransportConfig::default().with_fragment_limit(fragment_limit);
        let mut transport = ManagedTransport::new(LoopbackChannel::with_capacity(64), config);
        for message in &messages {
            transport.send(message).unwrap();
        }

        let mut received = Vec::new();
        loop {
            let polled = transport.poll(batch).unwrap();
            prop_assert!(polled.len() <= batch.min(fragment_limit as usize));
            if polled.is_empty() {
                break;
            }
            received.extend(polled);
        }

        prop_assert_eq!(&received, &messages);
        let stats = transport.stats();
        prop_assert_eq!(stats.sent as usize, messages.len());
        prop_assert_eq!(stats.received as usize, messages.len());
        prop_assert_eq!(stats.dropped_frames, 0);
    }
}
