//! Replay a vector set through a managed loopback transport.
//!
//! Every message is sent in file order. When a send exhausts its attempts on
//! back pressure the consumer side is drained and the send is retried once;
//! any other send failure, or a rejected inbound frame, aborts the replay. Received messages are aggregated
//! after the final drain.

use engine::{aggregate, VectorSet};
use network::{LoopbackChannel, ManagedTransport, PubSubChannel, Transport, TransportStats};
use tracing::{debug, info};
use types::{EpochResult, Message};

use crate::config::VectorCheckConfig;

#[derive(Debug, Clone)]
pub struct ReplayOutcome {
    pub received: Vec<Message>,
    pub results: Vec<EpochResult>,
    pub stats: TransportStats,
    /// Sends that needed a drain before they went through
    pub drains: usize,
}

pub fn replay(set: &VectorSet, config: &VectorCheckConfig) -> network::Result<ReplayOutcome> {
    let channel = LoopbackChannel::with_capacity(config.replay.loopback_capacity);
    replay_over(set, channel, config)
}

/// Replay over a caller-supplied channel; `config.replay.loopback_capacity`
/// is ignored.
pub fn replay_over<C: PubSubChannel>(
    set: &VectorSet,
    channel: C,
    config: &VectorCheckConfig,
) -> network::Result<ReplayOutcome> {
    let mut transport = ManagedTransport::new(channel, config.transport.clone());
    let batch = config.replay.poll_batch.max(1);

    let mut received = Vec::with_capacity(set.messages.len());
    let mut drains = 0;

    for message in &set.messages {
        match transport.send(message) {
            Ok(()) => {}
            Err(e) if e.is_back_pressure() => {
                drains += 1;
                debug!(received = received.len(), "draining after back pressure");
                drain(&mut transport, batch, &mut received)?;
                transport.send(message)?;
            }
            Err(e) => return Err(e),
        }
    }
    drain(&mut transport, batch, &mut received)?;
    transport.close();

    let stats = transport.stats();
    let results = aggregate(&received);
    info!(
        sent = stats.sent,
        received = stats.received,
        back_pressure = stats.back_pressure,
        drains,
        epochs = results.len(),
        "replay complete"
    );

    Ok(ReplayOutcome {
        received,
        results,
        stats,
        drains,
    })
}

fn drain(
    transport: &mut dyn Transport,
    batch: usize,
    out: &mut Vec<Message>,
) -> network::Result<()> {
    loop {
        let polled = transport.poll(batch)?;
        if polled.is_empty() {
            return Ok(());
        }
        out.extend(polled);
    }
}
