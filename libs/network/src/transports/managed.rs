//! Managed transport over an injected [`PubSubChannel`].
//!
//! `send` encodes into one reusable frame buffer and offers it until the
//! channel accepts or the attempt ceiling is reached:
//!
//! ```text
//! attempt 1 ─offer─▶ ok? ──yes──▶ sent += 1, return
//!                     │no
//!                     ▼
//!          classify → failure counter += 1
//!                     │
//!         last attempt? ──yes──▶ Exhausted { last_failure }
//!                     │no
//!                   idle(attempt) ─▶ attempt + 1
//! ```
//!
//! `poll` silently drops (and counts) frames shorter than a full frame. A
//! full-length frame with an unsupported version fails the poll with
//! [`TransportError::Protocol`]; valid messages decoded in the same batch are
//! held back and returned first by the next `poll`. Fragments a channel
//! delivers beyond the requested limit are counted as dropped.
//!
//! The send loop blocks the calling thread. There is no timeout other than the
//! attempt count and no cancellation mid-retry, so run it on a dedicated I/O
//! thread rather than inside a cooperative scheduler.

use std::collections::VecDeque;

use codec::{decode_frame, encode_frame_into, ProtocolError, FRAME_LENGTH};
use tracing::{debug, info, warn};
use types::Message;

use crate::transports::channel::{OfferFailure, PubSubChannel};
use crate::transports::config::ManagedTransportConfig;
use crate::transports::idle::IdleStrategy;
use crate::transports::metrics::{StatsTracker, TransportStats};
use crate::transports::Transport;
use crate::{Result, TransportError};

pub struct ManagedTransport<C: PubSubChannel> {
    channel: C,
    config: ManagedTransportConfig,
    idle: Box<dyn IdleStrategy + Send>,
    frame: [u8; FRAME_LENGTH],
    stats: StatsTracker,
    /// Valid messages from a batch that also held a rejected frame
    carry: VecDeque<Message>,
    closed: bool,
}

impl<C: PubSubChannel> ManagedTransport<C> {
    /// Wrap `channel`, building the idle strategy named in `config`.
    pub fn new(channel: C, config: ManagedTransportConfig) -> Self {
        let idle = config.idle_strategy.build();
        Self::with_idle_strategy(channel, config, idle)
    }

    /// Wrap `channel` with a caller-supplied idle strategy, ignoring
    /// `config.idle_strategy`.
    pub fn with_idle_strategy(
        channel: C,
        config: ManagedTransportConfig,
        idle: Box<dyn IdleStrategy + Send>,
    ) -> Self {
        info!(
            fragment_limit = config.fragment_limit(),
            offer_max_attempts = config.offer_max_attempts(),
            idle_strategy = config.idle_strategy.name(),
            "opening managed transport"
        );
        Self {
            channel,
            config,
            idle,
            frame: [0u8; FRAME_LENGTH],
            stats: StatsTracker::new(),
            carry: VecDeque::new(),
            closed: false,
        }
    }

    pub fn config(&self) -> &ManagedTransportConfig {
        &self.config
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn channel_mut(&mut self) -> &mut C {
        &mut self.channel
    }

    /// Read-only snapshot of the counters.
    pub fn stats(&self) -> TransportStats {
        self.stats.snapshot()
    }

    /// Handle for reading counters from another thread.
    pub fn stats_tracker(&self) -> StatsTracker {
        self.stats.clone()
    }
}

impl<C: PubSubChannel> Transport for ManagedTransport<C> {
    fn send(&mut self, message: &Message) -> Result<()> {
        if self.closed {
            return Err(TransportError::closed("send"));
        }

        encode_frame_into(message, &mut self.frame);

        let max_attempts = self.config.offer_max_attempts();
        let mut last_failure = OfferFailure::Other;
        self.idle.reset();

        for attempt in 1..=max_attempts {
            let result = self.channel.offer(&self.frame);
            if result >= 0 {
                self.stats.record_sent();
                return Ok(());
            }

            last_failure = OfferFailure::classify(result);
            self.stats.record_offer_failure(last_failure);
            debug!(attempt, code = result, failure = %last_failure, "offer failed");

            if attempt < max_attempts {
                self.idle.idle(attempt);
            }
        }

        warn!(
            attempts = max_attempts,
            last_failure = %last_failure,
            epoch = message.epoch,
            source_id = message.source_id,
            source_seq = message.source_seq,
            "offer attempts exhausted"
        );
        Err(TransportError::exhausted(max_attempts, last_failure))
    }

    fn poll(&mut self, max_fragments: usize) -> Result<Vec<Message>> {
        if self.closed || max_fragments == 0 {
            return Ok(Vec::new());
        }

        let limit = max_fragments.min(self.config.fragment_limit());
        let carried = self.carry.len().min(limit);
        let mut messages: Vec<Message> = Vec::with_capacity(limit);
        messages.extend(self.carry.drain(..carried));
        if messages.len() == limit {
            return Ok(messages);
        }

        let requested = limit - messages.len();
        let mut delivered = 0usize;
        let mut overflow = 0usize;
        let mut rejected: Option<ProtocolError> = None;
        let stats = &self.stats;

        self.channel.poll(
            &mut |fragment: &[u8]| {
                if delivered >= requested {
                    overflow += 1;
                    stats.record_dropped();
                    return;
                }
                delivered += 1;
                match decode_frame(fragment) {
                    Ok(message) => {
                        stats.record_received();
                        messages.push(message);
                    }
                    Err(e @ ProtocolError::MessageTooSmall { .. }) => {
                        stats.record_dropped();
                        debug!(length = fragment.len(), error = %e, "dropping short frame");
                    }
                    Err(e) => {
                        warn!(length = fragment.len(), error = %e, "rejecting inbound frame");
                        // Only the first rejection is reported per poll.
                        if rejected.is_none() {
                            rejected = Some(e);
                        } else {
                            stats.record_dropped();
                        }
                    }
                }
            },
            requested,
        );

        if overflow > 0 {
            warn!(
                overflow,
                requested, "channel delivered more fragments than requested, extras dropped"
            );
        }

        match rejected {
            None => Ok(messages),
            Some(e) => {
                // The carry was fully drained above, so this keeps FIFO order.
                self.carry.extend(messages);
                Err(e.into())
            }
        }
    }

    fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.carry.clear();
        self.channel.close();

        let stats = self.stats.snapshot();
        info!(
            sent = stats.sent,
            received = stats.received,
            failed_offers = stats.failed_offers(),
            dropped_frames = stats.dropped_frames,
            "closed managed transport"
        );
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<C: PubSubChannel> Drop for ManagedTransport<C> {
    fn drop(&mut self) {
        self.close();
    }
}
