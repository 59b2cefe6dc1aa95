//! In-process bounded channel.
//!
//! Offers land in a ring that a subscriber on the same channel polls back.
//! When the ring is full the offer is refused with back pressure, which
//! makes the managed transport's retry and the caller's drain-and-resend
//! path observable without an external fabric.

use std::collections::VecDeque;

use tracing::trace;

use crate::transports::channel::{offer_codes, PubSubChannel};

#[derive(Debug)]
pub struct LoopbackChannel {
    frames: VecDeque<Vec<u8>>,
    capacity: usize,
    position: i64,
    connected: bool,
    closed: bool,
}

impl LoopbackChannel {
    /// A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
            position: 0,
            connected: true,
            closed: false,
        }
    }

    /// Simulate the subscriber going away or coming back.
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Fragments waiting to be polled.
    pub fn pending(&self) -> usize {
        self.frames.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl PubSubChannel for LoopbackChannel {
    fn offer(&mut self, frame: &[u8]) -> i64 {
        if self.closed {
            return offer_codes::CLOSED;
        }
        if !self.connected {
            return offer_codes::NOT_CONNECTED;
        }
        if self.frames.len() >= self.capacity {
            return offer_codes::BACK_PRESSURED;
        }
        self.frames.push_back(frame.to_vec());
        self.position += frame.len() as i64;
        trace!(position = self.position, "loopback accepted frame");
        self.position
    }

    fn poll(&mut self, handler: &mut dyn FnMut(&[u8]), fragment_limit: usize) -> usize {
        let mut delivered = 0;
        while delivered < fragment_limit {
            match self.frames.pop_front() {
                Some(frame) => {
                    handler(&frame);
                    delivered += 1;
                }
                None => break,
            }
        }
        delivered
    }

    fn close(&mut self) {
        self.closed = true;
        self.frames.clear();
    }
}
