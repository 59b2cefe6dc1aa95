//! Unbounded in-memory FIFO transport, used as a test double.

use std::collections::VecDeque;

use tracing::debug;
use types::Message;

use crate::transports::Transport;
use crate::{Result, TransportError};

/// Single-producer/single-consumer queue; not synchronized.
#[derive(Debug, Default)]
pub struct InMemoryTransport {
    queue: VecDeque<Message>,
    closed: bool,
}

impl InMemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages currently queued.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Transport for InMemoryTransport {
    fn send(&mut self, message: &Message) -> Result<()> {
        if self.closed {
            return Err(TransportError::closed("send"));
        }
        self.queue.push_back(*message);
        Ok(())
    }

    fn poll(&mut self, max_fragments: usize) -> Result<Vec<Message>> {
        if self.closed || max_fragments == 0 {
            return Ok(Vec::new());
        }
        let count = max_fragments.min(self.queue.len());
        Ok(self.queue.drain(..count).collect())
    }

    fn close(&mut self) {
        if !self.closed {
            debug!(discarded = self.queue.len(), "closing in-memory transport");
        }
        self.closed = true;
        self.queue.clear();
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
