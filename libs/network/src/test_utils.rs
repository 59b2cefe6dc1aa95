//! Deterministic channel fake for exercising the managed transport.

use std::collections::VecDeque;

use crate::transports::PubSubChannel;

/// Channel whose offer results are scripted up front.
///
/// Each `offer` consumes the next scripted code; once the script runs out
/// every offer succeeds. Accepted frames are recorded and, in loopback mode,
/// also queued for `poll`.
#[derive(Debug, Default)]
pub struct ScriptedChannel {
    offer_script: VecDeque<i64>,
    offered: Vec<Vec<u8>>,
    inbound: VecDeque<Vec<u8>>,
    loopback: bool,
    ignore_fragment_limit: bool,
    offer_calls: usize,
    poll_limits: Vec<usize>,
    close_calls: usize,
}

impl ScriptedChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted offers become available to `poll`.
    pub fn loopback() -> Self {
        Self {
            loopback: true,
            ..Self::default()
        }
    }

    /// Misbehave by delivering every queued fragment on `poll`, whatever
    /// limit was requested.
    pub fn ignoring_fragment_limit(mut self) -> Self {
        self.ignore_fragment_limit = true;
        self
    }

    pub fn with_offer_results(mut self, codes: impl IntoIterator<Item = i64>) -> Self {
        self.offer_script.extend(codes);
        self
    }

    /// Queue a raw inbound fragment, well formed or not.
    pub fn push_inbound(&mut self, fragment: impl Into<Vec<u8>>) {
        self.inbound.push_back(fragment.into());
    }

    /// Frames the channel accepted, in order.
    pub fn offered(&self) -> &[Vec<u8>] {
        &self.offered
    }

    pub fn offer_calls(&self) -> usize {
        self.offer_calls
    }

    /// `fragment_limit` passed to each `poll` call.
    pub fn poll_limits(&self) -> &[usize] {
        &self.poll_limits
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls
    }

    pub fn pending_inbound(&self) -> usize {
        self.inbound.len()
    }
}

impl PubSubChannel for ScriptedChannel {
    fn offer(&mut self, frame: &[u8]) -> i64 {
        self.offer_calls += 1;
        let code = self.offer_script.pop_front().unwrap_or(0);
        if code >= 0 {
            self.offered.push(frame.to_vec());
            if self.loopback {
                self.inbound.push_back(frame.to_vec());
            }
        }
        code
    }

    fn poll(&mut self, handler: &mut dyn FnMut(&[u8]), fragment_limit: usize) -> usize {
        self.poll_limits.push(fragment_limit);
        let mut delivered = 0;
        while self.ignore_fragment_limit || delivered < fragment_limit {
            let Some(fragment) = self.inbound.pop_front() else {
                break;
            };
            handler(&fragment);
            delivered += 1;
        }
        delivered
    }

    fn close(&mut self) {
        self.close_calls += 1;
    }
}
