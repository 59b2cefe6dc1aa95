//! Transport Counters
//!
//! Monotonic counters for the managed transport. The transport is the only
//! writer; cloned [`StatsTracker`] handles may read from other threads at a
//! best-effort consistency level (each counter is atomic, a snapshot as a
//! whole is not).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::transports::channel::OfferFailure;

/// Point-in-time copy of every counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportStats {
    pub sent: u64,
    pub received: u64,
    pub back_pressure: u64,
    pub not_connected: u64,
    pub admin_action: u64,
    pub closed: u64,
    pub other: u64,
    /// Inbound fragments that did not decode into a message
    pub dropped_frames: u64,
}

impl TransportStats {
    /// Sum of the classified failure counters; equals the number of failed
    /// offer attempts.
    pub fn failed_offers(&self) -> u64 {
        self.back_pressure + self.not_connected + self.admin_action + self.closed + self.other
    }

    pub fn failures(&self, failure: OfferFailure) -> u64 {
        match failure {
            OfferFailure::BackPressure => self.back_pressure,
            OfferFailure::NotConnected => self.not_connected,
            OfferFailure::AdminAction => self.admin_action,
            OfferFailure::Closed => self.closed,
            OfferFailure::Other => self.other,
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    sent: AtomicU64,
    received: AtomicU64,
    back_pressure: AtomicU64,
    not_connected: AtomicU64,
    admin_action: AtomicU64,
    closed: AtomicU64,
    other: AtomicU64,
    dropped_frames: AtomicU64,
}

/// Shared handle to one transport's counters.
///
/// Counters never reset; a fresh transport gets a fresh tracker.
#[derive(Debug, Clone, Default)]
pub struct StatsTracker {
    counters: Arc<Counters>,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_sent(&self) {
        self.counters.sent.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_received(&self) {
        self.counters.received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self) {
        self.counters.dropped_frames.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment exactly one classified failure counter.
    #[inline]
    pub fn record_offer_failure(&self, failure: OfferFailure) {
        let counter = match failure {
            OfferFailure::BackPressure => &self.counters.back_pressure,
            OfferFailure::NotConnected => &self.counters.not_connected,
            OfferFailure::AdminAction => &self.counters.admin_action,
            OfferFailure::Closed => &self.counters.closed,
            OfferFailure::Other => &self.counters.other,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> TransportStats {
        let c = &self.counters;
        TransportStats {
            sent: c.sent.load(Ordering::Relaxed),
            received: c.received.load(Ordering::Relaxed),
            back_pressure: c.back_pressure.load(Ordering::Relaxed),
            not_connected: c.not_connected.load(Ordering::Relaxed),
            admin_action: c.admin_action.load(Ordering::Relaxed),
            closed: c.closed.load(Ordering::Relaxed),
            other: c.other.load(Ordering::Relaxed),
            dropped_frames: c.dropped_frames.load(Ordering::Relaxed),
        }
    }
}
