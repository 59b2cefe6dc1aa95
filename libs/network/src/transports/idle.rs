//! Backoff between offer attempts.
//!
//! The retry loop in [`super::ManagedTransport`] only calls
//! [`IdleStrategy::idle`] between attempts; what happens there (spin, yield,
//! sleep) is up to the strategy. All of them block the calling thread.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub trait IdleStrategy {
    /// Called after failed attempt number `attempt` (1-based) when another
    /// attempt follows.
    fn idle(&mut self, attempt: u32);

    /// Called at the start of every send.
    fn reset(&mut self) {}
}

/// Spin without giving up the core. Lowest latency, burns CPU.
#[derive(Debug, Clone, Copy, Default)]
pub struct BusySpinIdle;

impl IdleStrategy for BusySpinIdle {
    #[inline]
    fn idle(&mut self, _attempt: u32) {
        std::hint::spin_loop();
    }
}

/// Yield the time slice to the scheduler.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldingIdle;

impl IdleStrategy for YieldingIdle {
    #[inline]
    fn idle(&mut self, _attempt: u32) {
        std::thread::yield_now();
    }
}

/// Sleep, doubling from `min` up to `max`.
#[derive(Debug, Clone)]
pub struct SleepBackoffIdle {
    min: Duration,
    max: Duration,
    current: Duration,
}

impl SleepBackoffIdle {
    /// `max` below `min` is raised to `min`.
    pub fn new(min: Duration, max: Duration) -> Self {
        let max = max.max(min);
        Self {
            min,
            max,
            current: min,
        }
    }

    /// Sleep the next call to `idle` will perform.
    pub fn next_sleep(&self) -> Duration {
        self.current
    }

    fn advance(&mut self) {
        self.current = self.current.saturating_mul(2).min(self.max);
    }
}

impl IdleStrategy for SleepBackoffIdle {
    fn idle(&mut self, _attempt: u32) {
        std::thread::sleep(self.current);
        self.advance();
    }

    fn reset(&mut self) {
        self.current = self.min;
    }
}

/// Configured idle strategy.
///
/// ```toml
/// idle_strategy = { type = "sleep_backoff", min_sleep_us = 1, max_sleep_us = 1000 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdleStrategyKind {
    #[default]
    BusySpin,
    Yield,
    SleepBackoff { min_sleep_us: u64, max_sleep_us: u64 },
}

impl IdleStrategyKind {
    pub fn build(&self) -> Box<dyn IdleStrategy + Send> {
        match *self {
            IdleStrategyKind::BusySpin => Box::new(BusySpinIdle),
            IdleStrategyKind::Yield => Box::new(YieldingIdle),
            IdleStrategyKind::SleepBackoff {
                min_sleep_us,
                max_sleep_us,
            } => Box::new(SleepBackoffIdle::new(
                Duration::from_micros(min_sleep_us),
                Duration::from_micros(max_sleep_us),
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IdleStrategyKind::BusySpin => "busy_spin",
            IdleStrategyKind::Yield => "yield",
            IdleStrategyKind::SleepBackoff { .. } => "sleep_backoff",
        }
    }
}
