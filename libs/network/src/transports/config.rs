//! Managed transport configuration.
//!
//! Values are kept signed so that a zero or negative entry in a config file
//! is representable; accessors fall back to the documented defaults for
//! anything non-positive.

use serde::{Deserialize, Serialize};

use crate::transports::idle::IdleStrategyKind;
use crate::{TransportError, DEFAULT_FRAGMENT_LIMIT, DEFAULT_OFFER_MAX_ATTEMPTS};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagedTransportConfig {
    /// Caps how many fragments one `poll` may return (default 64)
    pub fragment_limit: i64,
    /// Caps the offer retry loop (default 10)
    pub offer_max_attempts: i64,
    /// Backoff between offer attempts (default busy spin)
    pub idle_strategy: IdleStrategyKind,
}

impl Default for ManagedTransportConfig {
    fn default() -> Self {
        Self {
            fragment_limit: DEFAULT_FRAGMENT_LIMIT as i64,
            offer_max_attempts: DEFAULT_OFFER_MAX_ATTEMPTS as i64,
            idle_strategy: IdleStrategyKind::default(),
        }
    }
}

impl ManagedTransportConfig {
    pub fn fragment_limit(&self) -> usize {
        if self.fragment_limit > 0 {
            usize::try_from(self.fragment_limit).unwrap_or(usize::MAX)
        } else {
            DEFAULT_FRAGMENT_LIMIT
        }
    }

    pub fn offer_max_attempts(&self) -> u32 {
        if self.offer_max_attempts > 0 {
            u32::try_from(self.offer_max_attempts).unwrap_or(u32::MAX)
        } else {
            DEFAULT_OFFER_MAX_ATTEMPTS
        }
    }

    pub fn with_fragment_limit(mut self, limit: i64) -> Self {
        self.fragment_limit = limit;
        self
    }

    pub fn with_offer_max_attempts(mut self, attempts: i64) -> Self {
        self.offer_max_attempts = attempts;
        self
    }

    pub fn with_idle_strategy(mut self, idle_strategy: IdleStrategyKind) -> Self {
        self.idle_strategy = idle_strategy;
        self
    }

    /// Reject settings that cannot fall back to a default.
    pub fn validate(&self) -> Result<(), TransportError> {
        if let IdleStrategyKind::SleepBackoff {
            min_sleep_us,
            max_sleep_us,
        } = self.idle_strategy
        {
            if min_sleep_us > max_sleep_us {
                return Err(TransportError::configuration(
                    format!(
                        "sleep backoff min {}us exceeds max {}us",
                        min_sleep_us, max_sleep_us
                    ),
                    Some("idle_strategy"),
                ));
            }
        }
        Ok(())
    }
}
