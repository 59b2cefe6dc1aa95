//! Transport Error Types

use codec::ProtocolError;
use thiserror::Error;

use crate::transports::OfferFailure;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// Every offer attempt failed; terminal for this send. Nothing is re-queued.
    #[error("Offer exhausted after {attempts} attempts (last failure: {last_failure})")]
    Exhausted {
        attempts: u32,
        last_failure: OfferFailure,
    },

    /// Operation on a transport after `close()`
    #[error("Transport closed: cannot {operation}")]
    Closed { operation: String },

    /// Inbound frame rejected by the codec, e.g. an unsupported version
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration {
        message: String,
        field: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, TransportError>;

impl TransportError {
    pub fn exhausted(attempts: u32, last_failure: OfferFailure) -> Self {
        Self::Exhausted {
            attempts,
            last_failure,
        }
    }

    pub fn closed(operation: impl Into<String>) -> Self {
        Self::Closed {
            operation: operation.into(),
        }
    }

    pub fn configuration(message: impl Into<String>, field: Option<&str>) -> Self {
        Self::Configuration {
            message: message.into(),
            field: field.map(|s| s.to_string()),
        }
    }

    /// Back pressure is the one failure where draining the subscriber and
    /// resending has a chance of succeeding.
    pub fn is_back_pressure(&self) -> bool {
        matches!(
            self,
            Self::Exhausted {
                last_failure: OfferFailure::BackPressure,
                ..
            }
        )
    }
}
