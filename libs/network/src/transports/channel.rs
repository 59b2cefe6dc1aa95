//! Injected publish/subscribe primitive and offer failure classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Offer result codes used by the publish/subscribe fabric.
pub mod offer_codes {
    pub const NOT_CONNECTED: i64 = -1;
    pub const BACK_PRESSURED: i64 = -2;
    pub const ADMIN_ACTION: i64 = -3;
    pub const CLOSED: i64 = -4;
    pub const MAX_POSITION_EXCEEDED: i64 = -5;
}

/// External offer/poll pair, treated as a black box.
///
/// Implementations decide what a fragment is; the managed transport only
/// ever offers complete frames and decodes what `poll` hands back.
pub trait PubSubChannel {
    /// Try once to publish `frame`. Non-negative means accepted (typically a
    /// stream position); negative is one of [`offer_codes`] or another failure.
    fn offer(&mut self, frame: &[u8]) -> i64;

    /// Deliver at most `fragment_limit` available fragments to `handler` and
    /// return how many were delivered.
    fn poll(&mut self, handler: &mut dyn FnMut(&[u8]), fragment_limit: usize) -> usize;

    fn close(&mut self);
}

impl<C: PubSubChannel + ?Sized> PubSubChannel for Box<C> {
    fn offer(&mut self, frame: &[u8]) -> i64 {
        (**self).offer(frame)
    }

    fn poll(&mut self, handler: &mut dyn FnMut(&[u8]), fragment_limit: usize) -> usize {
        (**self).poll(handler, fragment_limit)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Why an offer attempt failed. Closed set; the retry loop never looks
/// inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferFailure {
    BackPressure,
    NotConnected,
    AdminAction,
    Closed,
    Other,
}

impl OfferFailure {
    pub const ALL: [OfferFailure; 5] = [
        OfferFailure::BackPressure,
        OfferFailure::NotConnected,
        OfferFailure::AdminAction,
        OfferFailure::Closed,
        OfferFailure::Other,
    ];

    /// Classify a negative offer result. Max-position-exceeded and unknown
    /// codes fall into `Other`.
    pub fn classify(code: i64) -> Self {
        match code {
            offer_codes::BACK_PRESSURED => OfferFailure::BackPressure,
            offer_codes::NOT_CONNECTED => OfferFailure::NotConnected,
            offer_codes::ADMIN_ACTION => OfferFailure::AdminAction,
            offer_codes::CLOSED => OfferFailure::Closed,
            _ => OfferFailure::Other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OfferFailure::BackPressure => "back_pressure",
            OfferFailure::NotConnected => "not_connected",
            OfferFailure::AdminAction => "admin_action",
            OfferFailure::Closed => "closed",
            OfferFailure::Other => "other",
        }
    }
}

impl fmt::Display for OfferFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(OfferFailure::classify(-1), OfferFailure::NotConnected);
        assert_eq!(OfferFailure::classify(-2), OfferFailure::BackPressure);
        assert_eq!(OfferFailure::classify(-3), OfferFailure::AdminAction);
        assert_eq!(OfferFailure::classify(-4), OfferFailure::Closed);
    }

    #[test]
    fn test_classify_unknown_codes_as_other() {
        assert_eq!(
            OfferFailure::classify(offer_codes::MAX_POSITION_EXCEEDED),
            OfferFailure::Other
        );
        assert_eq!(OfferFailure::classify(-99), OfferFailure::Other);
        assert_eq!(OfferFailure::classify(i64::MIN), OfferFailure::Other);
    }

    #[test]
    fn test_display_matches_name() {
        for failure in OfferFailure::ALL {
            assert_eq!(failure.to_string(), failure.name());
        }
    }

    #[test]
    fn test_serialized_names_match_display() {
        for failure in OfferFailure::ALL {
            let json = serde_json::to_string(&failure).unwrap();
            assert_eq!(json, format!("\"{}\"", failure.name()));
            let back: OfferFailure = serde_json::from_str(&json).unwrap();
            assert_eq!(back, failure);
        }
    }
}
