//! Protocol-level errors for identifier packing and frame decoding
//!
//! Each variant carries enough context to say which field or byte was wrong
//! without re-inspecting the input.

use thiserror::Error;

use crate::constants::FRAME_VERSION;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    /// An actor identifier field does not fit its bit allocation
    #[error("Actor id field {field} out of range: {value} not in [0, {max}]")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        max: u64,
    },

    /// Frame version byte is not one this codec understands
    #[error("Unsupported frame version {version}: supported versions are {supported_versions}")]
    UnsupportedVersion {
        version: u8,
        supported_versions: String,
    },

    /// Buffer is too small to contain a complete frame
    #[error("Message too small: need {need} bytes, got {got} (context: {context})")]
    MessageTooSmall {
        need: usize,
        got: usize,
        context: String,
    },
}

impl ProtocolError {
    pub fn field_out_of_range(field: &'static str, value: i64, max: u64) -> Self {
        Self::FieldOutOfRange { field, value, max }
    }

    pub fn unsupported_version(version: u8) -> Self {
        Self::UnsupportedVersion {
            version,
            supported_versions: FRAME_VERSION.to_string(),
        }
    }

    pub fn message_too_small(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::MessageTooSmall {
            need,
            got,
            context: context.into(),
        }
    }

    /// Validation failures are caller mistakes; the other variants describe
    /// bytes received from elsewhere.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::FieldOutOfRange { .. })
    }
}

pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
