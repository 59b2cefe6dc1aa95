//! Test-vector parsing and verification errors

use std::path::PathBuf;

use thiserror::Error;
use types::EpochResult;

#[derive(Debug, Error)]
pub enum VectorError {
    #[error("Failed to read vector file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A non-comment line could not be parsed
    #[error("Vector parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Result count mismatch: expected {expected}, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Vector mismatch at index {index}: expected {expected:?}, got {actual:?}")]
    ResultMismatch {
        index: usize,
        expected: EpochResult,
        actual: EpochResult,
    },
}

impl VectorError {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            reason: reason.into(),
        }
    }
}
