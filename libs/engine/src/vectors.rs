//! Line-oriented test vectors.
//!
//! ```text
//! # comment
//! M,epoch,channel,source,seq,schema,payload
//! M,epoch,channel,source,seq,schema,qos,payload
//! E,epoch,state,hash
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Any other line must be
//! a well-formed `M` or `E` record.

use std::path::Path;
use std::str::FromStr;

use tracing::debug;
use types::{EpochResult, Message};

use crate::aggregate::aggregate;
use crate::error::VectorError;

/// Input messages plus the results they are expected to aggregate to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VectorSet {
    pub messages: Vec<Message>,
    pub expected: Vec<EpochResult>,
}

impl VectorSet {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VectorError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| VectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::parse(&text)?;
        debug!(
            path = %path.display(),
            messages = set.messages.len(),
            expected = set.expected.len(),
            "loaded vector file"
        );
        Ok(set)
    }

    pub fn parse(text: &str) -> Result<Self, VectorError> {
        let mut set = Self::default();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            match fields[0] {
                "M" => set.messages.push(parse_message(line_no, &fields[1..])?),
                "E" => set.expected.push(parse_expected(line_no, &fields[1..])?),
                other => {
                    return Err(VectorError::parse(
                        line_no,
                        format!("unknown record type {:?}", other),
                    ))
                }
            }
        }

        Ok(set)
    }

    /// Compare `actual` against the expected results, reporting the first
    /// difference.
    pub fn compare(&self, actual: &[EpochResult]) -> Result<(), VectorError> {
        if actual.len() != self.expected.len() {
            return Err(VectorError::CountMismatch {
                expected: self.expected.len(),
                actual: actual.len(),
            });
        }
        for (index, (expected, actual)) in self.expected.iter().zip(actual).enumerate() {
            if expected != actual {
                return Err(VectorError::ResultMismatch {
                    index,
                    expected: expected.clone(),
                    actual: actual.clone(),
                });
            }
        }
        Ok(())
    }

    /// Aggregate the messages and compare against the expected results.
    pub fn verify(&self) -> Result<Vec<EpochResult>, VectorError> {
        let results = aggregate(&self.messages);
        self.compare(&results)?;
        Ok(results)
    }
}

fn field<T: FromStr>(line: usize, name: &str, value: &str) -> Result<T, VectorError>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| VectorError::parse(line, format!("invalid {} {:?}: {}", name, value, e)))
}

fn parse_message(line: usize, fields: &[&str]) -> Result<Message, VectorError> {
    let (qos, payload) = match fields.len() {
        6 => (0, fields[5]),
        7 => (field::<u8>(line, "qos", fields[5])?, fields[6]),
        n => {
            return Err(VectorError::parse(
                line,
                format!("M record needs 6 or 7 values, got {}", n),
            ))
        }
    };

    Ok(Message {
        epoch: field(line, "epoch", fields[0])?,
        channel_id: field(line, "channel", fields[1])?,
        source_id: field(line, "source", fields[2])?,
        source_seq: field(line, "seq", fields[3])?,
        schema_id: field(line, "schema", fields[4])?,
        qos,
        payload: field(line, "payload", payload)?,
    })
}

fn parse_expected(line: usize, fields: &[&str]) -> Result<EpochResult, VectorError> {
    if fields.len() != 3 {
        return Err(VectorError::parse(
            line,
            format!("E record needs 3 values, got {}", fields.len()),
        ));
    }
    Ok(EpochResult {
        epoch: field(line, "epoch", fields[0])?,
        state: field(line, "state", fields[1])?,
        hash: fields[2].to_string(),
    })
}
