//! Error types shared by every scan.

use thiserror::Error;

use crate::role::Role;

/// Coarse classification of a [`ScanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or malformed label sets, unsorted timestamps, mismatched columns,
    /// or bad numeric parameters.
    InvalidInput,
    /// A scan cursor would read past the end of its input.
    OutOfRange,
    /// A counting scan saw more occurrences than the caller allowed.
    ConfigurationExceeded,
}

/// Errors raised by the analysis engine.
///
/// A failed scan never returns a partial result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScanError {
    /// A label set that must have members is empty.
    #[error("{role} label set cannot be empty")]
    EmptyLabelSet { role: Role },

    /// Two parallel columns differ in length.
    #[error("{left} has {left_len} entries but {right} has {right_len}")]
    LengthMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// Timestamps decrease somewhere in a column that must be sorted.
    #[error("{field} is not sorted: index {index} has {current} after {previous}")]
    NonMonotonic {
        field: &'static str,
        index: usize,
        previous: f64,
        current: f64,
    },

    /// A numeric parameter is outside its domain.
    #[error("invalid {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// A cursor would read past the end of its input.
    #[error("{cursor} cursor ran past the end of input (index {index}, length {len})")]
    OutOfRange {
        cursor: &'static str,
        index: usize,
        len: usize,
    },

    /// More occurrences than the declared maximum.
    #[error("{what} exceeded the declared maximum of {limit} (saw {observed})")]
    ConfigurationExceeded {
        what: &'static str,
        limit: u32,
        observed: u32,
    },

    /// A per-subject scan inside a batch failed.
    #[error("subject {subject}: {source}")]
    Subject {
        subject: String,
        #[source]
        source: Box<Self>,
    },
}

impl ScanError {
    /// Returns the error classification, looking through subject wrappers.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyLabelSet { .. }
            | Self::LengthMismatch { .. }
            | Self::NonMonotonic { .. }
            | Self::InvalidParameter { .. } => ErrorKind::InvalidInput,
            Self::OutOfRange { .. } => ErrorKind::OutOfRange,
            Self::ConfigurationExceeded { .. } => ErrorKind::ConfigurationExceeded,
            Self::Subject { source, .. } => source.kind(),
        }
    }
}

/// Rejects NaN and infinities for a named parameter.
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<(), ScanError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ScanError::InvalidParameter {
            name,
            reason: "must be finite",
        })
    }
}
