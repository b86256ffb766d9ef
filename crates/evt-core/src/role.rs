//! Semantic roles a label set can play in a scan.

use std::fmt;

/// The part a label set plays in a single scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Stimulus that starts a latency measurement.
    X,
    /// Response that ends a latency measurement.
    Y,
    /// Invalidates a pending, unmatched x.
    Break,
    /// Delimits visits and resets per-visit counters.
    Marker,
    /// The event whose local time is measured.
    Event,
    Reinforcer,
    Component,
    Response,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Break => "break",
            Self::Marker => "marker",
            Self::Event => "event",
            Self::Reinforcer => "reinforcer",
            Self::Component => "component",
            Self::Response => "response",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;

    #[test]
    fn roles_name_themselves_in_errors() {
        let err = ScanError::EmptyLabelSet {
            role: Role::Reinforcer,
        };
        assert_eq!(err.to_string(), "reinforcer label set cannot be empty");
        assert_eq!(Role::Break.to_string(), "break");
    }
}
