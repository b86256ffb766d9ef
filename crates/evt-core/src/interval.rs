//! Paired-event latency scans (IxYI and IxXI).
//!
//! # Algorithm Summary
//!
//! One left-to-right pass with a single piece of state, the pending x event:
//!
//! 1. Until an x event is seen nothing is emitted; the first x seeds the
//!    pending slot.
//! 2. IxYI (`y_labels` given): a y event completes the pair and emits
//!    `y.time - x.time + offset`, then a fresh x is required. An x seen while
//!    waiting is ignored or replaces the pending one depending on [`Rearm`].
//! 3. IxXI (`y_labels` absent): every x after the pending one emits and then
//!    becomes the new pending x, so intervals chain.
//! 4. A break event while waiting drops the pending x without emitting.
//!
//! Role priority within one row is y, then break, then x for IxYI while an x
//! is pending, and x, then break for IxXI.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ScanError, require_finite};
use crate::labels::{LabelSet, matches_or_none};
use crate::matrix::CountMatrix;
use crate::role::Role;
use crate::timeline::Timeline;

/// What an x event does while a previous x is still waiting for its y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rearm {
    /// Keep the earliest pending x; later x events wait for the next pair.
    #[default]
    Hold,
    /// The latest x replaces the pending one. A row that is both y and x
    /// re-arms right after emitting.
    Latest,
}

impl Rearm {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Latest => "latest",
        }
    }
}

impl fmt::Display for Rearm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rearm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hold" => Ok(Self::Hold),
            "latest" => Ok(Self::Latest),
            _ => Err(format!("invalid re-arm policy: {s}")),
        }
    }
}

/// Configuration for an interval scan.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IntervalConfig {
    /// Added to every emitted latency.
    pub offset: f64,

    /// Re-arm policy for IxYI. Ignored by IxXI, which always chains.
    pub rearm: Rearm,
}

/// Result of an interval scan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntervalScan {
    /// Emitted latencies, in emission order.
    pub latencies: Vec<f64>,

    /// Pair code of each latency (see [`CountMatrix::code`]).
    pub pair_codes: Vec<usize>,

    /// Emissions tallied by pair type. Rows index the x type; columns index
    /// the y type (IxYI) or the closing x type (IxXI).
    pub pair_counts: CountMatrix,
}

/// The x event waiting to be paired.
#[derive(Debug, Clone, Copy)]
struct Pending {
    time: f64,
    code: usize,
}

/// Computes IxYI latencies, or IxXI latencies when `y_labels` is `None`.
///
/// The timeline must already be sorted. No x event at all yields an empty
/// result, and an x still pending at the end of the stream is discarded.
pub fn interval_scan(
    timeline: &Timeline,
    x_labels: &LabelSet,
    y_labels: Option<&LabelSet>,
    break_labels: Option<&LabelSet>,
    config: &IntervalConfig,
) -> Result<IntervalScan, ScanError> {
    x_labels.require_members(Role::X)?;
    if let Some(y_labels) = y_labels {
        y_labels.require_members(Role::Y)?;
    }
    require_finite("offset", config.offset)?;

    let x_match = x_labels.matches(timeline);
    let break_match = matches_or_none(break_labels, timeline);
    let times = timeline.times();

    let mut pending: Option<Pending> = None;
    let mut latencies = Vec::new();
    let mut pair_codes = Vec::new();

    let pair_counts = match y_labels {
        Some(y_labels) => {
            let y_match = y_labels.matches(timeline);
            let mut counts = CountMatrix::zeros(x_labels.len(), y_labels.len())?;

            for (i, &time) in times.iter().enumerate() {
                let x_code = x_match.get(i);

                let Some(x) = pending else {
                    pending = x_code.map(|code| Pending { time, code });
                    continue;
                };

                if let Some(y_code) = y_match.get(i) {
                    let code = counts.code(x.code, y_code);
                    latencies.push(time - x.time + config.offset);
                    pair_codes.push(code);
                    counts.increment_code(code);
                    pending = match (config.rearm, x_code) {
                        (Rearm::Latest, Some(code)) => Some(Pending { time, code }),
                        _ => None,
                    };
                } else if break_match.is_match(i) {
                    pending = None;
                } else if let Some(code) = x_code {
                    if config.rearm == Rearm::Latest {
                        pending = Some(Pending { time, code });
                    }
                }
            }
            counts
        }
        None => {
            let mut counts = CountMatrix::zeros(x_labels.len(), x_labels.len())?;

            for (i, &time) in times.iter().enumerate() {
                if let Some(code) = x_match.get(i) {
                    if let Some(x) = pending {
                        let pair = counts.code(x.code, code);
                        latencies.push(time - x.time + config.offset);
                        pair_codes.push(pair);
                        counts.increment_code(pair);
                    }
                    pending = Some(Pending { time, code });
                } else if break_match.is_match(i) {
                    pending = None;
                }
            }
            counts
        }
    };

    tracing::debug!(
        rows = timeline.len(),
        emitted = latencies.len(),
        chained = y_labels.is_none(),
        rearm = %config.rearm,
        "interval scan complete"
    );

    Ok(IntervalScan {
        latencies,
        pair_codes,
        pair_counts,
    })
}
