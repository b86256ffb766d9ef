//! Normalized event timelines.
//!
//! A [`Timeline`] is the formal record: one row per tick, each row a time and a
//! label (an empty label marks a tick with no event). Labels are interned once
//! when the timeline is built so that label sets can be resolved against the
//! vocabulary instead of comparing strings at every position.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// A single `(time, label)` row of an event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// When the event occurred.
    pub time: f64,
    /// The event label. Empty for ticks without an event.
    #[serde(default)]
    pub label: String,
}

impl EventRecord {
    pub fn new(time: f64, label: impl Into<String>) -> Self {
        Self {
            time,
            label: label.into(),
        }
    }
}

/// An ordered event record with interned labels.
///
/// Rows are expected in non-decreasing time order. Construction never sorts;
/// call [`Timeline::validate_order`] to check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<EventRecord>", into = "Vec<EventRecord>")]
pub struct Timeline {
    times: Vec<f64>,
    /// Per-row index into `vocabulary`.
    symbols: Vec<usize>,
    vocabulary: Vec<String>,
}

impl Timeline {
    /// Builds a timeline from `(time, label)` pairs.
    pub fn new<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = (f64, S)>,
        S: AsRef<str>,
    {
        let records = records.into_iter();
        let mut builder = Builder::with_capacity(records.size_hint().0);
        for (time, label) in records {
            builder.push(time, label.as_ref());
        }
        builder.finish()
    }

    /// Builds a timeline from parallel time and label columns.
    pub fn from_columns(times: Vec<f64>, labels: &[String]) -> Result<Self, ScanError> {
        if times.len() != labels.len() {
            return Err(ScanError::LengthMismatch {
                left: "times",
                left_len: times.len(),
                right: "labels",
                right_len: labels.len(),
            });
        }

        let mut builder = Builder::with_capacity(times.len());
        for (time, label) in times.into_iter().zip(labels) {
            builder.push(time, label);
        }
        Ok(builder.finish())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Row timestamps, in record order.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Time of row `index`.
    pub fn time(&self, index: usize) -> Option<f64> {
        self.times.get(index).copied()
    }

    /// Label of row `index`.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.symbols
            .get(index)
            .map(|&symbol| self.vocabulary[symbol].as_str())
    }

    /// Distinct labels in first-seen order.
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Per-row vocabulary indices.
    pub(crate) fn symbols(&self) -> &[usize] {
        &self.symbols
    }

    /// Iterates rows as `(time, label)`.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &str)> + '_ {
        self.times
            .iter()
            .zip(&self.symbols)
            .map(|(&time, &symbol)| (time, self.vocabulary[symbol].as_str()))
    }

    /// Checks that timestamps never decrease.
    pub fn validate_order(&self) -> Result<(), ScanError> {
        validate_sorted(&self.times, "timeline")
    }

    /// Returns a new timeline with only the rows whose mask entry is `true`.
    pub fn retain_mask(&self, keep: &[bool]) -> Result<Self, ScanError> {
        if keep.len() != self.len() {
            return Err(ScanError::LengthMismatch {
                left: "keep mask",
                left_len: keep.len(),
                right: "timeline",
                right_len: self.len(),
            });
        }

        Ok(Self::new(
            self.iter()
                .zip(keep)
                .filter_map(|(row, &kept)| kept.then_some(row)),
        ))
    }
}

/// Checks that a column of timestamps is non-decreasing.
///
/// NaN entries are reported as out of order.
pub fn validate_sorted(values: &[f64], field: &'static str) -> Result<(), ScanError> {
    for (index, pair) in values.windows(2).enumerate() {
        let (previous, current) = (pair[0], pair[1]);
        if current.partial_cmp(&previous).is_none_or(|ord| ord.is_lt()) {
            return Err(ScanError::NonMonotonic {
                field,
                index: index + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}

impl From<Vec<EventRecord>> for Timeline {
    fn from(records: Vec<EventRecord>) -> Self {
        Self::new(records.into_iter().map(|r| (r.time, r.label)))
    }
}

impl From<Timeline> for Vec<EventRecord> {
    fn from(timeline: Timeline) -> Self {
        timeline
            .iter()
            .map(|(time, label)| EventRecord::new(time, label))
            .collect()
    }
}

struct Builder {
    times: Vec<f64>,
    symbols: Vec<usize>,
    vocabulary: Vec<String>,
    lookup: HashMap<String, usize>,
}

impl Builder {
    fn with_capacity(rows: usize) -> Self {
        Self {
            times: Vec::with_capacity(rows),
            symbols: Vec::with_capacity(rows),
            vocabulary: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    fn push(&mut self, time: f64, label: &str) {
        let symbol = match self.lookup.get(label) {
            Some(&symbol) => symbol,
            None => {
                let symbol = self.vocabulary.len();
                self.vocabulary.push(label.to_string());
                self.lookup.insert(label.to_string(), symbol);
                symbol
            }
        };
        self.times.push(time);
        self.symbols.push(symbol);
    }

    fn finish(self) -> Timeline {
        Timeline {
            times: self.times,
            symbols: self.symbols,
            vocabulary: self.vocabulary,
        }
    }
}
