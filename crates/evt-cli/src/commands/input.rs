//! Shared input and output helpers for CLI commands.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use evt_core::{LabelSet, Timeline, validate_sorted};
use serde::{Deserialize, Serialize};

/// Event and marker timestamps stored as separate arrays.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RaggedRecord {
    pub event_times: Vec<f64>,
    pub marker_times: Vec<f64>,
}

/// Reads a timeline from a JSON array of `{"time", "label"}` records.
pub fn read_timeline(path: &Path, validate_order: bool) -> Result<Timeline> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read timeline: {}", path.display()))?;
    let timeline: Timeline = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse timeline: {}", path.display()))?;

    if validate_order {
        timeline
            .validate_order()
            .with_context(|| format!("timeline is not sorted: {}", path.display()))?;
    }

    tracing::debug!(path = %path.display(), rows = timeline.len(), "loaded timeline");
    Ok(timeline)
}

/// Reads a `{"event_times", "marker_times"}` JSON object.
pub fn read_ragged(path: &Path, validate_order: bool) -> Result<RaggedRecord> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read record: {}", path.display()))?;
    let record: RaggedRecord = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse record: {}", path.display()))?;

    if validate_order {
        validate_sorted(&record.event_times, "event_times")
            .and_then(|()| validate_sorted(&record.marker_times, "marker_times"))
            .with_context(|| format!("record is not sorted: {}", path.display()))?;
    }

    Ok(record)
}

/// Builds a label set from a comma-separated flag, rejecting blank entries.
///
/// A blank label would match every tick that carries no event.
pub fn label_set(flag: &str, labels: &[String]) -> Result<LabelSet> {
    if labels.iter().any(String::is_empty) {
        anyhow::bail!("--{flag} contains an empty label");
    }
    Ok(LabelSet::new(labels))
}

/// `None` for an empty flag list, so optional roles stay unset.
pub fn optional_labels(flag: &str, labels: &[String]) -> Result<Option<LabelSet>> {
    if labels.is_empty() {
        return Ok(None);
    }
    label_set(flag, labels).map(Some)
}

/// Writes `value` as one line of JSON.
pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("failed to serialize output")?;
    writeln!(out).context("failed to write output")?;
    Ok(())
}
