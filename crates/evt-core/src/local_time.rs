//! Response times local to a recurring marker.
//!
//! A marker opens a visit that lasts until the next marker. Each qualifying
//! event in the visit gets the local time
//! `event.time - marker.time + k * event_offset`, where `k` counts earlier
//! events in the same visit (0-based, reset at every marker).
//!
//! Two record shapes are supported with the same semantics:
//!
//! - formal records ([`local_times_formal`]): a labelled [`Timeline`];
//! - ragged records ([`local_times_ragged`]): separate sorted arrays of event
//!   and marker timestamps.
//!
//! Both report, per visit, its length (the last local time recorded inside it,
//! `0.0` when the visit had no events) and its number of events.

use serde::Serialize;

use crate::error::{ScanError, require_finite};
use crate::labels::require_label;
use crate::role::Role;
use crate::timeline::Timeline;

/// Local times and per-visit summaries produced by a local-time scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocalTimes {
    /// One entry per qualifying event, in record order.
    pub local_times: Vec<f64>,

    /// Last local time recorded in each visit.
    pub visit_lengths: Vec<f64>,

    /// Number of events recorded in each visit.
    pub visit_event_counts: Vec<usize>,
}

impl LocalTimes {
    /// Number of visits reported.
    pub fn visits(&self) -> usize {
        self.visit_lengths.len()
    }
}

/// Accumulates the events of the visit currently open.
#[derive(Debug, Clone, Copy)]
struct Visit {
    start: f64,
    events: usize,
    last_local: Option<f64>,
}

impl Visit {
    const fn open(start: f64) -> Self {
        Self {
            start,
            events: 0,
            last_local: None,
        }
    }

    // Plain arithmetic keeps offset results bit-identical to zero-offset ones
    // plus `k * event_offset`.
    #[allow(clippy::suboptimal_flops)]
    fn record(&mut self, time: f64, event_offset: f64, out: &mut LocalTimes) {
        let local = time - self.start + self.events as f64 * event_offset;
        out.local_times.push(local);
        self.last_local = Some(local);
        self.events += 1;
    }

    fn close(self, out: &mut LocalTimes) {
        out.visit_lengths.push(self.last_local.unwrap_or(0.0));
        out.visit_event_counts.push(self.events);
    }
}

/// Local times over a formal record, bounded by a marker count.
///
/// Events are recorded only while `0 < markers_seen < n_markers`; the
/// `n_markers`-th marker ends the scan. Events before the first marker are
/// ignored, and a timeline without markers yields an empty result. When a row
/// matches both labels the event is recorded first and the marker then closes
/// the visit. A visit still open at the end of the stream is reported only if
/// it recorded at least one event.
pub fn local_times_formal(
    timeline: &Timeline,
    event_label: &str,
    marker_label: &str,
    event_offset: f64,
    n_markers: u32,
) -> Result<LocalTimes, ScanError> {
    let event_match = require_label(event_label, Role::Event)?.matches(timeline);
    let marker_match = require_label(marker_label, Role::Marker)?.matches(timeline);
    require_finite("event_offset", event_offset)?;

    let mut out = LocalTimes::default();
    let mut visit: Option<Visit> = None;
    let mut markers_seen: u32 = 0;
    let mut bounded = false;

    for (i, &time) in timeline.times().iter().enumerate() {
        if event_match.is_match(i) {
            if let Some(open) = visit.as_mut() {
                open.record(time, event_offset, &mut out);
            }
        }

        if marker_match.is_match(i) {
            if let Some(done) = visit.take() {
                done.close(&mut out);
            }
            markers_seen += 1;
            if markers_seen >= n_markers {
                bounded = true;
                break;
            }
            visit = Some(Visit::open(time));
        }
    }

    if !bounded {
        if let Some(open) = visit.filter(|v| v.events > 0) {
            open.close(&mut out);
        }
    }

    tracing::debug!(
        rows = timeline.len(),
        markers = markers_seen,
        events = out.local_times.len(),
        visits = out.visits(),
        bounded,
        "formal local-time scan complete"
    );

    Ok(out)
}

/// Bounds-checked read cursor over one timestamp column.
struct Cursor<'a> {
    name: &'static str,
    values: &'a [f64],
    index: usize,
}

impl<'a> Cursor<'a> {
    const fn new(name: &'static str, values: &'a [f64]) -> Self {
        Self {
            name,
            values,
            index: 0,
        }
    }

    fn current(&self) -> Result<f64, ScanError> {
        self.values
            .get(self.index)
            .copied()
            .ok_or(ScanError::OutOfRange {
                cursor: self.name,
                index: self.index,
                len: self.values.len(),
            })
    }

    const fn advance(&mut self) {
        self.index += 1;
    }
}

/// Local times over a ragged record.
///
/// Events at or before the first marker are skipped. Then, for each adjacent
/// marker pair, every event in `(marker[i], marker[i + 1]]` is recorded
/// relative to `marker[i]`. The event cursor has to see the first event past
/// a visit to know the visit is complete. So `event_times` must extend beyond
/// the final marker, and `marker_times` must not be empty. When either cursor
/// would read past the end of its column the scan fails with
/// [`ScanError::OutOfRange`] instead of returning a truncated result.
pub fn local_times_ragged(
    event_times: &[f64],
    marker_times: &[f64],
    event_offset: f64,
) -> Result<LocalTimes, ScanError> {
    require_finite("event_offset", event_offset)?;

    let mut events = Cursor::new("event_times", event_times);
    let first_marker = Cursor::new("marker_times", marker_times).current()?;

    while events.current()? <= first_marker {
        events.advance();
    }

    let mut out = LocalTimes::default();
    for bounds in marker_times.windows(2) {
        let (start, end) = (bounds[0], bounds[1]);
        let mut visit = Visit::open(start);

        loop {
            let time = events.current()?;
            if time <= start || time > end {
                break;
            }
            visit.record(time, event_offset, &mut out);
            events.advance();
        }
        visit.close(&mut out);
    }

    tracing::debug!(
        markers = marker_times.len(),
        events = out.local_times.len(),
        visits = out.visits(),
        "ragged local-time scan complete"
    );

    Ok(out)
}
