//! Core analysis logic for labelled event records.
//!
//! This crate contains single-pass scans over time-ordered event streams:
//! - Interval scans: latencies from an arming event to a terminating event
//! - Short-interval cleaning: masks that drop re-arming events fired too soon
//! - Local times: response times relative to a recurring marker
//! - Binning: local times and visit lengths as fixed-resolution histograms
//! - Tabulation: response counts by reinforcer ordinal or time since reinforcer

mod batch;
mod clean;
pub mod error;
mod histogram;
mod interval;
pub mod labels;
mod local_time;
mod matrix;
pub mod role;
mod tabulate;
pub mod timeline;

pub use batch::{LocalTimeQuery, Subject, SubjectProfile, pool_profiles, profile_subjects};
pub use clean::clean_short;
pub use error::{ErrorKind, ScanError};
pub use histogram::{Histogram, bin_histogram};
pub use interval::{IntervalConfig, IntervalScan, Rearm, interval_scan};
pub use labels::{LabelSet, MatchCodes};
pub use local_time::{LocalTimes, local_times_formal, local_times_ragged};
pub use matrix::{CountMatrix, MAX_CELLS};
pub use role::Role;
pub use tabulate::{PulseConfig, factorial_counts, preference_pulse};
pub use timeline::{EventRecord, Timeline, validate_sorted};
