//! Local-time profiles for many subjects at once.
//!
//! Each subject is independent, so profiles are computed in parallel with
//! rayon and reported in input order.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::ScanError;
use crate::histogram::{Histogram, bin_histogram};
use crate::local_time::{LocalTimes, local_times_formal};
use crate::timeline::Timeline;

/// Everything needed to turn one formal record into a binned profile.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalTimeQuery {
    pub event_label: String,
    pub marker_label: String,
    pub event_offset: f64,
    pub n_markers: u32,
    pub max_bin: u32,
    pub bin_resolution: f64,
}

/// One subject's record.
#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub id: String,
    pub timeline: Timeline,
}

/// Local times and their histogram for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectProfile {
    pub id: String,
    #[serde(flatten)]
    pub local_times: LocalTimes,
    pub histogram: Histogram,
}

impl Subject {
    /// Runs the local-time scan and bins the result.
    pub fn profile(&self, query: &LocalTimeQuery) -> Result<SubjectProfile, ScanError> {
        let local_times = local_times_formal(
            &self.timeline,
            &query.event_label,
            &query.marker_label,
            query.event_offset,
            query.n_markers,
        )?;
        let histogram = bin_histogram(
            &local_times.local_times,
            &local_times.visit_lengths,
            query.max_bin,
            query.bin_resolution,
        )?;

        Ok(SubjectProfile {
            id: self.id.clone(),
            local_times,
            histogram,
        })
    }
}

/// Profiles every subject in parallel.
///
/// Fails on the first subject (in input order) whose scan fails, wrapping its
/// error in [`ScanError::Subject`].
pub fn profile_subjects(
    subjects: &[Subject],
    query: &LocalTimeQuery,
) -> Result<Vec<SubjectProfile>, ScanError> {
    // Collected per subject first so the reported failure does not depend on
    // thread scheduling.
    let results: Vec<Result<SubjectProfile, ScanError>> = subjects
        .par_iter()
        .map(|subject| {
            subject.profile(query).map_err(|e| {
                tracing::warn!(subject = %subject.id, error = %e, "subject scan failed");
                ScanError::Subject {
                    subject: subject.id.clone(),
                    source: Box::new(e),
                }
            })
        })
        .collect();
    let profiles = results.into_iter().collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(subjects = profiles.len(), "profiled subjects");

    Ok(profiles)
}

/// Sums the histograms of all profiles. `None` for an empty slice.
pub fn pool_profiles(profiles: &[SubjectProfile]) -> Result<Option<Histogram>, ScanError> {
    let mut iter = profiles.iter();
    let Some(first) = iter.next() else {
        return Ok(None);
    };

    let mut pooled = first.histogram.clone();
    for profile in iter {
        pooled.merge(&profile.histogram)?;
    }
    Ok(Some(pooled))
}
