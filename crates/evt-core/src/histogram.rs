//! Fixed-resolution binning of local times and visit lengths.
//!
//! The two arrays mean different things:
//!
//! - `response_bins[b]` is a plain frequency count of local times in bin `b`.
//! - `visit_bins[b]` counts the visits still running at bin `b`, i.e. visits
//!   whose scaled length is at least `b`. It is a reverse-cumulative
//!   ("at risk") count, so dividing the first by the second gives a
//!   response rate per bin.

use serde::Serialize;

use crate::error::ScanError;

/// Response and at-risk visit counts over bins `0..=max_bin`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// Time covered by one bin.
    pub bin_resolution: f64,

    /// Local times per bin.
    pub response_bins: Vec<u64>,

    /// Visits whose length reaches each bin.
    pub visit_bins: Vec<u64>,
}

impl Histogram {
    /// Highest bin index.
    pub fn max_bin(&self) -> usize {
        self.response_bins.len().saturating_sub(1)
    }

    /// Responses per visit at risk, per bin. `None` where no visit reaches the bin.
    pub fn response_rate(&self) -> Vec<Option<f64>> {
        self.response_bins
            .iter()
            .zip(&self.visit_bins)
            .map(|(&responses, &visits)| (visits > 0).then(|| responses as f64 / visits as f64))
            .collect()
    }

    /// Adds another histogram's counts into this one.
    ///
    /// Both must share bin count and resolution.
    pub fn merge(&mut self, other: &Self) -> Result<(), ScanError> {
        if other.response_bins.len() != self.response_bins.len() {
            return Err(ScanError::LengthMismatch {
                left: "histogram bins",
                left_len: self.response_bins.len(),
                right: "merged histogram bins",
                right_len: other.response_bins.len(),
            });
        }
        if other.bin_resolution.to_bits() != self.bin_resolution.to_bits() {
            return Err(ScanError::InvalidParameter {
                name: "bin_resolution",
                reason: "merged histograms must share a bin resolution",
            });
        }

        for (mine, theirs) in self.response_bins.iter_mut().zip(&other.response_bins) {
            *mine += theirs;
        }
        for (mine, theirs) in self.visit_bins.iter_mut().zip(&other.visit_bins) {
            *mine += theirs;
        }
        Ok(())
    }
}

/// Bins local times and visit lengths at `bin_resolution` time units per bin.
///
/// Local times are divided by the resolution and truncated toward zero. Bin
/// indices above `max_bin` are dropped without error. So are negative indices
/// and non-finite values. A visit counts toward every bin `b` with
/// `b <= length / bin_resolution`; negative lengths count nowhere.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "indices are range-checked before the cast"
)]
pub fn bin_histogram(
    local_times: &[f64],
    visit_lengths: &[f64],
    max_bin: u32,
    bin_resolution: f64,
) -> Result<Histogram, ScanError> {
    if !(bin_resolution.is_finite() && bin_resolution > 0.0) {
        return Err(ScanError::InvalidParameter {
            name: "bin_resolution",
            reason: "must be finite and positive",
        });
    }

    let bins = max_bin as usize + 1;
    let mut response_bins = vec![0_u64; bins];
    let mut visit_bins = vec![0_u64; bins];

    let mut dropped = 0_usize;
    for &time in local_times {
        let index = (time / bin_resolution).trunc();
        if index.is_finite() && index >= 0.0 && index <= f64::from(max_bin) {
            response_bins[index as usize] += 1;
        } else {
            dropped += 1;
        }
    }

    for &length in visit_lengths {
        let scaled = length / bin_resolution;
        if scaled.is_nan() || scaled < 0.0 {
            continue;
        }
        let reach = scaled.floor().min(f64::from(max_bin)) as usize;
        for count in &mut visit_bins[..=reach] {
            *count += 1;
        }
    }

    tracing::debug!(
        local_times = local_times.len(),
        visits = visit_lengths.len(),
        dropped,
        bins,
        "binning complete"
    );

    Ok(Histogram {
        bin_resolution,
        response_bins,
        visit_bins,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_bins_are_frequencies() {
        let hist = bin_histogram(&[0.2, 0.9, 1.0, 2.5, 2.6], &[], 3, 1.0).unwrap();
        assert_eq!(hist.response_bins, vec![2, 1, 2, 0]);
        assert_eq!(hist.visit_bins, vec![0, 0, 0, 0]);
    }

    #[test]
    fn visit_bins_are_at_risk_counts() {
        let hist = bin_histogram(&[], &[0.0, 1.5, 3.0, 10.0], 4, 1.0).unwrap();
        assert_eq!(hist.visit_bins, vec![4, 3, 2, 2, 1]);
    }

    #[test]
    fn resolution_scales_both_inputs() {
        let hist = bin_histogram(&[0.25, 0.5, 1.4], &[1.0], 3, 0.5).unwrap();
        assert_eq!(hist.response_bins, vec![1, 1, 1, 0]);
        assert_eq!(hist.visit_bins, vec![1, 1, 1, 0]);
    }

    #[test]
    fn values_past_max_bin_are_dropped() {
        let times = [0.5, 4.0, 99.0];
        let hist = bin_histogram(&times, &[], 2, 1.0).unwrap();
        assert_eq!(hist.response_bins, vec![1, 0, 0]);
        assert!(hist.response_bins.iter().sum::<u64>() <= times.len() as u64);
    }

    #[test]
    fn negative_and_nan_values_are_dropped() {
        let hist = bin_histogram(&[-2.0, f64::NAN, -0.5], &[-1.0, f64::NAN], 2, 1.0).unwrap();
        // -0.5 truncates toward zero into bin 0.
        assert_eq!(hist.response_bins, vec![1, 0, 0]);
        assert_eq!(hist.visit_bins, vec![0, 0, 0]);
    }

    #[test]
    fn histogram_properties_hold() {
        let local_times = [0.1, 0.7, 1.2, 3.3, 3.9, 7.5, 12.0];
        let visit_lengths = [0.7, 3.9, 12.0, -1.0, 2.0];
        let hist = bin_histogram(&local_times, &visit_lengths, 8, 1.0).unwrap();

        let in_range = local_times.iter().filter(|&&t| t < 9.0).count() as u64;
        assert_eq!(hist.response_bins.iter().sum::<u64>(), in_range);

        let non_negative = visit_lengths.iter().filter(|&&l| l >= 0.0).count() as u64;
        assert_eq!(hist.visit_bins[0], non_negative);
        assert!(hist.visit_bins.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn rejects_bad_resolution() {
        for resolution in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                bin_histogram(&[], &[], 3, resolution),
                Err(ScanError::InvalidParameter {
                    name: "bin_resolution",
                    ..
                })
            ));
        }
    }

    #[test]
    fn response_rate_divides_by_visits_at_risk() {
        let hist = bin_histogram(&[0.5, 0.6, 1.5], &[1.0, 3.0], 3, 1.0).unwrap();
        assert_eq!(hist.visit_bins, vec![2, 2, 1, 1]);
        assert_eq!(
            hist.response_rate(),
            vec![Some(1.0), Some(0.5), Some(0.0), Some(0.0)]
        );

        let idle = bin_histogram(&[], &[], 1, 1.0).unwrap();
        assert_eq!(idle.response_rate(), vec![None, None]);
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = bin_histogram(&[0.5], &[1.0], 2, 1.0).unwrap();
        let b = bin_histogram(&[1.5, 2.5], &[2.0], 2, 1.0).unwrap();
        a.merge(&b).unwrap();

        assert_eq!(a.response_bins, vec![1, 1, 1]);
        assert_eq!(a.visit_bins, vec![2, 2, 1]);
        assert_eq!(a.max_bin(), 2);
    }

    #[test]
    fn merge_rejects_mismatched_shapes() {
        let mut a = bin_histogram(&[], &[], 2, 1.0).unwrap();
        let wider = bin_histogram(&[], &[], 3, 1.0).unwrap();
        let finer = bin_histogram(&[], &[], 2, 0.5).unwrap();

        assert!(matches!(
            a.merge(&wider),
            Err(ScanError::LengthMismatch { .. })
        ));
        assert!(matches!(
            a.merge(&finer),
            Err(ScanError::InvalidParameter { .. })
        ));
    }
}
