//! Component and reinforcer tabulation.
//!
//! Reinforcer-driven count tables computed in one pass over a formal record:
//!
//! - [`factorial_counts`]: responses by "reinforcers delivered so far in this
//!   component";
//! - [`preference_pulse`]: responses by time since the last reinforcer, split
//!   by the type of that reinforcer.
//!
//! In every row the component reset is applied first, then the reinforcer
//! count, then the response.

use crate::error::{ScanError, require_finite};
use crate::labels::LabelSet;
use crate::matrix::{CountMatrix, MAX_CELLS};
use crate::role::Role;
use crate::timeline::Timeline;

/// Counts responses by reinforcer ordinal within the current component.
///
/// Row `r` of the result holds responses made after the `r`-th reinforcer of
/// the component (row 0: before the first). Columns follow `response_labels`.
/// A component that delivers more than `max_reinforcers` reinforcers fails the
/// whole computation with [`ScanError::ConfigurationExceeded`]. An empty
/// `component_labels` set treats the record as one component.
pub fn factorial_counts(
    timeline: &Timeline,
    reinforcer_labels: &LabelSet,
    component_labels: &LabelSet,
    response_labels: &LabelSet,
    max_reinforcers: u32,
) -> Result<CountMatrix, ScanError> {
    reinforcer_labels.require_members(Role::Reinforcer)?;
    response_labels.require_members(Role::Response)?;

    let reinforcer_match = reinforcer_labels.matches(timeline);
    let component_match = component_labels.matches(timeline);
    let response_match = response_labels.matches(timeline);

    let rows = usize::try_from(max_reinforcers)
        .ok()
        .and_then(|max| max.checked_add(1))
        .ok_or(ScanError::InvalidParameter {
            name: "max_reinforcers",
            reason: "too large for this platform",
        })?;
    let mut table = CountMatrix::zeros(rows, response_labels.len())?;
    let mut delivered: u32 = 0;

    for i in 0..timeline.len() {
        if component_match.is_match(i) {
            delivered = 0;
        }
        if reinforcer_match.is_match(i) {
            delivered += 1;
            if delivered > max_reinforcers {
                return Err(ScanError::ConfigurationExceeded {
                    what: "reinforcers per component",
                    limit: max_reinforcers,
                    observed: delivered,
                });
            }
        }
        if let Some(response) = response_match.get(i) {
            table.increment(delivered as usize, response);
        }
    }

    tracing::debug!(
        rows = timeline.len(),
        responses = table.total(),
        "factorial counts complete"
    );

    Ok(table)
}

/// Settings for [`preference_pulse`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseConfig {
    /// Longest inter-reinforcer interval to tabulate.
    pub max_iri: f64,
    /// Time covered by one bin.
    pub bin_resolution: f64,
    /// Bins subtracted from every response bin.
    pub offset_bins: u32,
}

/// Response counts by bins since the most recent reinforcer.
///
/// Returns one `n_bins × n_responses` table per reinforcer type, where
/// `n_bins = floor(ceil(max_iri) / bin_resolution)`. Times are binned with
/// `floor(time / bin_resolution)` before subtracting. A response counts only
/// after a reinforcer in the current component, in the table of that
/// reinforcer's type, and only when its bin falls inside the table.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "bin values are range-checked before the cast"
)]
pub fn preference_pulse(
    timeline: &Timeline,
    reinforcer_labels: &LabelSet,
    component_labels: &LabelSet,
    response_labels: &LabelSet,
    config: &PulseConfig,
) -> Result<Vec<CountMatrix>, ScanError> {
    reinforcer_labels.require_members(Role::Reinforcer)?;
    response_labels.require_members(Role::Response)?;
    require_finite("max_iri", config.max_iri)?;
    if config.max_iri < 0.0 {
        return Err(ScanError::InvalidParameter {
            name: "max_iri",
            reason: "must not be negative",
        });
    }
    if !(config.bin_resolution.is_finite() && config.bin_resolution > 0.0) {
        return Err(ScanError::InvalidParameter {
            name: "bin_resolution",
            reason: "must be finite and positive",
        });
    }

    let n_bins = (config.max_iri.ceil() / config.bin_resolution).floor();
    if n_bins > MAX_CELLS as f64 {
        return Err(ScanError::InvalidParameter {
            name: "bin_resolution",
            reason: "yields more bins than a count table can hold",
        });
    }
    let n_bins = n_bins as usize;

    let reinforcer_match = reinforcer_labels.matches(timeline);
    let component_match = component_labels.matches(timeline);
    let response_match = response_labels.matches(timeline);

    let mut tables =
        vec![CountMatrix::zeros(n_bins, response_labels.len())?; reinforcer_labels.len()];
    let mut last_reinforcer: Option<(f64, usize)> = None;

    for (i, &time) in timeline.times().iter().enumerate() {
        let bin = (time / config.bin_resolution).floor();

        if component_match.is_match(i) {
            last_reinforcer = None;
        }
        if let Some(kind) = reinforcer_match.get(i) {
            last_reinforcer = Some((bin, kind));
        }

        let (Some((reinforcer_bin, kind)), Some(response)) =
            (last_reinforcer, response_match.get(i))
        else {
            continue;
        };

        let since = bin - reinforcer_bin - f64::from(config.offset_bins);
        if since >= 0.0 && since < n_bins as f64 {
            tables[kind].increment(since as usize, response);
        }
    }

    tracing::debug!(
        rows = timeline.len(),
        n_bins,
        tables = tables.len(),
        "preference pulse complete"
    );

    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Timeline {
        Timeline::new([
            (0.0, "start"),
            (0.5, "L"),
            (1.0, "food_left"),
            (1.5, "L"),
            (2.2, "R"),
            (3.0, "food_right"),
            (3.1, "L"),
            (10.0, "L"),
            (11.0, "start"),
            (11.5, "R"),
            (12.0, "food_left"),
            (12.4, "R"),
        ])
    }

    fn labels() -> (LabelSet, LabelSet, LabelSet) {
        (
            LabelSet::new(["food_left", "food_right"]),
            LabelSet::single("start"),
            LabelSet::new(["L", "R"]),
        )
    }

    #[test]
    fn counts_responses_by_reinforcer_ordinal() {
        let (food, start, responses) = labels();
        let table = factorial_counts(&session(), &food, &start, &responses, 2).unwrap();

        assert_eq!(
            table.to_rows(),
            vec![vec![1, 1], vec![1, 2], vec![2, 0]]
        );
    }

    #[test]
    fn too_many_reinforcers_abort() {
        let (food, start, responses) = labels();
        let err = factorial_counts(&session(), &food, &start, &responses, 1).unwrap_err();

        assert_eq!(
            err,
            ScanError::ConfigurationExceeded {
                what: "reinforcers per component",
                limit: 1,
                observed: 2,
            }
        );
    }

    #[test]
    fn without_components_the_count_never_resets() {
        let (food, _, responses) = labels();
        let table =
            factorial_counts(&session(), &food, &LabelSet::default(), &responses, 3).unwrap();

        assert_eq!(table.row(3), Some(&[0, 1][..]));
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn factorial_counts_need_reinforcers_and_responses() {
        let (food, start, responses) = labels();
        let empty = LabelSet::default();
        assert_eq!(
            factorial_counts(&session(), &empty, &start, &responses, 2),
            Err(ScanError::EmptyLabelSet {
                role: Role::Reinforcer
            })
        );
        assert_eq!(
            factorial_counts(&session(), &food, &start, &empty, 2),
            Err(ScanError::EmptyLabelSet {
                role: Role::Response
            })
        );
    }

    #[test]
    fn pulse_splits_by_reinforcer_type() {
        let (food, start, responses) = labels();
        let config = PulseConfig {
            max_iri: 4.5,
            bin_resolution: 1.0,
            offset_bins: 0,
        };
        let tables = preference_pulse(&session(), &food, &start, &responses, &config).unwrap();

        assert_eq!(tables.len(), 2);
        // 5 bins; 12.4 shares bin 12 with its reinforcer.
        assert_eq!(
            tables[0].to_rows(),
            vec![vec![1, 1], vec![0, 1], vec![0, 0], vec![0, 0], vec![0, 0]]
        );
        // 3.1 lands in bin 0; 10.0 is past the table.
        assert_eq!(tables[1].get(0, 0), 1);
        assert_eq!(tables[1].total(), 1);
    }

    #[test]
    fn pulse_offset_shifts_bins_down() {
        let (food, start, responses) = labels();
        let config = PulseConfig {
            max_iri: 4.0,
            bin_resolution: 1.0,
            offset_bins: 1,
        };
        let tables = preference_pulse(&session(), &food, &start, &responses, &config).unwrap();

        // Only the response one bin after its reinforcer survives the shift.
        assert_eq!(tables[0].to_rows()[0], vec![0, 1]);
        assert_eq!(tables[0].total(), 1);
        assert_eq!(tables[1].total(), 0);
    }

    #[test]
    fn pulse_rejects_bad_parameters() {
        let (food, start, responses) = labels();
        let bad_resolution = PulseConfig {
            max_iri: 4.0,
            bin_resolution: 0.0,
            offset_bins: 0,
        };
        assert!(matches!(
            preference_pulse(&session(), &food, &start, &responses, &bad_resolution),
            Err(ScanError::InvalidParameter {
                name: "bin_resolution",
                ..
            })
        ));

        let negative_iri = PulseConfig {
            max_iri: -1.0,
            ..bad_resolution
        };
        assert!(matches!(
            preference_pulse(&session(), &food, &start, &responses, &negative_iri),
            Err(ScanError::InvalidParameter { name: "max_iri", .. })
        ));
    }

    #[test]
    fn pulse_with_too_many_bins_is_an_error() {
        let (food, start, responses) = labels();
        let config = PulseConfig {
            max_iri: 1e7,
            bin_resolution: 1e-12,
            offset_bins: 0,
        };
        assert!(matches!(
            preference_pulse(&session(), &food, &start, &responses, &config),
            Err(ScanError::InvalidParameter {
                name: "bin_resolution",
                ..
            })
        ));
    }

    #[test]
    fn factorial_with_oversized_table_is_an_error() {
        let (food, start, responses) = labels();
        assert!(matches!(
            factorial_counts(&session(), &food, &start, &responses, u32::MAX),
            Err(ScanError::InvalidParameter { .. })
        ));
    }
}
