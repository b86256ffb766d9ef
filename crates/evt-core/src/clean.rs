//! Short-interval suppression.

use crate::error::ScanError;
use crate::labels::require_label;
use crate::role::Role;
use crate::timeline::Timeline;

/// Marks y rows that follow the last x row by less than `min_gap`.
///
/// Returns a keep-mask with one entry per timeline row. A suppressed y leaves
/// the x armed, so a later y in the same short window is tested against the
/// same x. Only the first y at least `min_gap` after the x disarms it.
///
/// Re-running the filter on its own output can suppress different rows, so
/// apply it once.
pub fn clean_short(
    timeline: &Timeline,
    x_label: &str,
    y_label: &str,
    min_gap: f64,
) -> Result<Vec<bool>, ScanError> {
    let x_match = require_label(x_label, Role::X)?.matches(timeline);
    let y_match = require_label(y_label, Role::Y)?.matches(timeline);
    if min_gap.is_nan() {
        return Err(ScanError::InvalidParameter {
            name: "min_gap",
            reason: "must be a number",
        });
    }

    let mut keep = vec![true; timeline.len()];
    let mut last_x: Option<f64> = None;

    for (i, &time) in timeline.times().iter().enumerate() {
        if x_match.is_match(i) {
            last_x = Some(time);
        } else if y_match.is_match(i) {
            if let Some(x_time) = last_x {
                if time - x_time < min_gap {
                    keep[i] = false;
                } else {
                    last_x = None;
                }
            }
        }
    }

    tracing::debug!(
        rows = keep.len(),
        suppressed = keep.iter().filter(|&&k| !k).count(),
        "short-interval cleaning complete"
    );

    Ok(keep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppressed_y_keeps_x_armed() {
        let timeline = Timeline::new([(0.0, "X"), (0.5, "Y"), (1.0, "Y")]);
        let keep = clean_short(&timeline, "X", "Y", 1.0).unwrap();
        assert_eq!(keep, vec![true, false, true]);
    }

    #[test]
    fn accepted_y_disarms_x() {
        let timeline = Timeline::new([(0.0, "X"), (2.0, "Y"), (2.1, "Y")]);
        let keep = clean_short(&timeline, "X", "Y", 1.0).unwrap();
        assert_eq!(keep, vec![true, true, true]);
    }

    #[test]
    fn new_x_restarts_the_window() {
        let timeline = Timeline::new([
            (0.0, "X"),
            (0.2, "Y"),
            (3.0, "X"),
            (3.5, "Y"),
            (5.0, "Y"),
        ]);
        let keep = clean_short(&timeline, "X", "Y", 1.0).unwrap();
        assert_eq!(keep, vec![true, false, true, false, true]);
    }

    #[test]
    fn other_rows_are_always_kept() {
        let timeline = Timeline::new([
            (0.0, "X"),
            (0.1, "Z"),
            (0.2, ""),
            (0.3, "Y"),
            (0.4, "Z"),
        ]);
        let keep = clean_short(&timeline, "X", "Y", 10.0).unwrap();

        assert_eq!(keep.len(), timeline.len());
        assert_eq!(keep, vec![true, true, true, false, true]);
    }

    #[test]
    fn row_matching_both_roles_is_an_x() {
        let timeline = Timeline::new([(0.0, "X"), (0.5, "X")]);
        let keep = clean_short(&timeline, "X", "X", 1.0).unwrap();
        assert_eq!(keep, vec![true, true]);
    }

    #[test]
    fn y_without_x_is_kept() {
        let timeline = Timeline::new([(0.0, "Y"), (0.1, "Y")]);
        let keep = clean_short(&timeline, "X", "Y", 1.0).unwrap();
        assert_eq!(keep, vec![true, true]);
    }

    #[test]
    fn empty_timeline_gives_empty_mask() {
        let keep = clean_short(&Timeline::default(), "X", "Y", 1.0).unwrap();
        assert!(keep.is_empty());
    }

    #[test]
    fn rejects_blank_labels_and_nan_gap() {
        let timeline = Timeline::new([(0.0, "X")]);
        assert_eq!(
            clean_short(&timeline, "", "Y", 1.0),
            Err(ScanError::EmptyLabelSet { role: Role::X })
        );
        assert_eq!(
            clean_short(&timeline, "X", "", 1.0),
            Err(ScanError::EmptyLabelSet { role: Role::Y })
        );
        assert!(matches!(
            clean_short(&timeline, "X", "Y", f64::NAN),
            Err(ScanError::InvalidParameter { name: "min_gap", .. })
        ));
    }
}
