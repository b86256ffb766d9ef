//! Implementation of the `evt intervals` command.

use std::io::Write;

use anyhow::{Context, Result};
use evt_core::{IntervalConfig, Timeline, interval_scan};

use super::input::{label_set, optional_labels, read_timeline, write_json};
use crate::{Config, IntervalsArgs};

/// Run the intervals command.
pub fn run<W: Write>(out: &mut W, args: &IntervalsArgs, config: &Config) -> Result<()> {
    let timeline = read_timeline(&args.file, config.validate_order)?;
    execute(out, &timeline, args)
}

fn execute<W: Write>(out: &mut W, timeline: &Timeline, args: &IntervalsArgs) -> Result<()> {
    let x_labels = label_set("x", &args.x_labels)?;
    let y_labels = optional_labels("y", &args.y_labels)?;
    let break_labels = optional_labels("break", &args.break_labels)?;
    let scan_config = IntervalConfig {
        offset: args.offset,
        rearm: args.rearm,
    };

    let scan = interval_scan(
        timeline,
        &x_labels,
        y_labels.as_ref(),
        break_labels.as_ref(),
        &scan_config,
    )
    .context("interval scan failed")?;

    tracing::debug!(
        latencies = scan.latencies.len(),
        mode = if y_labels.is_some() { "ixyi" } else { "ixxi" },
        "intervals computed"
    );

    write_json(out, &scan)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use evt_core::Rearm;
    use insta::assert_snapshot;

    use super::*;

    fn args(x: &[&str], y: &[&str], rearm: Rearm) -> IntervalsArgs {
        IntervalsArgs {
            file: PathBuf::from("unused.json"),
            x_labels: x.iter().map(ToString::to_string).collect(),
            y_labels: y.iter().map(ToString::to_string).collect(),
            break_labels: Vec::new(),
            offset: 0.0,
            rearm,
        }
    }

    fn render(timeline: &Timeline, args: &IntervalsArgs) -> String {
        let mut out = Vec::new();
        execute(&mut out, timeline, args).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn sample() -> Timeline {
        Timeline::new([(0.0, "A"), (3.0, "B"), (4.0, "A"), (4.0, "A"), (10.0, "B")])
    }

    #[test]
    fn test_intervals_ixyi() {
        let output = render(&sample(), &args(&["A"], &["B"], Rearm::Hold));
        assert_snapshot!(output.trim_end(), @r#"{"latencies":[3.0,6.0],"pair_codes":[0,0],"pair_counts":{"rows":1,"cols":1,"counts":[2]}}"#);
    }

    #[test]
    fn test_intervals_ixxi_without_y() {
        let output = render(&sample(), &args(&["A"], &[], Rearm::Hold));
        assert_snapshot!(output.trim_end(), @r#"{"latencies":[4.0,0.0],"pair_codes":[0,0],"pair_counts":{"rows":1,"cols":1,"counts":[2]}}"#);
    }

    #[test]
    fn test_intervals_blank_y_label_is_an_error() {
        let mut out = Vec::new();
        let err = execute(&mut out, &sample(), &args(&["A"], &["", "B"], Rearm::Hold)).unwrap_err();
        assert_eq!(err.to_string(), "--y contains an empty label");
        assert!(out.is_empty());
    }

    #[test]
    fn test_intervals_empty_x_is_an_error() {
        let mut out = Vec::new();
        let err = execute(&mut out, &sample(), &args(&[], &["B"], Rearm::Hold)).unwrap_err();
        assert!(format!("{err:#}").contains("x label set cannot be empty"));
        assert!(out.is_empty());
    }
}
