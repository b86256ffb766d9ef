//! Implementation of the `evt factorial` and `evt pulse` commands.

use std::io::Write;

use anyhow::{Context, Result};
use evt_core::{PulseConfig, Timeline, factorial_counts, preference_pulse};
use serde::Serialize;

use super::input::{label_set, read_timeline, write_json};
use crate::{Config, PulseArgs, TabulateArgs};

#[derive(Serialize)]
struct FactorialOutput<'a> {
    responses: &'a [String],
    /// Row `r`: responses after the `r`-th reinforcer of a component.
    counts: Vec<Vec<u64>>,
}

#[derive(Serialize)]
struct PulseTable<'a> {
    reinforcer: &'a str,
    counts: Vec<Vec<u64>>,
}

#[derive(Serialize)]
struct PulseOutput<'a> {
    responses: &'a [String],
    bin_resolution: f64,
    tables: Vec<PulseTable<'a>>,
}

/// Run the factorial command.
pub fn run_factorial<W: Write>(out: &mut W, args: &TabulateArgs, config: &Config) -> Result<()> {
    let timeline = read_timeline(&args.file, config.validate_order)?;
    factorial(out, &timeline, args)
}

/// Run the pulse command.
pub fn run_pulse<W: Write>(out: &mut W, args: &PulseArgs, config: &Config) -> Result<()> {
    let timeline = read_timeline(&args.file, config.validate_order)?;
    let pulse_config = PulseConfig {
        max_iri: args.max_iri,
        bin_resolution: args.resolution.unwrap_or(config.bin_resolution),
        offset_bins: args.offset_bins,
    };
    pulse(out, &timeline, args, &pulse_config)
}

fn factorial<W: Write>(out: &mut W, timeline: &Timeline, args: &TabulateArgs) -> Result<()> {
    let responses = label_set("response", &args.response_labels)?;
    let table = factorial_counts(
        timeline,
        &label_set("reinforcer", &args.reinforcer_labels)?,
        &label_set("component", &args.component_labels)?,
        &responses,
        args.max_reinforcers,
    )
    .context("factorial tabulation failed")?;

    write_json(
        out,
        &FactorialOutput {
            responses: responses.labels(),
            counts: table.to_rows(),
        },
    )
}

fn pulse<W: Write>(
    out: &mut W,
    timeline: &Timeline,
    args: &PulseArgs,
    pulse_config: &PulseConfig,
) -> Result<()> {
    let reinforcers = label_set("reinforcer", &args.reinforcer_labels)?;
    let responses = label_set("response", &args.response_labels)?;
    let tables = preference_pulse(
        timeline,
        &reinforcers,
        &label_set("component", &args.component_labels)?,
        &responses,
        pulse_config,
    )
    .context("preference pulse tabulation failed")?;

    let tables = reinforcers
        .labels()
        .iter()
        .zip(&tables)
        .map(|(label, table)| PulseTable {
            reinforcer: label,
            counts: table.to_rows(),
        })
        .collect();

    write_json(
        out,
        &PulseOutput {
            responses: responses.labels(),
            bin_resolution: pulse_config.bin_resolution,
            tables,
        },
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use insta::assert_snapshot;

    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    fn session() -> Timeline {
        Timeline::new([
            (0.0, "start"),
            (0.5, "L"),
            (1.0, "food_left"),
            (1.5, "L"),
            (2.0, "R"),
            (3.0, "food_right"),
            (3.5, "L"),
        ])
    }

    #[test]
    fn test_factorial_output() {
        let args = TabulateArgs {
            file: PathBuf::from("unused.json"),
            reinforcer_labels: strings(&["food_left", "food_right"]),
            component_labels: strings(&["start"]),
            response_labels: strings(&["L", "R"]),
            max_reinforcers: 2,
        };
        let mut out = Vec::new();
        factorial(&mut out, &session(), &args).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_snapshot!(output.trim_end(), @r#"{"responses":["L","R"],"counts":[[1,0],[1,1],[1,0]]}"#);
    }

    #[test]
    fn test_factorial_limit_is_reported() {
        let args = TabulateArgs {
            file: PathBuf::from("unused.json"),
            reinforcer_labels: strings(&["food_left", "food_right"]),
            component_labels: Vec::new(),
            response_labels: strings(&["L"]),
            max_reinforcers: 1,
        };
        let err = factorial(&mut Vec::new(), &session(), &args).unwrap_err();
        assert!(format!("{err:#}").contains("reinforcers per component"));
    }

    #[test]
    fn test_blank_component_label_is_an_error() {
        let args = TabulateArgs {
            file: PathBuf::from("unused.json"),
            reinforcer_labels: strings(&["food_left"]),
            component_labels: strings(&[""]),
            response_labels: strings(&["L"]),
            max_reinforcers: 2,
        };
        let err = factorial(&mut Vec::new(), &session(), &args).unwrap_err();
        assert_eq!(err.to_string(), "--component contains an empty label");
    }

    #[test]
    fn test_pulse_output() {
        let args = PulseArgs {
            file: PathBuf::from("unused.json"),
            reinforcer_labels: strings(&["food_left", "food_right"]),
            component_labels: strings(&["start"]),
            response_labels: strings(&["L", "R"]),
            max_iri: 2.0,
            resolution: None,
            offset_bins: 0,
        };
        let pulse_config = PulseConfig {
            max_iri: 2.0,
            bin_resolution: 1.0,
            offset_bins: 0,
        };
        let mut out = Vec::new();
        pulse(&mut out, &session(), &args, &pulse_config).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_snapshot!(output.trim_end(), @r#"{"responses":["L","R"],"bin_resolution":1.0,"tables":[{"reinforcer":"food_left","counts":[[1,0],[0,1]]},{"reinforcer":"food_right","counts":[[1,0],[0,0]]}]}"#);
    }
}
