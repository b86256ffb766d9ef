//! Implementation of the `evt ragged` command.

use std::io::Write;

use anyhow::{Context, Result};
use evt_core::{Histogram, LocalTimes, bin_histogram, local_times_ragged};
use serde::Serialize;

use super::input::{RaggedRecord, read_ragged, write_json};
use crate::{BinArgs, Config, RaggedArgs};

#[derive(Serialize)]
struct RaggedOutput {
    #[serde(flatten)]
    local_times: LocalTimes,
    histogram: Histogram,
}

/// Run the ragged command.
pub fn run<W: Write>(out: &mut W, args: &RaggedArgs, config: &Config) -> Result<()> {
    let record = read_ragged(&args.file, config.validate_order)?;
    execute(out, &record, args.bins, config)
}

fn execute<W: Write>(
    out: &mut W,
    record: &RaggedRecord,
    bins: BinArgs,
    config: &Config,
) -> Result<()> {
    let local_times = local_times_ragged(
        &record.event_times,
        &record.marker_times,
        bins.offset.unwrap_or(config.default_event_offset),
    )
    .context("ragged local-time scan failed")?;

    let histogram = bin_histogram(
        &local_times.local_times,
        &local_times.visit_lengths,
        bins.max_bin.unwrap_or(config.max_bin),
        bins.resolution.unwrap_or(config.bin_resolution),
    )?;

    write_json(
        out,
        &RaggedOutput {
            local_times,
            histogram,
        },
    )
}
