//! Implementation of the `evt clean` command.
//!
//! Prints either the keep-mask (`--mask`) or the timeline with the suppressed
//! rows removed, in the same record format it was read in.

use std::io::Write;

use anyhow::{Context, Result};
use evt_core::{Timeline, clean_short};
use serde::Serialize;

use super::input::{read_timeline, write_json};
use crate::{CleanArgs, Config};

#[derive(Serialize)]
struct MaskOutput {
    keep: Vec<bool>,
    suppressed: usize,
}

/// Run the clean command.
pub fn run<W: Write>(out: &mut W, args: &CleanArgs, config: &Config) -> Result<()> {
    let timeline = read_timeline(&args.file, config.validate_order)?;
    execute(out, &timeline, args)
}

fn execute<W: Write>(out: &mut W, timeline: &Timeline, args: &CleanArgs) -> Result<()> {
    let keep = clean_short(timeline, &args.x_label, &args.y_label, args.min_gap)
        .context("short-interval cleaning failed")?;

    if args.mask {
        let suppressed = keep.iter().filter(|&&kept| !kept).count();
        return write_json(out, &MaskOutput { keep, suppressed });
    }

    let cleaned = timeline.retain_mask(&keep)?;
    write_json(out, &cleaned)
}
