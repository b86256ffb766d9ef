//! Implementation of the `evt local-times` command.
//!
//! Each input file is one subject. Subjects are scanned in parallel and their
//! histograms are pooled into one.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use evt_core::{
    Histogram, LocalTimeQuery, Subject, SubjectProfile, pool_profiles, profile_subjects,
};
use serde::Serialize;

use super::input::{read_timeline, write_json};
use crate::{Config, LocalTimesArgs};

#[derive(Serialize)]
struct LocalTimesOutput {
    subjects: Vec<SubjectProfile>,
    pooled: Option<Histogram>,
}

/// Run the local-times command.
pub fn run<W: Write>(out: &mut W, args: &LocalTimesArgs, config: &Config) -> Result<()> {
    let subjects = args
        .files
        .iter()
        .map(|path| {
            Ok(Subject {
                id: subject_id(path),
                timeline: read_timeline(path, config.validate_order)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    execute(out, &subjects, &query(args, config))
}

/// Fills unset flags from config.
fn query(args: &LocalTimesArgs, config: &Config) -> LocalTimeQuery {
    LocalTimeQuery {
        event_label: args.event.clone(),
        marker_label: args.marker.clone(),
        event_offset: args.bins.offset.unwrap_or(config.default_event_offset),
        n_markers: args.n_markers.unwrap_or(config.n_markers),
        max_bin: args.bins.max_bin.unwrap_or(config.max_bin),
        bin_resolution: args.bins.resolution.unwrap_or(config.bin_resolution),
    }
}

/// File stem, or the whole path when there is none.
fn subject_id(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}

fn execute<W: Write>(out: &mut W, subjects: &[Subject], query: &LocalTimeQuery) -> Result<()> {
    let profiles = profile_subjects(subjects, query).context("local-time scan failed")?;
    let pooled = pool_profiles(&profiles)?;

    write_json(
        out,
        &LocalTimesOutput {
            subjects: profiles,
            pooled,
        },
    )
}
