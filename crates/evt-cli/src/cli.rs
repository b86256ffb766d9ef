//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use evt_core::Rearm;

/// Event-interval and local-time analysis for behavioral event records.
///
/// Reads event records as JSON and writes analysis results as JSON to stdout.
#[derive(Debug, Parser)]
#[command(name = "evt", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Latencies from x events to y events (IxYI), or between x events (IxXI).
    Intervals(IntervalsArgs),

    /// Drop y events that follow an x event too closely.
    Clean(CleanArgs),

    /// Local times relative to a marker, for one or more timelines.
    LocalTimes(LocalTimesArgs),

    /// Local times over separate event and marker time arrays.
    Ragged(RaggedArgs),

    /// Response counts by reinforcer ordinal within each component.
    Factorial(TabulateArgs),

    /// Response counts by time since the last reinforcer.
    Pulse(PulseArgs),
}

/// Arguments for `evt intervals`.
#[derive(Debug, Args)]
pub struct IntervalsArgs {
    /// Timeline JSON file.
    pub file: PathBuf,

    /// Labels that arm an interval (comma-separated).
    #[arg(long = "x", value_delimiter = ',', required = true)]
    pub x_labels: Vec<String>,

    /// Labels that close an interval. Omit for x-to-x intervals.
    #[arg(long = "y", value_delimiter = ',')]
    pub y_labels: Vec<String>,

    /// Labels that cancel a pending interval.
    #[arg(long = "break", value_delimiter = ',')]
    pub break_labels: Vec<String>,

    /// Added to every latency.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub offset: f64,

    /// What an x does while another x is pending: hold or latest.
    #[arg(long, default_value_t = Rearm::Hold)]
    pub rearm: Rearm,
}

/// Arguments for `evt clean`.
#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Timeline JSON file.
    pub file: PathBuf,

    /// Label that arms the filter.
    #[arg(long = "x")]
    pub x_label: String,

    /// Label that is dropped when it comes too soon.
    #[arg(long = "y")]
    pub y_label: String,

    /// Shortest allowed gap between x and y.
    #[arg(long)]
    pub min_gap: f64,

    /// Print the keep-mask instead of the cleaned timeline.
    #[arg(long)]
    pub mask: bool,
}

/// Binning flags shared by the local-time commands.
#[derive(Debug, Clone, Copy, Args)]
pub struct BinArgs {
    /// Added per earlier event in the same visit. Defaults to config.
    #[arg(long, allow_negative_numbers = true)]
    pub offset: Option<f64>,

    /// Highest histogram bin. Defaults to config.
    #[arg(long)]
    pub max_bin: Option<u32>,

    /// Time covered by one bin. Defaults to config.
    #[arg(long)]
    pub resolution: Option<f64>,
}

/// Arguments for `evt local-times`.
#[derive(Debug, Args)]
pub struct LocalTimesArgs {
    /// Timeline JSON files, one per subject.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Label of the events to time.
    #[arg(long)]
    pub event: String,

    /// Label of the marker that opens each visit.
    #[arg(long)]
    pub marker: String,

    /// Marker count that ends the scan. Defaults to config.
    #[arg(long)]
    pub n_markers: Option<u32>,

    #[command(flatten)]
    pub bins: BinArgs,
}

/// Arguments for `evt ragged`.
#[derive(Debug, Args)]
pub struct RaggedArgs {
    /// JSON file with `event_times` and `marker_times` arrays.
    pub file: PathBuf,

    #[command(flatten)]
    pub bins: BinArgs,
}

/// Label sets shared by the tabulation commands.
#[derive(Debug, Args)]
pub struct TabulateArgs {
    /// Timeline JSON file.
    pub file: PathBuf,

    /// Reinforcer labels (comma-separated).
    #[arg(long = "reinforcer", value_delimiter = ',', required = true)]
    pub reinforcer_labels: Vec<String>,

    /// Labels that start a new component.
    #[arg(long = "component", value_delimiter = ',')]
    pub component_labels: Vec<String>,

    /// Response labels (comma-separated).
    #[arg(long = "response", value_delimiter = ',', required = true)]
    pub response_labels: Vec<String>,

    /// Most reinforcers one component may deliver.
    #[arg(long, default_value_t = 10)]
    pub max_reinforcers: u32,
}

/// Arguments for `evt pulse`.
#[derive(Debug, Args)]
pub struct PulseArgs {
    /// Timeline JSON file.
    pub file: PathBuf,

    /// Reinforcer labels (comma-separated).
    #[arg(long = "reinforcer", value_delimiter = ',', required = true)]
    pub reinforcer_labels: Vec<String>,

    /// Labels that start a new component.
    #[arg(long = "component", value_delimiter = ',')]
    pub component_labels: Vec<String>,

    /// Response labels (comma-separated).
    #[arg(long = "response", value_delimiter = ',', required = true)]
    pub response_labels: Vec<String>,

    /// Longest inter-reinforcer interval to tabulate.
    #[arg(long)]
    pub max_iri: f64,

    /// Time covered by one bin. Defaults to config.
    #[arg(long)]
    pub resolution: Option<f64>,

    /// Bins subtracted from every response bin.
    #[arg(long, default_value_t = 0)]
    pub offset_bins: u32,
}
