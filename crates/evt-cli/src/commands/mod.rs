//! CLI subcommand implementations.

pub mod clean;
pub mod input;
pub mod intervals;
pub mod local_times;
pub mod ragged;
pub mod tabulate;
