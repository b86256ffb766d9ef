//! Event analysis CLI library.
//!
//! This crate provides the CLI interface for the event analysis engine.

mod cli;
pub mod commands;
mod config;

pub use cli::{
    BinArgs, CleanArgs, Cli, Commands, IntervalsArgs, LocalTimesArgs, PulseArgs, RaggedArgs,
    TabulateArgs,
};
pub use config::Config;
