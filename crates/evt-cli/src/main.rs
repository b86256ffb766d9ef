use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use evt_cli::commands::{clean, intervals, local_times, ragged, tabulate};
use evt_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays valid JSON
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match command {
        Commands::Intervals(args) => intervals::run(&mut out, args, &config)?,
        Commands::Clean(args) => clean::run(&mut out, args, &config)?,
        Commands::LocalTimes(args) => local_times::run(&mut out, args, &config)?,
        Commands::Ragged(args) => ragged::run(&mut out, args, &config)?,
        Commands::Factorial(args) => tabulate::run_factorial(&mut out, args, &config)?,
        Commands::Pulse(args) => tabulate::run_pulse(&mut out, args, &config)?,
    }

    out.flush().context("failed to flush output")?;
    Ok(())
}
