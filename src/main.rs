//! # dmake CLI Entry Point
//!
//! Parses the command line, loads `dmake.toml` if present, and runs one
//! generation pass over the tree. Any error exits non-zero.

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt;

use dmake::config;
use dmake::generate;

#[derive(Parser)]
#[command(name = "dmake")]
#[command(about = "Generate a Makefile with header dependencies", version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
struct Cli {
    /// Use the release CXXFLAGS preset instead of the development one
    #[arg(long)]
    release: bool,
    /// Log include resolution details to stderr
    #[arg(short, long)]
    verbose: bool,
    /// Render everything but write nothing
    #[arg(long)]
    dry_run: bool,
    /// Config file (default: <DIR>/dmake.toml, optional)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Root of the source tree
    #[arg(short = 'C', long = "directory", value_name = "DIR", default_value = ".")]
    directory: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let max_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    fmt()
        .with_max_level(max_level)
        .with_writer(std::io::stderr)
        .init();

    let start_time = Instant::now();
    let config = config::load_config(&cli.directory, cli.config.as_deref())
        .context("Failed to load dmake configuration")?;

    println!(
        "{} Generating {} ({} preset)...",
        "⚙️".cyan(),
        config.makefile,
        if cli.release { "release" } else { "development" }
    );

    let report = generate::generate(&cli.directory, &config, cli.release, cli.dry_run)?;

    println!(
        "{} {} compile rules in {:.2?}",
        "✓".green(),
        report.rules,
        start_time.elapsed()
    );
    Ok(())
}
