//! # pixgear
//!
//! Command-line front end for the pixel telescope writer.
//!
//! ```bash
//! # Write hits and the matching GEAR geometry
//! pixgear convert --geometry telescope.toml --hits hits.csv
//!
//! # Geometry only
//! pixgear geometry --geometry telescope.toml --output gear.xml
//!
//! # Inspect an event store
//! pixgear info output.pixgear.parquet --events
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
