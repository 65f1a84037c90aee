use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod convert;
mod geometry;
mod hits;
mod info;

/// pixgear - pixel telescope event and geometry writer
#[derive(Parser)]
#[command(name = "pixgear")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write pixel hits from CSV into an event store and export the geometry
    Convert {
        /// Geometry description (TOML)
        #[arg(short, long, value_name = "FILE")]
        geometry: PathBuf,

        /// Pixel hits (CSV with columns event,detector,x,y,signal,time)
        #[arg(long, value_name = "FILE")]
        hits: PathBuf,

        /// Load writer settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Event store path (overrides the config file)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// GEAR geometry file path (overrides the config file)
        #[arg(long, value_name = "FILE")]
        geometry_output: Option<PathBuf>,
    },

    /// Export only the GEAR geometry file
    Geometry {
        /// Geometry description (TOML)
        #[arg(short, long, value_name = "FILE")]
        geometry: PathBuf,

        /// GEAR geometry file path
        #[arg(short, long, value_name = "FILE", default_value = "output_geometry.xml")]
        output: PathBuf,

        /// Detector setup label
        #[arg(long, default_value = "EUTelescope")]
        detector_name: String,
    },

    /// Display information about an event store
    Info {
        /// Event store path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print collection sizes of every event
        #[arg(long)]
        events: bool,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert {
            geometry,
            hits,
            config,
            output,
            geometry_output,
        } => convert::run(geometry, hits, config, output, geometry_output),
        Commands::Geometry {
            geometry,
            output,
            detector_name,
        } => geometry::run(geometry, output, detector_name),
        Commands::Info { file, events } => info::run(file, events),
    }
}
