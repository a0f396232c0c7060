use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_CLEANED_PATH, DEFAULT_LOCATIONS_PATH, DEFAULT_MEASUREMENTS_PATH,
    DEFAULT_PRE_INTERPOLATION_PATH, DEFAULT_STATIONS_DIR,
};

#[derive(Parser)]
#[command(name = "openaq-processor")]
#[command(about = "Cleans, merges and interpolates OpenAQ air quality measurements")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full cleaning pipeline: merge, sanitize, interpolate and
    /// split into per-station daily series
    Clean {
        #[arg(short, long, default_value = DEFAULT_MEASUREMENTS_PATH,
              help = "Combined measurement table (CSV)")]
        measurements: PathBuf,

        #[arg(short, long, default_value = DEFAULT_LOCATIONS_PATH,
              help = "Station location metadata table (CSV)")]
        locations: PathBuf,

        #[arg(long, default_value = DEFAULT_PRE_INTERPOLATION_PATH,
              help = "Pre-interpolation checkpoint output path")]
        pre_output: PathBuf,

        #[arg(short, long, default_value = DEFAULT_CLEANED_PATH,
              help = "Cleaned, interpolated artifact output path")]
        output: PathBuf,

        #[arg(long, default_value = DEFAULT_STATIONS_DIR,
              help = "Directory for per-station daily series files")]
        stations_dir: PathBuf,

        #[arg(long, default_value = "false", help = "Stop after the cleaned artifact")]
        skip_stations: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,

        #[arg(long, help = "Write the run report as JSON to this path")]
        report: Option<PathBuf>,
    },

    /// Split an existing cleaned artifact into per-station daily series
    Stations {
        #[arg(short, long, default_value = DEFAULT_CLEANED_PATH,
              help = "Cleaned artifact to split (CSV)")]
        input: PathBuf,

        #[arg(long, default_value = DEFAULT_STATIONS_DIR,
              help = "Directory for per-station daily series files")]
        stations_dir: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },
}
