//! Command-line parsing for the stellar cohort plotter.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! analysis and rendering code. `app::run_config_from_args` turns `Cli` into a
//! plain `RunConfig`.

use std::path::PathBuf;

use clap::Parser;

use crate::domain::{DEFAULT_GRID_BINS, DEFAULT_METALLICITY_BINS, DEFAULT_T1, DEFAULT_T2};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "starplot",
    version,
    about = "Split a stellar catalog into age cohorts and plot colour, magnitude, mass and metallicity"
)]
pub struct Cli {
    /// Whitespace-delimited stellar catalog.
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Age-band color table (35 lines of `r,g,b`).
    #[arg(long, env = "STARPLOT_COLORS", default_value = "colors.txt")]
    pub colors: PathBuf,

    /// Directory the five images are written to (created if missing).
    #[arg(long, env = "STARPLOT_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// Young / middle-aged boundary (Gyr).
    #[arg(long, default_value_t = DEFAULT_T1)]
    pub t1: f64,

    /// Middle-aged / old boundary (Gyr).
    #[arg(long, default_value_t = DEFAULT_T2)]
    pub t2: f64,

    /// Number of metallicity histogram bins.
    #[arg(long, default_value_t = DEFAULT_METALLICITY_BINS)]
    pub bins: usize,

    /// Bins per axis of the mass × metallicity histograms.
    #[arg(long, default_value_t = DEFAULT_GRID_BINS)]
    pub grid_bins: usize,

    /// Export the run summary to JSON.
    #[arg(long = "export-summary", value_name = "JSON")]
    pub export_summary: Option<PathBuf>,

    /// Export per-cohort metallicity frequencies to CSV.
    #[arg(long = "export-histogram", value_name = "CSV")]
    pub export_histogram: Option<PathBuf>,

    /// Disable the terminal preview.
    #[arg(long)]
    pub no_preview: bool,
}
