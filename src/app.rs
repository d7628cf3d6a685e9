//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - reads `.env` and sets up logging
//! - parses CLI arguments
//! - runs the analysis pipeline
//! - prints the run summary and renders the figures
//! - writes optional exports and the terminal preview

use std::io::IsTerminal;

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{AgeThresholds, DEFAULT_CMIN, RunConfig};
use crate::error::AppError;

pub mod pipeline;

/// Terminal preview size (columns × rows).
pub const PREVIEW_WIDTH: usize = 72;
pub const PREVIEW_HEIGHT: usize = 24;

/// Entry point for the `starplot` binary.
pub fn run() -> Result<(), AppError> {
    // `.env` may set STARPLOT_COLORS, STARPLOT_OUT_DIR and RUST_LOG; it must be
    // loaded before clap reads env-backed flags.
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = run_config_from_args(&cli);
    let run = pipeline::run_pipeline(&config)?;

    println!("{}", crate::report::format_run_summary(&run));

    crate::render::render_all(&run, &config.out_dir)?;

    // Optional exports.
    if let Some(path) = &config.export_summary {
        crate::io::export::write_summary_json(path, &run)?;
    }
    if let Some(path) = &config.export_histogram {
        crate::io::export::write_histogram_csv(path, &run)?;
    }

    if config.preview && std::io::stdout().is_terminal() {
        let preview = crate::plot::render_cmd_preview(&run, PREVIEW_WIDTH, PREVIEW_HEIGHT);
        println!("{preview}");
    }

    Ok(())
}

pub fn run_config_from_args(cli: &Cli) -> RunConfig {
    RunConfig {
        catalog_path: cli.catalog.clone(),
        colors_path: cli.colors.clone(),
        out_dir: cli.out_dir.clone(),
        thresholds: AgeThresholds {
            t1: cli.t1,
            t2: cli.t2,
        },
        metallicity_bins: cli.bins,
        grid_bins: cli.grid_bins,
        cmin: DEFAULT_CMIN,
        export_summary: cli.export_summary.clone(),
        export_histogram: cli.export_histogram.clone(),
        preview: !cli.no_preview,
    }
}
