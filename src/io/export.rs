//! Export the run summary (JSON) and per-cohort metallicity frequencies (CSV).
//!
//! Both exports are meant to be easy to consume in spreadsheets or notebooks.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::Cohort;
use crate::error::AppError;
use crate::report::build_summary;

/// Write the run summary as pretty-printed JSON.
pub fn write_summary_json(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create summary JSON '{}': {e}", path.display()))
    })?;

    serde_json::to_writer_pretty(file, &build_summary(run))
        .map_err(|e| AppError::io(format!("Failed to write summary JSON: {e}")))?;

    log::info!("wrote summary to '{}'", path.display());
    Ok(())
}

/// Write one row per metallicity bin with each cohort's relative frequency.
pub fn write_histogram_csv(path: &Path, run: &RunOutput) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::io(format!("Failed to create histogram CSV '{}': {e}", path.display()))
    })?;

    let thresholds = run.partition.thresholds();
    let labels: Vec<String> = Cohort::ALL.iter().map(|c| c.label(thresholds)).collect();
    writeln!(file, "bin_lower,bin_upper,{}", labels.join(","))
        .map_err(|e| AppError::io(format!("Failed to write histogram CSV header: {e}")))?;

    for (i, w) in run.metallicity_edges.windows(2).enumerate() {
        let freqs: Vec<String> = Cohort::ALL
            .iter()
            .map(|&c| format!("{:.6}", run.metallicity_of(c).histogram.frequencies[i]))
            .collect();
        writeln!(file, "{:.4},{:.4},{}", w[0], w[1], freqs.join(","))
            .map_err(|e| AppError::io(format!("Failed to write histogram CSV row: {e}")))?;
    }

    log::info!("wrote metallicity histogram to '{}'", path.display());
    Ok(())
}
