//! Reporting utilities: run summary and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the analysis code stays clean and testable
//! - output changes are localized (important for snapshot tests)

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{AgeThresholds, Cohort};

/// Per-cohort numbers shared by the terminal summary and the JSON export.
#[derive(Debug, Clone, Serialize)]
pub struct CohortSummary {
    pub cohort: Cohort,
    pub label: String,
    pub count: usize,
    pub mean_metallicity: f64,
    pub median_metallicity: f64,
    pub frequencies: Vec<f64>,
}

/// Serializable summary of one run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub n_stars: usize,
    pub n_unassigned: usize,
    pub thresholds: AgeThresholds,
    pub metallicity_range: [f64; 2],
    pub mass_range: [f64; 2],
    pub metallicity_edges: Vec<f64>,
    pub cohorts: Vec<CohortSummary>,
}

pub fn build_summary(run: &RunOutput) -> RunSummary {
    let thresholds = *run.partition.thresholds();
    let cohorts = Cohort::ALL
        .into_iter()
        .map(|cohort| {
            let m = run.metallicity_of(cohort);
            CohortSummary {
                cohort,
                label: cohort.label(&thresholds),
                count: run.partition.len(cohort),
                mean_metallicity: m.mean,
                median_metallicity: m.median,
                frequencies: m.histogram.frequencies.clone(),
            }
        })
        .collect();

    RunSummary {
        tool: "starplot".to_string(),
        n_stars: run.catalog.len(),
        n_unassigned: run.partition.unassigned().len(),
        thresholds,
        metallicity_range: [run.metallicity_range.lo, run.metallicity_range.hi],
        mass_range: [run.mass_range.lo, run.mass_range.hi],
        metallicity_edges: run.metallicity_edges.clone(),
        cohorts,
    }
}
