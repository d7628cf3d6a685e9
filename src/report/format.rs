//! Formatted terminal output.

use crate::app::pipeline::RunOutput;
use crate::report::{CohortSummary, build_summary};

/// Format the full run summary (catalog ranges + cohort table).
pub fn format_run_summary(run: &RunOutput) -> String {
    let summary = build_summary(run);
    let stats = run.catalog.stats();
    let mut out = String::new();

    out.push_str("=== starplot - stellar age cohorts ===\n");
    out.push_str(&format!(
        "Stars: n={} | unassigned (no age)={}\n",
        summary.n_stars, summary.n_unassigned
    ));
    out.push_str(&format!(
        "b-y=[{:.3}, {:.3}] | M_V=[{:.2}, {:.2}] | age=[{:.2}, {:.2}] Gyr\n",
        stats.color_min,
        stats.color_max,
        stats.magnitude_min,
        stats.magnitude_max,
        stats.age_min,
        stats.age_max,
    ));
    out.push_str(&format!(
        "m_ini=[{:.1}, {:.1}] | M/H=[{:.1}, {:.1}] ({} bins)\n",
        summary.mass_range[0],
        summary.mass_range[1],
        summary.metallicity_range[0],
        summary.metallicity_range[1],
        summary.metallicity_edges.len().saturating_sub(1),
    ));
    out.push_str(&format!(
        "Thresholds: t1={} Gyr, t2={} Gyr\n",
        summary.thresholds.t1, summary.thresholds.t2
    ));

    out.push_str("\nCohorts:\n");
    out.push_str(&format_cohort_table(&summary.cohorts));

    out
}

/// Format the per-cohort table (count, mean, median).
pub fn format_cohort_table(cohorts: &[CohortSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<14} {:>7} {:>8} {:>8}\n",
        "age (Gyr)", "n", "mean", "median"
    ));
    for c in cohorts {
        out.push_str(&format!(
            "{:<14} {:>7} {:>8.2} {:>8.2}\n",
            c.label, c.count, c.mean_metallicity, c.median_metallicity
        ));
    }
    out
}
