//! One-dimensional histograms and summary statistics.

use serde::Serialize;

use crate::cohort::CohortPartition;
use crate::domain::Cohort;
use crate::error::AppError;
use crate::io::Catalog;
use crate::stats::binning::bin_index;

/// Counts and relative frequencies over shared bin edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelativeHistogram {
    pub edges: Vec<f64>,
    pub counts: Vec<u32>,
    /// `counts[i] / sample_size`; values outside the edges still count toward
    /// the sample size.
    pub frequencies: Vec<f64>,
    pub sample_size: usize,
}

impl RelativeHistogram {
    pub fn n_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn max_frequency(&self) -> f64 {
        self.frequencies.iter().copied().fold(0.0, f64::max)
    }
}

/// Metallicity distribution of one cohort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortMetallicity {
    pub cohort: Cohort,
    pub histogram: RelativeHistogram,
    /// Mean of the raw (unbinned) values.
    pub mean: f64,
    /// Median of the raw (unbinned) values.
    pub median: f64,
}

/// Relative-frequency histogram of `values` over `edges`.
///
/// Returns `None` for an empty sample, where frequencies are undefined.
pub fn relative_frequency(values: &[f64], edges: &[f64]) -> Option<RelativeHistogram> {
    if values.is_empty() || edges.len() < 2 {
        return None;
    }

    let mut counts = vec![0u32; edges.len() - 1];
    for &v in values {
        if let Some(i) = bin_index(edges, v) {
            counts[i] += 1;
        }
    }

    let n = values.len() as f64;
    let frequencies = counts.iter().map(|&c| c as f64 / n).collect();

    Some(RelativeHistogram {
        edges: edges.to_vec(),
        counts,
        frequencies,
        sample_size: values.len(),
    })
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    median_mut(&mut sorted)
}

fn median_mut(values: &mut [f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

/// Histogram, mean and median of one cohort's metallicities.
///
/// Non-finite metallicities are rejected as malformed input.
pub fn cohort_metallicity(
    catalog: &Catalog,
    partition: &CohortPartition,
    cohort: Cohort,
    edges: &[f64],
) -> Result<CohortMetallicity, AppError> {
    partition.require_members(cohort)?;
    let values = partition.column(catalog, cohort, |r| r.metallicity);

    let label = cohort.label(partition.thresholds());
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(AppError::malformed(format!(
            "Cohort '{label}' has a non-finite metallicity ({bad})."
        )));
    }

    let empty = || AppError::empty_cohort(format!("Cohort '{label}' has no metallicities."));
    let histogram = relative_frequency(&values, edges).ok_or_else(&empty)?;
    let mean = mean(&values).ok_or_else(&empty)?;
    let median = median(&values).ok_or_else(&empty)?;

    log::debug!(
        "{label}: n={} mean={mean:.3} median={median:.3}",
        values.len()
    );

    Ok(CohortMetallicity {
        cohort,
        histogram,
        mean,
        median,
    })
}
