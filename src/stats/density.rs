//! Two-dimensional count histograms (mass × metallicity).
//!
//! Cells whose count is below the visibility threshold are stored as `None`.
//! Absent cells are not zero: they carry no value, are left blank when drawn
//! and block contour lines.

use crate::cohort::CohortPartition;
use crate::domain::{Cohort, DENSITY_RANGE_PAD};
use crate::error::AppError;
use crate::io::Catalog;
use crate::stats::binning::{AxisRange, bin_centers, bin_index};

/// A `bins × bins` grid of counts over an x/y range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2d {
    x_edges: Vec<f64>,
    y_edges: Vec<f64>,
    /// Row-major by x: `cells[ix * ny + iy]`.
    cells: Vec<Option<u32>>,
}

impl Histogram2d {
    /// Bin aligned `xs`/`ys` into an `n_bins × n_bins` grid.
    ///
    /// Points outside either range are dropped. Cells with `count < cmin` are
    /// absent.
    pub fn new(
        xs: &[f64],
        ys: &[f64],
        x_range: AxisRange,
        y_range: AxisRange,
        n_bins: usize,
        cmin: f64,
    ) -> Result<Self, AppError> {
        if xs.len() != ys.len() {
            return Err(AppError::malformed(format!(
                "2D histogram inputs differ in length: {} vs {}.",
                xs.len(),
                ys.len()
            )));
        }
        let x_edges = x_range.edges(n_bins)?;
        let y_edges = y_range.edges(n_bins)?;

        let mut counts = vec![0u32; n_bins * n_bins];
        for (&x, &y) in xs.iter().zip(ys) {
            if let (Some(ix), Some(iy)) = (bin_index(&x_edges, x), bin_index(&y_edges, y)) {
                counts[ix * n_bins + iy] += 1;
            }
        }

        let cells = counts
            .into_iter()
            .map(|c| if (c as f64) < cmin { None } else { Some(c) })
            .collect();

        Ok(Self {
            x_edges,
            y_edges,
            cells,
        })
    }

    pub fn nx(&self) -> usize {
        self.x_edges.len() - 1
    }

    pub fn ny(&self) -> usize {
        self.y_edges.len() - 1
    }

    pub fn x_edges(&self) -> &[f64] {
        &self.x_edges
    }

    pub fn y_edges(&self) -> &[f64] {
        &self.y_edges
    }

    pub fn x_centers(&self) -> Vec<f64> {
        bin_centers(&self.x_edges)
    }

    pub fn y_centers(&self) -> Vec<f64> {
        bin_centers(&self.y_edges)
    }

    pub fn cell(&self, ix: usize, iy: usize) -> Option<u32> {
        self.cells[ix * self.ny() + iy]
    }

    /// Present cells as `(ix, iy, count)`.
    pub fn present_cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let ny = self.ny();
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, c)| c.map(|count| (i / ny, i % ny, count)))
    }

    /// Largest present count, or `None` when every cell is absent.
    pub fn max_count(&self) -> Option<u32> {
        self.cells.iter().flatten().copied().max()
    }

    /// Sum over present cells.
    pub fn total(&self) -> u64 {
        self.cells.iter().flatten().map(|&c| c as u64).sum()
    }
}

/// Mass × metallicity histogram for a subset of catalog records.
pub fn mass_metallicity_histogram<'a>(
    records: impl Iterator<Item = &'a crate::domain::StarRecord>,
    mass_range: AxisRange,
    metallicity_range: AxisRange,
    n_bins: usize,
    cmin: f64,
) -> Result<Histogram2d, AppError> {
    let (masses, metallicities): (Vec<f64>, Vec<f64>) =
        records.map(|r| (r.initial_mass, r.metallicity)).unzip();
    Histogram2d::new(
        &masses,
        &metallicities,
        mass_range,
        metallicity_range,
        n_bins,
        cmin,
    )
}

/// Per-cohort histogram where the mass axis spans only that cohort's stars.
///
/// The metallicity axis is shared so panels stay comparable. Both ranges are
/// passed unpadded and padded here by `DENSITY_RANGE_PAD`.
pub fn cohort_density(
    catalog: &Catalog,
    partition: &CohortPartition,
    cohort: Cohort,
    metallicity_range: AxisRange,
    n_bins: usize,
    cmin: f64,
) -> Result<Histogram2d, AppError> {
    partition.require_members(cohort)?;
    let label = cohort.label(partition.thresholds());
    let masses = partition.records(catalog, cohort).map(|r| r.initial_mass);
    let mass_range = AxisRange::rounded_from(masses)
        .ok_or_else(|| AppError::empty_cohort(format!("Cohort '{label}' has no finite masses.")))?
        .padded(DENSITY_RANGE_PAD);

    log::debug!(
        "{label} density: mass=[{:.2}, {:.2}] metallicity=[{:.2}, {:.2}]",
        mass_range.lo,
        mass_range.hi,
        metallicity_range.lo,
        metallicity_range.hi
    );

    mass_metallicity_histogram(
        partition.records(catalog, cohort),
        mass_range,
        metallicity_range.padded(DENSITY_RANGE_PAD),
        n_bins,
        cmin,
    )
}
