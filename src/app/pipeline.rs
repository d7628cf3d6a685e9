//! Shared analysis pipeline used by every figure and export.
//!
//! Keeping this in one place means the cohort partition and all binned
//! products are computed exactly once per run:
//! catalog + colors -> partition -> histograms -> density grids
//!
//! The render and report layers only read from `RunOutput`.

use crate::cohort::{CohortPartition, partition_by_age};
use crate::domain::{Cohort, DENSITY_RANGE_PAD, RunConfig};
use crate::error::AppError;
use crate::io::{AgeBandTable, Catalog, load_age_band_table, load_catalog};
use crate::stats::{
    AxisRange, CohortMetallicity, Histogram2d, cohort_density, cohort_metallicity,
    mass_metallicity_histogram,
};

/// Grids behind the contour overlay figure: every star plus one grid per
/// cohort, all on the same global ranges.
#[derive(Debug, Clone)]
pub struct DensityOverlay {
    pub all: Histogram2d,
    pub cohorts: [Histogram2d; 3],
}

impl DensityOverlay {
    pub fn cohort(&self, cohort: Cohort) -> &Histogram2d {
        &self.cohorts[cohort.index()]
    }
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub catalog: Catalog,
    pub bands: AgeBandTable,
    pub partition: CohortPartition,
    /// Global metallicity range rounded outward to 0.1 dex.
    pub metallicity_range: AxisRange,
    /// Global initial-mass range rounded outward to 0.1.
    pub mass_range: AxisRange,
    /// Shared metallicity bin edges.
    pub metallicity_edges: Vec<f64>,
    pub metallicity: [CohortMetallicity; 3],
    /// Per-cohort grids with cohort-specific mass ranges.
    pub cohort_density: [Histogram2d; 3],
    pub overlay: DensityOverlay,
}

impl RunOutput {
    pub fn metallicity_of(&self, cohort: Cohort) -> &CohortMetallicity {
        &self.metallicity[cohort.index()]
    }

    pub fn density_of(&self, cohort: Cohort) -> &Histogram2d {
        &self.cohort_density[cohort.index()]
    }
}

/// Load the input files named by `config` and run the analysis.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    config.validate()?;
    let catalog = load_catalog(&config.catalog_path)?;
    let bands = load_age_band_table(&config.colors_path)?;
    analyze(catalog, bands, config)
}

/// Run the analysis on already-loaded inputs.
pub fn analyze(
    catalog: Catalog,
    bands: AgeBandTable,
    config: &RunConfig,
) -> Result<RunOutput, AppError> {
    config.validate()?;

    let out_of_band = catalog
        .records()
        .iter()
        .filter(|r| r.age.is_finite() && !bands.covers(r.age))
        .count();
    if out_of_band > 0 {
        log::warn!("{out_of_band} star(s) outside the age-band table are left off the CMD");
    }

    // 1) Partition once; everything below reads from it.
    let partition = partition_by_age(&catalog, config.thresholds);

    // 2) Global ranges.
    let stats = catalog.stats();
    let metallicity_range = AxisRange::rounded_from([stats.metallicity_min, stats.metallicity_max])
        .ok_or_else(|| AppError::malformed("Catalog has no finite metallicities."))?;
    let mass_range = AxisRange::rounded_from([stats.mass_min, stats.mass_max])
        .ok_or_else(|| AppError::malformed("Catalog has no finite initial masses."))?;

    // 3) Metallicity histograms over shared edges.
    let metallicity_edges = metallicity_range.edges(config.metallicity_bins)?;
    log::debug!(
        "metallicity edges: {} bins over [{:.1}, {:.1}]",
        config.metallicity_bins,
        metallicity_range.lo,
        metallicity_range.hi
    );
    let metallicity =
        try_per_cohort(|c| cohort_metallicity(&catalog, &partition, c, &metallicity_edges))?;

    // 4) Per-cohort density grids.
    let cohort_density = try_per_cohort(|c| {
        cohort_density(
            &catalog,
            &partition,
            c,
            metallicity_range,
            config.grid_bins,
            config.cmin,
        )
    })?;

    // 5) Overlay grids on the global ranges.
    let overlay_mass = mass_range.padded(DENSITY_RANGE_PAD);
    let overlay_metallicity = metallicity_range.padded(DENSITY_RANGE_PAD);
    let all = mass_metallicity_histogram(
        catalog.records().iter(),
        overlay_mass,
        overlay_metallicity,
        config.grid_bins,
        config.cmin,
    )?;
    let cohorts = try_per_cohort(|c| {
        mass_metallicity_histogram(
            partition.records(&catalog, c),
            overlay_mass,
            overlay_metallicity,
            config.grid_bins,
            config.cmin,
        )
    })?;

    Ok(RunOutput {
        catalog,
        bands,
        partition,
        metallicity_range,
        mass_range,
        metallicity_edges,
        metallicity,
        cohort_density,
        overlay: DensityOverlay { all, cohorts },
    })
}

fn try_per_cohort<T>(
    mut f: impl FnMut(Cohort) -> Result<T, AppError>,
) -> Result<[T; 3], AppError> {
    let [a, b, c] = Cohort::ALL;
    Ok([f(a)?, f(b)?, f(c)?])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AGE_BAND_COUNT, Rgb, StarRecord};
    use crate::error::ErrorKind;

    fn bands() -> AgeBandTable {
        AgeBandTable::standard(vec![Rgb::from_u8(10, 20, 30); AGE_BAND_COUNT]).unwrap()
    }

    fn star(age: f64, mass: f64, feh: f64) -> StarRecord {
        StarRecord {
            absolute_magnitude: 3.0,
            color_index: 0.4,
            age,
            metallicity: feh,
            initial_mass: mass,
        }
    }

    #[test]
    fn analysis_reuses_one_partition_everywhere() {
        let records = vec![
            star(0.5, 2.1, -0.42),
            star(1.0, 1.4, -0.11),
            star(2.9, 1.3, 0.05),
            star(3.0, 0.9, -0.8),
            star(5.0, 0.85, -1.23),
        ];
        let catalog = Catalog::from_records(records).unwrap();
        let config = RunConfig::new("unused.dat");
        let out = analyze(catalog, bands(), &config).unwrap();

        assert!((out.metallicity_range.lo - -1.3).abs() < 1e-12);
        assert!((out.metallicity_range.hi - 0.1).abs() < 1e-12);
        assert_eq!(out.metallicity_edges.len(), config.metallicity_bins + 1);

        for cohort in Cohort::ALL {
            let n = out.partition.len(cohort);
            assert_eq!(out.metallicity_of(cohort).histogram.sample_size, n);
            assert_eq!(out.density_of(cohort).total(), n as u64);
            assert_eq!(out.overlay.cohort(cohort).total(), n as u64);
        }
        assert_eq!(out.overlay.all.total(), 5);
    }

    #[test]
    fn empty_cohort_aborts_analysis() {
        let records = vec![star(0.5, 1.0, -0.2), star(0.7, 1.1, -0.1)];
        let catalog = Catalog::from_records(records).unwrap();
        let err = analyze(catalog, bands(), &RunConfig::new("unused.dat")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EmptyCohort);
    }
}
