//! Shared domain types.
//!
//! Everything here is plain data: records read from the catalog, the age-band
//! color table, the cohort enumeration and the resolved run configuration.
//! Presentation metadata for cohorts (label, color, marker, contour level) lives
//! on the enum itself so figures never index cohorts by position.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Catalog column holding the initial mass (solar masses).
pub const COL_INITIAL_MASS: usize = 0;
/// Catalog column holding the metallicity `[M/H]` (dex).
pub const COL_METALLICITY: usize = 1;
/// Catalog column holding the absolute visual magnitude `M_V`.
pub const COL_ABSOLUTE_MAGNITUDE: usize = 4;
/// Catalog column holding the Strömgren color index `b-y`.
pub const COL_COLOR_INDEX: usize = 8;
/// Catalog column holding the age (Gyr).
pub const COL_AGE: usize = 12;

/// Edges of the 35 age bands used to color the color-magnitude diagram (Gyr).
pub const AGE_BAND_EDGES: [f64; 36] = [
    0.0, 0.05, 0.11, 0.18, 0.25, 0.33, //
    0.41, 0.51, 0.61, 0.73, 0.85, 0.99, //
    1.14, 1.3, 1.48, 1.68, 1.89, 2.13, //
    2.39, 2.67, 2.99, 3.33, 3.7, 4.12, //
    4.57, 5.06, 5.60, 6.20, 6.85, 7.57, //
    8.35, 9.21, 10.15, 11.19, 12.32, 13.56,
];

/// Number of age bands (and therefore colors) expected in the color file.
pub const AGE_BAND_COUNT: usize = AGE_BAND_EDGES.len() - 1;

/// Default cohort thresholds (Gyr).
pub const DEFAULT_T1: f64 = 1.0;
pub const DEFAULT_T2: f64 = 3.0;

/// Default number of metallicity histogram bins.
pub const DEFAULT_METALLICITY_BINS: usize = 27;
/// Default number of bins per axis for the mass × metallicity histograms.
pub const DEFAULT_GRID_BINS: usize = 22;
/// Upper bounds on the bin counts accepted from the command line.
pub const MAX_METALLICITY_BINS: usize = 1000;
pub const MAX_GRID_BINS: usize = 1000;
/// Cells with fewer stars than this are absent rather than zero.
pub const DEFAULT_CMIN: f64 = 0.5;
/// Padding (in axis units) added on both sides of 2D histogram ranges.
pub const DENSITY_RANGE_PAD: f64 = 0.1;

/// One row of the catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarRecord {
    pub absolute_magnitude: f64,
    pub color_index: f64,
    /// Age in Gyr.
    pub age: f64,
    /// `[M/H]` in dex.
    pub metallicity: f64,
    /// Initial mass in solar masses.
    pub initial_mass: f64,
}

/// An RGB color with channels normalized to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Back to 8-bit channels for the bitmap backend.
    pub fn to_u8(self) -> (u8, u8, u8) {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (q(self.r), q(self.g), q(self.b))
    }
}

/// A half-open age interval `[lower, upper)` and the color used to draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgeColorBand {
    pub lower: f64,
    pub upper: f64,
    pub color: Rgb,
}

impl AgeColorBand {
    /// Legend text, e.g. `"0.05 Gyr - 0.11 Gyr"`.
    pub fn label(&self) -> String {
        format!("{:.2} Gyr - {:.2} Gyr", self.lower, self.upper)
    }
}

/// The two ages splitting the catalog into three cohorts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgeThresholds {
    pub t1: f64,
    pub t2: f64,
}

impl Default for AgeThresholds {
    fn default() -> Self {
        Self {
            t1: DEFAULT_T1,
            t2: DEFAULT_T2,
        }
    }
}

impl AgeThresholds {
    /// Cohort for `age`; `None` when the age is not a finite number.
    ///
    /// Intervals are half-open, so an age equal to a threshold falls in the
    /// older cohort.
    pub fn classify(&self, age: f64) -> Option<Cohort> {
        if !age.is_finite() {
            return None;
        }
        if age < self.t1 {
            Some(Cohort::Young)
        } else if age < self.t2 {
            Some(Cohort::MiddleAged)
        } else {
            Some(Cohort::Old)
        }
    }
}

/// Marker shapes used by the mass-metallicity scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Square,
    Circle,
    Triangle,
}

/// Age cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cohort {
    Young,
    MiddleAged,
    Old,
}

impl Cohort {
    /// Youngest first; figures and exports iterate in this order.
    pub const ALL: [Cohort; 3] = [Cohort::Young, Cohort::MiddleAged, Cohort::Old];

    pub fn index(self) -> usize {
        match self {
            Cohort::Young => 0,
            Cohort::MiddleAged => 1,
            Cohort::Old => 2,
        }
    }

    /// Human-readable label keyed to the thresholds, e.g. `"1 ≤ t < 3"`.
    pub fn label(self, thresholds: &AgeThresholds) -> String {
        match self {
            Cohort::Young => format!("t < {}", thresholds.t1),
            Cohort::MiddleAged => format!("{} ≤ t < {}", thresholds.t1, thresholds.t2),
            Cohort::Old => format!("t ≥ {}", thresholds.t2),
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Cohort::Young => Rgb::from_u8(255, 0, 0),
            Cohort::MiddleAged => Rgb::from_u8(0, 128, 0),
            Cohort::Old => Rgb::from_u8(0, 0, 255),
        }
    }

    pub fn marker(self) -> MarkerShape {
        match self {
            Cohort::Young => MarkerShape::Square,
            Cohort::MiddleAged => MarkerShape::Circle,
            Cohort::Old => MarkerShape::Triangle,
        }
    }

    /// Marker size in pixels for the scatter plot; denser cohorts get smaller
    /// markers so they do not hide the others.
    pub fn marker_size(self) -> i32 {
        match self {
            Cohort::Young => 4,
            Cohort::MiddleAged => 3,
            Cohort::Old => 2,
        }
    }

    pub fn marker_alpha(self) -> f64 {
        match self {
            Cohort::Young => 0.15,
            Cohort::MiddleAged => 0.20,
            Cohort::Old => 0.25,
        }
    }

    /// Iso-count level of this cohort's contour in the overlay figure.
    pub fn contour_level(self) -> f64 {
        match self {
            Cohort::Young => 70.0,
            Cohort::MiddleAged => 100.0,
            Cohort::Old => 100.0,
        }
    }

    /// Glyph used by the terminal preview.
    pub fn glyph(self) -> char {
        match self {
            Cohort::Young => 'y',
            Cohort::MiddleAged => 'm',
            Cohort::Old => 'o',
        }
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub catalog_path: PathBuf,
    pub colors_path: PathBuf,
    pub out_dir: PathBuf,
    pub thresholds: AgeThresholds,
    pub metallicity_bins: usize,
    pub grid_bins: usize,
    pub cmin: f64,
    pub export_summary: Option<PathBuf>,
    pub export_histogram: Option<PathBuf>,
    pub preview: bool,
}

impl RunConfig {
    /// Defaults for everything except the catalog path.
    pub fn new(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            colors_path: PathBuf::from("colors.txt"),
            out_dir: PathBuf::from("."),
            thresholds: AgeThresholds::default(),
            metallicity_bins: DEFAULT_METALLICITY_BINS,
            grid_bins: DEFAULT_GRID_BINS,
            cmin: DEFAULT_CMIN,
            export_summary: None,
            export_histogram: None,
            preview: false,
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        let AgeThresholds { t1, t2 } = self.thresholds;
        if !(t1.is_finite() && t2.is_finite()) || t1 >= t2 {
            return Err(AppError::config(format!(
                "Invalid age thresholds: t1={t1}, t2={t2} (must be finite and t1 < t2)."
            )));
        }
        if !(1..=MAX_METALLICITY_BINS).contains(&self.metallicity_bins) {
            return Err(AppError::config(format!(
                "Metallicity bins must be in 1..={MAX_METALLICITY_BINS}, got {}.",
                self.metallicity_bins
            )));
        }
        if !(2..=MAX_GRID_BINS).contains(&self.grid_bins) {
            return Err(AppError::config(format!(
                "2D histogram bins must be in 2..={MAX_GRID_BINS}, got {}.",
                self.grid_bins
            )));
        }
        if !self.cmin.is_finite() || self.cmin <= 0.0 {
            return Err(AppError::config(format!(
                "Invalid visibility threshold cmin={} (must be finite and > 0).",
                self.cmin
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn thresholds_tie_to_older_cohort() {
        let t = AgeThresholds::default();
        assert_eq!(t.classify(0.999), Some(Cohort::Young));
        assert_eq!(t.classify(1.0), Some(Cohort::MiddleAged));
        assert_eq!(t.classify(2.999), Some(Cohort::MiddleAged));
        assert_eq!(t.classify(3.0), Some(Cohort::Old));
        assert_eq!(t.classify(f64::NAN), None);
    }

    #[test]
    fn cohort_labels_follow_thresholds() {
        let t = AgeThresholds::default();
        assert_eq!(Cohort::Young.label(&t), "t < 1");
        assert_eq!(Cohort::MiddleAged.label(&t), "1 ≤ t < 3");
        assert_eq!(Cohort::Old.label(&t), "t ≥ 3");

        let t = AgeThresholds { t1: 0.5, t2: 2.25 };
        assert_eq!(Cohort::MiddleAged.label(&t), "0.5 ≤ t < 2.25");
    }

    #[test]
    fn band_label_uses_two_decimals() {
        let band = AgeColorBand {
            lower: 0.05,
            upper: 0.11,
            color: Rgb::from_u8(0, 0, 0),
        };
        assert_eq!(band.label(), "0.05 Gyr - 0.11 Gyr");
    }

    #[test]
    fn rgb_round_trips_through_u8() {
        let c = Rgb::from_u8(12, 200, 255);
        assert_eq!(c.to_u8(), (12, 200, 255));
    }

    #[test]
    fn validate_rejects_unordered_thresholds() {
        let mut config = RunConfig::new("stars.dat");
        config.thresholds = AgeThresholds { t1: 3.0, t2: 1.0 };
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        config.thresholds = AgeThresholds::default();
        config.grid_bins = 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn validate_caps_bin_counts() {
        let mut config = RunConfig::new("stars.dat");
        config.grid_bins = MAX_GRID_BINS;
        config.metallicity_bins = MAX_METALLICITY_BINS;
        assert!(config.validate().is_ok());

        config.grid_bins = 1 << 33;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.exit_code(), 3);

        config.grid_bins = DEFAULT_GRID_BINS;
        config.metallicity_bins = MAX_METALLICITY_BINS + 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        config.metallicity_bins = 0;
        assert!(config.validate().is_err());
    }
}
