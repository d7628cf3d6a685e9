//! Binned statistics shared by the figures.
//!
//! - axis rounding and bin edges (`binning`)
//! - per-cohort relative-frequency histograms, mean and median (`histogram`)
//! - mass × metallicity count grids with absent cells (`density`)
//! - iso-count contours over those grids (`contour`)

pub mod binning;
pub mod contour;
pub mod density;
pub mod histogram;

pub use binning::*;
pub use contour::*;
pub use density::*;
pub use histogram::*;
