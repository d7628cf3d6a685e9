//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - catalog rows (`StarRecord`) and the catalog column layout
//! - the age-band color table entries (`AgeColorBand`, `Rgb`)
//! - age cohorts and their thresholds (`Cohort`, `AgeThresholds`)
//! - the resolved run configuration (`RunConfig`)

pub mod types;

pub use types::*;
