//! Age cohorts.
//!
//! The partition is computed once per run (see `app::pipeline`) and shared by
//! every figure and export.

pub mod partition;

pub use partition::*;
