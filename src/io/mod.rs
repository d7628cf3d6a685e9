//! Input/output helpers.
//!
//! - catalog ingest (`catalog`)
//! - age-band color table (`colors`)
//! - summary exports (JSON/CSV) (`export`)

pub mod catalog;
pub mod colors;
pub mod export;

pub use catalog::*;
pub use colors::*;
pub use export::*;
