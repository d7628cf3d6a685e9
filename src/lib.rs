//! `stellar-cohorts` library crate.
//!
//! The binary (`starplot`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - figures and exports can be produced from notebooks or other tools
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod cohort;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod render;
pub mod report;
pub mod stats;
