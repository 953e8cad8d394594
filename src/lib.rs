//! `kr-crisis-index` library crate.
//!
//! The binary (`crisis`) is a thin wrapper around this library so that:
//!
//! - the fetch/classify/aggregate pipeline is testable without spawning processes
//! - provider access sits behind one trait (`data::StatSource`) that tests can script
//! - the snapshot schema lives in one place (`domain`) for both writer and reader

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod risk;
