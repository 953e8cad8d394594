//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the indicator vocabulary (`IndicatorKey`, `IndicatorConfig`, `RiskClass`)
//! - observed values and their provenance (`ObservedValue`)
//! - the persisted output (`Snapshot`, `IndicatorResult`, `OverallRisk`)
//! - the static `Catalog` of thresholds, fallbacks and provider codes

pub mod catalog;
pub mod types;

pub use catalog::*;
pub use types::*;
