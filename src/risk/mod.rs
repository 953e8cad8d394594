//! Risk scoring: per-indicator classification and the composite aggregate.
//!
//! Both pieces are pure functions over the static `IndicatorConfig` thresholds;
//! nothing here touches the network or the filesystem.

pub mod aggregate;
pub mod classify;

pub use aggregate::*;
pub use classify::*;
