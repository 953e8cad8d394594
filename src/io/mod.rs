//! Input/output helpers.
//!
//! - snapshot JSON read/write (`snapshot`)

pub mod snapshot;

pub use snapshot::*;
