//! Reporting utilities: terminal summaries of a snapshot.

pub mod format;

pub use format::*;
