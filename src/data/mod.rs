//! External data: provider clients, the `StatSource` seam, and the
//! per-indicator fetchers built on top of it.

pub mod daum;
pub mod ecos;
pub mod fetchers;
pub mod fred;
pub mod source;

pub use fetchers::Fetchers;
pub use source::{HttpStatSource, OfflineSource, RawObservation, StatSource};
