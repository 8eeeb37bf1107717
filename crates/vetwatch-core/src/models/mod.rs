//! Domain models for discharge triage.

mod episode;
mod metrics;
mod summary;

pub use episode::*;
pub use metrics::*;
pub use summary::*;
