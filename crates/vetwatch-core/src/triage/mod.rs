//! Patient risk triage.
//!
//! Pipeline: episodes → patient groups → summaries → ranked board

mod alert;
mod grouping;
mod ranking;

pub use alert::*;
pub use grouping::*;
pub use ranking::*;
