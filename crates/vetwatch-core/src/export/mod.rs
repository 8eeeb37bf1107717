//! Dashboard export.

mod board;

pub use board::*;
