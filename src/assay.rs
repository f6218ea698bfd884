//! src/assay.rs
//!
//! Top-level `assay` module: the fixed lick dataset and everything computed from it.

pub mod analysis;
pub mod data;
pub mod plot;
pub mod reshape;
pub mod stats;
pub mod summary;

/// Re-exports
pub use analysis::{PanelAnalysis, analyze};
pub use data::Test;
