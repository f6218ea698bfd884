//! src/panels.rs
//!
//! Top-level panels module and re-exports.

pub mod assay;
pub mod keys;
pub mod legend;
pub mod stats;
pub mod title;

pub use assay::{AssayPanel, ViewOptions};
pub use keys::KeysPanel;
pub use legend::LegendPanel;
pub use stats::StatsPanel;
pub use title::TitlePanel;
