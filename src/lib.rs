#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod analysis;
pub mod config;
pub mod error;
pub mod image;
pub mod types;

// Building blocks of the analysis, usable on their own.
pub mod chart;
pub mod classify;
pub mod lanes;
pub mod overlay;
pub mod palette;
pub mod profile;
pub mod sampling;

// --- High-level re-exports -------------------------------------------------

pub use crate::analysis::{AnalysisParams, AnalysisReport, GelAnalyzer, LaneReport};
pub use crate::classify::classify;
pub use crate::error::GelError;
pub use crate::lanes::discover_lanes;
pub use crate::profile::aggregate;
pub use crate::sampling::sample_line;
pub use crate::types::{LaneBoundary, LaneProfile, Point, ReferenceAxis, Region};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::{ImageRgba8, ImageView};
    pub use crate::{AnalysisParams, AnalysisReport, GelAnalyzer, LaneBoundary, Point};
}
