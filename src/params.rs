//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers live here: window length, display extents, colors.

mod analysis;
mod render;

pub use analysis::{AnalysisConfig, FREQUENCY_BINS, WINDOW_SIZE};
pub use render::RenderConfig;
