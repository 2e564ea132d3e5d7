//! specscope library - real-time audio spectrum analysis and display

pub mod analysis;
pub mod audio;
pub mod cli;
pub mod display;
pub mod error;
pub mod params;
pub mod rendering;
