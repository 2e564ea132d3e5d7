//! Error types for analysis, capture and rendering setup.
//!
//! Every variant here is an initialization failure. Once the pipeline is
//! running, the audio path has no error channel.

use thiserror::Error;

/// Invalid analysis parameters.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("window size must be a non-zero multiple of 4, got {0}")]
    InvalidWindowSize(usize),

    #[error("display height must be at least 1 pixel")]
    InvalidDisplayHeight,
}

/// Failures while opening or activating the audio capture host.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("no audio input device found")]
    NoInputDevice,

    #[error("no input device matching '{0}'")]
    DeviceNotFound(String),

    #[error("failed to enumerate input devices: {0}")]
    Devices(#[from] cpal::DevicesError),

    #[error("failed to get input config: {0}")]
    DeviceConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("unsupported input sample format {0:?}")]
    UnsupportedSampleFormat(cpal::SampleFormat),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[cfg(feature = "jack")]
    #[error("jack: {0}")]
    Jack(#[from] jack::Error),

    #[error("capture backend '{0}' is not compiled in (enable the '{0}' feature)")]
    BackendUnavailable(&'static str),
}

/// Failures while creating the window or the GPU surface.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
}
