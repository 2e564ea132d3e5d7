//! Real-time spectral analysis pipeline.
//!
//! Sliding window -> forward FFT -> magnitude mapping -> lock-free publish.
//! Everything here is allocated in [`Analyzer::new`]; [`Analyzer::process`]
//! runs on the audio thread and neither blocks nor allocates.

pub mod mapper;
pub mod publication;
pub mod transform;
pub mod window;

pub use mapper::{clamp_to_display, MagnitudeMapper};
pub use publication::{Frame, FrameConsumer, FrameProducer};
pub use transform::SpectralTransform;
pub use window::SampleWindow;

use crate::error::AnalysisError;
use crate::params::AnalysisConfig;

/// Result of one capture callback, mapped onto the driver's return code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackStatus {
    /// Keep delivering audio
    Continue,
    /// Stop the client. Reserved; the pipeline currently never asks for it.
    Quit,
}

/// Owned analysis context driven by the capture callback
pub struct Analyzer {
    window: SampleWindow,
    transform: SpectralTransform,
    mapper: MagnitudeMapper,
    producer: FrameProducer,
}

impl Analyzer {
    /// Allocate window, plan, buffers and the publication channel.
    ///
    /// Returns the analyzer (to be moved into the audio callback) and the
    /// consumer half for the render loop.
    pub fn new(config: &AnalysisConfig) -> Result<(Self, FrameConsumer), AnalysisError> {
        config.validate()?;

        let bins = config.frequency_bins();
        let transform = SpectralTransform::new(config.window_size)?;
        let (producer, consumer) = publication::channel(config.window_size, bins);

        log::debug!(
            "Analyzer ready: {} sample window, {} bins, display height {}",
            config.window_size,
            bins,
            config.display_height
        );

        Ok((
            Self {
                window: SampleWindow::new(config.window_size),
                transform,
                mapper: MagnitudeMapper::new(bins, config.display_height),
                producer,
            },
            consumer,
        ))
    }

    /// Audio callback entry point: ingest one chunk and publish a new frame
    pub fn process(&mut self, chunk: &[f32]) -> CallbackStatus {
        self.window.ingest(chunk);
        self.transform.run(self.window.as_slice());

        let window = self.window.as_slice();
        let spectrum = self.transform.spectrum();
        let mapper = &self.mapper;
        self.producer.publish_with(|frame| {
            frame.samples.copy_from_slice(window);
            mapper.map(spectrum, &mut frame.magnitudes);
        });

        CallbackStatus::Continue
    }

    /// Sliding window length (samples)
    pub fn window_len(&self) -> usize {
        self.window.len()
    }

    pub fn frames_published(&self) -> u64 {
        self.producer.published()
    }
}
