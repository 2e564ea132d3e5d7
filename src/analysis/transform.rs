//! Forward FFT over the sliding window with a precomputed plan.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

use crate::error::AnalysisError;

/// Forward complex transform bound to one window length.
///
/// The plan and all buffers (input, output, scratch) are created once, so
/// `run` never allocates.
pub struct SpectralTransform {
    fft: Arc<dyn Fft<f32>>,
    input: Vec<Complex<f32>>,
    output: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
}

impl SpectralTransform {
    /// Plan a forward transform of exactly `len` points
    pub fn new(len: usize) -> Result<Self, AnalysisError> {
        if len == 0 {
            return Err(AnalysisError::InvalidWindowSize(len));
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(len);
        let scratch_len = fft.get_outofplace_scratch_len();

        Ok(Self {
            fft,
            input: vec![Complex::new(0.0, 0.0); len],
            output: vec![Complex::new(0.0, 0.0); len],
            scratch: vec![Complex::new(0.0, 0.0); scratch_len],
        })
    }

    /// Transform a real-valued window. The result is read back via `spectrum`.
    pub fn run(&mut self, window: &[f32]) {
        debug_assert_eq!(window.len(), self.input.len());

        for (slot, &sample) in self.input.iter_mut().zip(window) {
            *slot = Complex::new(sample, 0.0);
        }

        // Out-of-place processing clobbers `input`; it is refilled every run.
        self.fft
            .process_outofplace_with_scratch(&mut self.input, &mut self.output, &mut self.scratch);
    }

    /// Frequency-domain output of the last `run` (all `len` bins)
    pub fn spectrum(&self) -> &[Complex<f32>] {
        &self.output
    }

    pub fn len(&self) -> usize {
        self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }
}
