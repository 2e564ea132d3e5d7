//! Spectral analysis configuration and constants.

use crate::error::AnalysisError;

/// Sliding window length (samples)
/// Larger windows resolve low frequencies better at the cost of latency.
pub const WINDOW_SIZE: usize = 4096;

/// Number of displayed frequency bins (lower quarter of the spectrum)
pub const FREQUENCY_BINS: usize = WINDOW_SIZE / 4;

/// Spectral analysis configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// Sliding window / transform length (samples)
    /// Must be a non-zero multiple of 4.
    pub window_size: usize,

    /// Height of the display area the magnitudes are clamped to (pixels)
    pub display_height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            display_height: 512,
        }
    }
}

impl AnalysisConfig {
    /// Default window size with magnitudes clamped to `display_height`
    pub fn with_display_height(display_height: u32) -> Self {
        Self {
            display_height,
            ..Self::default()
        }
    }

    /// Number of retained frequency bins
    pub fn frequency_bins(&self) -> usize {
        self.window_size / 4
    }

    /// Largest value a magnitude may take after clamping
    pub fn max_magnitude(&self) -> u32 {
        self.display_height.saturating_sub(1)
    }

    /// Validate configuration (window size multiple of 4, non-empty display)
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.window_size == 0 || self.window_size % 4 != 0 {
            return Err(AnalysisError::InvalidWindowSize(self.window_size));
        }
        if self.display_height == 0 {
            return Err(AnalysisError::InvalidDisplayHeight);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frequency_bins(), FREQUENCY_BINS);
        assert_eq!(config.max_magnitude(), 511);
    }

    #[test]
    fn test_rejects_bad_window_sizes() {
        for size in [0, 6, 4095] {
            let config = AnalysisConfig {
                window_size: size,
                ..AnalysisConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(AnalysisError::InvalidWindowSize(size))
            );
        }
    }

    #[test]
    fn test_rejects_zero_display_height() {
        let config = AnalysisConfig::with_display_height(0);
        assert_eq!(config.validate(), Err(AnalysisError::InvalidDisplayHeight));
    }
}
