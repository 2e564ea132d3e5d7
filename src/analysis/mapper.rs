//! Complex bins to clamped, frequency-weighted display heights.

use rustfft::num_complex::Complex;

/// Clamp a display coordinate to `[0, height - 1]`.
///
/// NaN maps to 0; infinities pin to the nearest bound.
pub fn clamp_to_display(value: f32, height: u32) -> u32 {
    let max = height.saturating_sub(1);
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, max as f32) as u32
}

/// Maps the lower quarter of a spectrum to display magnitudes.
///
/// Bin `i` of `bins` is scaled by `exp(2 * i / bins)` to lift the high end,
/// which otherwise rolls off and leaves only the bass visible.
#[derive(Debug, Clone)]
pub struct MagnitudeMapper {
    gains: Vec<f32>,
    display_height: u32,
}

impl MagnitudeMapper {
    /// Precompute gains for `bins` output values clamped to `display_height`
    pub fn new(bins: usize, display_height: u32) -> Self {
        let gains = (0..bins)
            .map(|i| (2.0 * i as f64 / bins as f64).exp() as f32)
            .collect();

        Self {
            gains,
            display_height,
        }
    }

    /// Number of magnitudes produced per call
    pub fn bins(&self) -> usize {
        self.gains.len()
    }

    pub fn display_height(&self) -> u32 {
        self.display_height
    }

    /// Overwrite `out` with magnitudes of the first `bins()` entries of
    /// `spectrum`.
    pub fn map(&self, spectrum: &[Complex<f32>], out: &mut [u32]) {
        debug_assert!(spectrum.len() >= self.gains.len());
        debug_assert_eq!(out.len(), self.gains.len());

        for ((slot, bin), gain) in out.iter_mut().zip(spectrum).zip(&self.gains) {
            // hypot: no intermediate overflow for huge components
            let magnitude = bin.norm() * gain;
            *slot = clamp_to_display(magnitude, self.display_height);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spectrum_of(values: &[(f32, f32)]) -> Vec<Complex<f32>> {
        values.iter().map(|&(re, im)| Complex::new(re, im)).collect()
    }

    #[test]
    fn test_clamp_to_display() {
        assert_eq!(clamp_to_display(-3.0, 512), 0);
        assert_eq!(clamp_to_display(0.0, 512), 0);
        assert_eq!(clamp_to_display(255.9, 512), 255);
        assert_eq!(clamp_to_display(511.0, 512), 511);
        assert_eq!(clamp_to_display(512.0, 512), 511);
        assert_eq!(clamp_to_display(f32::INFINITY, 512), 511);
        assert_eq!(clamp_to_display(f32::NEG_INFINITY, 512), 0);
        assert_eq!(clamp_to_display(f32::NAN, 512), 0);
        assert_eq!(clamp_to_display(100.0, 1), 0);
    }

    #[test]
    fn test_magnitude_and_gain() {
        let mapper = MagnitudeMapper::new(4, 1000);
        // 3-4-5 triangle, gain exp(0) = 1 for bin 0
        let spectrum = spectrum_of(&[(3.0, 4.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        let mut out = vec![0; 4];
        mapper.map(&spectrum, &mut out);

        assert_eq!(out[0], 5);
        // 10 * exp(0.5) = 16.48...
        assert_eq!(out[1], 16);
        // 10 * exp(1.0) = 27.18...
        assert_eq!(out[2], 27);
        assert_eq!(out[3], 0);
    }

    #[test]
    fn test_only_lower_bins_are_read() {
        let mapper = MagnitudeMapper::new(2, 100);
        let spectrum = spectrum_of(&[(1.0, 0.0), (1.0, 0.0), (1e6, 0.0), (1e6, 0.0)]);
        let mut out = vec![0; 2];
        mapper.map(&spectrum, &mut out);

        assert_eq!(out, vec![1, 2]);
    }

    #[test]
    fn test_output_always_in_display_range() {
        let height = 512;
        let mapper = MagnitudeMapper::new(8, height);
        let spectrum = spectrum_of(&[
            (0.0, 0.0),
            (f32::MAX, f32::MAX),
            (-f32::MAX, 1.0),
            (1e30, -1e30),
            (-0.5, -0.5),
            (511.0, 0.0),
            (f32::MIN_POSITIVE, 0.0),
            (1e-30, 1e-30),
        ]);
        let mut out = vec![u32::MAX; 8];
        mapper.map(&spectrum, &mut out);

        assert!(out.iter().all(|&v| v < height));
        assert_eq!(out[1], height - 1);
        assert_eq!(out[2], height - 1);
        assert_eq!(out[3], height - 1);
    }

    #[test]
    fn test_zero_spectrum_maps_to_zero() {
        let mapper = MagnitudeMapper::new(1024, 512);
        let spectrum = vec![Complex::new(0.0, 0.0); 4096];
        let mut out = vec![7; 1024];
        mapper.map(&spectrum, &mut out);

        assert!(out.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_map_is_idempotent() {
        let mapper = MagnitudeMapper::new(64, 512);
        let spectrum: Vec<Complex<f32>> = (0..256)
            .map(|i| Complex::new((i as f32 * 0.37).sin() * 40.0, (i as f32).cos() * 25.0))
            .collect();

        let mut first = vec![0; 64];
        let mut second = vec![0; 64];
        mapper.map(&spectrum, &mut first);
        mapper.map(&spectrum, &mut second);

        assert_eq!(first, second);
    }
}
