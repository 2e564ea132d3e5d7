//! Display mode and projection of analysis frames onto screen points.

use bytemuck::{Pod, Zeroable};
use winit::keyboard::KeyCode;

use crate::analysis::{clamp_to_display, Frame};

/// Which half of a frame gets drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Frequency magnitudes (lower quarter of the spectrum)
    #[default]
    Spectrum,
    /// Raw sample window
    Waveform,
}

/// User requests that move between modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    /// "Move left": back to the spectrum
    Previous,
    /// "Move right": on to the waveform
    Next,
}

impl ModeEvent {
    /// Left/right arrows; every other key is ignored
    pub fn from_key(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::ArrowLeft => Some(ModeEvent::Previous),
            KeyCode::ArrowRight => Some(ModeEvent::Next),
            _ => None,
        }
    }
}

impl DisplayMode {
    pub fn apply(self, event: ModeEvent) -> Self {
        match event {
            ModeEvent::Previous => DisplayMode::Spectrum,
            ModeEvent::Next => DisplayMode::Waveform,
        }
    }
}

/// Point vertex in normalized device coordinates
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

/// Turns frames into point lists, reusing one vertex buffer
pub struct PointProjector {
    height: u32,
    vertices: Vec<Vertex>,
}

impl PointProjector {
    /// `capacity` is the largest point count ever projected (the window length)
    pub fn new(height: u32, capacity: usize) -> Self {
        Self {
            height,
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Project `frame` in `mode`; one point per sample or per magnitude.
    ///
    /// Points are spread evenly across the width. Spectrum heights are used
    /// as-is (already clamped); waveform samples in `[-1, 1]` map to
    /// `(sample * h + h) / 2` and get the same clamp.
    pub fn project(&mut self, mode: DisplayMode, frame: &Frame) -> &[Vertex] {
        self.vertices.clear();
        let height = self.height;

        match mode {
            DisplayMode::Spectrum => {
                let count = frame.magnitudes.len();
                for (i, &magnitude) in frame.magnitudes.iter().enumerate() {
                    self.vertices.push(Vertex {
                        position: [spread(i, count), to_ndc(magnitude as f32, height)],
                    });
                }
            }
            DisplayMode::Waveform => {
                let count = frame.samples.len();
                let h = height as f32;
                for (i, &sample) in frame.samples.iter().enumerate() {
                    let y = clamp_to_display((sample * h + h) / 2.0, height);
                    self.vertices.push(Vertex {
                        position: [spread(i, count), to_ndc(y as f32, height)],
                    });
                }
            }
        }

        &self.vertices
    }
}

/// Horizontal NDC position of point `index` out of `count`
fn spread(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return -1.0;
    }
    index as f32 / (count - 1) as f32 * 2.0 - 1.0
}

/// Vertical NDC position of pixel row `y` (0 = bottom)
fn to_ndc(y: f32, height: u32) -> f32 {
    if height <= 1 {
        return -1.0;
    }
    y / (height - 1) as f32 * 2.0 - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(samples: Vec<f32>, magnitudes: Vec<u32>) -> Frame {
        Frame {
            sequence: 1,
            samples,
            magnitudes,
        }
    }

    #[test]
    fn test_initial_mode_is_spectrum() {
        assert_eq!(DisplayMode::default(), DisplayMode::Spectrum);
    }

    #[test]
    fn test_mode_transitions() {
        let mode = DisplayMode::Spectrum;
        assert_eq!(mode.apply(ModeEvent::Next), DisplayMode::Waveform);
        assert_eq!(mode.apply(ModeEvent::Previous), DisplayMode::Spectrum);

        let mode = DisplayMode::Waveform;
        assert_eq!(mode.apply(ModeEvent::Next), DisplayMode::Waveform);
        assert_eq!(mode.apply(ModeEvent::Previous), DisplayMode::Spectrum);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(ModeEvent::from_key(KeyCode::ArrowLeft), Some(ModeEvent::Previous));
        assert_eq!(ModeEvent::from_key(KeyCode::ArrowRight), Some(ModeEvent::Next));
        assert_eq!(ModeEvent::from_key(KeyCode::ArrowUp), None);
        assert_eq!(ModeEvent::from_key(KeyCode::Space), None);
    }

    #[test]
    fn test_spectrum_projection() {
        let mut projector = PointProjector::new(5, 8);
        let points = projector
            .project(DisplayMode::Spectrum, &frame(vec![0.0; 8], vec![0, 2, 4]))
            .to_vec();

        assert_eq!(points.len(), 3);
        assert_eq!(points[0].position, [-1.0, -1.0]);
        assert_eq!(points[1].position, [0.0, 0.0]);
        assert_eq!(points[2].position, [1.0, 1.0]);
    }

    #[test]
    fn test_waveform_projection_clamps() {
        let mut projector = PointProjector::new(512, 4);
        let points = projector
            .project(
                DisplayMode::Waveform,
                &frame(vec![-5.0, 0.0, 1.0, 5.0], vec![0]),
            )
            .to_vec();

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].position[1], -1.0);
        // Silence sits on the middle row
        assert!(points[1].position[1].abs() < 0.01);
        // Full scale and beyond pin to the top row
        assert_eq!(points[2].position[1], 1.0);
        assert_eq!(points[3].position[1], 1.0);
        assert!(points.iter().all(|p| (-1.0..=1.0).contains(&p.position[1])));
    }
}
