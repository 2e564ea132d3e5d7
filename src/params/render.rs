//! Window and rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window title
    pub title: String,

    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    /// Also the range spectrum magnitudes are clamped to.
    pub window_height: u32,

    /// Background color (linear RGBA)
    pub clear_color: [f64; 4],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "specscope".to_string(),
            window_width: 1280,
            window_height: 512,
            clear_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}
