use crate::style::Theme;
use crate::view::Viewport;

/// Configuration for a graph view.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    /// Initial half-extent of the longer viewport side, in world units.
    pub base_zoom: f64,
    /// Fraction of the current zoom level applied per zoom tick.
    pub zoom_speed: f64,
    /// Smallest allowed zoom level.
    pub min_zoom: f64,
    /// Largest allowed zoom level.
    pub max_zoom: f64,
    /// Cartesian samples per horizontal pixel.
    pub sampling_gain: u32,
    /// Full turns swept by polar curves.
    pub polar_turns: u32,
    /// Polar samples per turn.
    pub polar_steps_per_turn: u32,
    /// Grid unit multiplier.
    pub grid_unit: f64,
    /// Grid cells across the positive half-width.
    pub grid_divisions: u32,
    /// Arrow mark length as a fraction of the horizontal span.
    pub arrow_fraction: f64,
    /// Size used when the container reports no usable size.
    pub default_viewport: Viewport,
    /// Layer colors.
    pub theme: Theme,
}

impl GraphConfig {
    /// Set the initial zoom level.
    pub fn with_base_zoom(mut self, base_zoom: f64) -> Self {
        self.base_zoom = base_zoom;
        self
    }

    /// Set the per-tick zoom fraction.
    pub fn with_zoom_speed(mut self, zoom_speed: f64) -> Self {
        self.zoom_speed = zoom_speed;
        self
    }

    /// Set the Cartesian samples per pixel.
    pub fn with_sampling_gain(mut self, sampling_gain: u32) -> Self {
        self.sampling_gain = sampling_gain;
        self
    }

    /// Set the number of turns swept by polar curves.
    pub fn with_polar_turns(mut self, polar_turns: u32) -> Self {
        self.polar_turns = polar_turns;
        self
    }

    /// Set the layer colors.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_zoom: 10.0,
            zoom_speed: 0.1,
            min_zoom: 1e-15,
            max_zoom: 1e12,
            sampling_gain: 10,
            polar_turns: 3,
            polar_steps_per_turn: 360,
            grid_unit: 1.0,
            grid_divisions: 5,
            arrow_fraction: 0.01,
            default_viewport: Viewport::default(),
            theme: Theme::default(),
        }
    }
}
