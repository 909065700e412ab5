use serde::{Deserialize, Serialize};

/// Zoom behaviour of the [`Viewport`](crate::viewport::Viewport).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Multiplier applied per wheel step towards the waveform.
    pub zoom_in_factor: f64,
    /// Multiplier applied per wheel step away from the waveform.
    ///
    /// Not the inverse of `zoom_in_factor`: one step in followed by one step
    /// out lands at 0.99x the starting zoom.
    pub zoom_out_factor: f64,
    /// `zoom_min = fit * zoom_min_ratio`.
    pub zoom_min_ratio: f64,
    /// Upper zoom bound in pixels per sample.
    pub zoom_ceiling: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            zoom_min_ratio: 0.01,
            zoom_ceiling: 100.0,
        }
    }
}

/// Thresholds used by the [`WaveformRenderer`](crate::renderer::WaveformRenderer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Above this many samples per pixel the envelope is drawn.
    pub envelope_threshold: f64,
    /// At or below this many samples per pixel each sample gets a marker.
    pub marker_threshold: f64,
    /// Columns whose samples all stay under this magnitude are drawn flat.
    pub silence_threshold: f32,
    /// Min/max spans narrower than this are padded.
    pub flatness_threshold: f32,
    pub flat_padding: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            envelope_threshold: 5.0,
            marker_threshold: 0.1,
            silence_threshold: 0.005,
            flatness_threshold: 0.01,
            flat_padding: 0.005,
        }
    }
}
