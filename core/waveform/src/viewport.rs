use std::ops::Range;

use crate::{config::ViewConfig, redraw::RedrawRequest};

/// Tolerance added before flooring in [`Viewport::pixel_to_sample`] so that a
/// pixel produced by [`Viewport::sample_to_pixel`] maps back to its sample
/// despite `(k * z) / z` landing a hair under `k`.
const PIXEL_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel rolled away from the user (negative dy) zooms in.
    pub fn from_wheel_delta(dy: f64) -> Self {
        if dy < 0.0 { Self::In } else { Self::Out }
    }
}

/// What an external scrollbar widget needs to mirror the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollbarMetrics {
    pub maximum: usize,
    pub value: usize,
    /// Visible share of the buffer, `0.0..=1.0`.
    pub slider_size: f32,
}

/// Sink for [`ScrollbarMetrics`]; implemented by the toolkit's scrollbar.
pub trait Scrollbar {
    fn set_metrics(&mut self, metrics: ScrollbarMetrics);
}

/// Maps between sample indices and pixel columns.
///
/// Zoom is expressed in pixels per sample. After every mutation the scroll
/// offset is clamped so that `scroll_offset <= sample_count - visible_sample_count`
/// (or `0` when the whole buffer fits with room to spare); zoom itself is only
/// ever clamped to `[zoom_min, zoom_max]`.
#[derive(Debug, Clone)]
pub struct Viewport {
    config: ViewConfig,
    sample_count: usize,
    width: u32,
    height: u32,
    zoom_level: f64,
    zoom_min: f64,
    zoom_max: f64,
    scroll_offset: usize,
    redraw: RedrawRequest,
}

impl Viewport {
    pub fn new(width: u32, height: u32, config: ViewConfig) -> Self {
        Self {
            config,
            sample_count: 0,
            width,
            height,
            zoom_level: 1.0,
            zoom_min: 1.0,
            zoom_max: 1.0,
            scroll_offset: 0,
            redraw: RedrawRequest::default(),
        }
    }

    /// Fits `sample_count` samples into `width` pixels and scrolls to the start.
    pub fn set_buffer_length(&mut self, sample_count: usize, width: u32) {
        self.sample_count = sample_count;
        self.width = width;
        self.scroll_offset = 0;

        if sample_count == 0 || width == 0 {
            self.zoom_level = 1.0;
            self.zoom_min = 1.0;
            self.zoom_max = 1.0;
        } else {
            let fit = self.fit_zoom();
            self.zoom_level = fit;
            self.zoom_min = fit * self.config.zoom_min_ratio;
            self.zoom_max = self.config.zoom_ceiling.max(fit);
        }

        log::debug!(
            "viewport: {} samples over {}px, zoom {:.6} px/sample (min {:.6}, max {:.2})",
            sample_count,
            width,
            self.zoom_level,
            self.zoom_min,
            self.zoom_max
        );
        self.redraw.request();
    }

    /// Surface size changed. Zoom bounds follow the new fit width; the zoom
    /// level itself is kept unless it falls outside them.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }

        self.width = width;
        self.height = height;

        if self.sample_count > 0 && width > 0 {
            let fit = self.fit_zoom();
            self.zoom_min = fit * self.config.zoom_min_ratio;
            self.zoom_max = self.config.zoom_ceiling.max(fit);
            self.zoom_level = self.zoom_level.clamp(self.zoom_min, self.zoom_max);
            self.clamp_scroll();
        }
        self.redraw.request();
    }

    pub fn zoom(&mut self, direction: ZoomDirection) {
        if self.sample_count == 0 {
            return;
        }

        let factor = match direction {
            ZoomDirection::In => self.config.zoom_in_factor,
            ZoomDirection::Out => self.config.zoom_out_factor,
        };
        self.set_zoom_level(self.zoom_level * factor);
    }

    /// Sets zoom directly, clamped to the current bounds.
    pub fn set_zoom_level(&mut self, zoom_level: f64) {
        if self.sample_count == 0 || !zoom_level.is_finite() {
            return;
        }

        self.zoom_level = zoom_level.clamp(self.zoom_min, self.zoom_max);
        self.clamp_scroll();
        log::debug!(
            "viewport: zoom {:.6} px/sample, scroll {}",
            self.zoom_level,
            self.scroll_offset
        );
        self.redraw.request();
    }

    pub fn scroll_to(&mut self, offset: usize) {
        if self.sample_count == 0 {
            return;
        }

        let clamped = offset.min(self.max_scroll_offset());
        if clamped != self.scroll_offset {
            self.scroll_offset = clamped;
            self.redraw.request();
        }
    }

    pub fn sample_to_pixel(&self, sample: usize) -> f64 {
        (sample as f64 - self.scroll_offset as f64) * self.zoom_level
    }

    /// `scroll_offset + floor(x / zoom_level)`, clamped to `[0, sample_count - 1]`.
    ///
    /// The floor is taken after adding `1e-6` samples so that any pixel
    /// returned by [`sample_to_pixel`](Self::sample_to_pixel) round-trips.
    /// With integer pixel input below 1 px/sample every pixel lands on the
    /// first sample of its column; the samples in between are unreachable.
    pub fn pixel_to_sample(&self, x: f64) -> usize {
        if self.sample_count == 0 {
            return 0;
        }

        let offset = (x / self.zoom_level + PIXEL_EPSILON).floor();
        let sample = self.scroll_offset as f64 + offset;
        let last = (self.sample_count - 1) as f64;
        sample.clamp(0.0, last) as usize
    }

    /// `ceil(width / zoom_level)`; may exceed the buffer length when zoomed out.
    pub fn visible_sample_count(&self) -> usize {
        if self.width == 0 {
            return 0;
        }
        (f64::from(self.width) / self.zoom_level).ceil() as usize
    }

    /// Sample range actually backed by data in the current window.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.scroll_offset.min(self.sample_count);
        let end = self
            .scroll_offset
            .saturating_add(self.visible_sample_count())
            .min(self.sample_count);
        start..end
    }

    pub fn max_scroll_offset(&self) -> usize {
        self.sample_count.saturating_sub(self.visible_sample_count())
    }

    pub fn scrollbar_metrics(&self) -> ScrollbarMetrics {
        let slider_size = if self.sample_count == 0 {
            1.0
        } else {
            (self.visible_sample_count() as f64 / self.sample_count as f64).min(1.0) as f32
        };

        ScrollbarMetrics {
            maximum: self.max_scroll_offset(),
            value: self.scroll_offset,
            slider_size,
        }
    }

    pub fn push_scrollbar<S: Scrollbar + ?Sized>(&self, scrollbar: &mut S) {
        scrollbar.set_metrics(self.scrollbar_metrics());
    }

    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn zoom_min(&self) -> f64 {
        self.zoom_min
    }

    pub fn zoom_max(&self) -> f64 {
        self.zoom_max
    }

    pub fn samples_per_pixel(&self) -> f64 {
        1.0 / self.zoom_level
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    fn fit_zoom(&self) -> f64 {
        f64::from(self.width) / self.sample_count as f64
    }

    fn clamp_scroll(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }
}
