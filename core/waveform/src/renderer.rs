use crate::{
    buffer::SampleBuffer,
    config::RenderConfig,
    frame::{ColumnSpan, EnvelopeColumn, Frame, Lane, Rect, Trace, Vertex},
    viewport::Viewport,
};

/// Where the playback cursor should be drawn, if anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorState {
    pub sample: Option<usize>,
}

impl CursorState {
    pub const fn at(sample: usize) -> Self {
        Self {
            sample: Some(sample),
        }
    }

    pub const fn hidden() -> Self {
        Self { sample: None }
    }
}

/// Stateless: every call rebuilds the frame from the buffer, viewport and cursor.
///
/// The strategy is picked per call from the zoom level alone: above
/// `envelope_threshold` samples per pixel each column is reduced to its
/// min/max, otherwise every sample becomes a vertex. There is no hysteresis.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveformRenderer {
    config: RenderConfig,
}

impl WaveformRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(
        &self,
        buffer: &SampleBuffer,
        viewport: &Viewport,
        cursor: CursorState,
        frame: &mut Frame,
    ) {
        let width = viewport.width();
        let height = viewport.height() as f32;
        frame.reset(width as f32, height);

        let sample_count = buffer.len().min(viewport.sample_count());
        if sample_count == 0 || width == 0 || viewport.height() == 0 {
            return;
        }

        let lane_count = buffer.display_channel_count();
        let lane_height = height / lane_count as f32;
        for channel in 0..lane_count {
            let Some(samples) = buffer.channel(channel) else {
                continue;
            };
            let samples = &samples[..sample_count];

            let lane = Lane {
                channel,
                top: lane_height * channel as f32,
                height: lane_height,
                trace: self.trace(samples, viewport),
            };
            frame.zero_lines.push(lane.zero_line_y());
            frame.lanes.push(lane);
        }

        if lane_count == 2 {
            frame.separators.push(height / 2.0);
        }

        let data_end = viewport.sample_to_pixel(sample_count);
        if data_end < f64::from(width) {
            let x = data_end.max(0.0) as f32;
            frame.no_data = Some(Rect {
                x,
                y: 0.0,
                width: width as f32 - x,
                height,
            });
        }

        frame.cursor_x = Self::cursor_x(viewport, cursor);
    }

    fn trace(&self, samples: &[f32], viewport: &Viewport) -> Trace {
        if viewport.samples_per_pixel() > self.config.envelope_threshold {
            Trace::Envelope(self.envelope(samples, viewport))
        } else {
            self.sample_trace(samples, viewport)
        }
    }

    fn envelope(&self, samples: &[f32], viewport: &Viewport) -> Vec<EnvelopeColumn> {
        let samples_per_pixel = viewport.samples_per_pixel();
        let scroll = viewport.scroll_offset();
        let width = viewport.width() as usize;
        let mut columns = Vec::with_capacity(width);

        for x in 0..width {
            let start = scroll + (x as f64 * samples_per_pixel) as usize;
            if start >= samples.len() {
                break;
            }
            let end = (scroll + ((x + 1) as f64 * samples_per_pixel) as usize).min(samples.len());
            if end <= start {
                continue;
            }

            columns.push(EnvelopeColumn {
                x: x as f32,
                span: self.column_span(&samples[start..end]),
            });
        }

        columns
    }

    fn column_span(&self, window: &[f32]) -> ColumnSpan {
        let (mut min, mut max) = window
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });

        let silence = self.config.silence_threshold;
        if min.abs() < silence && max.abs() < silence {
            return ColumnSpan::Silent;
        }

        if max - min < self.config.flatness_threshold {
            min -= self.config.flat_padding;
            max += self.config.flat_padding;
        }

        ColumnSpan::Range {
            min: min.clamp(-1.0, 1.0),
            max: max.clamp(-1.0, 1.0),
        }
    }

    fn sample_trace(&self, samples: &[f32], viewport: &Viewport) -> Trace {
        let scroll = viewport.scroll_offset();
        let zoom = viewport.zoom_level();
        // One extra sample so the partially visible rightmost one is still joined.
        let end = scroll
            .saturating_add(viewport.visible_sample_count())
            .saturating_add(1)
            .min(samples.len());

        let vertices = samples
            .get(scroll..end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(offset, &sample)| Vertex {
                x: (offset as f64 * zoom) as f32,
                amplitude: sample.clamp(-1.0, 1.0),
            })
            .collect();

        Trace::Samples {
            vertices,
            markers: viewport.samples_per_pixel() <= self.config.marker_threshold,
        }
    }

    fn cursor_x(viewport: &Viewport, cursor: CursorState) -> Option<f32> {
        let sample = cursor.sample?;
        let start = viewport.scroll_offset();
        let end = start.saturating_add(viewport.visible_sample_count());
        (start..end)
            .contains(&sample)
            .then(|| viewport.sample_to_pixel(sample) as f32)
    }
}
