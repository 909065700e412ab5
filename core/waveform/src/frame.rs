//! Geometry produced by the renderer for one redraw.
//!
//! Waveform traces are kept in lane-local amplitude space (`-1.0..=1.0`, x in
//! pixels) so they can be inspected without knowing the surface layout;
//! [`Frame::paint`] lowers everything to pixel primitives.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// One sample of a connected trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f32,
    pub amplitude: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnSpan {
    /// Every sample in the column is below the silence threshold.
    Silent,
    Range { min: f32, max: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeColumn {
    pub x: f32,
    pub span: ColumnSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Trace {
    /// Min/max per pixel column.
    Envelope(Vec<EnvelopeColumn>),
    /// One vertex per sample, optionally with a marker on each.
    Samples { vertices: Vec<Vertex>, markers: bool },
}

/// A horizontal band of the surface showing one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Lane {
    pub channel: usize,
    pub top: f32,
    pub height: f32,
    pub trace: Trace,
}

impl Lane {
    /// +1 maps to the lane top, -1 to its bottom.
    pub fn amplitude_to_y(&self, amplitude: f32) -> f32 {
        self.top + (1.0 - amplitude) * self.height * 0.5
    }

    pub fn zero_line_y(&self) -> f32 {
        self.amplitude_to_y(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Background,
    /// Area past the end of the buffer.
    NoData,
    Waveform,
    SampleMarker,
    ChannelSeparator,
    ZeroLine,
    Cursor,
}

/// Drawing surface supplied by the toolkit.
pub trait Canvas {
    fn fill_rect(&mut self, rect: Rect, style: Style);
    fn segments(&mut self, segments: &[(Point, Point)], style: Style);
    fn polyline(&mut self, points: &[Point], style: Style);
    fn points(&mut self, points: &[Point], size: f32, style: Style);
}

pub const MARKER_SIZE: f32 = 4.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub width: f32,
    pub height: f32,
    pub lanes: Vec<Lane>,
    /// Filled block covering the window past the last sample.
    pub no_data: Option<Rect>,
    /// y of each horizontal channel separator.
    pub separators: Vec<f32>,
    /// y of each zero-amplitude reference line.
    pub zero_lines: Vec<f32>,
    pub cursor_x: Option<f32>,
}

impl Frame {
    pub fn reset(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.lanes.clear();
        self.no_data = None;
        self.separators.clear();
        self.zero_lines.clear();
        self.cursor_x = None;
    }

    pub fn lane(&self, channel: usize) -> Option<&Lane> {
        self.lanes.iter().find(|lane| lane.channel == channel)
    }

    pub fn paint<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        canvas.fill_rect(
            Rect {
                x: 0.0,
                y: 0.0,
                width: self.width,
                height: self.height,
            },
            Style::Background,
        );

        if let Some(rect) = self.no_data {
            canvas.fill_rect(rect, Style::NoData);
        }

        let horizontal = |y: f32| (Point::new(0.0, y), Point::new(self.width, y));
        let zero_lines: Vec<_> = self.zero_lines.iter().map(|&y| horizontal(y)).collect();
        canvas.segments(&zero_lines, Style::ZeroLine);
        if !self.separators.is_empty() {
            let separators: Vec<_> = self.separators.iter().map(|&y| horizontal(y)).collect();
            canvas.segments(&separators, Style::ChannelSeparator);
        }

        for lane in &self.lanes {
            Self::paint_lane(lane, canvas);
        }

        if let Some(x) = self.cursor_x {
            canvas.segments(
                &[(Point::new(x, 0.0), Point::new(x, self.height))],
                Style::Cursor,
            );
        }
    }

    fn paint_lane<C: Canvas + ?Sized>(lane: &Lane, canvas: &mut C) {
        match &lane.trace {
            Trace::Envelope(columns) => {
                let zero = lane.zero_line_y();
                let segments: Vec<_> = columns
                    .iter()
                    .map(|column| match column.span {
                        ColumnSpan::Silent => {
                            (Point::new(column.x, zero), Point::new(column.x + 1.0, zero))
                        }
                        ColumnSpan::Range { min, max } => (
                            Point::new(column.x, lane.amplitude_to_y(min)),
                            Point::new(column.x, lane.amplitude_to_y(max)),
                        ),
                    })
                    .collect();
                canvas.segments(&segments, Style::Waveform);
            }
            Trace::Samples { vertices, markers } => {
                let points: Vec<_> = vertices
                    .iter()
                    .map(|v| Point::new(v.x, lane.amplitude_to_y(v.amplitude)))
                    .collect();
                canvas.polyline(&points, Style::Waveform);
                if *markers {
                    canvas.points(&points, MARKER_SIZE, Style::SampleMarker);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct RecordingCanvas {
        rects: Vec<(Rect, Style)>,
        segments: Vec<(Vec<(Point, Point)>, Style)>,
        polylines: Vec<(Vec<Point>, Style)>,
        points: Vec<(Vec<Point>, Style)>,
    }

    impl Canvas for RecordingCanvas {
        fn fill_rect(&mut self, rect: Rect, style: Style) {
            self.rects.push((rect, style));
        }

        fn segments(&mut self, segments: &[(Point, Point)], style: Style) {
            self.segments.push((segments.to_vec(), style));
        }

        fn polyline(&mut self, points: &[Point], style: Style) {
            self.polylines.push((points.to_vec(), style));
        }

        fn points(&mut self, points: &[Point], _size: f32, style: Style) {
            self.points.push((points.to_vec(), style));
        }
    }

    fn lane(trace: Trace) -> Lane {
        Lane {
            channel: 0,
            top: 0.0,
            height: 100.0,
            trace,
        }
    }

    #[test]
    fn test_amplitude_maps_into_lane() {
        let lane = Lane {
            channel: 1,
            top: 50.0,
            height: 50.0,
            trace: Trace::Envelope(Vec::new()),
        };
        assert_eq!(lane.amplitude_to_y(1.0), 50.0);
        assert_eq!(lane.amplitude_to_y(-1.0), 100.0);
        assert_eq!(lane.zero_line_y(), 75.0);
    }

    #[test]
    fn test_silent_column_paints_flat_segment_on_zero_line() {
        let frame = Frame {
            width: 10.0,
            height: 100.0,
            lanes: vec![lane(Trace::Envelope(vec![EnvelopeColumn {
                x: 3.0,
                span: ColumnSpan::Silent,
            }]))],
            zero_lines: vec![50.0],
            ..Frame::default()
        };

        let mut canvas = RecordingCanvas::default();
        frame.paint(&mut canvas);

        let (waveform, _) = canvas
            .segments
            .iter()
            .find(|(_, style)| *style == Style::Waveform)
            .unwrap();
        assert_eq!(
            waveform,
            &vec![(Point::new(3.0, 50.0), Point::new(4.0, 50.0))]
        );
    }

    #[test]
    fn test_markers_painted_only_when_requested() {
        let vertices = vec![
            Vertex { x: 0.0, amplitude: 0.0 },
            Vertex { x: 20.0, amplitude: 1.0 },
        ];

        let mut canvas = RecordingCanvas::default();
        let mut frame = Frame {
            width: 40.0,
            height: 100.0,
            lanes: vec![lane(Trace::Samples {
                vertices: vertices.clone(),
                markers: false,
            })],
            ..Frame::default()
        };
        frame.paint(&mut canvas);
        assert_eq!(canvas.polylines.len(), 1);
        assert!(canvas.points.is_empty());

        frame.lanes = vec![lane(Trace::Samples {
            vertices,
            markers: true,
        })];
        let mut canvas = RecordingCanvas::default();
        frame.paint(&mut canvas);
        assert_eq!(
            canvas.points,
            vec![(
                vec![Point::new(0.0, 50.0), Point::new(20.0, 0.0)],
                Style::SampleMarker
            )]
        );
    }

    #[test]
    fn test_no_data_region_and_cursor_painted() {
        let frame = Frame {
            width: 100.0,
            height: 80.0,
            no_data: Some(Rect {
                x: 60.0,
                y: 0.0,
                width: 40.0,
                height: 80.0,
            }),
            cursor_x: Some(12.0),
            ..Frame::default()
        };

        let mut canvas = RecordingCanvas::default();
        frame.paint(&mut canvas);

        assert_eq!(canvas.rects.len(), 2);
        assert_eq!(canvas.rects[1].1, Style::NoData);
        let (cursor, _) = canvas
            .segments
            .iter()
            .find(|(_, style)| *style == Style::Cursor)
            .unwrap();
        assert_eq!(cursor, &vec![(Point::new(12.0, 0.0), Point::new(12.0, 80.0))]);
    }
}
