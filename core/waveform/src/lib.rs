pub mod buffer;
pub mod config;
pub mod frame;
pub mod redraw;
pub mod renderer;
pub mod viewport;

pub use buffer::{SampleBuffer, SampleBufferError};
pub use config::{RenderConfig, ViewConfig};
pub use frame::{Canvas, Frame, Point, Rect, Style};
pub use redraw::RedrawRequest;
pub use renderer::{CursorState, WaveformRenderer};
pub use viewport::{Scrollbar, ScrollbarMetrics, Viewport, ZoomDirection};
