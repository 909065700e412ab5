use std::{
    path::PathBuf,
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use anyhow::Context;
use audio_engine::{PlaybackEngine, config::load_config, loader::load_wav};
use clap::Parser;
use transport::{FrameClock, PlaybackController, TickStatus};
use waveform::{
    Canvas, Frame, Point, Rect, Scrollbar, ScrollbarMetrics, Style, Viewport, WaveformRenderer,
};

/// Headless waveform viewer: plays a WAV file and renders the follow-along
/// view into an off-screen surface.
#[derive(Debug, Parser)]
#[command(name = "waveview", version)]
struct Args {
    /// WAV file to load
    file: PathBuf,
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Sample to start playback from
    #[arg(long)]
    start: Option<usize>,
    /// Stop after this many seconds instead of at the end of the file
    #[arg(long)]
    seconds: Option<f64>,
}

/// Counts primitives instead of drawing them.
#[derive(Debug, Default, Clone, Copy)]
struct StatsCanvas {
    rects: usize,
    segments: usize,
    polyline_points: usize,
    markers: usize,
}

impl Canvas for StatsCanvas {
    fn fill_rect(&mut self, _rect: Rect, _style: Style) {
        self.rects += 1;
    }

    fn segments(&mut self, segments: &[(Point, Point)], _style: Style) {
        self.segments += segments.len();
    }

    fn polyline(&mut self, points: &[Point], _style: Style) {
        self.polyline_points += points.len();
    }

    fn points(&mut self, points: &[Point], _size: f32, _style: Style) {
        self.markers += points.len();
    }
}

#[derive(Debug, Default)]
struct LogScrollbar;

impl Scrollbar for LogScrollbar {
    fn set_metrics(&mut self, metrics: ScrollbarMetrics) {
        log::trace!(
            "scrollbar: value={} max={} slider={:.3}",
            metrics.value,
            metrics.maximum,
            metrics.slider_size
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let mut config = args
        .config
        .as_deref()
        .map(load_config)
        .unwrap_or_default();
    if let Some(width) = args.width {
        config.surface.width = width;
    }
    if let Some(height) = args.height {
        config.surface.height = height;
    }

    let buffer = Arc::new(
        load_wav(&args.file).with_context(|| format!("Failed to load {}", args.file.display()))?,
    );

    let width = config.surface.width;
    let mut viewport = Viewport::new(width, config.surface.height, config.view);
    viewport.set_buffer_length(buffer.len(), width);
    let renderer = WaveformRenderer::new(config.render);

    let engine =
        PlaybackEngine::open_default(buffer.clone()).context("Failed to open audio output")?;
    let mut controller = PlaybackController::new(engine, config.transport);

    if let Some(start) = args.start {
        controller.seek(&mut viewport, start);
    }
    controller.play();

    let deadline = args
        .seconds
        .map(|secs| Instant::now() + Duration::from_secs_f64(secs.max(0.0)));
    let mut clock = FrameClock::new(config.transport.tick_interval());
    clock.start();

    let mut frame = Frame::default();
    let mut scrollbar = LogScrollbar;
    let mut frames_painted = 0u64;
    let mut last = Instant::now();

    while clock.is_running() {
        thread::sleep(clock.until_next_tick());
        let now = Instant::now();
        let due = clock.advance_by(now - last);
        last = now;
        if !due {
            continue;
        }

        let status = controller.tick(&mut viewport);

        let view_changed = viewport.take_redraw();
        let cursor_moved = controller.take_redraw();
        if view_changed || cursor_moved {
            renderer.render(&buffer, &viewport, controller.cursor_state(), &mut frame);
            let mut canvas = StatsCanvas::default();
            frame.paint(&mut canvas);
            viewport.push_scrollbar(&mut scrollbar);
            frames_painted += 1;
            log::debug!(
                "frame {}: cursor={:?} scroll={} {:?}",
                clock.current_tick(),
                controller.snapshot().display_sample,
                viewport.scroll_offset(),
                canvas
            );
        }

        if status == TickStatus::Halt {
            clock.stop();
        } else if deadline.is_some_and(|deadline| now >= deadline) {
            controller.stop();
            clock.stop();
        }
    }

    log::info!(
        "Done after {} ticks, {} frames painted",
        clock.current_tick(),
        frames_painted
    );
    Ok(())
}
