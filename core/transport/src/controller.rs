use waveform::{CursorState, RedrawRequest, Viewport};

use crate::{backend::PlaybackBackend, config::TransportConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Whether the caller should keep scheduling ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Continue,
    Halt,
}

/// Cursor bookkeeping as seen by the UI thread at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    pub state: PlaybackState,
    /// `None` until the first seek or play.
    pub display_sample: Option<usize>,
    /// Last explicit seek target; play-from-stop and stop both return here.
    pub seek_point: usize,
    /// Last polled engine position while playing, frozen while paused.
    pub playback_sample: usize,
}

/// Stopped/Playing/Paused state machine driving a [`PlaybackBackend`].
///
/// Lives on the UI thread. The only state it shares with the audio thread is
/// the backend's read position, touched through `seek` and `position`.
/// Viewport is passed in per call; the controller keeps no reference to it.
#[derive(Debug)]
pub struct PlaybackController<B: PlaybackBackend> {
    backend: B,
    config: TransportConfig,
    state: PlaybackState,
    moved_cursor_sample: usize,
    playback_sample: usize,
    display_sample: Option<usize>,
    redraw: RedrawRequest,
}

impl<B: PlaybackBackend> PlaybackController<B> {
    pub fn new(backend: B, config: TransportConfig) -> Self {
        Self {
            backend,
            config,
            state: PlaybackState::Stopped,
            moved_cursor_sample: 0,
            playback_sample: 0,
            display_sample: None,
            redraw: RedrawRequest::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            state: self.state,
            display_sample: self.display_sample,
            seek_point: self.moved_cursor_sample,
            playback_sample: self.playback_sample,
        }
    }

    pub fn cursor_state(&self) -> CursorState {
        CursorState {
            sample: self.display_sample,
        }
    }

    pub fn take_redraw(&mut self) -> bool {
        self.redraw.take()
    }

    /// Moves the seek point, the engine position and the displayed cursor to
    /// `target`, then scrolls so it sits a lead margin into the window.
    ///
    /// Out-of-range targets are clamped to the last sample. While playing the
    /// engine continues from the new position.
    pub fn seek(&mut self, viewport: &mut Viewport, target: usize) {
        let total = self.backend.total_samples();
        if total == 0 {
            return;
        }

        let target = target.min(total - 1);
        self.moved_cursor_sample = target;
        self.backend.seek(target);
        self.display_sample = Some(target);
        if self.state != PlaybackState::Stopped {
            self.playback_sample = target;
        }

        let lead =
            (viewport.visible_sample_count() as f64 * self.config.seek_lead_fraction) as usize;
        viewport.scroll_to(target.saturating_sub(lead));

        log::debug!("seek to sample {} ({:?})", target, self.state);
        self.redraw.request();
    }

    pub fn seek_to_pixel(&mut self, viewport: &mut Viewport, x: f64) {
        let target = viewport.pixel_to_sample(x);
        self.seek(viewport, target);
    }

    pub fn seek_to_start(&mut self, viewport: &mut Viewport) {
        self.seek(viewport, 0);
    }

    pub fn seek_to_end(&mut self, viewport: &mut Viewport) {
        let last = self.backend.total_samples().saturating_sub(1);
        self.seek(viewport, last);
    }

    pub fn play(&mut self) {
        if self.backend.total_samples() == 0 {
            log::debug!("play ignored, buffer is empty");
            return;
        }

        match self.state {
            PlaybackState::Stopped => self.start_from(self.moved_cursor_sample),
            PlaybackState::Paused => self.start_from(self.playback_sample),
            PlaybackState::Playing if self.backend.end_of_stream() => {
                log::debug!("play after end of stream, restarting");
                self.halt_stream();
                self.state = PlaybackState::Stopped;
                self.start_from(self.moved_cursor_sample);
            }
            PlaybackState::Playing => {}
        }
    }

    /// Only valid while playing; freezes the position the engine reached.
    pub fn pause(&mut self) {
        if self.state != PlaybackState::Playing {
            log::debug!("pause ignored while {:?}", self.state);
            return;
        }

        self.halt_stream();
        self.playback_sample = self.backend.position();
        self.display_sample = Some(self.clamp_to_buffer(self.playback_sample));
        self.state = PlaybackState::Paused;
        log::debug!("paused at sample {}", self.playback_sample);
        self.redraw.request();
    }

    /// Returns to the last seek point, not to the start of the buffer.
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Playing {
            self.halt_stream();
        }

        self.state = PlaybackState::Stopped;
        self.backend.seek(self.moved_cursor_sample);
        self.playback_sample = self.moved_cursor_sample;
        if self.display_sample.is_some() {
            self.display_sample = Some(self.moved_cursor_sample);
        }
        log::debug!("stopped, cursor back at {}", self.moved_cursor_sample);
        self.redraw.request();
    }

    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Playing if !self.backend.end_of_stream() => self.stop(),
            _ => self.play(),
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused => self.play(),
            PlaybackState::Stopped => {}
        }
    }

    /// Polls the engine position, moves the displayed cursor and keeps it
    /// inside the right follow margin.
    pub fn tick(&mut self, viewport: &mut Viewport) -> TickStatus {
        if self.state != PlaybackState::Playing {
            return TickStatus::Halt;
        }

        let total = self.backend.total_samples();
        let current = self.backend.position().min(total);
        self.playback_sample = current;

        let cursor = self.clamp_to_buffer(current);
        self.display_sample = Some(cursor);
        self.follow(viewport, cursor);
        self.redraw.request();

        if current >= total {
            log::info!("playback reached end of buffer ({} samples)", total);
            TickStatus::Halt
        } else {
            TickStatus::Continue
        }
    }

    fn follow(&self, viewport: &mut Viewport, cursor: usize) {
        let width = f64::from(viewport.width());
        let margin = self.config.follow_margin_px.min(width);
        if viewport.sample_to_pixel(cursor) <= width - margin {
            return;
        }

        let target = cursor as f64 - (width - margin) / viewport.zoom_level();
        viewport.scroll_to(target.max(0.0) as usize);
    }

    fn start_from(&mut self, sample: usize) {
        self.backend.seek(sample);
        self.playback_sample = sample;
        self.display_sample = Some(self.clamp_to_buffer(sample));

        if let Err(e) = self.backend.start() {
            log::error!("failed to start playback: {}", e);
            return;
        }

        log::debug!("playing from sample {}", sample);
        self.state = PlaybackState::Playing;
        self.redraw.request();
    }

    fn halt_stream(&mut self) {
        if let Err(e) = self.backend.stop() {
            log::error!("failed to stop playback: {}", e);
        }
    }

    fn clamp_to_buffer(&self, sample: usize) -> usize {
        sample.min(self.backend.total_samples().saturating_sub(1))
    }
}
