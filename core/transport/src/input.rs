use waveform::{Viewport, ZoomDirection};

use crate::{backend::PlaybackBackend, controller::PlaybackController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Home,
    End,
    /// Play, or stop when already playing.
    Space,
    /// Pause, or resume when paused.
    Pause,
}

/// Toolkit input already reduced to what the waveform view reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Wheel { dy: f64 },
    Click { x: f64 },
    Key(Key),
    /// Scrollbar dragged to a new value.
    Scrollbar(usize),
    Resize { width: u32, height: u32 },
}

impl<B: PlaybackBackend> PlaybackController<B> {
    pub fn process_input(&mut self, viewport: &mut Viewport, event: InputEvent) {
        match event {
            InputEvent::Wheel { dy } => viewport.zoom(ZoomDirection::from_wheel_delta(dy)),
            InputEvent::Click { x } => self.seek_to_pixel(viewport, x),
            InputEvent::Key(Key::Home) => self.seek_to_start(viewport),
            InputEvent::Key(Key::End) => self.seek_to_end(viewport),
            InputEvent::Key(Key::Space) => self.toggle_play(),
            InputEvent::Key(Key::Pause) => self.toggle_pause(),
            InputEvent::Scrollbar(value) => viewport.scroll_to(value),
            InputEvent::Resize { width, height } => viewport.resize(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{PlaybackState, tests::setup};

    #[test]
    fn test_wheel_zooms_viewport() {
        let (mut controller, mut viewport) = setup(100_000, 100);
        let fit = viewport.zoom_level();

        controller.process_input(&mut viewport, InputEvent::Wheel { dy: -1.0 });
        assert!((viewport.zoom_level() - fit * 1.1).abs() < 1e-12);

        controller.process_input(&mut viewport, InputEvent::Wheel { dy: 1.0 });
        assert!((viewport.zoom_level() - fit * 1.1 * 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_click_seeks() {
        let (mut controller, mut viewport) = setup(1000, 100);
        controller.process_input(&mut viewport, InputEvent::Click { x: 50.0 });
        assert_eq!(controller.snapshot().seek_point, 500);
    }

    #[test]
    fn test_keys_drive_transport() {
        let (mut controller, mut viewport) = setup(1000, 100);

        controller.process_input(&mut viewport, InputEvent::Key(Key::End));
        assert_eq!(controller.snapshot().display_sample, Some(999));
        controller.process_input(&mut viewport, InputEvent::Key(Key::Home));
        assert_eq!(controller.snapshot().display_sample, Some(0));

        controller.process_input(&mut viewport, InputEvent::Key(Key::Space));
        assert_eq!(controller.state(), PlaybackState::Playing);
        controller.process_input(&mut viewport, InputEvent::Key(Key::Pause));
        assert_eq!(controller.state(), PlaybackState::Paused);
        controller.process_input(&mut viewport, InputEvent::Key(Key::Pause));
        assert_eq!(controller.state(), PlaybackState::Playing);
        controller.process_input(&mut viewport, InputEvent::Key(Key::Space));
        assert_eq!(controller.state(), PlaybackState::Stopped);
    }

    #[test]
    fn test_scrollbar_value_is_clamped() {
        let (mut controller, mut viewport) = setup(1000, 100);
        viewport.set_zoom_level(1.0);

        controller.process_input(&mut viewport, InputEvent::Scrollbar(10_000));
        assert_eq!(viewport.scroll_offset(), 900);
        assert_eq!(viewport.scrollbar_metrics().value, 900);
    }

    #[test]
    fn test_resize_reaches_viewport() {
        let (mut controller, mut viewport) = setup(1000, 100);
        controller.process_input(
            &mut viewport,
            InputEvent::Resize {
                width: 300,
                height: 50,
            },
        );
        assert_eq!(viewport.width(), 300);
        assert_eq!(viewport.height(), 50);
    }
}
