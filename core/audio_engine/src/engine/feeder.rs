use std::sync::Arc;

use cpal::{FromSample, Sample as _};
use waveform::SampleBuffer;

use super::cursor::PlaybackCursor;
use crate::device_manager::{AudioSource, AudioSourceBufferKind};

/// What one device callback did to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillOutcome {
    pub copied: usize,
    /// This callback raised end-of-stream.
    pub reached_end: bool,
    /// A seek landed during the callback and the advance was dropped.
    pub superseded: bool,
}

/// Audio-thread side of playback: copies buffer samples into device output.
///
/// Mono sources go to every output channel. Stereo sources go to the first
/// two; a mono device gets the average of both.
pub struct SampleFeeder {
    buffer: Arc<SampleBuffer>,
    cursor: Arc<PlaybackCursor>,
}

impl std::fmt::Debug for SampleFeeder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleFeeder")
            .field("samples", &self.buffer.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

impl SampleFeeder {
    pub fn new(buffer: Arc<SampleBuffer>, cursor: Arc<PlaybackCursor>) -> Self {
        Self { buffer, cursor }
    }

    pub fn fill<T>(&mut self, data: &mut [T], frame_size: usize) -> FillOutcome
    where
        T: FromSample<f32> + Copy,
    {
        let silence = 0.0f32.to_sample::<T>();
        if frame_size == 0 {
            data.fill(silence);
            return FillOutcome::default();
        }
        let channels = (data.len() / frame_size).max(1);

        let observed = self.cursor.load();
        let position = observed.position();
        let total = self.buffer.len();
        let remaining = total.saturating_sub(position);
        let copied = frame_size.min(remaining);

        let left = self.buffer.channel(0).unwrap_or(&[]);
        let right = self.buffer.channel(1);

        for (frame_index, frame) in data.chunks_mut(channels).enumerate() {
            if frame_index >= copied {
                frame.fill(silence);
                continue;
            }
            let index = position + frame_index;
            let l = left[index];
            match right {
                None => frame.fill(l.to_sample::<T>()),
                Some(right) if channels == 1 => {
                    frame[0] = ((l + right[index]) * 0.5).to_sample::<T>();
                }
                Some(right) => {
                    frame[0] = l.to_sample::<T>();
                    frame[1] = right[index].to_sample::<T>();
                    frame[2..].fill(silence);
                }
            }
        }

        let reached_end = copied == 0 && !observed.end_of_stream();
        let end_of_stream = observed.end_of_stream() || reached_end;
        let published = self
            .cursor
            .publish(observed, position + copied, end_of_stream);

        FillOutcome {
            copied,
            reached_end: reached_end && published,
            superseded: !published,
        }
    }
}

impl AudioSource for SampleFeeder {
    fn fill_buffer(&mut self, buffer: AudioSourceBufferKind<'_>, frame_size: usize) {
        match buffer {
            AudioSourceBufferKind::F32(data) => {
                self.fill(data, frame_size);
            }
            AudioSourceBufferKind::I16(data) => {
                self.fill(data, frame_size);
            }
            AudioSourceBufferKind::U16(data) => {
                self.fill(data, frame_size);
            }
            AudioSourceBufferKind::I32(data) => {
                self.fill(data, frame_size);
            }
        }
    }
}
