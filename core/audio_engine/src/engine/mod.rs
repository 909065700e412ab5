use std::sync::Arc;

use transport::PlaybackBackend;
use waveform::SampleBuffer;

use crate::device_manager::{
    AudioDeviceError, AudioDeviceManager, OutputFormat, cpal_dm::CpalAudioDeviceManager,
};

pub mod cursor;
pub mod feeder;

pub use cursor::PlaybackCursor;
pub use feeder::{FillOutcome, SampleFeeder};

/// Plays a [`SampleBuffer`] through an [`AudioDeviceManager`].
///
/// The stream is opened once, paused, and then toggled by `start`/`stop`.
/// Position and end-of-stream travel between threads through the shared
/// [`PlaybackCursor`] only.
#[derive(Debug)]
pub struct PlaybackEngine<D: AudioDeviceManager> {
    device: D,
    cursor: Arc<PlaybackCursor>,
    total_samples: usize,
    output: OutputFormat,
}

impl PlaybackEngine<CpalAudioDeviceManager> {
    pub fn open_default(buffer: Arc<SampleBuffer>) -> Result<Self, AudioDeviceError> {
        Self::open(buffer, CpalAudioDeviceManager::new())
    }
}

impl<D: AudioDeviceManager> PlaybackEngine<D> {
    pub fn open(buffer: Arc<SampleBuffer>, mut device: D) -> Result<Self, AudioDeviceError> {
        let cursor = Arc::new(PlaybackCursor::default());
        let total_samples = buffer.len();
        let sample_rate = buffer.sample_rate();

        let feeder = SampleFeeder::new(buffer, cursor.clone());
        let output = device.open_output_stream(Box::new(feeder), Some(sample_rate))?;

        if output.sample_rate != sample_rate {
            log::warn!(
                "Buffer is {sample_rate} Hz but output runs at {} Hz, playback speed will differ",
                output.sample_rate
            );
        }
        log::debug!("Playback engine ready: {total_samples} samples");

        Ok(Self {
            device,
            cursor,
            total_samples,
            output,
        })
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output
    }

    pub fn cursor(&self) -> &Arc<PlaybackCursor> {
        &self.cursor
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }
}

impl<D: AudioDeviceManager> PlaybackBackend for PlaybackEngine<D> {
    type Error = AudioDeviceError;

    fn start(&mut self) -> Result<(), Self::Error> {
        self.device.play()
    }

    fn stop(&mut self) -> Result<(), Self::Error> {
        self.device.pause()
    }

    fn seek(&self, sample: usize) {
        self.cursor.seek(sample);
    }

    fn position(&self) -> usize {
        self.cursor.position()
    }

    fn total_samples(&self) -> usize {
        self.total_samples
    }

    fn end_of_stream(&self) -> bool {
        self.cursor.end_of_stream()
    }
}
