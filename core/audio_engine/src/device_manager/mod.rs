use thiserror::Error;

pub mod cpal_dm;

#[derive(Debug, Clone, Error)]
pub enum AudioDeviceError {
    #[error("No default output device available")]
    DeviceNotFound,
    #[error("Failed to query output config: {0}")]
    ConfigUnavailable(String),
    #[error("Unsupported sample format '{0}'")]
    UnsupportedFormat(String),
    #[error("Failed to build audio stream: {0}")]
    StreamBuildFailed(String),
    #[error("Failed to start audio stream: {0}")]
    StreamStartFailed(String),
    #[error("Failed to pause audio stream: {0}")]
    StreamPauseFailed(String),
    #[error("No output stream is open")]
    StreamNotOpen,
}

/// Output buffer handed to an [`AudioSource`], in the device's native format.
#[derive(Debug)]
pub enum AudioSourceBufferKind<'a> {
    F32(&'a mut [f32]),
    I16(&'a mut [i16]),
    U16(&'a mut [u16]),
    I32(&'a mut [i32]),
}

/// Fills device buffers from the real-time audio thread.
///
/// `buffer` holds `frame_size` interleaved frames. Implementations must not
/// block, allocate or log.
pub trait AudioSource: Send {
    fn fill_buffer(&mut self, buffer: AudioSourceBufferKind<'_>, frame_size: usize);
}

/// Shape of the stream a device manager opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFormat {
    pub channels: u16,
    pub sample_rate: u32,
}

pub trait AudioDeviceManager {
    /// Opens a paused output stream fed by `source`.
    ///
    /// A sample rate in `preferred_rate` is used when the device offers it.
    /// On error no stream is left behind.
    fn open_output_stream(
        &mut self,
        source: Box<dyn AudioSource>,
        preferred_rate: Option<u32>,
    ) -> Result<OutputFormat, AudioDeviceError>;

    fn play(&mut self) -> Result<(), AudioDeviceError>;

    fn pause(&mut self) -> Result<(), AudioDeviceError>;
}
