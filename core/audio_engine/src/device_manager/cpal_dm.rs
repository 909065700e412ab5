use super::{AudioDeviceManager, OutputFormat};
use crate::device_manager::{AudioDeviceError, AudioSource, AudioSourceBufferKind};
use cpal::{
    OutputCallbackInfo,
    traits::{DeviceTrait, HostTrait, StreamTrait},
};

/// Output on the default cpal host and device.
#[derive(Default)]
pub struct CpalAudioDeviceManager {
    stream: Option<cpal::Stream>,
}

impl std::fmt::Debug for CpalAudioDeviceManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpalAudioDeviceManager")
            .field("open", &self.stream.is_some())
            .finish()
    }
}

impl CpalAudioDeviceManager {
    pub fn new() -> Self {
        Self { stream: None }
    }

    fn pick_config(
        device: &cpal::Device,
        preferred_rate: Option<u32>,
    ) -> Result<cpal::SupportedStreamConfig, AudioDeviceError> {
        if let Some(rate) = preferred_rate {
            if let Ok(mut ranges) = device.supported_output_configs() {
                if let Some(config) =
                    ranges.find_map(|range| range.try_with_sample_rate(cpal::SampleRate(rate)))
                {
                    return Ok(config);
                }
            }
            log::warn!("Output device does not offer {rate} Hz, falling back to its default");
        }

        device
            .default_output_config()
            .map_err(|e| AudioDeviceError::ConfigUnavailable(e.to_string()))
    }

    fn build_output_stream<T, C>(
        &self,
        device: &cpal::Device,
        config: cpal::SupportedStreamConfig,
        mut cb: C,
    ) -> Result<cpal::Stream, AudioDeviceError>
    where
        T: cpal::SizedSample,
        C: FnMut(&mut [T], usize) + Send + 'static,
    {
        let error_cb = move |err| {
            log::error!("Stream error: {err}");
        };

        let channels = (config.channels() as usize).max(1);
        let data_cb = move |data: &mut [T], _: &OutputCallbackInfo| {
            let frame_size = data.len() / channels;
            cb(data, frame_size);
        };

        device
            .build_output_stream(&config.into(), data_cb, error_cb, None)
            .map_err(|e| AudioDeviceError::StreamBuildFailed(e.to_string()))
    }
}

impl AudioDeviceManager for CpalAudioDeviceManager {
    fn open_output_stream(
        &mut self,
        mut audio_source: Box<dyn AudioSource>,
        preferred_rate: Option<u32>,
    ) -> Result<OutputFormat, AudioDeviceError> {
        let host = cpal::default_host();

        let device = host
            .default_output_device()
            .ok_or(AudioDeviceError::DeviceNotFound)?;

        let config = Self::pick_config(&device, preferred_rate)?;
        let format = OutputFormat {
            channels: config.channels(),
            sample_rate: config.sample_rate().0,
        };

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                self.build_output_stream(&device, config, move |data, frame_size| {
                    audio_source.fill_buffer(AudioSourceBufferKind::F32(data), frame_size)
                })?
            }
            cpal::SampleFormat::I16 => {
                self.build_output_stream(&device, config, move |data, frame_size| {
                    audio_source.fill_buffer(AudioSourceBufferKind::I16(data), frame_size)
                })?
            }
            cpal::SampleFormat::U16 => {
                self.build_output_stream(&device, config, move |data, frame_size| {
                    audio_source.fill_buffer(AudioSourceBufferKind::U16(data), frame_size)
                })?
            }
            cpal::SampleFormat::I32 => {
                self.build_output_stream(&device, config, move |data, frame_size| {
                    audio_source.fill_buffer(AudioSourceBufferKind::I32(data), frame_size)
                })?
            }
            format => {
                return Err(AudioDeviceError::UnsupportedFormat(format.to_string()));
            }
        };

        // Some backends start streams on creation.
        stream
            .pause()
            .map_err(|e| AudioDeviceError::StreamPauseFailed(e.to_string()))?;

        if let Ok(name) = device.name() {
            log::info!(
                "Opened output '{name}': {} ch @ {} Hz",
                format.channels,
                format.sample_rate
            );
        }

        self.stream = Some(stream);
        Ok(format)
    }

    fn play(&mut self) -> Result<(), AudioDeviceError> {
        self.stream
            .as_ref()
            .ok_or(AudioDeviceError::StreamNotOpen)?
            .play()
            .map_err(|e| AudioDeviceError::StreamStartFailed(e.to_string()))
    }

    fn pause(&mut self) -> Result<(), AudioDeviceError> {
        self.stream
            .as_ref()
            .ok_or(AudioDeviceError::StreamNotOpen)?
            .pause()
            .map_err(|e| AudioDeviceError::StreamPauseFailed(e.to_string()))
    }
}
