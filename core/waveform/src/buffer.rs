use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleBufferError {
    #[error("channel lengths differ: left={left}, right={right}")]
    ChannelLengthMismatch { left: usize, right: usize },
    #[error("unsupported channel count {0}, expected 1 or 2")]
    UnsupportedChannelCount(usize),
}

/// Immutable one- or two-channel block of normalized `f32` samples.
///
/// Samples are expected in `[-1, 1]` but nothing is enforced here; the
/// renderer clamps at draw time. Built once at load and shared behind an `Arc`
/// by the renderer and the playback engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
    /// Both channels exist and are pointwise identical.
    effectively_mono: bool,
}

impl SampleBuffer {
    pub fn mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            channels: vec![samples],
            sample_rate,
            effectively_mono: true,
        }
    }

    pub fn stereo(
        left: Vec<f32>,
        right: Vec<f32>,
        sample_rate: u32,
    ) -> Result<Self, SampleBufferError> {
        if left.len() != right.len() {
            return Err(SampleBufferError::ChannelLengthMismatch {
                left: left.len(),
                right: right.len(),
            });
        }

        let effectively_mono = left == right;
        Ok(Self {
            channels: vec![left, right],
            sample_rate,
            effectively_mono,
        })
    }

    /// Splits interleaved frames into channels. A trailing partial frame is dropped.
    pub fn from_interleaved(
        samples: &[f32],
        channels: usize,
        sample_rate: u32,
    ) -> Result<Self, SampleBufferError> {
        match channels {
            1 => Ok(Self::mono(samples.to_vec(), sample_rate)),
            2 => {
                let (left, right) = samples
                    .chunks_exact(2)
                    .map(|frame| (frame[0], frame[1]))
                    .unzip();
                Self::stereo(left, right, sample_rate)
            }
            n => Err(SampleBufferError::UnsupportedChannelCount(n)),
        }
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn is_effectively_mono(&self) -> bool {
        self.effectively_mono
    }

    /// Channels the renderer should draw: one lane for mono or duplicated stereo.
    pub fn display_channel_count(&self) -> usize {
        if self.effectively_mono { 1 } else { self.channel_count() }
    }

    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn get(&self, channel: usize, index: usize) -> Option<f32> {
        self.channels.get(channel)?.get(index).copied()
    }

    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / f64::from(self.sample_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mono_buffer_reports_length_and_rate() {
        let buffer = SampleBuffer::mono(vec![0.1, 0.2, 0.3], 48_000);
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.display_channel_count(), 1);
        assert_eq!(buffer.sample_rate(), 48_000);
    }

    #[test]
    fn test_stereo_with_mismatched_lengths_is_rejected() {
        let result = SampleBuffer::stereo(vec![0.0; 4], vec![0.0; 3], 44_100);
        assert_eq!(
            result,
            Err(SampleBufferError::ChannelLengthMismatch { left: 4, right: 3 })
        );
    }

    #[test]
    fn test_identical_stereo_channels_render_as_mono() {
        let buffer = SampleBuffer::stereo(vec![0.5, -0.5], vec![0.5, -0.5], 44_100).unwrap();
        assert!(buffer.is_effectively_mono());
        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.display_channel_count(), 1);
    }

    #[test]
    fn test_distinct_stereo_channels_render_as_two_lanes() {
        let buffer = SampleBuffer::stereo(vec![0.5, -0.5], vec![0.5, 0.0], 44_100).unwrap();
        assert!(!buffer.is_effectively_mono());
        assert_eq!(buffer.display_channel_count(), 2);
    }

    #[test]
    fn test_from_interleaved_splits_frames() {
        let buffer =
            SampleBuffer::from_interleaved(&[0.1, -0.1, 0.2, -0.2, 0.3], 2, 44_100).unwrap();
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.channel(0), Some(&[0.1, 0.2][..]));
        assert_eq!(buffer.channel(1), Some(&[-0.1, -0.2][..]));
    }

    #[test]
    fn test_from_interleaved_rejects_surround() {
        let result = SampleBuffer::from_interleaved(&[0.0; 6], 6, 44_100);
        assert_eq!(result, Err(SampleBufferError::UnsupportedChannelCount(6)));
    }

    #[test]
    fn test_out_of_bounds_access_returns_none() {
        let buffer = SampleBuffer::mono(vec![0.25], 8_000);
        assert_eq!(buffer.get(0, 0), Some(0.25));
        assert_eq!(buffer.get(0, 1), None);
        assert_eq!(buffer.get(1, 0), None);
    }

    #[test]
    fn test_empty_buffer() {
        let buffer = SampleBuffer::mono(Vec::new(), 44_100);
        assert!(buffer.is_empty());
        assert_eq!(buffer.duration_secs(), 0.0);
    }
}
