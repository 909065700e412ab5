use std::{io::Read, path::Path};

use hound::WavReader;
use thiserror::Error;
use waveform::{SampleBuffer, SampleBufferError};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read WAV: {0}")]
    Wav(#[from] hound::Error),
    #[error("WAV declares zero channels")]
    NoChannels,
    #[error(transparent)]
    Buffer(#[from] SampleBufferError),
}

/// Loads a `.wav` file into a [`SampleBuffer`].
///
/// Supports:
/// - 8/16/24/32-bit integer and 32-bit float samples (normalized to `f32`)
/// - Mono and stereo kept as-is
/// - More than two channels, averaged down to mono
///
/// # Example
/// ```no_run
/// let buffer = audio_engine::loader::load_wav("assets/wav/piano.wav").unwrap();
/// ```
pub fn load_wav<P: AsRef<Path>>(path: P) -> Result<SampleBuffer, LoadError> {
    let reader = WavReader::open(path.as_ref())?;
    let buffer = from_reader(reader)?;
    log::info!(
        "Loaded {}: {} samples, {} ch @ {} Hz ({:.2}s)",
        path.as_ref().display(),
        buffer.len(),
        buffer.channel_count(),
        buffer.sample_rate(),
        buffer.duration_secs()
    );
    Ok(buffer)
}

pub fn read_wav<R: Read>(stream: R) -> Result<SampleBuffer, LoadError> {
    from_reader(WavReader::new(stream)?)
}

fn from_reader<R: Read>(reader: WavReader<R>) -> Result<SampleBuffer, LoadError> {
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(LoadError::NoChannels);
    }

    let interleaved = decode_pcm_samples(reader)?;
    if channels <= 2 {
        return Ok(SampleBuffer::from_interleaved(
            &interleaved,
            channels,
            spec.sample_rate,
        )?);
    }

    log::warn!("{channels}-channel WAV, downmixing to mono");
    Ok(SampleBuffer::mono(
        downmix(&interleaved, channels),
        spec.sample_rate,
    ))
}

fn decode_pcm_samples<R: Read>(reader: WavReader<R>) -> Result<Vec<f32>, LoadError> {
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 * scale))
                .collect::<Result<Vec<f32>, _>>()?
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<f32>, _>>()?,
    };
    Ok(samples)
}

fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavSpec;
    use std::io::Cursor;

    fn int_spec(channels: u16, bits_per_sample: u16) -> WavSpec {
        WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample,
            sample_format: hound::SampleFormat::Int,
        }
    }

    fn create_wav_buffer(spec: WavSpec, samples: &[i32]) -> Cursor<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut buffer, spec).unwrap();
        for &s in samples {
            match spec.bits_per_sample {
                16 => writer.write_sample(s as i16).unwrap(),
                _ => writer.write_sample(s).unwrap(),
            }
        }
        writer.finalize().unwrap();
        buffer.set_position(0);
        buffer
    }

    #[test]
    fn test_mono_wav_stays_mono() {
        let buffer = read_wav(create_wav_buffer(int_spec(1, 16), &[16384, -16384])).unwrap();

        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0, 0), Some(0.5));
        assert_eq!(buffer.get(0, 1), Some(-0.5));
    }

    #[test]
    fn test_stereo_wav_is_deinterleaved() {
        let samples = [1000, -1000, 2000, -2000, 3000, -3000];
        let buffer = read_wav(create_wav_buffer(int_spec(2, 16), &samples)).unwrap();

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.get(0, 2).unwrap() > 0.0);
        assert!(buffer.get(1, 2).unwrap() < 0.0);
        assert!(!buffer.is_effectively_mono());
    }

    #[test]
    fn test_24_bit_samples_are_normalized() {
        let buffer = read_wav(create_wav_buffer(int_spec(1, 24), &[4_194_304])).unwrap();
        assert_eq!(buffer.get(0, 0), Some(0.5));
    }

    #[test]
    fn test_float_wav() {
        let spec = WavSpec {
            channels: 1,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut cursor = Cursor::new(Vec::new());
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        writer.write_sample(0.25f32).unwrap();
        writer.write_sample(-0.75f32).unwrap();
        writer.finalize().unwrap();
        cursor.set_position(0);

        let buffer = read_wav(cursor).unwrap();
        assert_eq!(buffer.sample_rate(), 48000);
        assert_eq!(buffer.channel(0), Some(&[0.25, -0.75][..]));
    }

    #[test]
    fn test_multichannel_wav_downmixes_to_mono() {
        let samples = [3000, 0, -3000, 6000, 6000, 6000];
        let buffer = read_wav(create_wav_buffer(int_spec(3, 16), &samples)).unwrap();

        assert_eq!(buffer.channel_count(), 1);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.get(0, 0), Some(0.0));
        assert!((buffer.get(0, 1).unwrap() - 6000.0 / 32768.0).abs() < 1e-6);
    }

    #[test]
    fn test_garbage_input_fails() {
        let result = read_wav(Cursor::new(b"not a wav file".to_vec()));
        assert!(matches!(result, Err(LoadError::Wav(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        assert!(load_wav("/nonexistent/definitely-missing.wav").is_err());
    }
}
