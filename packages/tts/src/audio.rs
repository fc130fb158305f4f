//! WAV helpers built on `hound`.
//!
//! * `scan_wav()`  → frame count, rate, channels and peak without buffering
//! * `read_wav()`  → interleaved `Vec<f32>` in `-1.0..=1.0`
//! * `write_wav()` → 16-bit PCM file
//! * `play_wav()`  → default output device (feature `playback`)

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("wav: {0}")]
    Wav(#[from] hound::Error),
    #[error("invalid stream: {0}")]
    InvalidStream(String),
    #[error("audio device: {0}")]
    Device(String),
}

/// Properties of a decoded WAV stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WavStats {
    /// Samples per channel.
    pub frames: u64,
    pub sample_rate: u32,
    pub channels: u16,
    /// Peak absolute amplitude across all channels, `0.0..=1.0`.
    pub peak: f32,
}

impl WavStats {
    pub fn duration_secs(&self) -> f32 {
        self.frames as f32 / self.sample_rate as f32
    }
}

/// Divisor mapping integer samples of `bits` width onto `-1.0..=1.0`.
fn int_scale(bits: u16) -> f32 {
    (1u64 << (bits.saturating_sub(1))) as f32
}

fn check_spec(spec: &WavSpec) -> Result<(), AudioError> {
    if spec.channels == 0 {
        return Err(AudioError::InvalidStream("zero channels".into()));
    }
    if spec.sample_rate == 0 {
        return Err(AudioError::InvalidStream("zero sample rate".into()));
    }
    Ok(())
}

/// Decode every sample once, keeping only the running peak.
pub fn scan_wav(path: impl AsRef<Path>) -> Result<WavStats, AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    check_spec(&spec)?;

    let mut count = 0u64;
    let mut peak = 0f32;
    match spec.sample_format {
        SampleFormat::Float => {
            for sample in reader.samples::<f32>() {
                peak = peak.max(sample?.abs());
                count += 1;
            }
        }
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample);
            for sample in reader.samples::<i32>() {
                peak = peak.max((sample? as f32 / scale).abs());
                count += 1;
            }
        }
    }

    Ok(WavStats {
        frames: count / spec.channels as u64,
        sample_rate: spec.sample_rate,
        channels: spec.channels,
        peak: peak.min(1.0),
    })
}

/// Read the whole file as interleaved normalized samples.
pub fn read_wav(path: impl AsRef<Path>) -> Result<(Vec<f32>, WavSpec), AudioError> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    check_spec(&spec)?;

    let samples = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let scale = int_scale(spec.bits_per_sample);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };
    Ok((samples, spec))
}

/// Write interleaved `pcm` (`-1.0..=1.0`) as 16-bit PCM.
pub fn write_wav(
    path: impl AsRef<Path>,
    pcm: &[f32],
    channels: u16,
    sample_rate: u32,
) -> Result<(), AudioError> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    check_spec(&spec)?;

    let mut writer = WavWriter::create(path, spec)?;
    for &s in pcm {
        writer.write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Stream a WAV file to the default output device and block until done.
#[cfg(feature = "playback")]
pub fn play_wav(path: impl AsRef<Path>) -> Result<(), AudioError> {
    let (pcm, spec) = read_wav(path)?;

    let stream_handle = rodio::OutputStreamBuilder::open_default_stream()
        .map_err(|e| AudioError::Device(format!("output initialization failed: {e}")))?;
    let sink = rodio::Sink::connect_new(stream_handle.mixer());
    sink.append(rodio::buffer::SamplesBuffer::new(
        spec.channels,
        spec.sample_rate,
        pcm,
    ));
    sink.sleep_until_end();
    Ok(())
}

#[cfg(not(feature = "playback"))]
pub fn play_wav(_path: impl AsRef<Path>) -> Result<(), AudioError> {
    Err(AudioError::Device(
        "playback requires the `playback` feature".into(),
    ))
}
