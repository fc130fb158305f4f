//! Reference sample capture from the default input device.

use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::audio::{self, AudioError};

/// Mono PCM captured from the microphone.
#[derive(Debug, Clone)]
pub struct Recording {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Recording {
    pub fn duration_secs(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), AudioError> {
        audio::write_wav(path, &self.samples, 1, self.sample_rate)
    }
}

fn input_config(
    device: &cpal::Device,
    sample_rate: Option<u32>,
) -> Result<cpal::SupportedStreamConfig, AudioError> {
    if let Some(rate) = sample_rate {
        let ranges = device
            .supported_input_configs()
            .map_err(|e| AudioError::Device(format!("cannot query input configs: {e}")))?;
        for range in ranges {
            if range.sample_format() == cpal::SampleFormat::F32
                && range.min_sample_rate().0 <= rate
                && rate <= range.max_sample_rate().0
            {
                return Ok(range.with_sample_rate(cpal::SampleRate(rate)));
            }
        }
        tracing::warn!(sample_rate = rate, "requested rate unsupported, using device default");
    }
    device
        .default_input_config()
        .map_err(|e| AudioError::Device(format!("no default input config: {e}")))
}

/// Record `duration` of audio, keeping the first channel only.
pub fn record(duration: Duration, sample_rate: Option<u32>) -> Result<Recording, AudioError> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| AudioError::Device("no default input device available".into()))?;
    let config = input_config(&device, sample_rate)?;
    tracing::debug!(
        device = %device.name().unwrap_or_else(|_| "(unnamed)".to_string()),
        config = ?config,
        "Using audio device"
    );

    let channel_count = config.channels() as usize;
    let rate = config.sample_rate().0;
    let captured = Arc::new(Mutex::new(Vec::<f32>::with_capacity(
        (rate as f32 * duration.as_secs_f32()) as usize,
    )));
    let sink = Arc::clone(&captured);

    let stream = device
        .build_input_stream(
            &config.into(),
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend(data.iter().step_by(channel_count));
                }
            },
            |err| tracing::error!(error = %err, "Stream error"),
            None,
        )
        .map_err(|e| AudioError::Device(format!("failed to build input stream: {e}")))?;
    stream
        .play()
        .map_err(|e| AudioError::Device(format!("failed to start audio stream: {e}")))?;
    std::thread::sleep(duration);
    drop(stream);

    let mut samples = captured
        .lock()
        .map_err(|_| AudioError::Device("capture buffer poisoned".into()))?
        .drain(..)
        .collect::<Vec<_>>();
    samples.truncate((rate as f32 * duration.as_secs_f32()) as usize);
    Ok(Recording {
        samples,
        sample_rate: rate,
    })
}
