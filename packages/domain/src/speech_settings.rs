//! Engine properties applied before every synthesis call.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// Speaking rate in words per minute.
    pub rate_wpm: u32,
    /// Output volume, `0.0..=1.0`.
    pub volume: f32,
}

impl SpeechSettings {
    pub fn with_rate(mut self, rate_wpm: u32) -> Self {
        self.rate_wpm = rate_wpm;
        self
    }

    /// Set the volume, clamped to `0.0..=1.0`.
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Volume as it should be handed to an engine, always in range.
    pub fn clamped_volume(&self) -> f32 {
        self.volume.clamp(0.0, 1.0)
    }
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            rate_wpm: 150,
            volume: 1.0,
        }
    }
}
