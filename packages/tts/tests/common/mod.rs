//! Shared fixtures: WAV generators and a scripted engine.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use hound::{SampleFormat, WavSpec, WavWriter};
use voice_assistant_tts::domain::{SpeechSettings, SynthesisRequest, VoiceError};
use voice_assistant_tts::{EngineLoader, SynthesisEngine};

/// Write a mono 16-bit sine of `secs` seconds at `amplitude` (0.0..=1.0).
pub fn write_tone(path: &Path, secs: f32, sample_rate: u32, amplitude: f32) {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).unwrap();
    let frames = (secs * sample_rate as f32) as usize;
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let s = (2.0 * std::f32::consts::PI * 220.0 * t).sin() * amplitude;
        writer.write_sample((s * i16::MAX as f32) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// 5 s of digital silence at 16 kHz, as the classic fixture.
pub fn write_silence(path: &Path, secs: f32, sample_rate: u32) {
    write_tone(path, secs, sample_rate, 0.0);
}

#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Write a short valid WAV to the output path.
    Write,
    /// Return an error without touching the output path.
    Fail,
    /// Write a few bytes, then return an error.
    PartialThenFail,
    /// Panic mid-call.
    Panic,
    /// Report success without writing anything.
    Silent,
}

#[derive(Debug, Default)]
pub struct Counters {
    pub loads: AtomicUsize,
    pub calls: AtomicUsize,
    pub last_text: Mutex<Option<String>>,
}

impl Counters {
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_text(&self) -> Option<String> {
        self.last_text.lock().unwrap().clone()
    }
}

pub struct ScriptedEngine {
    behavior: Behavior,
    cloning: bool,
    counters: Arc<Counters>,
}

impl SynthesisEngine for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted"
    }

    fn supports_reference(&self) -> bool {
        self.cloning
    }

    fn requires_reference(&self) -> bool {
        self.cloning
    }

    fn synthesize(
        &self,
        request: &SynthesisRequest,
        _settings: &SpeechSettings,
    ) -> Result<(), VoiceError> {
        self.counters.calls.fetch_add(1, Ordering::SeqCst);
        *self.counters.last_text.lock().unwrap() = Some(request.text.clone());
        match self.behavior {
            Behavior::Write => {
                write_tone(&request.output_path, 0.25, 16_000, 0.5);
                Ok(())
            }
            Behavior::Fail => Err(VoiceError::Synthesis("scripted failure".into())),
            Behavior::PartialThenFail => {
                std::fs::write(&request.output_path, b"RIFF").unwrap();
                Err(VoiceError::Synthesis("scripted failure after partial write".into()))
            }
            Behavior::Panic => panic!("scripted engine exploded"),
            Behavior::Silent => Ok(()),
        }
    }
}

/// Loader producing [`ScriptedEngine`]s and counting every load.
#[derive(Clone)]
pub struct ScriptedLoader {
    pub behavior: Behavior,
    pub cloning: bool,
    pub fail_load: bool,
    pub counters: Arc<Counters>,
}

impl ScriptedLoader {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            cloning: false,
            fail_load: false,
            counters: Arc::new(Counters::default()),
        }
    }

    pub fn cloning(mut self) -> Self {
        self.cloning = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail_load = true;
        self
    }
}

impl EngineLoader for ScriptedLoader {
    fn load(&self) -> Result<Box<dyn SynthesisEngine>, VoiceError> {
        self.counters.loads.fetch_add(1, Ordering::SeqCst);
        if self.fail_load {
            return Err(VoiceError::EngineInitialization(
                "Mock TTS initialization error".into(),
            ));
        }
        Ok(Box::new(ScriptedEngine {
            behavior: self.behavior,
            cloning: self.cloning,
            counters: Arc::clone(&self.counters),
        }))
    }
}

pub fn scratch_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}
