//! # Voice Assistant TTS
//!
//! Text-to-speech and voice cloning over external synthesis engines.
//!
//! * [`TextToSpeech`] owns a lazily loaded engine and runs the synthesis
//!   pipeline (text clean-up, path checks, engine call, output check).
//! * [`SampleValidator`] accepts or rejects reference WAV files.
//! * [`VoiceCloning`] validates a reference and then synthesizes with it.
//!
//! Engines sit behind [`engine::SynthesisEngine`]; see [`engine`] for the
//! bundled `espeak-ng` and Coqui XTTS server backends.

pub mod audio;
pub mod cloning;
pub mod config;
pub mod engine;
#[cfg(feature = "microphone")]
pub mod microphone;
pub mod model;
pub mod text;
pub mod validation;

pub use cloning::VoiceCloning;
pub use config::{EngineConfig, TtsConfig, ValidationPolicy};
pub use engine::{EngineLoader, SynthesisEngine};
pub use model::{TextToSpeech, default_output_path};
pub use validation::SampleValidator;

pub use voice_assistant_domain as domain;

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        EngineConfig, EngineLoader, SampleValidator, SynthesisEngine, TextToSpeech, TtsConfig,
        ValidationPolicy, VoiceCloning,
    };
    pub use voice_assistant_domain::prelude::*;
}
