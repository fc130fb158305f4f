//! # Voice Assistant Domain
//!
//! Shared domain objects for the voice-assistant workspace: synthesis
//! requests, engine settings, validation verdicts and the error taxonomy.
//!
//! Kept free of engine and I/O dependencies so that backends and front ends
//! can share them without pulling in each other.

pub mod language;
pub mod model_id;
pub mod sample_verdict;
pub mod speech_settings;
pub mod synthesis_request;
pub mod voice_error;

// Re-export core types
pub use language::{Language, XTTS_LANGUAGES};
pub use model_id::ModelId;
pub use sample_verdict::{SampleInfo, SampleRejection, Verdict};
pub use speech_settings::SpeechSettings;
pub use synthesis_request::SynthesisRequest;
pub use voice_error::VoiceError;

/// Prelude module containing commonly used types.
pub mod prelude {
    pub use crate::{
        Language, ModelId, SampleInfo, SampleRejection, SpeechSettings, SynthesisRequest,
        Verdict, VoiceError,
    };
}
