//! Unified error for synthesis, validation and cloning.
use std::path::PathBuf;

use thiserror::Error;

use crate::sample_verdict::SampleRejection;

/// Every failure the adapters can report.
///
/// Public adapter entry points collapse these into a boolean plus a log
/// line; the typed value is available through the `try_*` variants.
#[derive(Debug, Clone, Error)]
pub enum VoiceError {
    /// Reference audio failed pre-flight validation.
    #[error("invalid voice sample: {0}")]
    InvalidSample(#[from] SampleRejection),
    /// Input text was empty or normalized to nothing.
    #[error("invalid input text: {0}")]
    InvalidText(String),
    /// The parent directory of the output path does not exist.
    #[error("output directory does not exist: {}", .0.display())]
    OutputDirectoryMissing(PathBuf),
    /// The configured engine needs reference audio and none was supplied.
    #[error("engine `{0}` requires reference audio")]
    ReferenceRequired(String),
    /// Reference audio was supplied but cannot be opened.
    #[error("reference audio {} is unreadable: {reason}", .path.display())]
    ReferenceUnreadable { path: PathBuf, reason: String },
    /// Reference audio was supplied to an engine that cannot clone voices.
    #[error("engine `{0}` does not support voice cloning")]
    CloningUnsupported(String),
    /// Loading the synthesis engine failed.
    #[error("engine initialization: {0}")]
    EngineInitialization(String),
    /// The engine returned an error or panicked during synthesis.
    #[error("synthesis: {0}")]
    Synthesis(String),
    /// The engine reported success but no usable file exists.
    #[error("output file not produced: {}", .0.display())]
    OutputNotProduced(PathBuf),
    /// Configuration-related failure reason.
    #[error("configuration: {0}")]
    Configuration(String),
}

impl VoiceError {
    /// True for failures caused by the supplied reference audio.
    pub fn is_sample_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSample(_) | Self::ReferenceUnreadable { .. }
        )
    }
}
