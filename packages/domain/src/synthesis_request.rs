//! A single text-to-speech job.
use std::path::{Path, PathBuf};

use crate::language::Language;

/// Text plus everything the engine needs to render it to a file.
///
/// The parent directory of `output_path` must exist before synthesis; engines
/// never create directories.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    /// Speaker reference for voice cloning, if any.
    pub reference_audio: Option<PathBuf>,
    pub language: Language,
    pub output_path: PathBuf,
}

impl SynthesisRequest {
    /// New request writing to `output_path`, default language, no reference.
    pub fn new(text: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            text: text.into(),
            reference_audio: None,
            language: Language::default(),
            output_path: output_path.into(),
        }
    }

    pub fn reference_audio(mut self, path: impl Into<PathBuf>) -> Self {
        self.reference_audio = Some(path.into());
        self
    }

    pub fn language(mut self, language: impl Into<Language>) -> Self {
        self.language = language.into();
        self
    }

    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Same request with different text; used after normalization.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    pub fn reference(&self) -> Option<&Path> {
        self.reference_audio.as_deref()
    }
}
