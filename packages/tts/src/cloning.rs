//! Cloning adapter: validate the reference, then synthesize with it.

use std::path::{Path, PathBuf};

use voice_assistant_domain::{Language, SynthesisRequest, Verdict, VoiceError};

use crate::config::TtsConfig;
use crate::model::TextToSpeech;
use crate::validation::SampleValidator;

/// Speaker-conditioned synthesis on top of [`TextToSpeech`].
#[derive(Debug)]
pub struct VoiceCloning {
    tts: TextToSpeech,
    validator: SampleValidator,
}

impl VoiceCloning {
    pub fn new(tts: TextToSpeech, validator: SampleValidator) -> Self {
        tracing::debug!(policy = ?validator.policy(), "voice cloning adapter ready");
        Self { tts, validator }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        Self::new(
            TextToSpeech::from_config(config),
            SampleValidator::new(config.validation),
        )
    }

    pub fn tts(&self) -> &TextToSpeech {
        &self.tts
    }

    pub fn validator(&self) -> &SampleValidator {
        &self.validator
    }

    pub fn validate_voice_sample(&self, path: impl AsRef<Path>) -> bool {
        self.sample_verdict(path).is_accepted()
    }

    /// Full verdict for a candidate reference, with the rejection reason.
    pub fn sample_verdict(&self, path: impl AsRef<Path>) -> Verdict {
        self.validator.validate(path)
    }

    /// Clone the reference voice; failures are logged, never raised.
    pub fn clone_voice(
        &self,
        text: &str,
        reference_audio: impl AsRef<Path>,
        language: impl Into<Language>,
        output_path: impl Into<PathBuf>,
    ) -> bool {
        match self.try_clone_voice(text, reference_audio, language, output_path) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "cloned voice generated");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Voice cloning failed");
                false
            }
        }
    }

    /// Validate, then delegate. The engine is neither loaded nor invoked when
    /// the reference is rejected.
    pub fn try_clone_voice(
        &self,
        text: &str,
        reference_audio: impl AsRef<Path>,
        language: impl Into<Language>,
        output_path: impl Into<PathBuf>,
    ) -> Result<PathBuf, VoiceError> {
        let reference_audio = reference_audio.as_ref();
        let preview: String = text.chars().take(50).collect();
        tracing::info!(text = %preview, reference = %reference_audio.display(), "Attempting voice cloning");

        self.validator.validate(reference_audio).into_result()?;

        let request = SynthesisRequest::new(text, output_path)
            .reference_audio(reference_audio)
            .language(language);
        self.tts.try_synthesize(&request)
    }
}
