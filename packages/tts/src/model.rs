//! Model adapter: lazy engine handle plus the synthesis pipeline around it.

use std::fs::{self, File};
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use once_cell::sync::OnceCell;
use tempfile::TempPath;
use voice_assistant_domain::{SpeechSettings, SynthesisRequest, VoiceError};

use crate::config::TtsConfig;
use crate::engine::{EngineLoader, SynthesisEngine};
use crate::text;

/// `tts_output_YYYYMMDD_HHMMSS.wav` in the current directory.
pub fn default_output_path() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("tts_output_{timestamp}.wav"))
}

/// Owns one engine handle, created on first use and reused afterwards.
///
/// The handle lives in a [`OnceCell`], so concurrent first callers block on a
/// single load instead of racing. It is never released before drop.
pub struct TextToSpeech {
    loader: Box<dyn EngineLoader>,
    engine: OnceCell<Box<dyn SynthesisEngine>>,
    settings: SpeechSettings,
    normalize_text: bool,
}

impl TextToSpeech {
    pub fn new(loader: impl EngineLoader + 'static) -> Self {
        Self::from_boxed(Box::new(loader))
    }

    pub fn from_boxed(loader: Box<dyn EngineLoader>) -> Self {
        Self {
            loader,
            engine: OnceCell::new(),
            settings: SpeechSettings::default(),
            normalize_text: true,
        }
    }

    pub fn from_config(config: &TtsConfig) -> Self {
        Self::from_boxed(config.loader())
            .with_settings(config.speech)
            .with_normalization(config.normalize_text)
    }

    pub fn with_settings(mut self, settings: SpeechSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_normalization(mut self, enabled: bool) -> Self {
        self.normalize_text = enabled;
        self
    }

    pub fn settings(&self) -> &SpeechSettings {
        &self.settings
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.get().is_some()
    }

    /// Load the engine if needed. A second call is a no-op returning `true`.
    pub fn initialize(&self) -> bool {
        self.engine().is_ok()
    }

    /// The engine handle, loading it on first call.
    pub fn engine(&self) -> Result<&dyn SynthesisEngine, VoiceError> {
        self.engine
            .get_or_try_init(|| {
                let engine = self.loader.load()?;
                tracing::info!(engine = engine.name(), "TTS engine initialized successfully");
                Ok(engine)
            })
            .map(|engine| engine.as_ref())
            .inspect_err(|e| tracing::error!(error = %e, "Failed to initialize TTS engine"))
    }

    /// Synthesize and report success; failures are logged, never raised.
    pub fn synthesize(&self, request: &SynthesisRequest) -> bool {
        match self.try_synthesize(request) {
            Ok(path) => {
                tracing::info!(path = %path.display(), "audio generated");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to generate audio");
                false
            }
        }
    }

    /// Run the full pipeline, returning the written path.
    pub fn try_synthesize(&self, request: &SynthesisRequest) -> Result<PathBuf, VoiceError> {
        let text = text::prepare(&request.text, self.normalize_text)?;
        check_output_dir(&request.output_path)?;
        if let Some(reference) = request.reference() {
            check_readable(reference)?;
        }

        let engine = self.engine()?;
        match request.reference() {
            None if engine.requires_reference() => {
                return Err(VoiceError::ReferenceRequired(engine.name().to_owned()));
            }
            Some(_) if !engine.supports_reference() => {
                return Err(VoiceError::CloningUnsupported(engine.name().to_owned()));
            }
            _ => {}
        }

        // Render into a staging file; `output_path` is only replaced on success.
        let output = request.output_path.clone();
        let staging = stage(&output)?;
        let request = request.with_text(text).output_path(staging.to_path_buf());

        tracing::debug!(
            engine = engine.name(),
            chars = request.text.len(),
            language = %request.language,
            cloning = request.reference_audio.is_some(),
            staging = %staging.display(),
            "invoking engine"
        );
        panic::catch_unwind(AssertUnwindSafe(|| {
            engine.synthesize(&request, &self.settings)
        }))
        .unwrap_or_else(|payload| Err(VoiceError::Synthesis(panic_message(&*payload))))?;

        let produced = fs::metadata(&staging)
            .map(|m| m.is_file() && m.len() > 0)
            .unwrap_or(false);
        if !produced {
            return Err(VoiceError::OutputNotProduced(output));
        }
        staging.persist(&output).map_err(|e| {
            VoiceError::Synthesis(format!("cannot move audio to {}: {}", output.display(), e.error))
        })?;
        Ok(output)
    }
}

impl std::fmt::Debug for TextToSpeech {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextToSpeech")
            .field("engine", &self.engine.get().map(|e| e.name()))
            .field("settings", &self.settings)
            .field("normalize_text", &self.normalize_text)
            .finish()
    }
}

fn check_output_dir(output: &Path) -> Result<(), VoiceError> {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.is_dir() => {
            Err(VoiceError::OutputDirectoryMissing(parent.to_path_buf()))
        }
        _ => Ok(()),
    }
}

fn check_readable(path: &Path) -> Result<(), VoiceError> {
    let unreadable = |reason: String| VoiceError::ReferenceUnreadable {
        path: path.to_path_buf(),
        reason,
    };
    let meta = fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
    if !meta.is_file() {
        return Err(unreadable("not a regular file".to_owned()));
    }
    File::open(path)
        .map(drop)
        .map_err(|e| unreadable(e.to_string()))
}

/// Empty staging file next to `output`, deleted on drop unless persisted.
fn stage(output: &Path) -> Result<TempPath, VoiceError> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut builder = tempfile::Builder::new();
    builder.prefix(".tts-").suffix(".wav");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }
    builder
        .tempfile_in(dir)
        .map(|file| file.into_temp_path())
        .map_err(|e| {
            VoiceError::Synthesis(format!("cannot create staging file in {}: {e}", dir.display()))
        })
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_owned())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_owned());
    format!("engine panicked: {detail}")
}
