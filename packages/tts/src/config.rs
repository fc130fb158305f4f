use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use voice_assistant_domain::{Language, ModelId, SpeechSettings, VoiceError};

use crate::engine::{CoquiServerLoader, EngineLoader, EspeakLoader, coqui, espeak};

// ------------ Validation -----------
/// Thresholds a reference sample must meet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationPolicy {
    pub min_duration_secs: f32,
    pub min_sample_rate: u32,
    /// Minimum peak absolute amplitude, `0.0..=1.0`.
    pub silence_threshold: f32,
}

impl ValidationPolicy {
    /// XTTS cloning: at least 3 s at 16 kHz.
    pub const CLONING: Self = Self {
        min_duration_secs: 3.0,
        min_sample_rate: 16_000,
        silence_threshold: 0.01,
    };

    /// Short prompts and fresh recordings.
    pub const QUICK: Self = Self {
        min_duration_secs: 1.0,
        min_sample_rate: 16_000,
        silence_threshold: 0.01,
    };

    pub fn with_min_duration(mut self, secs: f32) -> Self {
        self.min_duration_secs = secs;
        self
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self::CLONING
    }
}

// ------------ Engine ---------------
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineConfig {
    /// Local `espeak-ng` program.
    Espeak {
        program: String,
        #[serde(default)]
        voice: Option<String>,
    },
    /// XTTS API server running the Coqui XTTS model.
    CoquiServer {
        url: String,
        #[serde(default)]
        timeout_secs: Option<u64>,
    },
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::Espeak {
            program: espeak::DEFAULT_PROGRAM.to_owned(),
            voice: None,
        }
    }
}

impl EngineConfig {
    pub fn coqui_server(url: impl Into<String>) -> Self {
        Self::CoquiServer {
            url: url.into(),
            timeout_secs: None,
        }
    }

    pub fn default_coqui_server() -> Self {
        Self::coqui_server(coqui::DEFAULT_URL)
    }

    /// Build the loader for this backend.
    pub fn loader(&self, model: &ModelId) -> Box<dyn EngineLoader> {
        match self {
            Self::Espeak { program, voice } => Box::new(EspeakLoader {
                program: program.clone(),
                voice: voice.clone(),
            }),
            Self::CoquiServer { url, timeout_secs } => Box::new(CoquiServerLoader {
                base_url: url.clone(),
                model: model.clone(),
                timeout: timeout_secs.map(Duration::from_secs),
            }),
        }
    }
}

// ------------ TtsConfig (root) -----
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TtsConfig {
    pub model: ModelId,
    pub engine: EngineConfig,
    pub language: Language,
    pub speech: SpeechSettings,
    pub validation: ValidationPolicy,
    /// Lower-case and strip punctuation before synthesis.
    pub normalize_text: bool,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            model: ModelId::default(),
            engine: EngineConfig::default(),
            language: Language::default(),
            speech: SpeechSettings::default(),
            validation: ValidationPolicy::default(),
            normalize_text: true,
        }
    }
}

impl TtsConfig {
    /// `<config_dir>/voice-assistant/config.json`, if a config dir exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("voice-assistant").join("config.json"))
    }

    /// Load a JSON config from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, VoiceError> {
        let path = path.as_ref();
        let txt = fs::read_to_string(path).map_err(|e| {
            VoiceError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let cfg: TtsConfig = serde_json::from_str(&txt).map_err(|e| {
            VoiceError::Configuration(format!("invalid config {}: {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load `path`, else the default location if present, else defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, VoiceError> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    /// Save to disk (pretty-printed).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), VoiceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| {
                VoiceError::Configuration(format!("cannot create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| VoiceError::Configuration(e.to_string()))?;
        fs::write(path, json).map_err(|e| {
            VoiceError::Configuration(format!("cannot write {}: {e}", path.display()))
        })
    }

    pub fn validate(&self) -> Result<(), VoiceError> {
        let policy = &self.validation;
        if !(policy.min_duration_secs.is_finite() && policy.min_duration_secs >= 0.0) {
            return Err(VoiceError::Configuration(
                "validation.min_duration_secs must be a non-negative number".into(),
            ));
        }
        if !(0.0..=1.0).contains(&policy.silence_threshold) {
            return Err(VoiceError::Configuration(
                "validation.silence_threshold must be within 0.0..=1.0".into(),
            ));
        }
        if self.speech.rate_wpm == 0 {
            return Err(VoiceError::Configuration("speech.rate_wpm must be > 0".into()));
        }
        Ok(())
    }

    pub fn loader(&self) -> Box<dyn EngineLoader> {
        self.engine.loader(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: TtsConfig = serde_json::from_str(
            r#"{ "engine": { "kind": "coqui_server", "url": "http://gpu-box:8020" },
                 "language": "de" }"#,
        )
        .unwrap();
        assert_eq!(cfg.engine, EngineConfig::coqui_server("http://gpu-box:8020"));
        assert_eq!(cfg.language, Language::GERMAN);
        assert_eq!(cfg.validation, ValidationPolicy::CLONING);
        assert_eq!(cfg.speech.rate_wpm, 150);
        assert!(cfg.normalize_text);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let cfg = TtsConfig {
            validation: ValidationPolicy::QUICK,
            normalize_text: false,
            ..TtsConfig::default()
        };
        cfg.save(&path).unwrap();
        assert_eq!(TtsConfig::load(&path).unwrap(), cfg);
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "validation": { "min_duration_secs": 3.0, "min_sample_rate": 16000, "silence_threshold": 4.0 } }"#).unwrap();
        assert!(matches!(
            TtsConfig::load(&path),
            Err(VoiceError::Configuration(_))
        ));
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        let err = TtsConfig::load("/nonexistent/voice-assistant.json").unwrap_err();
        assert!(matches!(err, VoiceError::Configuration(_)));
    }
}
