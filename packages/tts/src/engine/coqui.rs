//! XTTS voice cloning through an XTTS API server.
//!
//! The server (`xtts-api-server`, backed by Coqui's
//! `tts_models/multilingual/multi-dataset/xtts_v2`) accepts
//! `POST /tts_to_audio/` with a JSON body of `text`, `speaker_wav` and
//! `language`, and answers with a WAV body. `speaker_wav` is sent as an
//! absolute path, so the reference must be readable by the server process.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use serde::Serialize;
use voice_assistant_domain::{ModelId, SpeechSettings, SynthesisRequest, VoiceError};

use super::{EngineLoader, SynthesisEngine};

pub const DEFAULT_URL: &str = "http://localhost:8020";

const NAME: &str = "coqui-xtts";

/// JSON body of `POST /tts_to_audio/`.
#[derive(Debug, Serialize)]
struct TtsToAudio<'a> {
    text: &'a str,
    speaker_wav: String,
    language: &'a str,
}

fn request_body(request: &SynthesisRequest) -> Result<TtsToAudio<'_>, VoiceError> {
    let reference = request
        .reference()
        .ok_or_else(|| VoiceError::ReferenceRequired(NAME.to_owned()))?;
    Ok(TtsToAudio {
        text: &request.text,
        speaker_wav: absolute(reference)?,
        language: request.language.code(),
    })
}

fn absolute(path: &Path) -> Result<String, VoiceError> {
    std::path::absolute(path)
        .map(|p| p.to_string_lossy().into_owned())
        .map_err(|e| VoiceError::ReferenceUnreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}

#[derive(Debug, Clone)]
pub struct CoquiServerEngine {
    client: Client,
    base_url: String,
}

impl CoquiServerEngine {
    fn endpoint(&self) -> String {
        format!("{}/tts_to_audio/", self.base_url.trim_end_matches('/'))
    }
}

impl SynthesisEngine for CoquiServerEngine {
    fn name(&self) -> &str {
        NAME
    }

    fn supports_reference(&self) -> bool {
        true
    }

    fn requires_reference(&self) -> bool {
        true
    }

    fn synthesize(
        &self,
        request: &SynthesisRequest,
        _settings: &SpeechSettings,
    ) -> Result<(), VoiceError> {
        if !request.language.is_xtts_supported() {
            tracing::warn!(language = %request.language, "language not in the XTTS v2 set");
        }

        let body = request_body(request)?;
        let response = self
            .client
            .post(self.endpoint())
            .json(&body)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| VoiceError::Synthesis(format!("tts server request failed: {e}")))?;
        let audio = response
            .bytes()
            .map_err(|e| VoiceError::Synthesis(format!("tts server response unreadable: {e}")))?;

        std::fs::write(&request.output_path, &audio).map_err(|e| {
            VoiceError::Synthesis(format!(
                "cannot write {}: {e}",
                request.output_path.display()
            ))
        })?;
        tracing::debug!(bytes = audio.len(), path = %request.output_path.display(), "wrote server audio");
        Ok(())
    }
}

/// Connects to the server and checks that it answers.
#[derive(Debug, Clone)]
pub struct CoquiServerLoader {
    pub base_url: String,
    pub model: ModelId,
    /// Per-request timeout; `None` blocks until the server answers.
    pub timeout: Option<Duration>,
}

impl Default for CoquiServerLoader {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL.to_owned(),
            model: ModelId::default(),
            timeout: None,
        }
    }
}

impl EngineLoader for CoquiServerLoader {
    fn load(&self) -> Result<Box<dyn SynthesisEngine>, VoiceError> {
        // `None` also clears reqwest's 30 s blocking default.
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| VoiceError::EngineInitialization(format!("http client: {e}")))?;

        client
            .get(&self.base_url)
            .send()
            .map_err(|e| {
                VoiceError::EngineInitialization(format!(
                    "tts server at {} unreachable: {e}",
                    self.base_url
                ))
            })?;

        tracing::info!(url = %self.base_url, model = %self.model, "xtts server ready");
        Ok(Box::new(CoquiServerEngine {
            client,
            base_url: self.base_url.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(base_url: &str) -> CoquiServerEngine {
        CoquiServerEngine {
            client: Client::new(),
            base_url: base_url.to_owned(),
        }
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        assert_eq!(
            engine("http://host:8020/").endpoint(),
            "http://host:8020/tts_to_audio/"
        );
    }

    #[test]
    fn body_sends_reference_as_speaker_wav() {
        let request = SynthesisRequest::new("hola", "out.wav")
            .reference_audio("/data/ref.wav")
            .language("es");
        let body = serde_json::to_value(request_body(&request).unwrap()).unwrap();

        assert_eq!(body["speaker_wav"], "/data/ref.wav");
        assert_eq!(body["language"], "es");
        assert_eq!(body["text"], "hola");
        assert!(body.get("style_wav").is_none());
    }

    #[test]
    fn relative_reference_is_made_absolute() {
        let request = SynthesisRequest::new("hi", "out.wav").reference_audio("voices/me.wav");
        let body = request_body(&request).unwrap();
        assert!(Path::new(&body.speaker_wav).is_absolute());
        assert!(body.speaker_wav.ends_with("me.wav"));
    }

    #[test]
    fn body_without_reference_is_refused() {
        let request = SynthesisRequest::new("hi", "out.wav");
        assert!(matches!(
            request_body(&request),
            Err(VoiceError::ReferenceRequired(_))
        ));
    }

    #[test]
    fn unreachable_server_fails_initialization() {
        let loader = CoquiServerLoader {
            base_url: "http://127.0.0.1:9".into(),
            timeout: Some(Duration::from_secs(2)),
            ..CoquiServerLoader::default()
        };
        let err = loader.load().err().unwrap();
        assert!(matches!(err, VoiceError::EngineInitialization(_)));
    }
}
