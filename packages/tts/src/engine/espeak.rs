//! Offline synthesis through the `espeak-ng` command-line program.

use std::io::Write;
use std::process::{Command, Stdio};

use voice_assistant_domain::{SpeechSettings, SynthesisRequest, VoiceError};

use super::{EngineLoader, SynthesisEngine};

/// Default program name looked up on `PATH`.
pub const DEFAULT_PROGRAM: &str = "espeak-ng";

/// Local formant synthesizer. Cannot clone voices.
#[derive(Debug, Clone)]
pub struct EspeakEngine {
    program: String,
    voice: Option<String>,
    version: String,
}

impl EspeakEngine {
    pub fn version(&self) -> &str {
        &self.version
    }

    fn command(
        &self,
        request: &SynthesisRequest,
        settings: &SpeechSettings,
    ) -> Command {
        // espeak amplitude runs 0..=200 with 100 as the normal level.
        let amplitude = (settings.clamped_volume() * 100.0).round() as u32;
        let voice = self
            .voice
            .clone()
            .unwrap_or_else(|| request.language.code().to_owned());

        let mut cmd = Command::new(&self.program);
        cmd.arg("-w")
            .arg(&request.output_path)
            .arg("-s")
            .arg(settings.rate_wpm.to_string())
            .arg("-a")
            .arg(amplitude.to_string())
            .arg("-v")
            .arg(voice)
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl SynthesisEngine for EspeakEngine {
    fn name(&self) -> &str {
        "espeak"
    }

    fn synthesize(
        &self,
        request: &SynthesisRequest,
        settings: &SpeechSettings,
    ) -> Result<(), VoiceError> {
        let mut child = self.command(request, settings).spawn().map_err(|e| {
            VoiceError::Synthesis(format!("failed to start {}: {e}", self.program))
        })?;

        // Text goes through stdin so leading dashes are never read as flags.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(request.text.as_bytes())
                .map_err(|e| VoiceError::Synthesis(format!("failed to send text: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| VoiceError::Synthesis(format!("{} did not finish: {e}", self.program)))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VoiceError::Synthesis(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        tracing::debug!(
            program = %self.program,
            path = %request.output_path.display(),
            "espeak finished"
        );
        Ok(())
    }
}

/// Probes the program once and hands out an [`EspeakEngine`].
#[derive(Debug, Clone)]
pub struct EspeakLoader {
    pub program: String,
    /// Voice name; falls back to the request's language code.
    pub voice: Option<String>,
}

impl Default for EspeakLoader {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_owned(),
            voice: None,
        }
    }
}

impl EngineLoader for EspeakLoader {
    fn load(&self) -> Result<Box<dyn SynthesisEngine>, VoiceError> {
        let output = Command::new(&self.program)
            .arg("--version")
            .output()
            .map_err(|e| {
                VoiceError::EngineInitialization(format!("cannot run `{}`: {e}", self.program))
            })?;
        if !output.status.success() {
            return Err(VoiceError::EngineInitialization(format!(
                "`{} --version` exited with {}",
                self.program, output.status
            )));
        }

        let version = String::from_utf8_lossy(&output.stdout).trim().to_owned();
        tracing::info!(program = %self.program, version = %version, "espeak engine ready");
        Ok(Box::new(EspeakEngine {
            program: self.program.clone(),
            voice: self.voice.clone(),
            version,
        }))
    }
}
