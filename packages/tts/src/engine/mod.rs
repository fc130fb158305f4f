//! Synthesis backends behind a capability interface.
//!
//! The adapters never talk to a concrete engine directly: they hold an
//! [`EngineLoader`] and lazily turn it into a boxed [`SynthesisEngine`].
//! Swapping backends means handing the adapter a different loader.

pub mod coqui;
pub mod espeak;

pub use coqui::{CoquiServerEngine, CoquiServerLoader};
pub use espeak::{EspeakEngine, EspeakLoader};

use voice_assistant_domain::{SpeechSettings, SynthesisRequest, VoiceError};

/// A loaded, ready-to-use synthesis engine.
///
/// Implementations write the rendered audio to `request.output_path` and
/// return `Ok(())` only once the engine reports completion. The adapter
/// checks for the file afterwards, so engines need not.
pub trait SynthesisEngine: Send + Sync {
    /// Short name used in logs and error messages.
    fn name(&self) -> &str;

    /// Whether the engine can condition on reference audio.
    fn supports_reference(&self) -> bool {
        false
    }

    /// Whether the engine refuses to synthesize without reference audio.
    fn requires_reference(&self) -> bool {
        false
    }

    /// Render `request.text` into `request.output_path`.
    fn synthesize(
        &self,
        request: &SynthesisRequest,
        settings: &SpeechSettings,
    ) -> Result<(), VoiceError>;
}

/// Produces the engine handle on first use.
pub trait EngineLoader: Send + Sync {
    fn load(&self) -> Result<Box<dyn SynthesisEngine>, VoiceError>;
}

impl<F> EngineLoader for F
where
    F: Fn() -> Result<Box<dyn SynthesisEngine>, VoiceError> + Send + Sync,
{
    fn load(&self) -> Result<Box<dyn SynthesisEngine>, VoiceError> {
        self()
    }
}
