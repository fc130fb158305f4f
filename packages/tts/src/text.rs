//! Input text clean-up before it reaches an engine.

use voice_assistant_domain::VoiceError;

/// Lower-case, keep only alphanumerics and spaces, trim.
///
/// Fails when nothing speakable remains.
pub fn normalize(text: &str) -> Result<String, VoiceError> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(VoiceError::InvalidText(
            "nothing speakable after normalization".into(),
        ));
    }
    Ok(cleaned.to_owned())
}

/// Reject empty input; optionally normalize.
pub fn prepare(text: &str, normalize_text: bool) -> Result<String, VoiceError> {
    if text.trim().is_empty() {
        return Err(VoiceError::InvalidText("text is empty".into()));
    }
    if normalize_text {
        normalize(text)
    } else {
        Ok(text.trim().to_owned())
    }
}
