//! Engine-specific model identifiers.
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ModelId {
    /// Coqui XTTS v2, multilingual voice cloning.
    #[default]
    XttsV2,
    /// Custom engine-specific model identifier.
    Custom(String),
}

impl ModelId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::XttsV2 => "tts_models/multilingual/multi-dataset/xtts_v2",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
