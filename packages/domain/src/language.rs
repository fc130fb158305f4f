//! Language code handed to the engine (e.g. "en", "zh-cn").
use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(pub Cow<'static, str>);

impl Language {
    /// Create a new language tag from a static code.
    pub const fn new(code: &'static str) -> Self {
        Self(Cow::Borrowed(code))
    }

    /// Get the underlying language code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// True when the code is one the XTTS v2 model was trained on.
    pub fn is_xtts_supported(&self) -> bool {
        XTTS_LANGUAGES
            .iter()
            .any(|lang| lang.code().eq_ignore_ascii_case(self.code()))
    }

    /// English
    pub const ENGLISH: Self = Self::new("en");

    /// Spanish
    pub const SPANISH: Self = Self::new("es");

    /// French
    pub const FRENCH: Self = Self::new("fr");

    /// German
    pub const GERMAN: Self = Self::new("de");

    /// Italian
    pub const ITALIAN: Self = Self::new("it");

    /// Portuguese
    pub const PORTUGUESE: Self = Self::new("pt");

    /// Japanese
    pub const JAPANESE: Self = Self::new("ja");

    /// Chinese (Simplified)
    pub const CHINESE_SIMPLIFIED: Self = Self::new("zh-cn");
}

/// Languages accepted by the multilingual XTTS v2 checkpoint.
pub const XTTS_LANGUAGES: &[Language] = &[
    Language::ENGLISH,
    Language::SPANISH,
    Language::FRENCH,
    Language::GERMAN,
    Language::ITALIAN,
    Language::PORTUGUESE,
    Language::new("pl"),
    Language::new("tr"),
    Language::new("ru"),
    Language::new("nl"),
    Language::new("cs"),
    Language::new("ar"),
    Language::CHINESE_SIMPLIFIED,
    Language::JAPANESE,
    Language::new("hu"),
    Language::new("ko"),
    Language::new("hi"),
];

impl Default for Language {
    fn default() -> Self {
        Self::ENGLISH
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Self(Cow::Owned(code))
    }
}

impl From<&str> for Language {
    fn from(code: &str) -> Self {
        Self(Cow::Owned(code.to_owned()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
