// ============================================================================
// LANGUAGES
// ============================================================================
// Page text is translated by the external translate widget; this module only
// knows which languages exist and how the widget expects them.
// ============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "ne")]
    Nepali,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Nepali];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Nepali => "ne",
        }
    }

    pub fn native_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "हिन्दी",
            Language::Nepali => "नेपाली",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
    }

    /// Speech synthesis locale used for audio guides.
    pub fn speech_locale(&self) -> &'static str {
        match self {
            Language::English => "en-US",
            Language::Hindi => "hi-IN",
            Language::Nepali => "ne-NP",
        }
    }
}

/// Value of the `googtrans` cookie. English resets translation.
pub fn googtrans_cookie(lang: Language) -> Option<String> {
    match lang {
        Language::English => None,
        other => Some(format!("/en/{}", other.code())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_from_code() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code(" HI "), Some(Language::Hindi));
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn english_clears_translation_cookie() {
        assert_eq!(googtrans_cookie(Language::English), None);
        assert_eq!(googtrans_cookie(Language::Nepali).as_deref(), Some("/en/ne"));
    }

    #[test]
    fn language_persists_as_code() {
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hi\"");
    }
}
