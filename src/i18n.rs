use serde::{Deserialize, Serialize};

/// Display language for all learner-facing text.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        }
    }

    /// Label for the button that switches to the other language.
    pub fn switch_label(self) -> &'static str {
        match self {
            Language::English => "हिंदी में देखें",
            Language::Hindi => "View in English",
        }
    }
}

/// A piece of text available in every supported language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub en: String,
    pub hi: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, hi: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hi: hi.into(),
        }
    }

    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::English => &self.en,
            Language::Hindi => &self.hi,
        }
    }
}

/// Picks between two static strings, for UI labels that never leave the binary.
pub fn tr(language: Language, en: &'static str, hi: &'static str) -> &'static str {
    match language {
        Language::English => en,
        Language::Hindi => hi,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_between_languages() {
        assert_eq!(Language::English.toggle(), Language::Hindi);
        assert_eq!(Language::English.toggle().toggle(), Language::English);
    }

    #[test]
    fn localized_lookup() {
        let text = Localized::new("Chapter", "अध्याय");
        assert_eq!(text.get(Language::English), "Chapter");
        assert_eq!(text.get(Language::Hindi), "अध्याय");
        assert_eq!(tr(Language::Hindi, "Finish", "समाप्त"), "समाप्त");
    }

    #[test]
    fn language_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Language::Hindi).unwrap(), "\"hindi\"");
        let parsed: Language = serde_json::from_str("\"english\"").unwrap();
        assert_eq!(parsed, Language::English);
    }
}
