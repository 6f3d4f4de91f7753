//! Common types for the shared crate

use serde::{Deserialize, Serialize};

/// Timestamp type (Unix milliseconds)
pub type Timestamp = i64;

/// Display language of the terminal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    /// Myanmar
    Mm,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Mm,
            Language::Mm => Language::En,
        }
    }
}

/// Text carried in both terminal languages
///
/// Names are copied into order lines at order time, so renaming a menu item
/// never rewrites history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LocalizedText {
    pub en: String,
    pub mm: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, mm: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            mm: mm.into(),
        }
    }

    /// Pick the text for `lang`, falling back to English when the Myanmar
    /// text was left empty.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Mm if self.mm.is_empty() => &self.en,
            Language::Mm => &self.mm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localized_text_falls_back_to_english() {
        let text = LocalizedText::new("Fried Rice", "");
        assert_eq!(text.get(Language::Mm), "Fried Rice");

        let text = LocalizedText::new("Fried Rice", "ထမင်းကြော်");
        assert_eq!(text.get(Language::Mm), "ထမင်းကြော်");
        assert_eq!(text.get(Language::En), "Fried Rice");
    }

    #[test]
    fn test_language_serde_and_toggle() {
        assert_eq!(serde_json::to_string(&Language::Mm).unwrap(), "\"mm\"");
        assert_eq!(Language::En.toggle(), Language::Mm);
        assert_eq!(Language::Mm.toggle(), Language::En);
    }
}
