//! Language catalog configuration.

use domain::{DomainError, LanguageCatalog, LanguageCode, SupportedLanguage};
use serde::{Deserialize, Serialize};

/// A configured language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Language tag, e.g. "es-CO"
    pub code: String,
    /// Display name, e.g. "Spanish"
    pub name: String,
}

impl LanguageEntry {
    fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
        }
    }
}

/// Supported languages and the default for new conversations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesConfig {
    /// Default language for new sessions
    #[serde(default = "default_language")]
    pub default: String,

    /// Ordered list of supported languages
    #[serde(default = "default_supported")]
    pub supported: Vec<LanguageEntry>,
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_supported() -> Vec<LanguageEntry> {
    vec![
        LanguageEntry::new("en-US", "English"),
        LanguageEntry::new("es-CO", "Spanish"),
        LanguageEntry::new("ru-RU", "Russian"),
    ]
}

impl Default for LanguagesConfig {
    fn default() -> Self {
        Self {
            default: default_language(),
            supported: default_supported(),
        }
    }
}

impl LanguagesConfig {
    /// Build the language catalog described by this section
    pub fn build_catalog(&self) -> Result<LanguageCatalog, DomainError> {
        let languages = self
            .supported
            .iter()
            .map(|entry| {
                LanguageCode::parse(&entry.code)
                    .map(|code| SupportedLanguage::new(code, entry.name.trim()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        LanguageCatalog::new(languages, LanguageCode::parse(&self.default)?)
    }

    /// Validate the languages section
    pub fn validate(&self) -> Result<(), String> {
        if let Some(entry) = self.supported.iter().find(|e| e.name.trim().is_empty()) {
            return Err(format!("language {} has no name", entry.code));
        }
        self.build_catalog().map(|_| ()).map_err(|e| e.to_string())
    }
}
