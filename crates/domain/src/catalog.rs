//! Language catalog - the closed set of languages the interpreter handles
//!
//! Every language code accepted by a gateway or stored in a session must be
//! resolvable through the catalog. The catalog is built once at startup and
//! is read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::LanguageCode;

/// A catalog entry: language code plus human-readable name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportedLanguage {
    /// Canonical language tag
    pub code: LanguageCode,
    /// Display name, e.g. "Spanish"
    pub name: String,
}

impl SupportedLanguage {
    /// Create a new catalog entry
    #[must_use]
    pub fn new(code: LanguageCode, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// Static registry of supported languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCatalog {
    languages: Vec<SupportedLanguage>,
    default: LanguageCode,
}

impl LanguageCatalog {
    /// Build a catalog from an ordered list of languages and a default
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCatalog` if the list is empty, contains a
    /// duplicate code, or does not contain the default language.
    pub fn new(
        languages: Vec<SupportedLanguage>,
        default: LanguageCode,
    ) -> Result<Self, DomainError> {
        if languages.is_empty() {
            return Err(DomainError::InvalidCatalog(
                "at least one language must be configured".to_string(),
            ));
        }

        for (idx, lang) in languages.iter().enumerate() {
            if languages[..idx].iter().any(|l| l.code == lang.code) {
                return Err(DomainError::InvalidCatalog(format!(
                    "duplicate language code: {}",
                    lang.code
                )));
            }
        }

        if !languages.iter().any(|l| l.code == default) {
            return Err(DomainError::InvalidCatalog(format!(
                "default language {default} is not in the supported list"
            )));
        }

        Ok(Self { languages, default })
    }

    /// English (default), Colombian Spanish and Russian
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            languages: vec![
                SupportedLanguage::new(LanguageCode::from_normalized("en-US"), "English"),
                SupportedLanguage::new(LanguageCode::from_normalized("es-CO"), "Spanish"),
                SupportedLanguage::new(LanguageCode::from_normalized("ru-RU"), "Russian"),
            ],
            default: LanguageCode::from_normalized("en-US"),
        }
    }

    /// All supported languages in catalog order
    #[must_use]
    pub fn list_supported(&self) -> &[SupportedLanguage] {
        &self.languages
    }

    /// The system-wide default language
    #[must_use]
    pub const fn default_language(&self) -> &LanguageCode {
        &self.default
    }

    /// Whether `code` resolves to a catalog language
    #[must_use]
    pub fn is_supported(&self, code: &str) -> bool {
        self.resolve(code).is_some()
    }

    /// Resolve user input to a catalog language
    ///
    /// Accepts a full tag (`es-CO`, case-insensitive), a bare primary subtag
    /// when exactly one catalog entry shares it (`es`), or a display name
    /// (`spanish`).
    #[must_use]
    pub fn resolve(&self, input: &str) -> Option<LanguageCode> {
        let input = input.trim();

        if let Ok(code) = LanguageCode::parse(input) {
            if let Some(lang) = self.languages.iter().find(|l| l.code == code) {
                return Some(lang.code.clone());
            }

            if code.region().is_none() {
                let mut matches = self
                    .languages
                    .iter()
                    .filter(|l| l.code.primary_subtag() == code.primary_subtag());
                if let (Some(only), None) = (matches.next(), matches.next()) {
                    return Some(only.code.clone());
                }
            }
        }

        self.languages
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(input))
            .map(|l| l.code.clone())
    }

    /// Resolve input or fail with `UnsupportedLanguage`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnsupportedLanguage` carrying the raw input.
    pub fn require(&self, input: &str) -> Result<LanguageCode, DomainError> {
        self.resolve(input)
            .ok_or_else(|| DomainError::unsupported_language(input.trim()))
    }

    /// Display name for a catalog language
    #[must_use]
    pub fn display_name(&self, code: &LanguageCode) -> Option<&str> {
        self.languages
            .iter()
            .find(|l| &l.code == code)
            .map(|l| l.name.as_str())
    }

    /// Comma-separated list of codes, for user-facing messages
    #[must_use]
    pub fn codes_list(&self) -> String {
        self.languages
            .iter()
            .map(|l| l.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Number of supported languages
    #[must_use]
    pub fn len(&self) -> usize {
        self.languages.len()
    }

    /// Always false for a constructed catalog
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

impl Default for LanguageCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
