//! Translation port - Interface to a machine translation capability

use async_trait::async_trait;
use domain::LanguageCode;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a translation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Translated text
    pub text: String,
    /// Source language reported by the capability when it auto-detected one
    pub detected_source: Option<LanguageCode>,
}

impl Translation {
    /// Translation without detection info
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected_source: None,
        }
    }
}

/// Port for translation operations
///
/// Implementations receive only catalog-validated languages. A `None`
/// source means the capability should detect the language itself.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TranslationPort: Send + Sync {
    /// Translate `text` into `target`
    async fn translate<'a>(
        &self,
        text: &str,
        source: Option<&'a LanguageCode>,
        target: &LanguageCode,
    ) -> Result<Translation, ApplicationError>;

    /// Check if the translation capability is reachable
    async fn is_available(&self) -> bool;
}
