//! Port definitions for translation

use async_trait::async_trait;

use crate::error::TranslationError;
use crate::types::TranslatedText;

/// Port for machine translation implementations
///
/// Languages are ISO 639-1 codes. A `None` source asks the provider to
/// detect the language itself.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from `source` (or detected) into `target`
    ///
    /// # Errors
    ///
    /// Returns `TranslationError` if the provider fails or rejects the request.
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<TranslatedText, TranslationError>;

    /// Check if the provider can serve requests
    async fn is_available(&self) -> bool;

    /// Short provider name for logs
    fn name(&self) -> &'static str;
}
