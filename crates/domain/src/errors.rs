//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Conversation identifier is empty or malformed
    #[error("Invalid conversation id: {0}")]
    InvalidConversationId(String),

    /// Language tag is not well-formed
    #[error("Invalid language code: {0}")]
    InvalidLanguageCode(String),

    /// Language tag is well-formed but not part of the catalog
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage { code: String },

    /// Catalog definition is inconsistent
    #[error("Invalid language catalog: {0}")]
    InvalidCatalog(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an unsupported language error
    pub fn unsupported_language(code: impl Into<String>) -> Self {
        Self::UnsupportedLanguage { code: code.into() }
    }
}
