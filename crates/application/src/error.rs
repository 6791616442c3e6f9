//! Application-level errors

use std::fmt;

use domain::{DomainError, ErrorKind, LanguageCode};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// External service did not answer in time
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Capability is not installed or not configured
    #[error("Not available: {0}")]
    NotAvailable(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Classify into the user-visible error taxonomy
    pub const fn error_kind(&self) -> ErrorKind {
        match self {
            Self::Domain(DomainError::UnsupportedLanguage { .. }) => ErrorKind::UnsupportedLanguage,
            Self::Domain(DomainError::InvalidLanguageCode(_) | DomainError::ValidationError(_)) => {
                ErrorKind::InvalidCommandArgument
            },
            Self::ExternalService(_)
            | Self::Timeout(_)
            | Self::RateLimited
            | Self::NotAvailable(_) => ErrorKind::GatewayUnavailable,
            Self::Domain(_) | Self::Configuration(_) | Self::Internal(_) => {
                ErrorKind::InternalError
            },
        }
    }
}

/// External capability wrapped by a gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Machine translation
    Translation,
    /// Text-to-speech
    Speech,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Translation => write!(f, "translation"),
            Self::Speech => write!(f, "speech synthesis"),
        }
    }
}

/// Failure classification produced by the translation and speech gateways
///
/// Every failure detected at a gateway boundary is converted into one of
/// these variants; nothing unclassified leaves a gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayFailure {
    /// Language code is not in the catalog
    #[error("Unsupported language: {code}")]
    UnsupportedLanguage {
        /// The code as supplied by the caller
        code: String,
    },

    /// No voice configured for a supported language
    #[error("No voice available for {language}")]
    NoVoiceAvailable {
        /// The (supported) language without a voice
        language: LanguageCode,
    },

    /// Text exceeds the synthesis cap
    #[error("Text too long: {length} characters exceeds the limit of {max}")]
    TextTooLong {
        /// Length of the rejected text in characters
        length: usize,
        /// Configured cap in characters
        max: usize,
    },

    /// The underlying capability timed out or failed
    #[error("{capability} unavailable: {reason}")]
    Unavailable {
        /// Which capability failed
        capability: Capability,
        /// Diagnostic detail (not shown to end users)
        reason: String,
    },

    /// Request is missing required input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl GatewayFailure {
    /// Map to the user-visible error taxonomy
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedLanguage { .. } => ErrorKind::UnsupportedLanguage,
            Self::NoVoiceAvailable { .. } => ErrorKind::NoVoiceAvailable,
            Self::TextTooLong { .. } => ErrorKind::TextTooLong,
            Self::Unavailable { .. } => ErrorKind::GatewayUnavailable,
            Self::InvalidArgument(_) => ErrorKind::InvalidCommandArgument,
        }
    }

    /// Create an unavailable failure
    pub fn unavailable(capability: Capability, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            capability,
            reason: reason.into(),
        }
    }
}
