//! Translation errors

use thiserror::Error;

/// Errors that can occur during translation
#[derive(Debug, Error)]
pub enum TranslationError {
    /// Failed to connect to the translation service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the translation service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response could not be understood
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout waiting for the service
    #[error("Translation timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Credentials rejected by the service
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for TranslationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(crate::config::DEFAULT_TIMEOUT_MS)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_failed_error_message() {
        let err = TranslationError::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn timeout_error_message() {
        let err = TranslationError::Timeout(10000);
        assert_eq!(err.to_string(), "Translation timeout after 10000ms");
    }

    #[test]
    fn rate_limited_error_message() {
        assert_eq!(TranslationError::RateLimited.to_string(), "Rate limit exceeded");
    }
}
