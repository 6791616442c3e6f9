//! API error handling
//!
//! Gateway failures keep their taxonomy code (`text_too_long`, ...) on the
//! wire. In production mode, internal and upstream errors return generic
//! messages without details.

use std::sync::atomic::{AtomicBool, Ordering};

use application::GatewayFailure;
use application::services::reply_formatter;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{DomainError, ErrorKind, LanguageCatalog};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Global flag to control error detail exposure
/// Set to false in production to prevent information leakage
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(true);

/// Configure whether internal error details should be exposed in responses.
pub fn set_expose_internal_errors(expose: bool) {
    EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::SeqCst);
}

/// Check if internal error details should be exposed
fn should_expose_details() -> bool {
    EXPOSE_INTERNAL_ERRORS.load(Ordering::SeqCst)
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Failure classified by a gateway
    #[error("{message}")]
    Gateway {
        /// Taxonomy entry, used as the response code
        kind: ErrorKind,
        /// User-facing explanation
        message: String,
        /// Diagnostic detail, only exposed outside production
        detail: Option<String>,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Whether the same request may succeed later
    #[serde(default)]
    pub retryable: bool,
}

impl ApiError {
    /// Convert a gateway failure, phrasing the message for end users
    pub fn from_gateway(catalog: &LanguageCatalog, failure: &GatewayFailure) -> Self {
        let detail = match failure {
            GatewayFailure::Unavailable { .. } => Some(failure.to_string()),
            _ => None,
        };
        Self::Gateway {
            kind: failure.kind(),
            message: reply_formatter::failure_text(catalog, failure),
            detail,
        }
    }

    /// HTTP status for a taxonomy entry
    pub const fn status_for(kind: ErrorKind) -> StatusCode {
        match kind {
            ErrorKind::UnsupportedLanguage
            | ErrorKind::NoVoiceAvailable
            | ErrorKind::InvalidCommandArgument => StatusCode::BAD_REQUEST,
            ErrorKind::TextTooLong => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorKind::GatewayUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details, retryable) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None, false),
            Self::Gateway {
                kind,
                message,
                detail,
            } => (
                Self::status_for(kind),
                kind.as_str(),
                message,
                detail.filter(|_| should_expose_details()),
                kind.is_transient(),
            ),
            Self::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorKind::InternalError.as_str(),
                "An internal error occurred".to_string(),
                Some(msg).filter(|_| should_expose_details()),
                ErrorKind::InternalError.is_transient(),
            ),
        };

        let body = ErrorResponse {
            error: message,
            code: code.to_string(),
            details,
            retryable,
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use application::Capability;
    use domain::LanguageCode;

    use super::*;

    fn catalog() -> LanguageCatalog {
        LanguageCatalog::builtin()
    }

    #[test]
    fn taxonomy_status_mapping() {
        assert_eq!(
            ApiError::status_for(ErrorKind::UnsupportedLanguage),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::status_for(ErrorKind::NoVoiceAvailable),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::status_for(ErrorKind::InvalidCommandArgument),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::status_for(ErrorKind::TextTooLong),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::status_for(ErrorKind::GatewayUnavailable),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::status_for(ErrorKind::InternalError),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn gateway_failure_keeps_kind() {
        let failure = GatewayFailure::TextTooLong {
            length: 5000,
            max: 4096,
        };
        let err = ApiError::from_gateway(&catalog(), &failure);

        let ApiError::Gateway { kind, message, .. } = &err else {
            unreachable!("Expected Gateway error");
        };
        assert_eq!(*kind, ErrorKind::TextTooLong);
        assert!(message.contains("4096"));
        assert_eq!(err.into_response().status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn unavailable_detail_is_retained() {
        let failure = GatewayFailure::unavailable(Capability::Speech, "piper exited with 1");
        let ApiError::Gateway { detail, .. } = ApiError::from_gateway(&catalog(), &failure) else {
            unreachable!("Expected Gateway error");
        };
        assert!(detail.is_some_and(|d| d.contains("piper exited")));
    }

    #[test]
    fn no_voice_message_names_language() {
        let failure = GatewayFailure::NoVoiceAvailable {
            language: LanguageCode::parse("ru-RU").unwrap(),
        };
        let err = ApiError::from_gateway(&catalog(), &failure);
        assert!(err.to_string().contains("Russian"));
    }

    #[test]
    fn domain_error_is_bad_request() {
        let err: ApiError = DomainError::InvalidConversationId("empty".to_string()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_response_status() {
        let response = ApiError::Internal("crash".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn error_response_omits_empty_details() {
        let resp = ErrorResponse {
            error: "Bad request".to_string(),
            code: "bad_request".to_string(),
            details: None,
            retryable: false,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("code"));
        assert!(!json.contains("details"));
    }
}
