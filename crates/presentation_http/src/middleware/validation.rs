//! Request validation
//!
//! Provides a `ValidatedJson` extractor that validates request bodies using the validator crate.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Validation error type
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::JsonError(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                StatusCode::PAYLOAD_TOO_LARGE
            },
            _ => StatusCode::BAD_REQUEST,
        };
        let message = match &self {
            Self::JsonError(e) => e.body_text(),
            Self::ValidationFailed(msg) => msg.clone(),
        };

        let body = serde_json::json!({
            "error": message,
            "code": "validation_error"
        });

        (status, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
///
/// Use this instead of `Json<T>` for request types deriving `Validate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;

        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;

        Ok(Self(value))
    }
}

/// `field: message` pairs, sorted by field name
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let message = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {message}")
            })
        })
        .collect();
    fields.sort();
    fields.join("; ")
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct EventRequest {
        #[validate(length(min = 1, max = 16, message = "must be 1-16 characters"))]
        conversation_id: String,
        #[validate(length(max = 32, message = "is too long"))]
        text: String,
    }

    async fn echo(ValidatedJson(req): ValidatedJson<EventRequest>) -> String {
        req.text
    }

    async fn post_json(body: &'static str) -> StatusCode {
        Router::new()
            .route("/events", post(echo))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/events")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn valid_request_passes() {
        let status = post_json(r#"{"conversation_id": "chat-1", "text": "hola"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_conversation_id_rejected() {
        let status = post_json(r#"{"conversation_id": "", "text": "hola"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_field_rejected() {
        let status = post_json(r#"{"conversation_id": "chat-1"}"#).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn invalid_json_rejected() {
        let status = post_json(r#"{"conversation_id": not json}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn describe_lists_every_field() {
        let request = EventRequest {
            conversation_id: String::new(),
            text: "x".repeat(40),
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            describe(&errors),
            "conversation_id: must be 1-16 characters; text: is too long"
        );
    }
}
