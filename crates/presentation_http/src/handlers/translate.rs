//! Direct translation endpoint

use axum::{Json, extract::State};
use domain::{ConversationId, LanguageCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Translation request
#[derive(Debug, Deserialize, Validate)]
pub struct TranslateRequest {
    /// Text to translate
    #[validate(length(max = 5000, message = "must be at most 5000 characters"))]
    pub text: String,
    /// Source language; detected when omitted
    #[serde(default)]
    pub source: Option<String>,
    /// Target language
    #[validate(length(min = 1, message = "must not be empty"))]
    pub target: String,
    /// Conversation to attribute the call to in logs
    #[serde(default)]
    #[validate(length(min = 1, max = 256))]
    pub conversation_id: Option<String>,
}

/// Translation response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub text: String,
    /// Source language as given or detected, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub target: String,
}

/// Translate text without touching any session
#[instrument(skip(state, request), fields(target_language = %request.target))]
pub async fn translate(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<TranslateRequest>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let conversation_id = request
        .conversation_id
        .as_deref()
        .map(ConversationId::new)
        .transpose()?;

    let translated = state
        .service
        .translation_gateway()
        .translate(
            conversation_id.as_ref(),
            &request.text,
            request.source.as_deref(),
            &request.target,
        )
        .await
        .map_err(|failure| ApiError::from_gateway(state.service.catalog(), &failure))?;

    Ok(Json(TranslateResponse {
        text: translated.text,
        source: translated.source.as_ref().map(LanguageCode::to_string),
        target: translated.target.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_fields_default() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": "Hello", "target": "es"}"#).unwrap();
        assert!(request.source.is_none());
        assert!(request.conversation_id.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn empty_target_rejected() {
        let request: TranslateRequest =
            serde_json::from_str(r#"{"text": "Hello", "target": ""}"#).unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn response_omits_unknown_source() {
        let resp = TranslateResponse {
            text: "Hola".to_string(),
            source: None,
            target: "es-CO".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("source"));
    }
}
