//! Inbound chat event endpoint

use axum::{Json, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};
use domain::{AudioFormat, ConversationId, ErrorDescription, InterpretationResult, ResultKind};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// One inbound chat event
#[derive(Debug, Deserialize, Validate)]
pub struct MessageRequest {
    /// Transport-level conversation identifier
    #[validate(length(min = 1, max = 256, message = "must be between 1 and 256 characters"))]
    pub conversation_id: String,
    /// Message text as typed by the user
    pub text: String,
}

/// Interpretation result on the wire
///
/// Exactly one of `text`, `audio` or `error` is present, matching `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub kind: ResultKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Base64-encoded audio bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_format: Option<AudioFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDescription>,
    /// Retry hint, present on error replies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retryable: Option<bool>,
}

impl From<InterpretationResult> for MessageResponse {
    fn from(result: InterpretationResult) -> Self {
        let (kind, text, audio, error) = result.into_parts();
        let audio_format = audio.as_ref().map(|a| a.format);

        Self {
            kind,
            text,
            mime_type: audio_format.map(|f| f.mime_type().to_string()),
            audio: audio.map(|a| STANDARD.encode(a.data)),
            audio_format,
            retryable: error.as_ref().map(|e| e.kind.is_transient()),
            error,
        }
    }
}

/// Handle one inbound event
///
/// Interpretation failures are part of the reply, so this answers 200 for
/// every well-formed request.
#[instrument(skip(state, request), fields(conversation_id = %request.conversation_id))]
pub async fn post_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<MessageRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    let conversation_id = ConversationId::new(&request.conversation_id)?;
    let result = state.service.handle(&conversation_id, &request.text).await;
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use domain::{AudioPayload, ErrorKind};

    use super::*;

    #[test]
    fn text_result_on_the_wire() {
        let json = serde_json::to_value(MessageResponse::from(InterpretationResult::text("Hola")))
            .unwrap();
        assert_eq!(json["kind"], "text_reply");
        assert_eq!(json["text"], "Hola");
        assert!(json.get("audio").is_none());
        assert!(json.get("error").is_none());
        assert!(json.get("retryable").is_none());
    }

    #[test]
    fn audio_result_is_base64() {
        let result =
            InterpretationResult::audio(AudioPayload::new(b"RIFF".to_vec(), AudioFormat::Wav));
        let json = serde_json::to_value(MessageResponse::from(result)).unwrap();

        assert_eq!(json["kind"], "audio_reply");
        assert_eq!(json["audio"], "UklGRg==");
        assert_eq!(json["audio_format"], "wav");
        assert_eq!(json["mime_type"], "audio/wav");
        assert!(json.get("text").is_none());
    }

    #[test]
    fn error_result_carries_kind() {
        let result = InterpretationResult::error(ErrorKind::TextTooLong, "too long");
        let json = serde_json::to_value(MessageResponse::from(result)).unwrap();

        assert_eq!(json["kind"], "error_reply");
        assert_eq!(json["error"]["kind"], "text_too_long");
        assert_eq!(json["error"]["message"], "too long");
        assert_eq!(json["retryable"], false);
    }

    #[test]
    fn gateway_outage_is_retryable() {
        let result = InterpretationResult::error(ErrorKind::GatewayUnavailable, "try again");
        let json = serde_json::to_value(MessageResponse::from(result)).unwrap();

        assert_eq!(json["retryable"], true);
    }

    #[test]
    fn request_validation() {
        let ok = MessageRequest {
            conversation_id: "chat-1".to_string(),
            text: String::new(),
        };
        assert!(ok.validate().is_ok());

        let long = MessageRequest {
            conversation_id: "x".repeat(257),
            text: "hi".to_string(),
        };
        assert!(long.validate().is_err());
    }
}
