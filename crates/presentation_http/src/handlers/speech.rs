//! Direct text-to-speech endpoint

use axum::{Json, extract::State};
use base64::{Engine, engine::general_purpose::STANDARD};
use domain::AudioFormat;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{error::ApiError, middleware::ValidatedJson, state::AppState};

/// Synthesis request
#[derive(Debug, Deserialize, Validate)]
pub struct SpeechRequest {
    /// Text to speak; the gateway enforces the length cap
    pub text: String,
    /// Language whose voice is used
    #[validate(length(min = 1, message = "must not be empty"))]
    pub language: String,
}

/// Synthesis response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechResponse {
    /// Base64-encoded audio bytes
    pub audio: String,
    pub format: AudioFormat,
    pub mime_type: String,
    pub size_bytes: usize,
}

/// Synthesize speech without touching any session
#[instrument(skip(state, request), fields(language = %request.language, chars = request.text.chars().count()))]
pub async fn synthesize(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SpeechRequest>,
) -> Result<Json<SpeechResponse>, ApiError> {
    let audio = state
        .service
        .speech_gateway()
        .synthesize(None, &request.text, &request.language)
        .await
        .map_err(|failure| ApiError::from_gateway(state.service.catalog(), &failure))?;

    Ok(Json(SpeechResponse {
        size_bytes: audio.len(),
        mime_type: audio.format.mime_type().to_string(),
        format: audio.format,
        audio: STANDARD.encode(&audio.data),
    }))
}
