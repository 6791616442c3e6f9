//! LibreTranslate Provider
//!
//! Implements `Translator` against the LibreTranslate HTTP API
//! (`POST /translate`, `GET /languages`). Works with the public instance
//! and self-hosted servers alike.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::TranslationConfig;
use crate::error::TranslationError;
use crate::ports::Translator;
use crate::types::TranslatedText;

/// LibreTranslate HTTP client
#[derive(Debug, Clone)]
pub struct LibreTranslateProvider {
    client: Client,
    config: TranslationConfig,
}

/// `POST /translate` request body
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

/// `POST /translate` response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateResponse {
    translated_text: String,
    #[serde(default)]
    detected_language: Option<DetectedLanguageBody>,
}

#[derive(Debug, Deserialize)]
struct DetectedLanguageBody {
    language: String,
    #[serde(default)]
    confidence: Option<f32>,
}

/// Error body returned with 4xx/5xx responses
#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

impl LibreTranslateProvider {
    /// Create a new LibreTranslate provider
    ///
    /// # Errors
    ///
    /// Returns `TranslationError::Configuration` if the configuration is
    /// invalid or the HTTP client cannot be built.
    pub fn new(config: TranslationConfig) -> Result<Self, TranslationError> {
        config.validate().map_err(TranslationError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                TranslationError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    fn send_error(&self, err: reqwest::Error) -> TranslationError {
        if err.is_timeout() {
            TranslationError::Timeout(self.config.timeout_ms)
        } else {
            err.into()
        }
    }

    fn status_error(status: StatusCode, body: &str) -> TranslationError {
        let message = serde_json::from_str::<ApiError>(body)
            .map_or_else(|_| format!("HTTP {status}: {body}"), |e| e.error);

        match status {
            StatusCode::TOO_MANY_REQUESTS => TranslationError::RateLimited,
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                TranslationError::Unauthorized(message)
            },
            s if s.is_server_error() => TranslationError::ServiceUnavailable(message),
            _ => TranslationError::RequestFailed(message),
        }
    }
}

#[async_trait]
impl Translator for LibreTranslateProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<TranslatedText, TranslationError> {
        let request = TranslateRequest {
            q: text,
            source: source.unwrap_or("auto"),
            target,
            format: "text",
            api_key: self.config.api_key.as_deref(),
        };

        let response = self
            .client
            .post(self.url("translate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body));
        }

        let body: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(e.to_string()))?;

        debug!(
            detected = ?body.detected_language.as_ref().map(|d| &d.language),
            "LibreTranslate translation complete"
        );

        let result = TranslatedText::new(body.translated_text);
        Ok(match body.detected_language {
            Some(detected) => result.with_detected(detected.language, detected.confidence),
            None => result,
        })
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.url("languages"))
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("LibreTranslate availability check failed: {}", e);
                false
            },
        }
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> LibreTranslateProvider {
        LibreTranslateProvider::new(TranslationConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn url_joins_without_double_slash() {
        assert_eq!(
            provider("http://localhost:5000/").url("translate"),
            "http://localhost:5000/translate"
        );
    }

    #[test]
    fn status_error_maps_rate_limit() {
        let err = LibreTranslateProvider::status_error(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, TranslationError::RateLimited));
    }

    #[test]
    fn status_error_uses_api_message() {
        let err = LibreTranslateProvider::status_error(
            StatusCode::BAD_REQUEST,
            r#"{"error":"xx is not supported"}"#,
        );
        assert!(matches!(err, TranslationError::RequestFailed(m) if m == "xx is not supported"));
    }

    #[test]
    fn status_error_maps_server_errors() {
        let err = LibreTranslateProvider::status_error(StatusCode::BAD_GATEWAY, "upstream");
        assert!(matches!(err, TranslationError::ServiceUnavailable(_)));
    }

    #[test]
    fn request_serializes_api_key_only_when_set() {
        let request = TranslateRequest {
            q: "Hello",
            source: "auto",
            target: "es",
            format: "text",
            api_key: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["source"], "auto");
        assert!(json.get("api_key").is_none());
    }
}
