//! OpenAI Speech Provider
//!
//! Implements `TextToSpeech` against the OpenAI `/audio/speech` endpoint.
//! Any server exposing the same API (for example a local OpenAI-compatible
//! TTS gateway) works by pointing `openai_base_url` at it.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat};

/// Maximum input length accepted by the speech endpoint
const MAX_INPUT_CHARS: usize = 4096;

/// Voices offered by the OpenAI speech API
const VOICES: &[&str] = &[
    "alloy", "ash", "coral", "echo", "fable", "nova", "onyx", "sage", "shimmer",
];

/// OpenAI text-to-speech provider
#[derive(Debug, Clone)]
pub struct OpenAISpeechProvider {
    client: Client,
    config: SpeechConfig,
}

impl OpenAISpeechProvider {
    /// Create a new OpenAI speech provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| {
                SpeechError::Configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// Get the API key
    fn api_key(&self) -> &str {
        self.config.openai_api_key.as_deref().unwrap_or_default()
    }

    /// Build the TTS endpoint URL
    fn tts_url(&self) -> String {
        format!("{}/audio/speech", self.config.openai_base_url)
    }

    /// Convert AudioFormat to the `response_format` request value
    const fn response_format(format: AudioFormat) -> &'static str {
        match format {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Opus => "opus",
            AudioFormat::Flac => "flac",
            AudioFormat::Wav => "wav",
        }
    }
}

/// OpenAI TTS request body
#[derive(Debug, Serialize)]
struct TtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f32>,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
    code: Option<String>,
}

#[async_trait]
impl TextToSpeech for OpenAISpeechProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioData, SpeechError> {
        debug!("Synthesizing speech with OpenAI TTS");

        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Text cannot be empty".to_string(),
            ));
        }

        let length = text.chars().count();
        if length > MAX_INPUT_CHARS {
            return Err(SpeechError::SynthesisFailed(format!(
                "Text too long: {length} characters exceeds {MAX_INPUT_CHARS} limit"
            )));
        }

        let request = TtsRequest {
            model: &self.config.tts_model,
            input: text,
            voice,
            response_format: Self::response_format(self.config.output_format),
            speed: if (self.config.speed - 1.0).abs() < f32::EPSILON {
                None
            } else {
                Some(self.config.speed)
            },
        };

        let response = self
            .client
            .post(self.tts_url())
            .bearer_auth(self.api_key())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SpeechError::Timeout(self.config.timeout_ms)
                } else {
                    e.into()
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();

            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_body) {
                return match api_error.error.code.as_deref() {
                    Some("rate_limit_exceeded") => Err(SpeechError::RateLimited),
                    Some("model_not_found") => Err(SpeechError::ModelNotAvailable(
                        self.config.tts_model.clone(),
                    )),
                    Some("invalid_voice") => Err(SpeechError::VoiceNotFound(voice.to_string())),
                    _ if status == StatusCode::TOO_MANY_REQUESTS => Err(SpeechError::RateLimited),
                    _ => Err(SpeechError::SynthesisFailed(api_error.error.message)),
                };
            }

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(SpeechError::RateLimited);
            }
            if status.is_server_error() {
                return Err(SpeechError::ServiceUnavailable(format!(
                    "HTTP {status}: {error_body}"
                )));
            }
            return Err(SpeechError::SynthesisFailed(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let audio_bytes: Bytes = response
            .bytes()
            .await
            .map_err(|e| SpeechError::InvalidResponse(format!("Failed to read audio: {e}")))?;

        debug!(audio_size = audio_bytes.len(), "Speech synthesis complete");

        Ok(AudioData::new(audio_bytes.to_vec(), self.config.output_format))
    }

    fn has_voice(&self, voice: &str) -> bool {
        VOICES.iter().any(|v| v.eq_ignore_ascii_case(voice))
    }

    fn output_format(&self) -> AudioFormat {
        self.config.output_format
    }

    async fn is_available(&self) -> bool {
        let models_url = format!("{}/models", self.config.openai_base_url);

        match self
            .client
            .get(&models_url)
            .bearer_auth(self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                warn!("OpenAI TTS availability check failed: {}", e);
                false
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.config.tts_model
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::SpeechProvider;

    fn create_test_provider(mock_server: &MockServer) -> OpenAISpeechProvider {
        let config = SpeechConfig {
            provider: SpeechProvider::OpenAI,
            openai_api_key: Some("test-api-key".to_string()),
            openai_base_url: mock_server.uri(),
            output_format: AudioFormat::Mp3,
            ..Default::default()
        };
        OpenAISpeechProvider::new(config).unwrap()
    }

    #[tokio::test]
    async fn synthesize_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .and(header("authorization", "Bearer test-api-key"))
            .and(body_partial_json(serde_json::json!({
                "model": "tts-1",
                "input": "Hola",
                "voice": "nova",
                "response_format": "mp3"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0u8; 1024]))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let audio = provider.synthesize("Hola", "nova").await.unwrap();

        assert_eq!(audio.size_bytes(), 1024);
        assert_eq!(audio.format(), AudioFormat::Mp3);
    }

    #[tokio::test]
    async fn synthesize_empty_text_fails() {
        let mock_server = MockServer::start().await;
        let provider = create_test_provider(&mock_server);

        let result = provider.synthesize("", "nova").await;
        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn synthesize_text_too_long_fails() {
        let mock_server = MockServer::start().await;
        let provider = create_test_provider(&mock_server);

        let text = "a".repeat(MAX_INPUT_CHARS + 1);
        let result = provider.synthesize(&text, "nova").await;
        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn synthesize_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
                "error": {
                    "message": "Rate limit exceeded",
                    "type": "rate_limit_error",
                    "code": "rate_limit_exceeded"
                }
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let result = provider.synthesize("Hello", "nova").await;

        assert!(matches!(result, Err(SpeechError::RateLimited)));
    }

    #[tokio::test]
    async fn synthesize_invalid_voice() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Invalid voice", "code": "invalid_voice" }
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let result = provider.synthesize("Hello", "robot").await;

        assert!(matches!(result, Err(SpeechError::VoiceNotFound(v)) if v == "robot"));
    }

    #[tokio::test]
    async fn synthesize_server_error_is_unavailable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/audio/speech"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        let result = provider.synthesize("Hello", "nova").await;

        assert!(matches!(result, Err(SpeechError::ServiceUnavailable(_))));
    }

    #[tokio::test]
    async fn is_available_when_api_responds() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": []
            })))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        assert!(provider.is_available().await);
    }

    #[tokio::test]
    async fn is_not_available_when_api_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let provider = create_test_provider(&mock_server);
        assert!(!provider.is_available().await);
    }

    #[test]
    fn known_voices_match_case_insensitively() {
        let provider = OpenAISpeechProvider::new(SpeechConfig {
            provider: SpeechProvider::OpenAI,
            openai_api_key: Some("k".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert!(provider.has_voice("Nova"));
        assert!(!provider.has_voice("en_US-lessac-medium"));
    }

    #[test]
    fn new_fails_without_api_key() {
        let config = SpeechConfig {
            provider: SpeechProvider::OpenAI,
            ..Default::default()
        };
        assert!(matches!(
            OpenAISpeechProvider::new(config),
            Err(SpeechError::Configuration(_))
        ));
    }

    #[test]
    fn response_format_values() {
        assert_eq!(OpenAISpeechProvider::response_format(AudioFormat::Mp3), "mp3");
        assert_eq!(OpenAISpeechProvider::response_format(AudioFormat::Opus), "opus");
        assert_eq!(OpenAISpeechProvider::response_format(AudioFormat::Wav), "wav");
    }
}
