//! Thin HTTP client for a running interpreter server

use std::path::Path;

use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Errors talking to the server
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with an error body
    #[error("{message} ({code}, HTTP {status})")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Invalid audio payload: {0}")]
    Audio(#[from] base64::DecodeError),

    #[error("Failed to write audio: {0}")]
    Io(#[from] std::io::Error),
}

/// Client bound to one server base URL
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }

    /// Send one chat event, as a chat platform would
    pub async fn send_message(&self, conversation_id: &str, text: &str) -> Result<Value, ClientError> {
        self.post(
            "/v1/messages",
            &json!({ "conversation_id": conversation_id, "text": text }),
        )
        .await
    }

    pub async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<Value, ClientError> {
        let mut body = json!({ "text": text, "target": target });
        if let Some(source) = source {
            body["source"] = json!(source);
        }
        self.post("/v1/translate", &body).await
    }

    pub async fn speak(&self, text: &str, language: &str) -> Result<Value, ClientError> {
        self.post("/v1/tts", &json!({ "text": text, "language": language }))
            .await
    }

    pub async fn languages(&self) -> Result<Value, ClientError> {
        self.get("/v1/languages").await
    }

    pub async fn status(&self) -> Result<Value, ClientError> {
        self.get("/v1/status").await
    }

    /// Whether the readiness probe answers with a success status
    pub async fn is_ready(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.endpoint("/ready")).send().await?;
        Ok(resp.status().is_success())
    }

    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        debug!(path, "GET");
        let resp = self.http.get(self.endpoint(path)).send().await?;
        Self::parse(resp).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        debug!(path, "POST");
        let resp = self.http.post(self.endpoint(path)).json(body).send().await?;
        Self::parse(resp).await
    }

    async fn parse(resp: reqwest::Response) -> Result<Value, ClientError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json().await?);
        }

        let body: Value = resp.json().await.unwrap_or(Value::Null);
        Err(ClientError::Api {
            status: status.as_u16(),
            code: body["code"].as_str().unwrap_or("unknown").to_string(),
            message: body["error"]
                .as_str()
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error"))
                .to_string(),
        })
    }
}

/// Decode the base64 `field` of a response and write it to `path`
///
/// Returns the number of bytes written, or `None` if the field is absent.
pub async fn save_audio(response: &Value, field: &str, path: &Path) -> Result<Option<usize>, ClientError> {
    let Some(encoded) = response[field].as_str() else {
        return Ok(None);
    };
    let bytes = STANDARD.decode(encoded)?;
    tokio::fs::write(path, &bytes).await?;
    Ok(Some(bytes.len()))
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let client = ApiClient::new("http://example.com/");
        assert_eq!(client.endpoint("/v1/tts"), "http://example.com/v1/tts");
    }

    #[test]
    fn endpoint_with_port() {
        let client = ApiClient::new("http://api:8080");
        assert_eq!(client.endpoint("/ready"), "http://api:8080/ready");
    }

    #[tokio::test]
    async fn send_message_posts_event() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(body_json(json!({ "conversation_id": "chat-1", "text": "/help" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "kind": "text_reply", "text": "Available commands:" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let reply = ApiClient::new(server.uri())
            .send_message("chat-1", "/help")
            .await
            .unwrap();

        assert_eq!(reply["kind"], "text_reply");
    }

    #[tokio::test]
    async fn translate_omits_missing_source() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/translate"))
            .and(body_json(json!({ "text": "Hello", "target": "es" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "text": "Hola", "target": "es-CO" })),
            )
            .mount(&server)
            .await;

        let reply = ApiClient::new(server.uri())
            .translate("Hello", None, "es")
            .await
            .unwrap();

        assert_eq!(reply["text"], "Hola");
    }

    #[tokio::test]
    async fn error_body_becomes_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/tts"))
            .respond_with(ResponseTemplate::new(413).set_body_json(json!({
                "error": "That text is too long to speak",
                "code": "text_too_long"
            })))
            .mount(&server)
            .await;

        let err = ApiClient::new(server.uri())
            .speak("long", "en")
            .await
            .unwrap_err();

        let ClientError::Api { status, code, .. } = err else {
            unreachable!("Expected Api error");
        };
        assert_eq!(status, 413);
        assert_eq!(code, "text_too_long");
    }

    #[tokio::test]
    async fn readiness_follows_status_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ready"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "ready": false })))
            .mount(&server)
            .await;

        assert!(!ApiClient::new(server.uri()).is_ready().await.unwrap());
    }

    #[tokio::test]
    async fn save_audio_decodes_base64() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("reply.mp3");
        let response = json!({ "kind": "audio_reply", "audio": "SG9sYQ==" });

        let written = save_audio(&response, "audio", &file).await.unwrap();

        assert_eq!(written, Some(4));
        assert_eq!(std::fs::read(&file).unwrap(), b"Hola");
    }

    #[tokio::test]
    async fn save_audio_without_field() {
        let dir = tempfile::tempdir().unwrap();
        let response = json!({ "kind": "text_reply", "text": "Hola" });

        let written = save_audio(&response, "audio", &dir.path().join("none.mp3"))
            .await
            .unwrap();

        assert!(written.is_none());
    }
}
