//! Integration tests for the LibreTranslate provider using wiremock

#![allow(clippy::expect_used)]

use ai_translation::{
    LibreTranslateProvider, TranslationConfig, TranslationError, TranslationProvider, Translator,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, method, path},
};

fn create_test_client(mock_server: &MockServer) -> LibreTranslateProvider {
    let config = TranslationConfig {
        provider: TranslationProvider::LibreTranslate,
        base_url: mock_server.uri(),
        api_key: None,
        timeout_ms: 2_000,
    };
    LibreTranslateProvider::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn translates_with_explicit_source() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({
            "q": "Hello",
            "source": "en",
            "target": "es",
            "format": "text"
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "translatedText": "Hola" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .translate("Hello", Some("en"), "es")
        .await
        .expect("translation should succeed");

    assert_eq!(result.text, "Hola");
    assert!(result.detected.is_none());
}

#[tokio::test]
async fn omitted_source_requests_auto_detection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({ "source": "auto" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "translatedText": "Good morning",
            "detectedLanguage": { "language": "es", "confidence": 90.0 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .translate("Buenos días", None, "en")
        .await
        .expect("translation should succeed");

    assert_eq!(result.text, "Good morning");
    assert_eq!(result.detected_language(), Some("es"));
}

#[tokio::test]
async fn api_key_is_sent_when_configured() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(serde_json::json!({ "api_key": "secret" })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "translatedText": "Hola" })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = LibreTranslateProvider::new(TranslationConfig {
        provider: TranslationProvider::LibreTranslate,
        base_url: mock_server.uri(),
        api_key: Some("secret".to_string()),
        timeout_ms: 2_000,
    })
    .expect("Failed to create client");

    assert!(client.translate("Hello", Some("en"), "es").await.is_ok());
}

#[tokio::test]
async fn rate_limit_maps_to_rate_limited() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": "Too many requests"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.translate("Hello", Some("en"), "es").await;

    assert!(matches!(result, Err(TranslationError::RateLimited)));
}

#[tokio::test]
async fn bad_request_carries_api_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "xx is not supported"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.translate("Hello", Some("en"), "xx").await;

    match result {
        Err(TranslationError::RequestFailed(message)) => {
            assert_eq!(message, "xx is not supported");
        },
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn server_error_maps_to_service_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.translate("Hello", Some("en"), "es").await;

    assert!(matches!(result, Err(TranslationError::ServiceUnavailable(_))));
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.translate("Hello", Some("en"), "es").await;

    assert!(matches!(result, Err(TranslationError::InvalidResponse(_))));
}

#[tokio::test]
async fn slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "translatedText": "Hola" }))
                .set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let client = LibreTranslateProvider::new(TranslationConfig {
        provider: TranslationProvider::LibreTranslate,
        base_url: mock_server.uri(),
        api_key: None,
        timeout_ms: 100,
    })
    .expect("Failed to create client");

    let result = client.translate("Hello", Some("en"), "es").await;
    assert!(matches!(result, Err(TranslationError::Timeout(100))));
}

#[tokio::test]
async fn available_when_languages_endpoint_answers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "code": "en", "name": "English", "targets": ["es", "ru"] }
        ])))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.is_available().await);
}

#[tokio::test]
async fn unavailable_when_languages_endpoint_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(!client.is_available().await);
}
