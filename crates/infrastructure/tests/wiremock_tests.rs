//! Integration tests for the infrastructure crate
//!
//! Drives a fully wired interpreter against a wiremock LibreTranslate server.

#![allow(clippy::expect_used)]

use std::time::Duration;

use ai_translation::TranslationProvider;
use domain::{ConversationId, ErrorKind};
use infrastructure::{AppConfig, Interpreter, build_interpreter};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn libretranslate_config(mock_server: &MockServer) -> AppConfig {
    let mut config = AppConfig::default();
    config.translation.provider = TranslationProvider::LibreTranslate;
    config.translation.base_url = mock_server.uri();
    config
}

fn create_interpreter(config: &AppConfig) -> Interpreter {
    build_interpreter(config).expect("interpreter should build")
}

fn conversation() -> ConversationId {
    ConversationId::new("wiremock-chat").expect("valid id")
}

#[tokio::test]
async fn plain_text_is_translated_by_libretranslate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({
            "q": "Where is the station?",
            "source": "auto",
            "target": "es"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "translatedText": "¿Dónde está la estación?",
            "detectedLanguage": { "language": "en", "confidence": 92.0 }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let interpreter = create_interpreter(&libretranslate_config(&mock_server));
    let id = conversation();

    interpreter.service.handle(&id, "/language es").await;
    let reply = interpreter.service.handle(&id, "Where is the station?").await;

    assert_eq!(reply.text_payload(), Some("¿Dónde está la estación?"));
}

#[tokio::test]
async fn same_language_never_reaches_the_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let interpreter = create_interpreter(&libretranslate_config(&mock_server));
    let outcome = interpreter
        .service
        .translation_gateway()
        .translate(None, "Hello", Some("en"), "en-US")
        .await
        .expect("identity translation");

    assert_eq!(outcome.text, "Hello");
}

#[tokio::test]
async fn provider_outage_becomes_gateway_unavailable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({ "error": "maintenance" })),
        )
        .mount(&mock_server)
        .await;

    let interpreter = create_interpreter(&libretranslate_config(&mock_server));
    let id = conversation();

    interpreter.service.handle(&id, "/language ru").await;
    let reply = interpreter.service.handle(&id, "Good morning").await;

    assert_eq!(reply.error_kind(), Some(ErrorKind::GatewayUnavailable));
}

#[tokio::test]
async fn gateway_deadline_bounds_slow_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "translatedText": "tarde" }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let mut config = libretranslate_config(&mock_server);
    config.gateway.translation_timeout_ms = 100;

    let interpreter = create_interpreter(&config);
    let id = conversation();

    interpreter.service.handle(&id, "/language es").await;
    let reply = interpreter.service.handle(&id, "late").await;

    assert_eq!(reply.error_kind(), Some(ErrorKind::GatewayUnavailable));
}

#[tokio::test]
async fn readiness_probes_libretranslate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "code": "en", "name": "English" },
            { "code": "es", "name": "Spanish" }
        ])))
        .mount(&mock_server)
        .await;

    let interpreter = create_interpreter(&libretranslate_config(&mock_server));
    let readiness = interpreter.service.readiness().await;

    assert!(readiness.translation_available);
}

#[tokio::test]
async fn readiness_reports_unreachable_provider() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/languages"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let interpreter = create_interpreter(&libretranslate_config(&mock_server));
    let readiness = interpreter.service.readiness().await;

    assert!(!readiness.translation_available);
    assert!(!readiness.is_ready());
}
