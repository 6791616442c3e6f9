//! Application services

mod interpretation_service;
pub mod reply_formatter;
mod session_store;
mod speech_gateway;
mod translation_gateway;

pub use interpretation_service::{InterpretationService, ReadinessReport, StatusReport};
pub use session_store::InMemorySessionStore;
pub use speech_gateway::{SpeechGateway, SpeechOutcome};
pub use translation_gateway::{TranslatedText, TranslationGateway, TranslationOutcome};
