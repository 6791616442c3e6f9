//! Wiring of the interpretation service from configuration

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{SessionStorePort, SpeechPort, TranslationPort};
use application::services::{
    InMemorySessionStore, InterpretationService, SpeechGateway, TranslationGateway,
};
use domain::{DomainError, LanguageCatalog};
use thiserror::Error;
use tracing::info;

use crate::adapters::{SpeechAdapter, TranslationAdapter};
use crate::config::AppConfig;

/// Errors raised while assembling the service
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Language catalog could not be built
    #[error(transparent)]
    Catalog(#[from] DomainError),

    /// A capability provider could not be created
    #[error("Provider initialization failed: {0}")]
    Provider(#[from] ApplicationError),
}

/// Fully wired interpreter components
#[derive(Clone)]
pub struct Interpreter {
    /// Language catalog shared by every component
    pub catalog: Arc<LanguageCatalog>,
    /// Session store, also used by the expiry task
    pub sessions: Arc<dyn SessionStorePort>,
    /// The orchestrator
    pub service: Arc<InterpretationService>,
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("catalog", &self.catalog)
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}

/// Validate `config` and build the interpreter with the configured providers
pub fn build_interpreter(config: &AppConfig) -> Result<Interpreter, BootstrapError> {
    config.validate().map_err(BootstrapError::InvalidConfig)?;

    let catalog = Arc::new(config.build_catalog()?);
    let translation = TranslationAdapter::from_config(&config.translation, Arc::clone(&catalog))?;
    let speech = SpeechAdapter::from_config(&config.speech)?;

    info!(
        languages = catalog.len(),
        default_language = %catalog.default_language(),
        translation_provider = translation.provider_name(),
        speech_provider = ?config.speech.provider,
        "Interpreter providers initialized"
    );

    Ok(assemble(
        config,
        catalog,
        Arc::new(translation),
        Arc::new(speech),
    ))
}

/// Build the interpreter around the given ports
///
/// Gateway limits and session history depth are taken from `config`.
pub fn assemble(
    config: &AppConfig,
    catalog: Arc<LanguageCatalog>,
    translation: Arc<dyn TranslationPort>,
    speech: Arc<dyn SpeechPort>,
) -> Interpreter {
    let sessions: Arc<dyn SessionStorePort> = Arc::new(
        InMemorySessionStore::new(Arc::clone(&catalog))
            .with_history_depth(config.sessions.history_depth),
    );

    let translation = Arc::new(
        TranslationGateway::new(translation, Arc::clone(&catalog))
            .with_timeout(config.gateway.translation_timeout()),
    );
    let speech = Arc::new(
        SpeechGateway::new(speech, Arc::clone(&catalog))
            .with_max_chars(config.gateway.max_speech_chars)
            .with_timeout(config.gateway.speech_timeout()),
    );

    let service = Arc::new(InterpretationService::new(
        Arc::clone(&catalog),
        Arc::clone(&sessions),
        translation,
        speech,
    ));

    Interpreter {
        catalog,
        sessions,
        service,
    }
}
