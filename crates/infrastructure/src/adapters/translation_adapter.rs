//! Translation adapter - Implements TranslationPort using the ai_translation crate

use std::sync::Arc;

use ai_translation::{
    LibreTranslateProvider, PhrasebookProvider, TranslationConfig, TranslationError,
    TranslationProvider, Translator,
};
use application::error::ApplicationError;
use application::ports::{Translation, TranslationPort};
use async_trait::async_trait;
use domain::{LanguageCatalog, LanguageCode};
use tracing::{debug, instrument};

/// Adapter for translation providers
///
/// Providers speak ISO 639-1 codes, so catalog tags are reduced to their
/// primary subtag on the way out. Detected languages coming back are
/// resolved through the catalog and dropped if the catalog does not know them.
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
    catalog: Arc<LanguageCatalog>,
}

impl std::fmt::Debug for TranslationAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationAdapter")
            .field("provider", &self.translator.name())
            .finish_non_exhaustive()
    }
}

impl TranslationAdapter {
    /// Wrap an existing translator
    pub fn new(translator: Arc<dyn Translator>, catalog: Arc<LanguageCatalog>) -> Self {
        Self {
            translator,
            catalog,
        }
    }

    /// Create the provider selected in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn from_config(
        config: &TranslationConfig,
        catalog: Arc<LanguageCatalog>,
    ) -> Result<Self, ApplicationError> {
        let translator: Arc<dyn Translator> = match config.provider {
            TranslationProvider::LibreTranslate => Arc::new(
                LibreTranslateProvider::new(config.clone()).map_err(Self::map_error)?,
            ),
            TranslationProvider::Phrasebook => Arc::new(PhrasebookProvider::new()),
        };
        Ok(Self::new(translator, catalog))
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &'static str {
        self.translator.name()
    }

    /// Map translation error to application error
    fn map_error(err: TranslationError) -> ApplicationError {
        match err {
            TranslationError::Configuration(e) => ApplicationError::Configuration(e),
            TranslationError::Unauthorized(e) => {
                ApplicationError::Configuration(format!("Credentials rejected: {e}"))
            },
            TranslationError::RateLimited => ApplicationError::RateLimited,
            TranslationError::Timeout(ms) => {
                ApplicationError::Timeout(format!("translation provider after {ms}ms"))
            },
            TranslationError::ConnectionFailed(e)
            | TranslationError::RequestFailed(e)
            | TranslationError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            TranslationError::InvalidResponse(e) => {
                ApplicationError::ExternalService(format!("Invalid response: {e}"))
            },
        }
    }
}

#[async_trait]
impl TranslationPort for TranslationAdapter {
    #[instrument(skip(self, text), fields(provider = self.translator.name(), chars = text.chars().count()))]
    async fn translate<'a>(
        &self,
        text: &str,
        source: Option<&'a LanguageCode>,
        target: &LanguageCode,
    ) -> Result<Translation, ApplicationError> {
        let translated = self
            .translator
            .translate(
                text,
                source.map(LanguageCode::primary_subtag),
                target.primary_subtag(),
            )
            .await
            .map_err(Self::map_error)?;

        let detected_source = translated
            .detected_language()
            .and_then(|code| self.catalog.resolve(code));

        debug!(
            detected = ?translated.detected_language(),
            resolved = ?detected_source,
            "Provider translation complete"
        );

        Ok(Translation {
            text: translated.text,
            detected_source,
        })
    }

    async fn is_available(&self) -> bool {
        self.translator.is_available().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use ai_translation::TranslatedText;

    use super::*;

    /// Records the codes it was called with and replies with a fixed result
    struct RecordingTranslator {
        calls: Mutex<Vec<(Option<String>, String)>>,
        reply: fn() -> Result<TranslatedText, TranslationError>,
    }

    impl RecordingTranslator {
        fn new(reply: fn() -> Result<TranslatedText, TranslationError>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }
    }

    #[async_trait]
    impl Translator for RecordingTranslator {
        async fn translate(
            &self,
            _text: &str,
            source: Option<&str>,
            target: &str,
        ) -> Result<TranslatedText, TranslationError> {
            self.calls
                .lock()
                .unwrap()
                .push((source.map(str::to_string), target.to_string()));
            (self.reply)()
        }

        async fn is_available(&self) -> bool {
            false
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    fn catalog() -> Arc<LanguageCatalog> {
        Arc::new(LanguageCatalog::builtin())
    }

    fn code(tag: &str) -> LanguageCode {
        LanguageCode::parse(tag).unwrap()
    }

    #[tokio::test]
    async fn passes_primary_subtags_to_provider() {
        let translator = Arc::new(RecordingTranslator::new(|| Ok(TranslatedText::new("Hola"))));
        let adapter = TranslationAdapter::new(translator.clone(), catalog());

        let result = adapter
            .translate("Hello", Some(&code("en-US")), &code("es-CO"))
            .await
            .unwrap();

        assert_eq!(result, Translation::new("Hola"));
        assert_eq!(
            translator.calls.lock().unwrap().as_slice(),
            &[(Some("en".to_string()), "es".to_string())]
        );
    }

    #[tokio::test]
    async fn detected_language_resolves_through_catalog() {
        let translator = Arc::new(RecordingTranslator::new(|| {
            Ok(TranslatedText::new("Hello").with_detected("es", Some(0.9)))
        }));
        let adapter = TranslationAdapter::new(translator.clone(), catalog());

        let result = adapter.translate("Hola", None, &code("en-US")).await.unwrap();

        assert_eq!(result.detected_source, Some(code("es-CO")));
        assert_eq!(translator.calls.lock().unwrap()[0].0, None);
    }

    #[tokio::test]
    async fn unknown_detected_language_is_dropped() {
        let translator = Arc::new(RecordingTranslator::new(|| {
            Ok(TranslatedText::new("Hello").with_detected("ja", None))
        }));
        let adapter = TranslationAdapter::new(translator, catalog());

        let result = adapter.translate("こんにちは", None, &code("en-US")).await.unwrap();
        assert_eq!(result.detected_source, None);
    }

    #[tokio::test]
    async fn provider_errors_are_mapped() {
        let translator = Arc::new(RecordingTranslator::new(|| Err(TranslationError::RateLimited)));
        let adapter = TranslationAdapter::new(translator, catalog());

        let err = adapter
            .translate("Hello", None, &code("es-CO"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::RateLimited));
    }

    #[test]
    fn map_error_classification() {
        assert!(matches!(
            TranslationAdapter::map_error(TranslationError::Timeout(100)),
            ApplicationError::Timeout(_)
        ));
        assert!(matches!(
            TranslationAdapter::map_error(TranslationError::Unauthorized("bad key".into())),
            ApplicationError::Configuration(_)
        ));
        assert!(matches!(
            TranslationAdapter::map_error(TranslationError::ServiceUnavailable("503".into())),
            ApplicationError::ExternalService(_)
        ));
        assert!(matches!(
            TranslationAdapter::map_error(TranslationError::InvalidResponse("eof".into())),
            ApplicationError::ExternalService(_)
        ));
    }

    #[tokio::test]
    async fn phrasebook_from_config() {
        let adapter =
            TranslationAdapter::from_config(&TranslationConfig::default(), catalog()).unwrap();
        assert_eq!(adapter.provider_name(), "phrasebook");
        assert!(adapter.is_available().await);

        let result = adapter
            .translate("Hello", Some(&code("en-US")), &code("es-CO"))
            .await
            .unwrap();
        assert_eq!(result.text, "Hola");
    }

    #[test]
    fn libretranslate_from_config() {
        let config = TranslationConfig {
            provider: TranslationProvider::LibreTranslate,
            base_url: "http://localhost:5000".to_string(),
            ..Default::default()
        };
        let adapter = TranslationAdapter::from_config(&config, catalog()).unwrap();
        assert_eq!(adapter.provider_name(), "libretranslate");
    }
}
