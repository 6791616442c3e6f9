//! Translation gateway
//!
//! Validates languages against the catalog, bounds the call to the
//! translation capability by a timeout, and classifies every failure.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use domain::{ConversationId, LanguageCatalog, LanguageCode};
use tracing::{info, instrument, warn};

use crate::error::{Capability, GatewayFailure};
use crate::ports::TranslationPort;

/// Successful translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedText {
    /// Translated text
    pub text: String,
    /// Source language, if known (given by the caller or detected)
    pub source: Option<LanguageCode>,
    /// Target language
    pub target: LanguageCode,
}

/// Outcome of a gateway translation
pub type TranslationOutcome = Result<TranslatedText, GatewayFailure>;

/// Gateway around a [`TranslationPort`]
pub struct TranslationGateway {
    port: Arc<dyn TranslationPort>,
    catalog: Arc<LanguageCatalog>,
    timeout: Duration,
}

impl fmt::Debug for TranslationGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationGateway")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl TranslationGateway {
    /// Default upper bound for one translation call
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a gateway with the default timeout
    pub fn new(port: Arc<dyn TranslationPort>, catalog: Arc<LanguageCatalog>) -> Self {
        Self {
            port,
            catalog,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Override the call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Translate `text` into `target`
    ///
    /// A missing `source` lets the capability detect the language. Empty
    /// input and same-language requests never reach the capability.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn translate(
        &self,
        conversation_id: Option<&ConversationId>,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> TranslationOutcome {
        let started = Instant::now();
        let outcome = self.translate_inner(text, source, target).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let conversation_id = conversation_id.map_or("-", ConversationId::as_str);

        match &outcome {
            Ok(translated) => info!(
                conversation_id,
                source_language = translated.source.as_ref().map_or("auto", LanguageCode::as_str),
                target_language = %translated.target,
                outcome = "success",
                latency_ms,
                "Translation completed"
            ),
            Err(failure) => warn!(
                conversation_id,
                source_language = source.unwrap_or("auto"),
                target_language = target,
                outcome = failure.kind().as_str(),
                latency_ms,
                error = %failure,
                "Translation failed"
            ),
        }

        outcome
    }

    /// Whether the underlying capability is reachable
    pub async fn is_available(&self) -> bool {
        self.port.is_available().await
    }

    async fn translate_inner(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> TranslationOutcome {
        let target = self.resolve(target)?;
        let source = source.map(|s| self.resolve(s)).transpose()?;

        if text.trim().is_empty() {
            return Ok(TranslatedText {
                text: String::new(),
                source,
                target,
            });
        }

        if source.as_ref() == Some(&target) {
            return Ok(TranslatedText {
                text: text.to_string(),
                source,
                target,
            });
        }

        let call = self.port.translate(text, source.as_ref(), &target);
        match tokio::time::timeout(self.timeout, call).await {
            Err(_) => Err(GatewayFailure::unavailable(
                Capability::Translation,
                format!("timed out after {}ms", self.timeout.as_millis()),
            )),
            Ok(Err(e)) => Err(GatewayFailure::unavailable(
                Capability::Translation,
                e.to_string(),
            )),
            Ok(Ok(translation)) => Ok(TranslatedText {
                text: translation.text,
                source: source.or(translation.detected_source),
                target,
            }),
        }
    }

    fn resolve(&self, code: &str) -> Result<LanguageCode, GatewayFailure> {
        self.catalog
            .resolve(code)
            .ok_or_else(|| GatewayFailure::UnsupportedLanguage {
                code: code.trim().to_string(),
            })
    }
}
