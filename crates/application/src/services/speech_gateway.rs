//! Speech gateway
//!
//! Checks language, voice and length before calling the speech capability,
//! and turns every failure into a [`GatewayFailure`].

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use domain::{AudioFormat, AudioPayload, ConversationId, LanguageCatalog};
use tracing::{info, instrument, warn};

use crate::error::{Capability, GatewayFailure};
use crate::ports::SpeechPort;

/// Outcome of a gateway synthesis
pub type SpeechOutcome = Result<AudioPayload, GatewayFailure>;

/// Gateway around a [`SpeechPort`]
pub struct SpeechGateway {
    port: Arc<dyn SpeechPort>,
    catalog: Arc<LanguageCatalog>,
    max_chars: usize,
    timeout: Duration,
    format: AudioFormat,
}

impl fmt::Debug for SpeechGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechGateway")
            .field("max_chars", &self.max_chars)
            .field("timeout", &self.timeout)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl SpeechGateway {
    /// Default cap on synthesized text, in characters
    pub const DEFAULT_MAX_CHARS: usize = 4096;

    /// Default upper bound for one synthesis call
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a gateway with default limits
    pub fn new(port: Arc<dyn SpeechPort>, catalog: Arc<LanguageCatalog>) -> Self {
        let format = port.audio_format();
        Self {
            port,
            catalog,
            max_chars: Self::DEFAULT_MAX_CHARS,
            timeout: Self::DEFAULT_TIMEOUT,
            format,
        }
    }

    /// Override the character cap
    #[must_use]
    pub const fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Override the call timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Format of every payload this gateway produces
    pub const fn audio_format(&self) -> AudioFormat {
        self.format
    }

    /// Character cap
    pub const fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Whether the underlying capability is reachable
    pub async fn is_available(&self) -> bool {
        self.port.is_available().await
    }

    /// Synthesize `text` spoken in `language`
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn synthesize(
        &self,
        conversation_id: Option<&ConversationId>,
        text: &str,
        language: &str,
    ) -> SpeechOutcome {
        let started = Instant::now();
        let outcome = self.synthesize_inner(text, language).await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let conversation_id = conversation_id.map_or("-", ConversationId::as_str);

        match &outcome {
            Ok(audio) => info!(
                conversation_id,
                language,
                outcome = "success",
                audio_bytes = audio.len(),
                latency_ms,
                "Speech synthesis completed"
            ),
            Err(failure) => warn!(
                conversation_id,
                language,
                outcome = failure.kind().as_str(),
                latency_ms,
                error = %failure,
                "Speech synthesis failed"
            ),
        }

        outcome
    }

    async fn synthesize_inner(&self, text: &str, language: &str) -> SpeechOutcome {
        let language = self
            .catalog
            .resolve(language)
            .ok_or_else(|| GatewayFailure::UnsupportedLanguage {
                code: language.trim().to_string(),
            })?;

        let voice = self
            .port
            .voice_for(&language)
            .ok_or_else(|| GatewayFailure::NoVoiceAvailable {
                language: language.clone(),
            })?;

        if text.trim().is_empty() {
            return Err(GatewayFailure::InvalidArgument(
                "Nothing to speak".to_string(),
            ));
        }

        let length = text.chars().count();
        if length > self.max_chars {
            return Err(GatewayFailure::TextTooLong {
                length,
                max: self.max_chars,
            });
        }

        let call = self.port.synthesize(text, &voice);
        let audio = match tokio::time::timeout(self.timeout, call).await {
            Err(_) => {
                return Err(GatewayFailure::unavailable(
                    Capability::Speech,
                    format!("timed out after {}ms", self.timeout.as_millis()),
                ));
            },
            Ok(Err(e)) => return Err(GatewayFailure::unavailable(Capability::Speech, e.to_string())),
            Ok(Ok(audio)) => audio,
        };

        if audio.data.is_empty() {
            return Err(GatewayFailure::unavailable(
                Capability::Speech,
                "capability returned no audio",
            ));
        }

        Ok(AudioPayload::new(audio.data, self.format))
    }
}
