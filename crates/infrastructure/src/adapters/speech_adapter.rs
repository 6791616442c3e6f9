//! Speech adapter - Implements SpeechPort using the ai_speech crate

use std::collections::HashMap;
use std::sync::Arc;

use ai_speech::{
    AudioData, AudioFormat as AiAudioFormat, OpenAISpeechProvider, PiperProvider, SpeechConfig,
    SpeechError, SpeechProvider, TextToSpeech,
};
use application::error::ApplicationError;
use application::ports::{SpeechPort, SynthesizedAudio};
use async_trait::async_trait;
use domain::{AudioFormat, LanguageCode};
use tracing::{debug, instrument};

/// Adapter for text-to-speech providers
///
/// Holds the language → voice table from configuration. Keys may be full tags
/// (`es-CO`) or bare primary subtags (`es`) and are matched case-insensitively;
/// a full-tag entry wins over a primary-subtag entry.
pub struct SpeechAdapter {
    provider: Arc<dyn TextToSpeech>,
    voices: Vec<(String, String)>,
}

impl std::fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechAdapter")
            .field("model", &self.provider.model_name())
            .field("voices", &self.voices.len())
            .finish_non_exhaustive()
    }
}

impl SpeechAdapter {
    /// Wrap an existing provider with a language → voice table
    pub fn new(provider: Arc<dyn TextToSpeech>, language_voices: &HashMap<String, String>) -> Self {
        let mut voices: Vec<(String, String)> = language_voices
            .iter()
            .map(|(language, voice)| (language.trim().to_ascii_lowercase(), voice.clone()))
            .collect();
        voices.sort();
        Self { provider, voices }
    }

    /// Create the provider selected in `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails to initialize.
    pub fn from_config(config: &SpeechConfig) -> Result<Self, ApplicationError> {
        let provider: Arc<dyn TextToSpeech> = match config.provider {
            SpeechProvider::OpenAI => Arc::new(
                OpenAISpeechProvider::new(config.clone()).map_err(Self::map_error)?,
            ),
            SpeechProvider::Piper => {
                Arc::new(PiperProvider::new(config.piper.clone()).map_err(Self::map_error)?)
            },
        };
        Ok(Self::new(provider, &config.language_voices))
    }

    /// Configured voice for `language`, without checking the provider
    fn configured_voice(&self, language: &LanguageCode) -> Option<&str> {
        let full = language.as_str().to_ascii_lowercase();
        let primary = language.primary_subtag();

        self.voices
            .iter()
            .find(|(key, _)| *key == full)
            .or_else(|| self.voices.iter().find(|(key, _)| key == primary))
            .map(|(_, voice)| voice.as_str())
    }

    /// Convert ai_speech AudioFormat to domain AudioFormat
    const fn ai_to_domain_format(format: AiAudioFormat) -> AudioFormat {
        match format {
            AiAudioFormat::Wav => AudioFormat::Wav,
            AiAudioFormat::Mp3 => AudioFormat::Mp3,
            AiAudioFormat::Opus => AudioFormat::Opus,
            AiAudioFormat::Flac => AudioFormat::Flac,
        }
    }

    /// Map speech error to application error
    fn map_error(err: SpeechError) -> ApplicationError {
        match err {
            SpeechError::Configuration(e) => ApplicationError::Configuration(e),
            SpeechError::NotAvailable(e) => ApplicationError::NotAvailable(e),
            SpeechError::VoiceNotFound(v) => {
                ApplicationError::NotAvailable(format!("Voice not found: {v}"))
            },
            SpeechError::ModelNotAvailable(m) => {
                ApplicationError::NotAvailable(format!("Model not available: {m}"))
            },
            SpeechError::RateLimited => ApplicationError::RateLimited,
            SpeechError::Timeout(ms) => {
                ApplicationError::Timeout(format!("speech provider after {ms}ms"))
            },
            SpeechError::ConnectionFailed(e)
            | SpeechError::RequestFailed(e)
            | SpeechError::ServiceUnavailable(e) => ApplicationError::ExternalService(e),
            SpeechError::SynthesisFailed(e) => {
                ApplicationError::ExternalService(format!("Synthesis failed: {e}"))
            },
            SpeechError::InvalidResponse(e) => {
                ApplicationError::ExternalService(format!("Invalid response: {e}"))
            },
        }
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    async fn synthesize(
        &self,
        text: &str,
        voice: &str,
    ) -> Result<SynthesizedAudio, ApplicationError> {
        let audio: AudioData = self
            .provider
            .synthesize(text, voice)
            .await
            .map_err(Self::map_error)?;

        let format = Self::ai_to_domain_format(audio.format());
        let duration_ms = audio.duration_ms();

        debug!(
            audio_size = audio.size_bytes(),
            format = %format,
            duration_ms = ?duration_ms,
            "Synthesis complete"
        );

        Ok(SynthesizedAudio {
            data: audio.into_data(),
            format,
            duration_ms,
        })
    }

    fn voice_for(&self, language: &LanguageCode) -> Option<String> {
        self.configured_voice(language)
            .filter(|voice| self.provider.has_voice(voice))
            .map(str::to_string)
    }

    fn audio_format(&self) -> AudioFormat {
        Self::ai_to_domain_format(self.provider.output_format())
    }

    async fn is_available(&self) -> bool {
        self.provider.is_available().await
    }
}
