//! Speech port - Interface to a text-to-speech capability

use async_trait::async_trait;
use domain::{AudioFormat, LanguageCode};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Result of a speech synthesis operation
#[derive(Debug, Clone)]
pub struct SynthesizedAudio {
    /// Generated audio data
    pub data: Vec<u8>,
    /// Format of the audio
    pub format: AudioFormat,
    /// Duration of audio in milliseconds (if known)
    pub duration_ms: Option<u64>,
}

/// Port for speech synthesis operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SpeechPort: Send + Sync {
    /// Synthesize `text` with the given voice
    async fn synthesize(&self, text: &str, voice: &str)
    -> Result<SynthesizedAudio, ApplicationError>;

    /// Voice configured for a language, if any
    fn voice_for(&self, language: &LanguageCode) -> Option<String>;

    /// The single audio format this capability produces
    fn audio_format(&self) -> AudioFormat;

    /// Check if the speech capability is installed and reachable
    async fn is_available(&self) -> bool;
}
