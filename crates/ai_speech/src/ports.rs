//! Port definitions for speech synthesis

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::{AudioData, AudioFormat};

/// Port for Text-to-Speech (TTS) implementations
///
/// Implementations convert text to audio in the single format reported by
/// [`TextToSpeech::output_format`].
///
/// # Example
///
/// ```ignore
/// use ai_speech::TextToSpeech;
///
/// async fn create_voice_response(
///     tts: &impl TextToSpeech,
///     text: &str,
/// ) -> Result<Vec<u8>, SpeechError> {
///     let audio = tts.synthesize(text, "nova").await?;
///     Ok(audio.into_data())
/// }
/// ```
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    /// Convert text to speech with the given voice
    ///
    /// # Errors
    ///
    /// Returns `SpeechError` if synthesis fails or the voice is unknown.
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioData, SpeechError>;

    /// Whether this provider can speak with `voice`
    fn has_voice(&self, voice: &str) -> bool;

    /// Format of every synthesized payload
    fn output_format(&self) -> AudioFormat;

    /// Check if the TTS service is available
    async fn is_available(&self) -> bool;

    /// Get the name of the current TTS model
    fn model_name(&self) -> &str;
}
