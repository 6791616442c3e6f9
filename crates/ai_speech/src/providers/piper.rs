//! Piper Local Text-to-Speech Provider
//!
//! Implements `TextToSpeech` using the Piper CLI for local speech synthesis.
//! Text is written to Piper's stdin and the WAV it writes is read back from a
//! temporary file.
//!
//! # Prerequisites
//!
//! - Piper must be installed and available in PATH (or configured explicitly)
//! - One `.onnx` voice model (plus its `.onnx.json`) per configured voice
//!
//! ```bash
//! mkdir -p ~/.local/share/piper/voices
//! cd ~/.local/share/piper/voices
//! wget https://huggingface.co/rhasspy/piper-voices/resolve/main/es/es_MX/claude/high/es_MX-claude-high.onnx
//! wget https://huggingface.co/rhasspy/piper-voices/resolve/main/es/es_MX/claude/high/es_MX-claude-high.onnx.json
//! ```

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::config::PiperConfig;
use crate::error::SpeechError;
use crate::ports::TextToSpeech;
use crate::types::{AudioData, AudioFormat, wav_duration_ms};

/// Local TTS provider using Piper
#[derive(Debug, Clone)]
pub struct PiperProvider {
    config: PiperConfig,
}

impl PiperProvider {
    /// Create a new Piper provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: PiperConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self { config })
    }

    /// Get the Piper executable path
    fn executable(&self) -> &Path {
        &self.config.executable_path
    }

    /// Model path for a configured voice
    fn voice_model_path(&self, voice: &str) -> Result<PathBuf, SpeechError> {
        self.config
            .model_path(voice)
            .ok_or_else(|| SpeechError::VoiceNotFound(voice.to_string()))
    }

    /// Run Piper to synthesize speech
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn run_piper(&self, text: &str, voice: &str) -> Result<Vec<u8>, SpeechError> {
        let model_path = self.voice_model_path(voice)?;
        if !model_path.exists() {
            return Err(SpeechError::ModelNotAvailable(format!(
                "Voice model '{}' not found",
                model_path.display()
            )));
        }

        let output_file = NamedTempFile::with_suffix(".wav").map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to create temp file: {e}"))
        })?;

        let mut cmd = Command::new(self.executable());

        cmd.arg("--model")
            .arg(&model_path)
            .arg("--output_file")
            .arg(output_file.path())
            .arg("--length_scale")
            .arg(self.config.length_scale.to_string())
            .arg("--sentence_silence")
            .arg(self.config.sentence_silence.to_string())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!("Running piper: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SpeechError::NotAvailable(format!(
                    "Piper not found at '{}'. Please install Piper.",
                    self.executable().display()
                ))
            } else {
                SpeechError::SynthesisFailed(format!("Failed to run piper: {e}"))
            }
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await.map_err(|e| {
                SpeechError::SynthesisFailed(format!("Failed to write to piper stdin: {e}"))
            })?;
            // dropping stdin closes it so piper starts synthesizing
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| SpeechError::SynthesisFailed(format!("Failed to wait for piper: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Piper failed: {}", stderr);
            return Err(SpeechError::SynthesisFailed(format!(
                "Piper exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let audio_data = tokio::fs::read(output_file.path()).await.map_err(|e| {
            SpeechError::SynthesisFailed(format!("Failed to read piper output: {e}"))
        })?;

        if audio_data.is_empty() {
            warn!("Piper produced empty output");
            return Err(SpeechError::SynthesisFailed(
                "Piper produced empty output".to_string(),
            ));
        }

        Ok(audio_data)
    }

    async fn executable_runs(&self) -> bool {
        Command::new(self.executable())
            .arg("--help")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|s| s.success())
    }
}

#[async_trait]
impl TextToSpeech for PiperProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioData, SpeechError> {
        if text.is_empty() {
            return Err(SpeechError::SynthesisFailed(
                "Cannot synthesize empty text".to_string(),
            ));
        }

        debug!("Synthesizing {} chars with Piper", text.len());

        let wav_data = self.run_piper(text, voice).await?;
        let duration = wav_duration_ms(&wav_data);

        let audio = AudioData::new(wav_data, AudioFormat::Wav);
        Ok(match duration {
            Some(ms) => audio.with_duration(ms),
            None => audio,
        })
    }

    fn has_voice(&self, voice: &str) -> bool {
        self.config.model_path(voice).is_some()
    }

    fn output_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    async fn is_available(&self) -> bool {
        let executable_exists = self.executable().exists() || self.executable_runs().await;

        let any_model = self
            .config
            .voices
            .keys()
            .filter_map(|voice| self.config.model_path(voice))
            .any(|path| path.exists());

        debug!(
            "Piper availability: executable={}, model={}",
            executable_exists, any_model
        );

        executable_exists && any_model
    }

    fn model_name(&self) -> &str {
        "piper"
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn test_config() -> PiperConfig {
        let mut voices = HashMap::new();
        voices.insert(
            "es_MX-claude-high".to_string(),
            PathBuf::from("/models/es_MX-claude-high.onnx"),
        );
        voices.insert(
            "en_US-lessac-medium".to_string(),
            PathBuf::from("en_US-lessac-medium.onnx"),
        );

        PiperConfig {
            executable_path: PathBuf::from("piper"),
            voices_dir: PathBuf::from("/voices"),
            voices,
            length_scale: 1.0,
            sentence_silence: 0.2,
        }
    }

    #[test]
    fn creates_provider_with_valid_config() {
        assert!(PiperProvider::new(test_config()).is_ok());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = PiperConfig {
            length_scale: -1.0,
            ..test_config()
        };
        assert!(matches!(
            PiperProvider::new(config),
            Err(SpeechError::Configuration(_))
        ));
    }

    #[test]
    fn voice_model_path_looks_up_voice() {
        let provider = PiperProvider::new(test_config()).unwrap();
        assert_eq!(
            provider.voice_model_path("es_MX-claude-high").unwrap(),
            PathBuf::from("/models/es_MX-claude-high.onnx")
        );
        assert_eq!(
            provider.voice_model_path("en_US-lessac-medium").unwrap(),
            PathBuf::from("/voices/en_US-lessac-medium.onnx")
        );
    }

    #[test]
    fn unknown_voice_is_not_found() {
        let provider = PiperProvider::new(test_config()).unwrap();
        assert!(!provider.has_voice("ru_RU-irina-medium"));
        assert!(matches!(
            provider.voice_model_path("ru_RU-irina-medium"),
            Err(SpeechError::VoiceNotFound(_))
        ));
    }

    #[test]
    fn output_is_always_wav() {
        let provider = PiperProvider::new(test_config()).unwrap();
        assert_eq!(provider.output_format(), AudioFormat::Wav);
    }

    #[tokio::test]
    async fn synthesize_with_missing_model_fails() {
        let provider = PiperProvider::new(test_config()).unwrap();
        let result = provider.synthesize("Hola", "es_MX-claude-high").await;
        assert!(matches!(result, Err(SpeechError::ModelNotAvailable(_))));
    }

    #[tokio::test]
    async fn synthesize_empty_text_fails() {
        let provider = PiperProvider::new(test_config()).unwrap();
        let result = provider.synthesize("", "es_MX-claude-high").await;
        assert!(matches!(result, Err(SpeechError::SynthesisFailed(_))));
    }

    #[tokio::test]
    async fn is_available_returns_false_when_not_installed() {
        let config = PiperConfig {
            executable_path: PathBuf::from("/nonexistent/piper"),
            ..test_config()
        };
        let provider = PiperProvider::new(config).unwrap();

        assert!(!provider.is_available().await);
    }
}
