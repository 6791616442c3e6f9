//! Configuration for speech synthesis

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::AudioFormat;

/// Configuration for speech synthesis services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speech provider to use
    #[serde(default)]
    pub provider: SpeechProvider,

    /// OpenAI API key (for OpenAI provider)
    #[serde(default)]
    pub openai_api_key: Option<String>,

    /// OpenAI API base URL (for custom endpoints)
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Text-to-speech model
    #[serde(default = "default_tts_model")]
    pub tts_model: String,

    /// TTS speaking speed (0.25 to 4.0)
    #[serde(default = "default_speed")]
    pub speed: f32,

    /// Local Piper settings
    #[serde(default)]
    pub piper: PiperConfig,

    /// Output audio format, fixed for the process
    #[serde(default = "default_output_format")]
    pub output_format: AudioFormat,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Voice id per language code (`en-US`, or a bare `es` for every Spanish variant)
    #[serde(default = "default_language_voices")]
    pub language_voices: HashMap<String, String>,
}

/// Speech provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SpeechProvider {
    /// OpenAI-compatible speech API
    OpenAI,
    /// Local Piper CLI
    #[default]
    Piper,
}

/// Configuration for the local Piper provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiperConfig {
    /// Path to the Piper executable (or a name on `PATH`)
    #[serde(default = "default_piper_executable")]
    pub executable_path: PathBuf,

    /// Directory that relative model paths are resolved against
    #[serde(default = "default_voices_dir")]
    pub voices_dir: PathBuf,

    /// Voice id to `.onnx` model path
    #[serde(default = "default_piper_voices")]
    pub voices: HashMap<String, PathBuf>,

    /// Speaking rate; above 1.0 is slower
    #[serde(default = "default_length_scale")]
    pub length_scale: f32,

    /// Seconds of silence between sentences
    #[serde(default = "default_sentence_silence")]
    pub sentence_silence: f32,
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_tts_model() -> String {
    "tts-1".to_string()
}

const fn default_speed() -> f32 {
    1.0
}

const fn default_output_format() -> AudioFormat {
    AudioFormat::Wav
}

const fn default_timeout_ms() -> u64 {
    30000 // 30 seconds
}

const DEFAULT_VOICES: &[(&str, &str)] = &[
    ("en-US", "en_US-lessac-medium"),
    ("es-CO", "es_MX-claude-high"),
    ("ru-RU", "ru_RU-irina-medium"),
];

fn default_language_voices() -> HashMap<String, String> {
    DEFAULT_VOICES
        .iter()
        .map(|(lang, voice)| ((*lang).to_string(), (*voice).to_string()))
        .collect()
}

fn default_piper_executable() -> PathBuf {
    PathBuf::from("piper")
}

fn default_voices_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("piper")
        .join("voices")
}

fn default_piper_voices() -> HashMap<String, PathBuf> {
    DEFAULT_VOICES
        .iter()
        .map(|(_, voice)| ((*voice).to_string(), PathBuf::from(format!("{voice}.onnx"))))
        .collect()
}

const fn default_length_scale() -> f32 {
    1.0
}

const fn default_sentence_silence() -> f32 {
    0.2
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            provider: SpeechProvider::default(),
            openai_api_key: None,
            openai_base_url: default_openai_base_url(),
            tts_model: default_tts_model(),
            speed: default_speed(),
            piper: PiperConfig::default(),
            output_format: default_output_format(),
            timeout_ms: default_timeout_ms(),
            language_voices: default_language_voices(),
        }
    }
}

impl Default for PiperConfig {
    fn default() -> Self {
        Self {
            executable_path: default_piper_executable(),
            voices_dir: default_voices_dir(),
            voices: default_piper_voices(),
            length_scale: default_length_scale(),
            sentence_silence: default_sentence_silence(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        match self.provider {
            SpeechProvider::OpenAI => {
                if self.openai_api_key.is_none() {
                    return Err("OpenAI API key is required for OpenAI provider".to_string());
                }
                if !(0.25..=4.0).contains(&self.speed) {
                    return Err(format!(
                        "Speed must be between 0.25 and 4.0, got {}",
                        self.speed
                    ));
                }
            },
            SpeechProvider::Piper => {
                if self.output_format != AudioFormat::Wav {
                    return Err(format!(
                        "Piper only produces wav output, got {}",
                        self.output_format.extension()
                    ));
                }
                self.piper.validate()?;
            },
        }

        Ok(())
    }
}

impl PiperConfig {
    /// Validate the Piper settings
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.executable_path.as_os_str().is_empty() {
            return Err("Piper executable path must not be empty".to_string());
        }
        if self.length_scale <= 0.0 {
            return Err(format!(
                "Length scale must be positive, got {}",
                self.length_scale
            ));
        }
        if self.sentence_silence < 0.0 {
            return Err(format!(
                "Sentence silence must not be negative, got {}",
                self.sentence_silence
            ));
        }
        Ok(())
    }

    /// Resolve the model path for a voice id
    ///
    /// Voice ids match case-insensitively; relative paths are resolved
    /// against `voices_dir`.
    #[must_use]
    pub fn model_path(&self, voice: &str) -> Option<PathBuf> {
        self.voices
            .iter()
            .find(|(id, _)| id.eq_ignore_ascii_case(voice))
            .map(|(_, path)| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    self.voices_dir.join(path)
                }
            })
    }
}
