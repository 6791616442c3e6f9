//! Translation result types

use serde::{Deserialize, Serialize};

/// Language reported by a provider's auto-detection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// ISO 639-1 code
    pub language: String,
    /// Provider confidence, 0-100 where reported
    pub confidence: Option<f32>,
}

/// Text returned by a translator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatedText {
    /// The translated text
    pub text: String,
    /// Detected source language when the caller asked for detection
    pub detected: Option<DetectedLanguage>,
}

impl TranslatedText {
    /// Create a result without detection info
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            detected: None,
        }
    }

    /// Attach detection info
    #[must_use]
    pub fn with_detected(mut self, language: impl Into<String>, confidence: Option<f32>) -> Self {
        self.detected = Some(DetectedLanguage {
            language: language.into(),
            confidence,
        });
        self
    }

    /// Detected source language code, if any
    pub fn detected_language(&self) -> Option<&str> {
        self.detected.as_ref().map(|d| d.language.as_str())
    }
}
