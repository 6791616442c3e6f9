//! Configuration for translation providers

use serde::{Deserialize, Serialize};

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Configuration for the translation provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Provider to use
    #[serde(default)]
    pub provider: TranslationProvider,

    /// LibreTranslate server base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// LibreTranslate API key (required by the public instance)
    #[serde(default)]
    pub api_key: Option<String>,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

/// Translation provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    /// LibreTranslate HTTP API
    LibreTranslate,
    /// Offline phrase tables
    #[default]
    Phrasebook,
}

fn default_base_url() -> String {
    "https://libretranslate.com".to_string()
}

const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: TranslationProvider::default(),
            base_url: default_base_url(),
            api_key: None,
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl TranslationConfig {
    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        if self.provider == TranslationProvider::LibreTranslate
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(format!(
                "LibreTranslate base_url must be an http(s) URL, got '{}'",
                self.base_url
            ));
        }

        Ok(())
    }
}
