//! Gateway limits: capability deadlines and the speech length cap.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits applied by the translation and speech gateways
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Deadline for one translation call in milliseconds (default: 10s)
    #[serde(default = "default_translation_timeout")]
    pub translation_timeout_ms: u64,

    /// Deadline for one synthesis call in milliseconds (default: 30s)
    #[serde(default = "default_speech_timeout")]
    pub speech_timeout_ms: u64,

    /// Maximum characters accepted for synthesis
    #[serde(default = "default_max_speech_chars")]
    pub max_speech_chars: usize,
}

const fn default_translation_timeout() -> u64 {
    10_000
}

const fn default_speech_timeout() -> u64 {
    30_000
}

const fn default_max_speech_chars() -> usize {
    4096
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            translation_timeout_ms: default_translation_timeout(),
            speech_timeout_ms: default_speech_timeout(),
            max_speech_chars: default_max_speech_chars(),
        }
    }
}

impl GatewayConfig {
    #[must_use]
    pub const fn translation_timeout(&self) -> Duration {
        Duration::from_millis(self.translation_timeout_ms)
    }

    #[must_use]
    pub const fn speech_timeout(&self) -> Duration {
        Duration::from_millis(self.speech_timeout_ms)
    }

    /// Validate the gateway section
    pub fn validate(&self) -> Result<(), String> {
        if self.translation_timeout_ms == 0 {
            return Err("translation_timeout_ms must be greater than 0".to_string());
        }
        if self.speech_timeout_ms == 0 {
            return Err("speech_timeout_ms must be greater than 0".to_string());
        }
        if self.max_speech_chars == 0 {
            return Err("max_speech_chars must be greater than 0".to_string());
        }
        Ok(())
    }
}
