//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `languages`: supported languages and the default
//! - `gateway`: capability deadlines and the speech length cap
//! - `sessions`: history depth and idle expiry
//!
//! Provider sections reuse the provider crates' own config types
//! (`ai_translation::TranslationConfig`, `ai_speech::SpeechConfig`), and
//! logging uses [`crate::telemetry::TelemetryConfig`].

mod gateway;
mod languages;
mod server;
mod sessions;

use std::fmt;

use ai_speech::SpeechConfig;
use ai_translation::TranslationConfig;
use domain::{DomainError, LanguageCatalog};
use serde::{Deserialize, Serialize};

pub use gateway::GatewayConfig;
pub use languages::{LanguageEntry, LanguagesConfig};
pub use server::ServerConfig;
pub use sessions::SessionsConfig;

use crate::telemetry::TelemetryConfig;

/// Environment variable naming an alternative config file
pub const CONFIG_PATH_ENV: &str = "INTERPRETER_CONFIG";

/// Prefix for environment variable overrides
pub const ENV_PREFIX: &str = "INTERPRETER";

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Application environment (development or production)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Production environment - provider settings are checked strictly
    Production,
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(format!(
                "Invalid environment: {s}. Use 'development' or 'production'"
            )),
        }
    }
}

/// Root application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment
    #[serde(default)]
    pub environment: Environment,

    /// HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// Language catalog
    #[serde(default)]
    pub languages: LanguagesConfig,

    /// Translation provider
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Speech synthesis provider
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Gateway limits
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Session retention
    #[serde(default)]
    pub sessions: SessionsConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from defaults, an optional file and the environment
    ///
    /// The file is `config.toml` in the working directory unless
    /// `INTERPRETER_CONFIG` names another path. Environment variables such as
    /// `INTERPRETER_SERVER__PORT=8080` override both.
    pub fn load() -> Result<Self, config::ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(path.as_deref().unwrap_or("config"))
    }

    /// Load configuration using `path` as the optional file source
    pub fn load_from(path: &str) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name(path).required(false))
            // Override with environment variables (e.g., INTERPRETER_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.allowed_origins")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Validate every section, naming the section in the error
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate().map_err(|e| format!("server: {e}"))?;
        self.languages
            .validate()
            .map_err(|e| format!("languages: {e}"))?;
        self.translation
            .validate()
            .map_err(|e| format!("translation: {e}"))?;
        self.speech.validate().map_err(|e| format!("speech: {e}"))?;
        self.gateway.validate().map_err(|e| format!("gateway: {e}"))?;
        self.sessions
            .validate()
            .map_err(|e| format!("sessions: {e}"))?;
        self.telemetry
            .validate()
            .map_err(|e| format!("telemetry: {e}"))?;

        if self.environment == Environment::Production
            && self.server.cors_enabled
            && self.server.allowed_origins.is_empty()
        {
            return Err(
                "server: allowed_origins must be set when CORS is enabled in production"
                    .to_string(),
            );
        }
        Ok(())
    }

    /// Build the language catalog
    pub fn build_catalog(&self) -> Result<LanguageCatalog, DomainError> {
        self.languages.build_catalog()
    }
}
