//! AI Translation - Machine translation providers
//!
//! Provides the `Translator` trait and its implementations:
//! - `LibreTranslateProvider` - HTTP client for a LibreTranslate server
//! - `PhrasebookProvider` - Offline phrase tables for demos and tests
//!
//! Languages are exchanged as ISO 639-1 codes (`en`, `es`, `ru`); mapping
//! from regional tags is the caller's job.
//!
//! # Example
//!
//! ```ignore
//! use ai_translation::{LibreTranslateProvider, TranslationConfig, Translator};
//!
//! let provider = LibreTranslateProvider::new(TranslationConfig::default())?;
//! let result = provider.translate("Hello", None, "es").await?;
//! println!("{}", result.text);
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{TranslationConfig, TranslationProvider};
pub use error::TranslationError;
pub use ports::Translator;
pub use providers::{LibreTranslateProvider, PhrasebookProvider};
pub use types::{DetectedLanguage, TranslatedText};
