//! AI Speech - Text-to-Speech providers
//!
//! Provides the `TextToSpeech` trait and its implementations:
//! - `OpenAISpeechProvider` - OpenAI-compatible `/audio/speech` API
//! - `PiperProvider` - Local synthesis through the Piper CLI
//!
//! Each provider produces audio in a single format fixed by configuration,
//! so callers never negotiate encodings per request.
//!
//! # Example
//!
//! ```ignore
//! use ai_speech::{PiperProvider, SpeechConfig, TextToSpeech};
//!
//! let provider = PiperProvider::new(SpeechConfig::default().piper)?;
//! let audio = provider.synthesize("Hello, world!", "en_US-lessac-medium").await?;
//! ```

pub mod config;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::{PiperConfig, SpeechConfig, SpeechProvider};
pub use error::SpeechError;
pub use ports::TextToSpeech;
pub use providers::{OpenAISpeechProvider, PiperProvider};
pub use types::{AudioData, AudioFormat};
