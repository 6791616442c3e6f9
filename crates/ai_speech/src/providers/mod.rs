//! Speech synthesis provider implementations

pub mod openai;
pub mod piper;

pub use openai::OpenAISpeechProvider;
pub use piper::PiperProvider;
