//! Infrastructure adapters
//!
//! Adapters connect application ports to the capability provider crates.

mod speech_adapter;
mod translation_adapter;

pub use speech_adapter::SpeechAdapter;
pub use translation_adapter::TranslationAdapter;
