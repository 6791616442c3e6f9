//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod session_store;
mod speech_port;
mod translation_port;

#[cfg(test)]
pub use session_store::MockSessionStorePort;
pub use session_store::SessionStorePort;
#[cfg(test)]
pub use speech_port::MockSpeechPort;
pub use speech_port::{SpeechPort, SynthesizedAudio};
#[cfg(test)]
pub use translation_port::MockTranslationPort;
pub use translation_port::{Translation, TranslationPort};
