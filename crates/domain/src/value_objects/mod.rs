//! Value Objects - Immutable, identity-less domain primitives

mod conversation_id;
mod language_code;

pub use conversation_id::ConversationId;
pub use language_code::LanguageCode;
