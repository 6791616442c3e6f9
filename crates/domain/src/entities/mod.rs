//! Domain entities

mod interpretation;
mod session;

pub use interpretation::{
    AudioFormat, AudioPayload, ErrorDescription, ErrorKind, InterpretationRequest,
    InterpretationResult, ResultKind,
};
pub use session::{ConversationSession, TranslationRecord};
