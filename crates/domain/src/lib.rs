//! Domain layer for the interpreter
//!
//! Contains the language catalog, the command set, session and result entities,
//! value objects, and domain errors. This layer performs no I/O.

pub mod catalog;
pub mod commands;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use catalog::{LanguageCatalog, SupportedLanguage};
pub use commands::InterpretationCommand;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
