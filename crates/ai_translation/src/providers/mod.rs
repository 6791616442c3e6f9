//! Translation provider implementations

pub mod libretranslate;
pub mod phrasebook;

pub use libretranslate::LibreTranslateProvider;
pub use phrasebook::PhrasebookProvider;
