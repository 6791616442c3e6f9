//! HTTP request handlers

pub mod health;
pub mod languages;
pub mod messages;
pub mod speech;
pub mod translate;
