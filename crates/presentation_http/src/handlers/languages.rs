//! Language catalog listing

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// One supported language
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub code: String,
    pub name: String,
}

/// Catalog listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagesResponse {
    /// Default language for new conversations
    pub default: String,
    /// Supported languages in catalog order
    pub languages: Vec<LanguageInfo>,
}

/// List the supported languages
pub async fn list_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    let catalog = state.service.catalog();

    Json(LanguagesResponse {
        default: catalog.default_language().to_string(),
        languages: catalog
            .list_supported()
            .iter()
            .map(|lang| LanguageInfo {
                code: lang.code.to_string(),
                name: lang.name.clone(),
            })
            .collect(),
    })
}
