//! Interpretation commands - the closed set of things a chat message can ask for

use serde::{Deserialize, Serialize};

/// All commands an inbound message can be classified into
///
/// Classification is total: every input maps to exactly one variant, with
/// [`InterpretationCommand::PlainTranslate`] as the fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InterpretationCommand {
    /// Show the list of available commands
    Help,

    /// List the supported languages
    ListLanguages,

    /// Report interpreter status and the caller's language
    Status,

    /// Translate the given text into the session language
    Translate {
        /// Text to translate (empty if the user supplied none)
        text: String,
    },

    /// Translate the given text and synthesize speech for the result
    Speak {
        /// Text to speak (empty if the user supplied none)
        text: String,
    },

    /// Change the session language
    SetLanguage {
        /// Requested language code, `None` if missing
        code: Option<String>,
    },

    /// Message without a recognized command prefix
    PlainTranslate {
        /// The whole trimmed message
        text: String,
    },
}

impl InterpretationCommand {
    /// Short, stable name for logs and metrics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::ListLanguages => "list_languages",
            Self::Status => "status",
            Self::Translate { .. } => "translate",
            Self::Speak { .. } => "speak",
            Self::SetLanguage { .. } => "set_language",
            Self::PlainTranslate { .. } => "plain_translate",
        }
    }

    /// Get a human-readable description of the command
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Help => "Show help".to_string(),
            Self::ListLanguages => "List supported languages".to_string(),
            Self::Status => "Show interpreter status".to_string(),
            Self::Translate { text } | Self::PlainTranslate { text } => {
                format!("Translate: {}", truncate(text, 50))
            },
            Self::Speak { text } => format!("Speak: {}", truncate(text, 50)),
            Self::SetLanguage { code: Some(code) } => format!("Set language to {code}"),
            Self::SetLanguage { code: None } => "Set language (no code given)".to_string(),
        }
    }

    /// Whether handling this command calls an external capability
    #[must_use]
    pub const fn uses_gateway(&self) -> bool {
        matches!(
            self,
            Self::Translate { .. } | Self::Speak { .. } | Self::PlainTranslate { .. }
        )
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
