//! Reply text formatting
//!
//! Pure functions that turn command outcomes into the user-facing text of a
//! reply. Every failure message says what went wrong and what to do next.

use std::time::Duration;

use domain::{ConversationSession, LanguageCatalog, LanguageCode};

use crate::command_router::CommandRouter;
use crate::error::{Capability, GatewayFailure};

/// Help listing every command
#[must_use]
pub fn help_text(router: &CommandRouter) -> String {
    let mut parts = vec!["Available commands:".to_string()];
    for (usage, summary) in router.usage() {
        parts.push(format!("{usage} - {summary}"));
    }
    parts.push(String::new());
    parts.push("Any other message is translated into your language.".to_string());
    parts.join("\n")
}

/// Language listing, marking the caller's current language
#[must_use]
pub fn languages_text(catalog: &LanguageCatalog, current: Option<&LanguageCode>) -> String {
    let mut parts = vec!["Supported languages:".to_string()];
    for lang in catalog.list_supported() {
        let marker = if Some(&lang.code) == current {
            " (current)"
        } else {
            ""
        };
        parts.push(format!("{} - {}{marker}", lang.code, lang.name));
    }
    parts.push(String::new());
    parts.push("Use /language <code> to change your language.".to_string());
    parts.join("\n")
}

/// Confirmation after a successful language change
#[must_use]
pub fn language_changed_text(catalog: &LanguageCatalog, code: &LanguageCode) -> String {
    format!(
        "Your language has been set to: {}",
        language_label(catalog, code)
    )
}

/// Reply for `/language` without a code
#[must_use]
pub fn missing_language_code_text(catalog: &LanguageCatalog, current: &LanguageCode) -> String {
    format!(
        "Your current language is set to: {}\nTo change it, use: /language <code>\nSupported codes: {}",
        language_label(catalog, current),
        catalog.codes_list()
    )
}

/// Reply for a command that needs text but got none
#[must_use]
pub fn missing_text_text(usage: &str) -> String {
    format!("This command needs some text. Usage: {usage}")
}

/// Reply for an unknown language code
#[must_use]
pub fn unsupported_language_text(catalog: &LanguageCatalog, code: &str) -> String {
    format!(
        "Unsupported language code: {code}\nSupported codes: {}",
        catalog.codes_list()
    )
}

/// User-facing explanation of a gateway failure
#[must_use]
pub fn failure_text(catalog: &LanguageCatalog, failure: &GatewayFailure) -> String {
    match failure {
        GatewayFailure::UnsupportedLanguage { code } => unsupported_language_text(catalog, code),
        GatewayFailure::NoVoiceAvailable { language } => format!(
            "Speech is not available for {}. You can still translate text with /translate, \
             or switch to another language with /language <code>.",
            language_label(catalog, language)
        ),
        GatewayFailure::TextTooLong { length, max } => format!(
            "That text is too long to speak ({length} characters). \
             Please keep it under {max} characters."
        ),
        GatewayFailure::Unavailable { capability, .. } => match capability {
            Capability::Translation => {
                "The translation service is temporarily unavailable. Please try again in a moment."
                    .to_string()
            },
            Capability::Speech => {
                "The speech service is temporarily unavailable. Please try again in a moment, \
                 or use /translate for a text reply."
                    .to_string()
            },
        },
        GatewayFailure::InvalidArgument(detail) => {
            format!("{detail}. Type /help for available commands.")
        },
    }
}

/// Reply for unexpected internal failures
#[must_use]
pub fn internal_error_text() -> String {
    "Sorry, something went wrong. Please try again.".to_string()
}

/// Status reply
#[must_use]
pub fn status_text(
    catalog: &LanguageCatalog,
    session: &ConversationSession,
    active_sessions: usize,
    uptime: Duration,
) -> String {
    let mut text = format!(
        "Interpreter status: Active\nActive conversations: {active_sessions}\nUptime: {}\nYour language: {}\nMessages in this conversation: {}",
        format_uptime(uptime),
        language_label(catalog, &session.preferred_language),
        session.interaction_count
    );
    if let Some(last) = session.recent.back() {
        text.push_str(&format!(
            "\nLast translation ({}): \"{}\" → \"{}\"",
            last.language, last.original, last.translated
        ));
    }
    text
}

fn language_label(catalog: &LanguageCatalog, code: &LanguageCode) -> String {
    catalog
        .display_name(code)
        .map_or_else(|| code.to_string(), |name| format!("{name} ({code})"))
}

fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else if minutes > 0 {
        format!("{minutes}m {seconds}s")
    } else {
        format!("{seconds}s")
    }
}
