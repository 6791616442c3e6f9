//! Phrasebook Provider
//!
//! Offline translator backed by small phrase tables. Known phrases are
//! replaced case-insensitively; text with no known phrase comes back tagged
//! with the target language, e.g. `[es] Good night`. Useful for demos and
//! for running the interpreter without a translation server.

use async_trait::async_trait;
use tracing::debug;

use crate::error::TranslationError;
use crate::ports::Translator;
use crate::types::TranslatedText;

/// A phrase table for one language pair
struct PhraseTable {
    source: &'static str,
    target: &'static str,
    phrases: &'static [(&'static str, &'static str)],
}

const TABLES: &[PhraseTable] = &[
    PhraseTable {
        source: "en",
        target: "es",
        phrases: &[
            ("What is your name", "Cómo te llamas"),
            ("Good morning", "Buenos días"),
            ("How are you", "Cómo estás"),
            ("Thank you", "Gracias"),
            ("My name is", "Me llamo"),
            ("Goodbye", "Adiós"),
            ("Welcome", "Bienvenido"),
            ("Hello", "Hola"),
            ("world", "mundo"),
        ],
    },
    PhraseTable {
        source: "es",
        target: "en",
        phrases: &[
            ("Cómo te llamas", "What is your name"),
            ("Buenos días", "Good morning"),
            ("Cómo estás", "How are you"),
            ("Bienvenido", "Welcome"),
            ("Me llamo", "My name is"),
            ("Gracias", "Thank you"),
            ("Adiós", "Goodbye"),
            ("Hola", "Hello"),
            ("mundo", "world"),
        ],
    },
    PhraseTable {
        source: "ru",
        target: "en",
        phrases: &[
            ("До свидания", "Goodbye"),
            ("Доброе утро", "Good morning"),
            ("Как дела", "How are you"),
            ("Спасибо", "Thank you"),
            ("Привет", "Hello"),
            ("мир", "world"),
        ],
    },
];

/// Offline phrase-table translator
#[derive(Debug, Clone, Copy, Default)]
pub struct PhrasebookProvider;

impl PhrasebookProvider {
    /// Create the provider
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Guess the source language from phrase membership, falling back to English
    fn detect(text: &str) -> &'static str {
        TABLES
            .iter()
            .find(|table| {
                table
                    .phrases
                    .iter()
                    .any(|(phrase, _)| find_ignore_case(text, phrase).is_some())
            })
            .map_or("en", |table| table.source)
    }

    fn lookup(text: &str, source: &str, target: &str) -> Option<String> {
        let table = TABLES
            .iter()
            .find(|t| t.source == source && t.target == target)?;

        let mut result = text.to_string();
        let mut matched = false;
        for (phrase, translation) in table.phrases {
            if let Some(replaced) = replace_ignore_case(&result, phrase, translation) {
                result = replaced;
                matched = true;
            }
        }

        matched.then_some(result)
    }
}

#[async_trait]
impl Translator for PhrasebookProvider {
    async fn translate(
        &self,
        text: &str,
        source: Option<&str>,
        target: &str,
    ) -> Result<TranslatedText, TranslationError> {
        let detected = source.is_none();
        let source = source.unwrap_or_else(|| Self::detect(text));

        let translated = if source == target {
            text.to_string()
        } else {
            Self::lookup(text, source, target).unwrap_or_else(|| format!("[{target}] {text}"))
        };

        debug!(source, target, detected, "Phrasebook translation");

        let result = TranslatedText::new(translated);
        Ok(if detected {
            result.with_detected(source, None)
        } else {
            result
        })
    }

    async fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "phrasebook"
    }
}

/// Byte range of the first case-insensitive occurrence of `needle`
fn find_ignore_case(haystack: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }

    for (start, _) in haystack.char_indices() {
        let mut rest = haystack[start..].chars();
        let mut end = start;
        let mut all_matched = true;
        for expected in needle.chars() {
            match rest.next() {
                Some(actual) if chars_eq_ignore_case(actual, expected) => {
                    end += actual.len_utf8();
                },
                _ => {
                    all_matched = false;
                    break;
                },
            }
        }
        if all_matched {
            return Some((start, end));
        }
    }

    None
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Replace every case-insensitive occurrence, or `None` if there was none
fn replace_ignore_case(text: &str, phrase: &str, replacement: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut replaced = false;

    while let Some((start, end)) = find_ignore_case(rest, phrase) {
        out.push_str(&rest[..start]);
        out.push_str(replacement);
        rest = &rest[end..];
        replaced = true;
    }

    replaced.then(|| {
        out.push_str(rest);
        out
    })
}
