//! Language code value object (BCP-47 style tag)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A normalized language tag such as `en-US` or `es`
///
/// Only the primary language subtag and an optional region subtag are
/// accepted. The primary subtag is stored lowercase, the region uppercase,
/// and `_` separators are normalized to `-`.
///
/// Well-formedness says nothing about support; membership is decided by
/// [`crate::LanguageCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Parse and normalize a language tag
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLanguageCode` if the tag is not of the form
    /// `ll`, `lll`, `ll-RR` or `ll-999`.
    pub fn parse(tag: &str) -> Result<Self, DomainError> {
        let tag = tag.trim();
        let invalid = || DomainError::InvalidLanguageCode(tag.to_string());

        let mut parts = tag.split(['-', '_']);
        let primary = parts.next().ok_or_else(invalid)?;
        let region = parts.next();
        if parts.next().is_some() {
            return Err(invalid());
        }

        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid());
        }

        let mut normalized = primary.to_ascii_lowercase();

        if let Some(region) = region {
            let alpha = region.len() == 2 && region.chars().all(|c| c.is_ascii_alphabetic());
            let numeric = region.len() == 3 && region.chars().all(|c| c.is_ascii_digit());
            if !(alpha || numeric) {
                return Err(invalid());
            }
            normalized.push('-');
            normalized.push_str(&region.to_ascii_uppercase());
        }

        Ok(Self(normalized))
    }

    /// Build a tag from a literal already in normalized form
    pub(crate) fn from_normalized(tag: &str) -> Self {
        Self(tag.to_string())
    }

    /// Get the full tag
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the primary language subtag (ISO 639 code), e.g. `es` for `es-CO`
    #[must_use]
    pub fn primary_subtag(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Get the region subtag if present
    #[must_use]
    pub fn region(&self) -> Option<&str> {
        self.0.split_once('-').map(|(_, region)| region)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for LanguageCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LanguageCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageCode> for String {
    fn from(code: LanguageCode) -> Self {
        code.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case() {
        let code = LanguageCode::parse("ES-co").unwrap();
        assert_eq!(code.as_str(), "es-CO");
    }

    #[test]
    fn normalizes_underscore_separator() {
        let code = LanguageCode::parse("en_us").unwrap();
        assert_eq!(code.as_str(), "en-US");
    }

    #[test]
    fn accepts_bare_primary() {
        let code = LanguageCode::parse("ru").unwrap();
        assert_eq!(code.as_str(), "ru");
        assert_eq!(code.region(), None);
    }

    #[test]
    fn accepts_numeric_region() {
        let code = LanguageCode::parse("es-419").unwrap();
        assert_eq!(code.region(), Some("419"));
    }

    #[test]
    fn primary_subtag_and_region() {
        let code = LanguageCode::parse("ru-RU").unwrap();
        assert_eq!(code.primary_subtag(), "ru");
        assert_eq!(code.region(), Some("RU"));
    }

    #[test]
    fn rejects_malformed() {
        for tag in ["", "e", "engl", "en-", "en-U", "en-USA", "en-US-x", "e1", "xx yy"] {
            assert!(LanguageCode::parse(tag).is_err(), "{tag} should be rejected");
        }
    }

    #[test]
    fn from_str_parses() {
        let code: LanguageCode = "en-US".parse().unwrap();
        assert_eq!(code.to_string(), "en-US");
    }

    #[test]
    fn serde_roundtrip_normalizes() {
        let code: LanguageCode = serde_json::from_str("\"en_gb\"").unwrap();
        assert_eq!(code.as_str(), "en-GB");
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"en-GB\"");
    }
}
