//! Conversation session entity

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ConversationId, LanguageCode};

/// A translation performed within a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationRecord {
    /// Text as sent by the user
    pub original: String,
    /// Text returned by the translation capability
    pub translated: String,
    /// Target language of the translation
    pub language: LanguageCode,
    /// When the translation completed
    pub at: DateTime<Utc>,
}

impl TranslationRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn new(
        original: impl Into<String>,
        translated: impl Into<String>,
        language: LanguageCode,
    ) -> Self {
        Self {
            original: original.into(),
            translated: translated.into(),
            language,
            at: Utc::now(),
        }
    }
}

/// Per-conversation state
///
/// Created lazily on the first event of a conversation and owned by the
/// session store. `last_activity` is bookkeeping for idle expiry only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Transport-supplied conversation key
    pub conversation_id: ConversationId,
    /// Target language for translations in this conversation
    pub preferred_language: LanguageCode,
    /// When the session was created
    pub created_at: DateTime<Utc>,
    /// Last processed event (successful or not)
    pub last_activity: DateTime<Utc>,
    /// Number of processed events
    pub interaction_count: u64,
    /// Most recent translations, oldest first
    pub recent: VecDeque<TranslationRecord>,
}

impl ConversationSession {
    /// Create a fresh session with the given language
    #[must_use]
    pub fn new(conversation_id: ConversationId, preferred_language: LanguageCode) -> Self {
        let now = Utc::now();
        Self {
            conversation_id,
            preferred_language,
            created_at: now,
            last_activity: now,
            interaction_count: 0,
            recent: VecDeque::new(),
        }
    }

    /// Record activity at `at`
    pub fn touch(&mut self, at: DateTime<Utc>) {
        self.last_activity = at;
        self.interaction_count = self.interaction_count.saturating_add(1);
    }

    /// Change the preferred language
    pub fn set_language(&mut self, language: LanguageCode) {
        self.preferred_language = language;
    }

    /// Append a translation, keeping at most `depth` entries
    pub fn record_translation(&mut self, record: TranslationRecord, depth: usize) {
        if depth == 0 {
            return;
        }
        while self.recent.len() >= depth {
            self.recent.pop_front();
        }
        self.recent.push_back(record);
    }

    /// Whether the session has been idle since before `cutoff`
    #[must_use]
    pub fn is_idle_since(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_activity < cutoff
    }
}
