//! Session store port - Per-conversation state

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ConversationId, ConversationSession, TranslationRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for conversation session storage
///
/// Implementations serialize mutations per conversation id and must not
/// make callers for different ids wait on each other. Returned sessions are
/// snapshots; callers never keep them across calls.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Return the session for `id`, creating it with the default language
    /// on first access
    async fn get_or_create(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationSession, ApplicationError>;

    /// Return the session for `id` without creating it
    async fn get(&self, id: &ConversationId)
    -> Result<Option<ConversationSession>, ApplicationError>;

    /// Change the preferred language
    ///
    /// Fails with `DomainError::UnsupportedLanguage` (wrapped) if `code`
    /// does not resolve through the catalog; the session is unchanged then.
    async fn set_preferred_language(
        &self,
        id: &ConversationId,
        code: &str,
    ) -> Result<ConversationSession, ApplicationError>;

    /// Record activity on the session
    async fn touch(&self, id: &ConversationId, at: DateTime<Utc>) -> Result<(), ApplicationError>;

    /// Append a translation to the session history
    async fn record_translation(
        &self,
        id: &ConversationId,
        record: TranslationRecord,
    ) -> Result<(), ApplicationError>;

    /// Number of live sessions
    async fn session_count(&self) -> usize;

    /// Remove sessions idle since before `cutoff`, returning how many were removed
    async fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, ApplicationError>;
}
