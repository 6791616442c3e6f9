//! In-memory session store
//!
//! Sessions live in a map keyed by conversation id. Each entry carries its
//! own mutex so updates to one conversation never wait on another; the map
//! lock is only held long enough to find or insert an entry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::{ConversationId, ConversationSession, LanguageCatalog, TranslationRecord};
use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::error::ApplicationError;
use crate::ports::SessionStorePort;

type SessionCell = Arc<Mutex<ConversationSession>>;

/// Process-local session store
pub struct InMemorySessionStore {
    catalog: Arc<LanguageCatalog>,
    history_depth: usize,
    sessions: RwLock<HashMap<ConversationId, SessionCell>>,
}

impl fmt::Debug for InMemorySessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemorySessionStore")
            .field("history_depth", &self.history_depth)
            .field("sessions", &self.sessions.read().len())
            .finish_non_exhaustive()
    }
}

impl InMemorySessionStore {
    /// Default number of translations kept per session
    pub const DEFAULT_HISTORY_DEPTH: usize = 10;

    /// Create an empty store
    #[must_use]
    pub fn new(catalog: Arc<LanguageCatalog>) -> Self {
        Self {
            catalog,
            history_depth: Self::DEFAULT_HISTORY_DEPTH,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Set how many translations each session keeps
    #[must_use]
    pub const fn with_history_depth(mut self, depth: usize) -> Self {
        self.history_depth = depth;
        self
    }

    fn cell(&self, id: &ConversationId) -> SessionCell {
        if let Some(cell) = self.sessions.read().get(id) {
            return Arc::clone(cell);
        }

        let mut sessions = self.sessions.write();
        let cell = sessions.entry(id.clone()).or_insert_with(|| {
            debug!(conversation_id = %id, "Creating session");
            Arc::new(Mutex::new(ConversationSession::new(
                id.clone(),
                self.catalog.default_language().clone(),
            )))
        });
        Arc::clone(cell)
    }

    fn existing(&self, id: &ConversationId) -> Option<SessionCell> {
        self.sessions.read().get(id).map(Arc::clone)
    }
}

#[async_trait]
impl SessionStorePort for InMemorySessionStore {
    async fn get_or_create(
        &self,
        id: &ConversationId,
    ) -> Result<ConversationSession, ApplicationError> {
        Ok(self.cell(id).lock().clone())
    }

    async fn get(
        &self,
        id: &ConversationId,
    ) -> Result<Option<ConversationSession>, ApplicationError> {
        Ok(self.existing(id).map(|cell| cell.lock().clone()))
    }

    async fn set_preferred_language(
        &self,
        id: &ConversationId,
        code: &str,
    ) -> Result<ConversationSession, ApplicationError> {
        let language = self.catalog.require(code)?;
        let cell = self.cell(id);
        let mut session = cell.lock();
        session.set_language(language);
        Ok(session.clone())
    }

    async fn touch(&self, id: &ConversationId, at: DateTime<Utc>) -> Result<(), ApplicationError> {
        self.cell(id).lock().touch(at);
        Ok(())
    }

    async fn record_translation(
        &self,
        id: &ConversationId,
        record: TranslationRecord,
    ) -> Result<(), ApplicationError> {
        self.cell(id)
            .lock()
            .record_translation(record, self.history_depth);
        Ok(())
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().len()
    }

    async fn evict_idle(&self, cutoff: DateTime<Utc>) -> Result<usize, ApplicationError> {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        // A cell referenced outside the map is mid-update and stays.
        sessions.retain(|_, cell| Arc::strong_count(cell) > 1 || !cell.lock().is_idle_since(cutoff));
        Ok(before - sessions.len())
    }
}
