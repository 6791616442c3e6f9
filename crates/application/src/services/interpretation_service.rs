//! Interpretation service - the single entry point for inbound chat events
//!
//! Routes raw text to a command, resolves the conversation session, runs the
//! command against the gateways and always answers with exactly one
//! [`InterpretationResult`]. No lock on session state is held while a
//! gateway call is in flight.

use std::{
    fmt,
    sync::Arc,
    time::{Duration, Instant},
};

use chrono::Utc;
use domain::{
    ConversationId, ConversationSession, ErrorKind, InterpretationCommand, InterpretationResult,
    LanguageCatalog, TranslationRecord,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::{
    reply_formatter,
    speech_gateway::SpeechGateway,
    translation_gateway::{TranslatedText, TranslationGateway},
};
use crate::{
    command_router::CommandRouter,
    error::{ApplicationError, Capability, GatewayFailure},
    ports::SessionStorePort,
};

/// Liveness snapshot for the status probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Always true while the process answers
    pub alive: bool,
    /// Number of live sessions
    pub sessions: usize,
    /// Time since the service was created
    pub uptime: Duration,
}

/// Capability availability snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadinessReport {
    /// Translation capability reachable
    pub translation_available: bool,
    /// Speech capability reachable
    pub speech_available: bool,
}

impl ReadinessReport {
    /// Whether every capability is available
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.translation_available && self.speech_available
    }
}

/// Orchestrates routing, session state and gateway calls
pub struct InterpretationService {
    router: CommandRouter,
    catalog: Arc<LanguageCatalog>,
    sessions: Arc<dyn SessionStorePort>,
    translation: Arc<TranslationGateway>,
    speech: Arc<SpeechGateway>,
    started_at: Instant,
}

impl fmt::Debug for InterpretationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpretationService")
            .field("router", &self.router)
            .field("languages", &self.catalog.len())
            .field("translation", &self.translation)
            .field("speech", &self.speech)
            .finish_non_exhaustive()
    }
}

impl InterpretationService {
    /// Create the service
    pub fn new(
        catalog: Arc<LanguageCatalog>,
        sessions: Arc<dyn SessionStorePort>,
        translation: Arc<TranslationGateway>,
        speech: Arc<SpeechGateway>,
    ) -> Self {
        Self {
            router: CommandRouter::new(),
            catalog,
            sessions,
            translation,
            speech,
            started_at: Instant::now(),
        }
    }

    /// Language catalog in use
    pub fn catalog(&self) -> &LanguageCatalog {
        &self.catalog
    }

    /// Translation gateway, for direct translation requests
    pub fn translation_gateway(&self) -> &TranslationGateway {
        &self.translation
    }

    /// Speech gateway, for direct synthesis requests
    pub fn speech_gateway(&self) -> &SpeechGateway {
        &self.speech
    }

    /// Handle one inbound event
    #[instrument(skip(self, conversation_id, raw_text), fields(conversation_id = %conversation_id))]
    pub async fn handle(
        &self,
        conversation_id: &ConversationId,
        raw_text: &str,
    ) -> InterpretationResult {
        let started = Instant::now();
        let request = self.router.route(conversation_id.clone(), raw_text);
        debug!(command = request.command.name(), "Routed message");

        let result = match self.sessions.get_or_create(conversation_id).await {
            Ok(session) => self.dispatch(&request.command, &session).await,
            Err(e) => {
                warn!(error = %e, "Failed to resolve session");
                InterpretationResult::error(
                    ErrorKind::InternalError,
                    reply_formatter::internal_error_text(),
                )
            },
        };

        if let Err(e) = self.sessions.touch(conversation_id, Utc::now()).await {
            warn!(error = %e, "Failed to record session activity");
        }

        info!(
            command = request.command.name(),
            result = ?result.kind(),
            error_kind = result.error_kind().map(|k| k.as_str()),
            latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Interpretation handled"
        );

        result
    }

    /// Liveness and session count
    pub async fn status(&self) -> StatusReport {
        StatusReport {
            alive: true,
            sessions: self.sessions.session_count().await,
            uptime: self.started_at.elapsed(),
        }
    }

    /// Probe both capabilities
    pub async fn readiness(&self) -> ReadinessReport {
        let (translation_available, speech_available) =
            tokio::join!(self.translation.is_available(), self.speech.is_available());
        ReadinessReport {
            translation_available,
            speech_available,
        }
    }

    async fn dispatch(
        &self,
        command: &InterpretationCommand,
        session: &ConversationSession,
    ) -> InterpretationResult {
        match command {
            InterpretationCommand::Help => {
                InterpretationResult::text(reply_formatter::help_text(&self.router))
            },
            InterpretationCommand::ListLanguages => InterpretationResult::text(
                reply_formatter::languages_text(&self.catalog, Some(&session.preferred_language)),
            ),
            InterpretationCommand::Status => {
                let sessions = self.sessions.session_count().await;
                InterpretationResult::text(reply_formatter::status_text(
                    &self.catalog,
                    session,
                    sessions,
                    self.started_at.elapsed(),
                ))
            },
            InterpretationCommand::SetLanguage { code } => {
                self.set_language(session, code.as_deref()).await
            },
            InterpretationCommand::Translate { text } | InterpretationCommand::PlainTranslate { text } => {
                if text.trim().is_empty() {
                    return missing_text("/translate <text>");
                }
                match self.translate(session, text).await {
                    Ok(translated) => InterpretationResult::text(translated.text),
                    Err(failure) => self.failure(&failure),
                }
            },
            InterpretationCommand::Speak { text } => {
                if text.trim().is_empty() {
                    return missing_text("/speak <text>");
                }
                self.speak(session, text).await
            },
        }
    }

    async fn set_language(
        &self,
        session: &ConversationSession,
        code: Option<&str>,
    ) -> InterpretationResult {
        let Some(code) = code else {
            return InterpretationResult::error(
                ErrorKind::InvalidCommandArgument,
                reply_formatter::missing_language_code_text(
                    &self.catalog,
                    &session.preferred_language,
                ),
            );
        };

        match self
            .sessions
            .set_preferred_language(&session.conversation_id, code)
            .await
        {
            Ok(updated) => {
                info!(language = %updated.preferred_language, "Session language changed");
                InterpretationResult::text(reply_formatter::language_changed_text(
                    &self.catalog,
                    &updated.preferred_language,
                ))
            },
            Err(e) => self.application_failure(&e, code),
        }
    }

    async fn translate(
        &self,
        session: &ConversationSession,
        text: &str,
    ) -> Result<TranslatedText, GatewayFailure> {
        let translated = self
            .translation
            .translate(
                Some(&session.conversation_id),
                text,
                None,
                session.preferred_language.as_str(),
            )
            .await?;

        let record = TranslationRecord::new(text, &translated.text, translated.target.clone());
        if let Err(e) = self
            .sessions
            .record_translation(&session.conversation_id, record)
            .await
        {
            warn!(error = %e, "Failed to record translation");
        }

        Ok(translated)
    }

    async fn speak(&self, session: &ConversationSession, text: &str) -> InterpretationResult {
        let translated = match self.translate(session, text).await {
            Ok(translated) => translated,
            Err(failure) => return self.failure(&failure),
        };
        if translated.text.trim().is_empty() {
            return self.failure(&GatewayFailure::unavailable(
                Capability::Translation,
                "empty translation",
            ));
        }

        match self
            .speech
            .synthesize(
                Some(&session.conversation_id),
                &translated.text,
                translated.target.as_str(),
            )
            .await
        {
            Ok(audio) => InterpretationResult::audio(audio),
            Err(failure) => self.failure(&failure),
        }
    }

    fn failure(&self, failure: &GatewayFailure) -> InterpretationResult {
        InterpretationResult::error(
            failure.kind(),
            reply_formatter::failure_text(&self.catalog, failure),
        )
    }

    fn application_failure(&self, error: &ApplicationError, input: &str) -> InterpretationResult {
        let kind = error.error_kind();
        let message = match kind {
            ErrorKind::UnsupportedLanguage => {
                reply_formatter::unsupported_language_text(&self.catalog, input)
            },
            ErrorKind::InvalidCommandArgument => {
                format!("{error}. Type /help for available commands.")
            },
            _ => {
                warn!(error = %error, "Session update failed");
                reply_formatter::internal_error_text()
            },
        };
        InterpretationResult::error(kind, message)
    }
}

fn missing_text(usage: &str) -> InterpretationResult {
    InterpretationResult::error(
        ErrorKind::InvalidCommandArgument,
        reply_formatter::missing_text_text(usage),
    )
}
