//! Interpretation request and result entities

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::commands::InterpretationCommand;
use crate::value_objects::ConversationId;

/// Normalized form of one inbound chat event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpretationRequest {
    /// Conversation the event belongs to
    pub conversation_id: ConversationId,
    /// Raw message text as received
    pub text: String,
    /// Classified command
    pub command: InterpretationCommand,
    /// Whitespace-separated tokens following the command prefix
    pub arguments: Vec<String>,
}

/// Kind of reply returned to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    /// Plain text reply
    TextReply,
    /// Synthesized audio reply
    AudioReply,
    /// Failure with a user-facing explanation
    ErrorReply,
}

/// User-visible failure taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Language code not in the catalog
    UnsupportedLanguage,
    /// Language is supported for translation but has no voice
    NoVoiceAvailable,
    /// Text exceeds the synthesis length cap
    TextTooLong,
    /// Translation or speech capability unreachable or failing
    GatewayUnavailable,
    /// Command is missing a required argument
    InvalidCommandArgument,
    /// Anything not matching a known kind
    InternalError,
}

impl ErrorKind {
    /// Stable snake_case identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedLanguage => "unsupported_language",
            Self::NoVoiceAvailable => "no_voice_available",
            Self::TextTooLong => "text_too_long",
            Self::GatewayUnavailable => "gateway_unavailable",
            Self::InvalidCommandArgument => "invalid_command_argument",
            Self::InternalError => "internal_error",
        }
    }

    /// Whether retrying the same request later may succeed
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::GatewayUnavailable | Self::InternalError)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured error carried by an error reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescription {
    /// Failure classification
    pub kind: ErrorKind,
    /// Actionable, user-facing explanation
    pub message: String,
}

impl ErrorDescription {
    /// Create a new error description
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Audio encodings a speech capability can declare
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// WAV (PCM)
    Wav,
    /// MP3
    Mp3,
    /// Opus
    Opus,
    /// FLAC
    Flac,
}

impl AudioFormat {
    /// MIME type for this format
    #[must_use]
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Opus => "audio/opus",
            Self::Flac => "audio/flac",
        }
    }

    /// File extension for this format
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Opus => "opus",
            Self::Flac => "flac",
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Synthesized audio bytes with their declared format
#[derive(Clone, PartialEq, Eq)]
pub struct AudioPayload {
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// Encoding of `data`
    pub format: AudioFormat,
}

impl AudioPayload {
    /// Create a new audio payload
    #[must_use]
    pub const fn new(data: Vec<u8>, format: AudioFormat) -> Self {
        Self { data, format }
    }

    /// Size in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the payload has no bytes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Debug for AudioPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AudioPayload")
            .field("bytes", &self.data.len())
            .field("format", &self.format)
            .finish()
    }
}

/// Outcome of handling one inbound event
///
/// Exactly one payload is populated, matching `kind`. The fields are private
/// so the only way to build a result is through the per-kind constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretationResult {
    kind: ResultKind,
    text: Option<String>,
    audio: Option<AudioPayload>,
    error: Option<ErrorDescription>,
}

impl InterpretationResult {
    /// Text reply
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::TextReply,
            text: Some(text.into()),
            audio: None,
            error: None,
        }
    }

    /// Audio reply
    #[must_use]
    pub const fn audio(audio: AudioPayload) -> Self {
        Self {
            kind: ResultKind::AudioReply,
            text: None,
            audio: Some(audio),
            error: None,
        }
    }

    /// Error reply
    #[must_use]
    pub fn error(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind: ResultKind::ErrorReply,
            text: None,
            audio: None,
            error: Some(ErrorDescription::new(kind, message)),
        }
    }

    /// Reply kind
    #[must_use]
    pub const fn kind(&self) -> ResultKind {
        self.kind
    }

    /// Text payload (text replies only)
    #[must_use]
    pub fn text_payload(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Audio payload (audio replies only)
    #[must_use]
    pub const fn audio_payload(&self) -> Option<&AudioPayload> {
        self.audio.as_ref()
    }

    /// Error payload (error replies only)
    #[must_use]
    pub const fn error_payload(&self) -> Option<&ErrorDescription> {
        self.error.as_ref()
    }

    /// Error kind, if this is an error reply
    #[must_use]
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }

    /// Whether this is an error reply
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, ResultKind::ErrorReply)
    }

    /// Decompose into owned payloads
    #[must_use]
    pub fn into_parts(
        self,
    ) -> (
        ResultKind,
        Option<String>,
        Option<AudioPayload>,
        Option<ErrorDescription>,
    ) {
        (self.kind, self.text, self.audio, self.error)
    }
}
