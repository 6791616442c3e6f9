//! Command router - Classify raw chat text into an interpretation command
//!
//! Routing is pure and total: the input is trimmed, the first
//! whitespace-delimited token is compared case-insensitively against the
//! known prefixes, and anything that does not match is a plain translation.
//! Empty input is a request for help.
//!
//! - [`prefixes`]: the prefix table and per-command argument builders

mod prefixes;

use std::fmt;

use domain::{ConversationId, InterpretationCommand, InterpretationRequest};
use tracing::debug;

/// One recognized command prefix
pub(crate) struct CommandPrefix {
    /// Tokens that select this command, first one is canonical
    pub tokens: &'static [&'static str],
    /// Usage line shown in help
    pub usage: &'static str,
    /// One-line description shown in help
    pub summary: &'static str,
    /// Build the command from the (trimmed) remainder
    pub builder: fn(&str) -> InterpretationCommand,
}

/// Deterministic classifier for inbound message text
pub struct CommandRouter {
    prefixes: Vec<CommandPrefix>,
}

impl fmt::Debug for CommandRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRouter")
            .field("prefixes", &self.prefixes.len())
            .finish()
    }
}

impl Default for CommandRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRouter {
    /// Create a router with the standard prefix table
    pub fn new() -> Self {
        Self {
            prefixes: Self::build_prefixes(),
        }
    }

    /// Classify raw text into a command
    pub fn classify(&self, raw: &str) -> InterpretationCommand {
        self.resolve(raw).0
    }

    /// Classify raw text and build the normalized request
    pub fn route(&self, conversation_id: ConversationId, raw: &str) -> InterpretationRequest {
        let (command, arguments) = self.resolve(raw);

        InterpretationRequest {
            conversation_id,
            text: raw.to_string(),
            command,
            arguments,
        }
    }

    /// Single prefix match yielding the command and its argument tokens
    fn resolve(&self, raw: &str) -> (InterpretationCommand, Vec<String>) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return (InterpretationCommand::Help, Vec::new());
        }

        let (head, rest) = split_head(trimmed);

        match self.find(head) {
            Some(prefix) => {
                let command = (prefix.builder)(rest);
                debug!(prefix = prefix.tokens[0], command = command.name(), "Matched command prefix");
                (command, rest.split_whitespace().map(String::from).collect())
            },
            None => (
                InterpretationCommand::PlainTranslate {
                    text: trimmed.to_string(),
                },
                Vec::new(),
            ),
        }
    }

    /// Usage lines for help output, in table order
    pub fn usage(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.prefixes.iter().map(|p| (p.usage, p.summary))
    }

    fn find(&self, head: &str) -> Option<&CommandPrefix> {
        self.prefixes
            .iter()
            .find(|p| p.tokens.iter().any(|t| t.eq_ignore_ascii_case(head)))
    }
}

/// Split trimmed input into the first token and the trimmed remainder
fn split_head(trimmed: &str) -> (&str, &str) {
    match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim_start()),
        None => (trimmed, ""),
    }
}
