//! Prefix table for the command router.

use domain::InterpretationCommand;

use super::{CommandPrefix, CommandRouter};

impl CommandRouter {
    /// Build the list of recognized prefixes
    pub(super) fn build_prefixes() -> Vec<CommandPrefix> {
        vec![
            CommandPrefix {
                tokens: &["/help", "/?"],
                usage: "/help",
                summary: "Show this help message",
                builder: |_| InterpretationCommand::Help,
            },
            CommandPrefix {
                tokens: &["/languages", "/langs"],
                usage: "/languages",
                summary: "List supported languages",
                builder: |_| InterpretationCommand::ListLanguages,
            },
            CommandPrefix {
                tokens: &["/language", "/lang"],
                usage: "/language <code>",
                summary: "Set the language messages are translated into",
                builder: |rest| InterpretationCommand::SetLanguage {
                    code: rest.split_whitespace().next().map(String::from),
                },
            },
            CommandPrefix {
                tokens: &["/translate", "/t"],
                usage: "/translate <text>",
                summary: "Translate text into your language",
                builder: |rest| InterpretationCommand::Translate {
                    text: rest.to_string(),
                },
            },
            CommandPrefix {
                tokens: &["/speak", "/say"],
                usage: "/speak <text>",
                summary: "Translate text and reply with audio",
                builder: |rest| InterpretationCommand::Speak {
                    text: rest.to_string(),
                },
            },
            CommandPrefix {
                tokens: &["/status"],
                usage: "/status",
                summary: "Show interpreter status",
                builder: |_| InterpretationCommand::Status,
            },
        ]
    }
}
