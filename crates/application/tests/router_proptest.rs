//! Property-based tests for command routing
//!
//! Routing must be total and deterministic for any input string.

use application::CommandRouter;
use domain::InterpretationCommand;
use proptest::prelude::*;

proptest! {
    #[test]
    fn classify_is_deterministic(input in "\\PC{0,64}") {
        let router = CommandRouter::new();
        prop_assert_eq!(router.classify(&input), router.classify(&input));
    }

    #[test]
    fn blank_input_is_help(input in "[ \\t\\r\\n]{0,16}") {
        let router = CommandRouter::new();
        prop_assert_eq!(router.classify(&input), InterpretationCommand::Help);
    }

    #[test]
    fn text_without_slash_is_plain_translate(input in "[a-zA-Z][a-zA-Z ,.!?]{0,40}") {
        let router = CommandRouter::new();
        let expected = InterpretationCommand::PlainTranslate {
            text: input.trim().to_string(),
        };
        prop_assert_eq!(router.classify(&input), expected);
    }

    #[test]
    fn surrounding_whitespace_is_ignored(input in "\\PC{0,40}", pad in "[ \\t]{0,4}") {
        let router = CommandRouter::new();
        let padded = format!("{pad}{input}{pad}");
        prop_assert_eq!(router.classify(&padded), router.classify(&input));
    }

    #[test]
    fn translate_prefix_is_case_insensitive(text in "[a-z]{1,20}", upper in any::<bool>()) {
        let router = CommandRouter::new();
        let prefix = if upper { "/TRANSLATE" } else { "/translate" };
        let command = router.classify(&format!("{prefix} {text}"));
        prop_assert_eq!(command, InterpretationCommand::Translate { text });
    }
}
