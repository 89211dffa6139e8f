//! Direct mention parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::base::types::ParsedMention;

/// A leading `<@ID>` token followed by anything on the same line.
///
/// The identifier is either empty or starts with `U` (user) or `W`
/// (enterprise user), and ends at the first `>`.
const MENTION_PATTERN: &str = r"^<@(|[WU][^>]*)>(.*)";

static MENTION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(MENTION_PATTERN).expect("mention pattern is a valid regex"));

/// Finds a direct mention (a mention at the very start of the text).
///
/// Returns the mentioned identifier and the trimmed remaining text, or an
/// empty [`ParsedMention`] when the text does not open with a mention.
pub fn parse_direct_mention(message_text: &str) -> ParsedMention {
    match MENTION_REGEX.captures(message_text) {
        Some(caps) => ParsedMention {
            user_id: caps.get(1).map(|m| m.as_str().to_string()),
            text: caps.get(2).map(|m| m.as_str().trim().to_string()),
        },
        None => ParsedMention::default(),
    }
}
