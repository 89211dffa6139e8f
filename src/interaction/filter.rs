//! Picks the bot command (if any) out of one batch of events.

use tracing::{debug, instrument, warn};

use crate::base::types::{Command, Event};

use super::mention::parse_direct_mention;

/// Scans a batch of events for a command addressed to `bot_user_id`.
///
/// Only plain `message` events (no `subtype`) are considered. The first
/// message that opens with a mention of the bot wins; any later commands in
/// the same batch are not looked at.
#[instrument(skip_all, fields(events = events.len()))]
pub fn parse_bot_command(events: &[Event], bot_user_id: &str) -> Option<Command> {
    let messages = events.iter().filter(|e| e.kind == "message" && e.subtype.is_none());

    for (index, message) in messages.enumerate() {
        let Some(text) = message.text.as_deref() else {
            warn!("Skipping message event without text.");
            continue;
        };

        let mention = parse_direct_mention(text);
        debug!("Parsed mention of {:?} from message #{}", mention.user_id, index);

        if mention.user_id.as_deref() != Some(bot_user_id) {
            continue;
        }

        let Some(channel) = message.channel.clone() else {
            warn!("Skipping bot mention without a channel.");
            continue;
        };

        return Some(Command {
            text: mention.text.unwrap_or_default(),
            channel,
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: &str = "U123";

    #[test]
    fn finds_command_addressed_to_bot() {
        let events = vec![Event::message("C1", "<@U123> do the thing")];

        let command = parse_bot_command(&events, BOT).unwrap();

        assert_eq!(command.text, "do the thing");
        assert_eq!(command.channel, "C1");
    }

    #[test]
    fn ignores_mentions_of_other_users() {
        let events = vec![Event::message("C1", "<@U999> do the thing")];

        assert_eq!(parse_bot_command(&events, BOT), None);
    }

    #[test]
    fn ignores_messages_without_leading_mention() {
        let events = vec![Event::message("C1", "please <@U123> do the thing"), Event::message("C1", "do the thing")];

        assert_eq!(parse_bot_command(&events, BOT), None);
    }

    #[test]
    fn excludes_subtyped_messages() {
        let events = vec![
            Event::message("C1", "<@U123> do the thing").with_subtype("message_changed"),
            Event::message("C1", "<@U123> do the thing").with_subtype("bot_message"),
        ];

        assert_eq!(parse_bot_command(&events, BOT), None);
    }

    #[test]
    fn excludes_non_message_events() {
        let events = vec![Event {
            kind: "app_mention".to_string(),
            ..Event::message("C1", "<@U123> do the thing")
        }];

        assert_eq!(parse_bot_command(&events, BOT), None);
    }

    #[test]
    fn only_first_command_in_batch_is_returned() {
        let events = vec![
            Event::message("C1", "hello"),
            Event::message("C2", "<@U123> fly"),
            Event::message("C3", "<@U123> do it"),
        ];

        let command = parse_bot_command(&events, BOT).unwrap();

        assert_eq!(command.text, "fly");
        assert_eq!(command.channel, "C2");
    }

    #[test]
    fn skips_events_missing_fields() {
        let events = vec![
            Event { text: None, ..Event::message("C1", "") },
            Event { channel: None, ..Event::message("", "<@U123> do it") },
            Event::message("C3", "<@U123> do that"),
        ];

        let command = parse_bot_command(&events, BOT).unwrap();

        assert_eq!(command.channel, "C3");
    }

    #[test]
    fn decodes_slack_wire_events() {
        let events: Vec<Event> = serde_json::from_value(serde_json::json!([
            { "type": "message", "subtype": "message_changed", "channel": "C1", "text": "<@U123> do it" },
            { "type": "message", "channel": "C2", "user": "U555", "ts": "1.2", "text": "<@U123> do it" },
        ]))
        .unwrap();

        let command = parse_bot_command(&events, BOT).unwrap();

        assert_eq!(command.channel, "C2");
    }

    #[test]
    fn empty_batch_yields_nothing() {
        assert_eq!(parse_bot_command(&[], BOT), None);
    }
}
