use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// A raw event as delivered by the realtime feed.
///
/// Only the fields the bot looks at are decoded; everything else Slack sends
/// is ignored. `subtype` is present on edits, joins, bot echoes and other
/// system messages.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

impl Event {
    /// Convenience constructor for a plain `message` event.
    pub fn message(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            kind: "message".to_string(),
            subtype: None,
            text: Some(text.into()),
            channel: Some(channel.into()),
        }
    }

    pub fn with_subtype(mut self, subtype: impl Into<String>) -> Self {
        self.subtype = Some(subtype.into());
        self
    }
}

/// The result of looking for a leading `<@ID>` mention in a message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedMention {
    /// The mentioned user or workspace identifier.
    pub user_id: Option<String>,
    /// The trimmed text following the mention.
    pub text: Option<String>,
}

/// A command addressed to the bot, extracted from one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub text: String,
    pub channel: String,
}

/// A message the bot posts back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub channel: String,
    pub text: String,
}
