//! Command classification and reply dispatch.

use tracing::{info, instrument};

use crate::{
    base::types::{Command, Reply, Res},
    service::chat::ChatClient,
};

/// The only command keyword the bot understands.
pub const EXAMPLE_COMMAND: &str = "do";

/// Reply sent when the command starts with [`EXAMPLE_COMMAND`].
pub const AFFIRMATIVE_RESPONSE: &str = "Sure...write some more code then I can do that!";

/// The canned reply for a command the bot does not recognize.
pub fn default_response() -> String {
    format!("Not sure what you mean. Try *{EXAMPLE_COMMAND}*.")
}

/// Picks the canned response for the given command text.
pub fn select_response(command: &str) -> String {
    if command.starts_with(EXAMPLE_COMMAND) {
        AFFIRMATIVE_RESPONSE.to_string()
    } else {
        default_response()
    }
}

/// Executes a bot command by sending exactly one reply to its channel.
///
/// Send failures are returned to the caller as-is.
#[instrument(skip_all, fields(channel = %command.channel))]
pub async fn handle_command(command: &Command, chat: &ChatClient) -> Res<Reply> {
    let reply = Reply {
        channel: command.channel.clone(),
        text: select_response(&command.text),
    };

    info!("Replying to command ...");
    chat.send_message(&reply.channel, &reply.text).await?;

    Ok(reply)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn do_commands_get_affirmative_response() {
        assert_eq!(select_response("do the thing"), AFFIRMATIVE_RESPONSE);
        assert_eq!(select_response("do"), AFFIRMATIVE_RESPONSE);
        assert_eq!(select_response("done yet?"), AFFIRMATIVE_RESPONSE);
    }

    #[test]
    fn other_commands_get_default_response() {
        assert_eq!(select_response("fly"), "Not sure what you mean. Try *do*.");
        assert_eq!(select_response(""), default_response());
        assert_eq!(select_response("Do it"), default_response());
        assert_eq!(select_response("please do"), default_response());
    }

    #[test]
    fn default_response_names_the_keyword() {
        assert!(default_response().contains(EXAMPLE_COMMAND));
    }
}
