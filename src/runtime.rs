//! Runtime services and the polling loop for the starter-bot.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

use crate::{
    base::{
        config::Config,
        types::{Reply, Res, Void},
    },
    interaction::{command, filter},
    service::chat::ChatClient,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client and configuration. It is designed to be
/// trivially cloneable, allowing it to be passed around without the need for
/// `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
}

impl Runtime {
    /// Create a runtime around an existing chat client, connecting its event feed.
    #[instrument(skip_all)]
    pub async fn connect(config: Config, chat: ChatClient) -> Res<Self> {
        chat.connect().await?;

        Ok(Self { config, chat })
    }

    /// Run one poll cycle.
    ///
    /// Reads the pending batch of events and answers at most one command from
    /// it. Returns the reply that was sent, if any.
    #[instrument(skip_all)]
    pub async fn poll_once(&self) -> Res<Option<Reply>> {
        let events = self.chat.poll_events().await?;

        let Some(bot_command) = filter::parse_bot_command(&events, self.chat.bot_user_id()) else {
            return Ok(None);
        };

        debug!("Received command: {:?}", bot_command.text);
        let reply = command::handle_command(&bot_command, &self.chat).await?;

        Ok(Some(reply))
    }

    /// Poll until `shutdown` is cancelled, sleeping `poll_interval_ms` between cycles.
    ///
    /// A failed cycle ends the loop and the error is returned.
    pub async fn run(&self, shutdown: CancellationToken) -> Void {
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        info!("Starter bot connected and running!");

        loop {
            self.poll_once().await?;

            tokio::select! {
                biased;
                () = shutdown.cancelled() => break,
                () = tokio::time::sleep(interval) => {}
            }
        }

        info!("Shutting down ...");
        self.chat.disconnect().await
    }
}
