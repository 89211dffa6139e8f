//! Slack integration for starter-bot.
//!
//! Push events arrive over a socket mode connection and are queued in memory;
//! `poll_events` hands the queued batch to the runtime. Replies go out through
//! the Web API's `chat.postMessage`.

use crate::base::{
    config::Config,
    types::{Event, Res, Void},
};
use async_trait::async_trait;
use hyper_rustls::HttpsConnector;
use hyper_util::client::legacy::connect::HttpConnector;
use slack_morphism::prelude::*;
use tokio::sync::{
    Mutex,
    mpsc::{self, UnboundedReceiver, UnboundedSender, error::TryRecvError},
};
use tracing::{debug, info, instrument, warn};

use std::sync::Arc;

use super::{ChatClient, GenericChatClient};

// Type aliases.

type Connector = SlackClientHyperConnector<HttpsConnector<HttpConnector>>;
type FullClient = slack_morphism::SlackClient<Connector>;

// Extra methods on `ChatClient` applied by the slack implementation.

impl ChatClient {
    /// Creates a new Slack chat client.
    pub async fn slack(config: &Config) -> Res<Self> {
        let client = SlackChatClient::new(config).await?;
        Ok(Self { inner: Arc::new(client) })
    }
}

// Structs.

/// User state for the slack socket client.
struct SlackUserState {
    events: UnboundedSender<Event>,
}

/// Slack client implementation.
struct SlackChatClient {
    app_token: SlackApiToken,
    bot_token: SlackApiToken,
    bot_user_id: String,
    client: Arc<FullClient>,
    listener: SlackClientSocketModeListener<Connector>,
    events: Mutex<UnboundedReceiver<Event>>,
}

impl SlackChatClient {
    /// Create a new Slack chat client.
    ///
    /// Looks up the bot's own user ID with `auth.test`, which also verifies the bot token.
    #[instrument(name = "SlackChatClient::new", skip_all)]
    pub async fn new(config: &Config) -> Res<Self> {
        // Initialize tokens.

        let app_token = SlackApiToken::new(SlackApiTokenValue(config.slack_app_token.clone()));
        let bot_token = SlackApiToken::new(SlackApiTokenValue(config.slack_bot_token.clone()));

        // Initialize the Slack client.

        let https_connector = HttpsConnector::<HttpConnector>::builder().with_native_roots()?.https_only().enable_all_versions().build();
        let connector = SlackClientHyperConnector::with_connector(https_connector);
        let client = Arc::new(slack_morphism::SlackClient::new(connector));

        // Get the bot's user ID.

        let session = client.open_session(&bot_token);
        let bot_user = session.auth_test().await?;
        let bot_user_id = bot_user.user_id.0;

        info!("Slack bot user ID: {}", bot_user_id);

        // Initialize the socket mode listener, which feeds the event queue.

        let (sender, receiver) = mpsc::unbounded_channel();

        let socket_mode_callbacks = SlackSocketModeListenerCallbacks::new().with_push_events(handle_push_event);
        let listener_environment = Arc::new(SlackClientEventsListenerEnvironment::new(client.clone()).with_user_state(SlackUserState { events: sender }));
        let listener = SlackClientSocketModeListener::new(&SlackClientSocketModeConfig::new(), listener_environment, socket_mode_callbacks);

        Ok(Self {
            app_token,
            bot_token,
            bot_user_id,
            client,
            listener,
            events: Mutex::new(receiver),
        })
    }
}

#[async_trait]
impl GenericChatClient for SlackChatClient {
    fn bot_user_id(&self) -> &str {
        &self.bot_user_id
    }

    #[instrument(skip(self))]
    async fn connect(&self) -> Void {
        // Register the app token, then open the WS connections in the background.
        self.listener.listen_for(&self.app_token).await?;
        self.listener.start().await;

        info!("Connected to the Slack event feed.");

        Ok(())
    }

    #[instrument(skip(self))]
    async fn poll_events(&self) -> Res<Vec<Event>> {
        let mut receiver = self.events.lock().await;
        let mut batch = Vec::new();

        loop {
            match receiver.try_recv() {
                Ok(event) => batch.push(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Err(anyhow::anyhow!("Slack event feed is closed")),
            }
        }

        if !batch.is_empty() {
            debug!("Polled {} events", batch.len());
        }

        Ok(batch)
    }

    #[instrument(skip(self, text))]
    async fn send_message(&self, channel_id: &str, text: &str) -> Void {
        let message = SlackMessageContent::new().with_text(text.to_string());

        let request = SlackApiChatPostMessageRequest::new(SlackChannelId(channel_id.to_string()), message).with_as_user(true);

        let session = self.client.open_session(&self.bot_token);

        session.chat_post_message(&request).await.map_err(|e| anyhow::anyhow!("Failed to send message: {}", e))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn disconnect(&self) -> Void {
        self.listener.shutdown().await;

        info!("Disconnected from the Slack event feed.");

        Ok(())
    }
}

// Socket mode listener callbacks for Slack.

/// Queues push events for the next poll.
async fn handle_push_event(
    event_callback: SlackPushEventCallback,
    _client: Arc<SlackHyperClient>,
    states: SlackClientEventsUserState,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let states = states.read().await;
    let user_state = states.get_user_state::<SlackUserState>().ok_or(anyhow::anyhow!("Failed to get user state"))?;

    match decode_push_event(&event_callback.event) {
        Ok(event) => {
            if user_state.events.send(event).is_err() {
                warn!("Dropping push event because the event queue is closed.");
            }
        }
        Err(e) => warn!("Dropping push event that could not be decoded: {}", e),
    }

    Ok(())
}

/// Re-encodes a push event body to JSON so the [`Event`] carries the exact
/// `type`/`subtype`/`text`/`channel` values Slack sent.
fn decode_push_event(body: &SlackEventCallbackBody) -> Res<Event> {
    let value = serde_json::to_value(body)?;

    Ok(serde_json::from_value(value)?)
}

// Tests.
