pub mod slack;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{Event, Res, Void};

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait covers everything the bot needs from a chat platform: who it
/// is, a feed of events to poll, and a way to post replies.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Get the bot user ID.
    ///
    /// Used to tell mentions of the bot apart from mentions of anyone else.
    fn bot_user_id(&self) -> &str;

    /// Connect the realtime event feed.
    ///
    /// Events received after this call are buffered until the next poll.
    async fn connect(&self) -> Void;

    /// Drain all events received since the previous poll.
    ///
    /// Returns immediately with an empty batch when nothing arrived.
    async fn poll_events(&self) -> Res<Vec<Event>>;

    /// Post a message to a channel.
    async fn send_message(&self, channel_id: &str, text: &str) -> Void;

    /// Disconnect the realtime event feed.
    async fn disconnect(&self) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }
}
