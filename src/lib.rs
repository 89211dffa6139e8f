//! Library root for `starter-bot`.
//!
//! Starter-bot is a minimal Slack bot. It polls its event feed on a fixed
//! interval, looks for messages that open with a mention of the bot, and
//! answers the first one in each batch with a canned reply:
//! - `@bot do ...` gets an affirmative reply
//! - anything else gets a hint to try `do`
//!
//! The chat platform sits behind the `GenericChatClient` trait so the loop
//! can be driven by other implementations (and mocks in tests).

pub mod base;
pub mod interaction;
pub mod prelude;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use runtime::Runtime;
use rustls::crypto;
use service::chat::ChatClient;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the starter-bot runtime:
/// - Initializes the crypto provider
/// - Connects to Slack and resolves the bot's user ID
/// - Polls for commands until Ctrl-C
pub async fn start(config: Config) -> Void {
    info!("Starting starter-bot ...");

    // Start the crypto provider.
    crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install the crypto provider."))?;

    // Initialize the Slack client; this resolves the bot's user ID.
    let chat = match ChatClient::slack(&config).await {
        Ok(chat) => chat,
        Err(e) => {
            error!("Connection failed: {}", e);
            return Ok(());
        }
    };

    // Stop polling on Ctrl-C.
    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    serve(config, chat, shutdown).await
}

/// Connects `chat` and polls it for commands until `shutdown` is cancelled.
///
/// A failed connection is logged and ends the bot quietly; there is no retry.
pub async fn serve(config: Config, chat: ChatClient, shutdown: CancellationToken) -> Void {
    let runtime = match Runtime::connect(config, chat).await {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Connection failed: {}", e);
            return Ok(());
        }
    };

    runtime.run(shutdown).await
}
