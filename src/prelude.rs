pub use crate::base::{
    config::Config,
    types::{Command, Err, Event, ParsedMention, Reply, Res, Void},
};
pub use crate::runtime::Runtime;
pub use crate::service::chat::{ChatClient, GenericChatClient};
pub use anyhow::anyhow;
pub use tracing::{debug, error, info, instrument, warn};
