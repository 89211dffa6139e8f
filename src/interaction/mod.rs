//! Event handling for starter-bot.
//!
//! - Parsing direct `<@ID>` mentions out of message text
//! - Picking the bot's command out of a batch of events
//! - Classifying the command and replying with a canned response

pub mod command;
pub mod filter;
pub mod mention;
