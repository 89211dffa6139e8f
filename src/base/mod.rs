//! Core components and types for the starter-bot.
//!
//! - Configuration handling and environment variables.
//! - Event, mention and reply types shared by the interaction layer.

pub mod config;
pub mod types;
