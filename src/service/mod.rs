//! Service integrations for external APIs and clients.
//!
//! The chat service defines a generic trait plus a Slack implementation,
//! allowing for extensibility and easy testing.

pub mod chat;
