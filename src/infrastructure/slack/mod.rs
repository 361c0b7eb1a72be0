//! Slack implementation of the `ChatClient` port

pub mod blocks;
mod client;

pub use client::{AuthIdentity, SlackClient, DEFAULT_API_URL};
