//! Webhook handling for GitHub events.
//!
//! This module provides:
//! - Typed event values for the events the engine acts on
//! - The payload parser mapping an event name plus raw bytes to an event

pub mod events;
pub mod parser;

pub use events::{IssuesEvent, PullRequestEvent, WebhookEvent};
pub use parser::{ParseError, parse_webhook};
