//! GitHub webhook payload parser.
//!
//! This module parses raw webhook JSON payloads into typed [`WebhookEvent`] values.
//!
//! # Parsing Strategy
//!
//! 1. The event type comes from `GITHUB_EVENT_NAME` (the `X-GitHub-Event`
//!    header for a delivered webhook)
//! 2. The payload is parsed according to the event type
//! 3. Unknown event types return `WebhookEvent::Other` (ignored, not error)
//! 4. Malformed payloads return `Err` with the decoder's message

use serde::Deserialize;
use thiserror::Error;

use crate::types::IssueNumber;

use super::events::{IssuesEvent, PullRequestEvent, WebhookEvent};

/// Error type for webhook parsing failures.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON deserialization failed (includes missing required fields).
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Parses a webhook payload into a typed event.
///
/// # Arguments
///
/// * `event_type` - The event name, e.g. `"issues"` or `"pull_request"`
/// * `payload` - The raw JSON payload bytes
///
/// # Examples
///
/// ```
/// use issue_steward::webhooks::{parse_webhook, WebhookEvent};
///
/// let payload = br#"{
///     "action": "opened",
///     "issue": { "id": 444500041, "number": 1 }
/// }"#;
///
/// let event = parse_webhook("issues", payload).unwrap();
/// assert!(matches!(event, WebhookEvent::Issues(_)));
/// ```
pub fn parse_webhook(event_type: &str, payload: &[u8]) -> Result<WebhookEvent, ParseError> {
    match event_type {
        "issues" => parse_issues(payload).map(WebhookEvent::Issues),
        "pull_request" => parse_pull_request(payload).map(WebhookEvent::PullRequest),
        other => Ok(WebhookEvent::Other {
            event_name: other.to_string(),
        }),
    }
}

// ============================================================================
// Raw payload structures for deserialization
//
// These match GitHub's webhook JSON structure, keeping only the fields the
// engine reads. Unknown fields are ignored.
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawItem {
    number: u64,
}

// ============================================================================
// issues event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawIssuesPayload {
    action: String,
    issue: RawItem,
}

fn parse_issues(payload: &[u8]) -> Result<IssuesEvent, ParseError> {
    let raw: RawIssuesPayload = serde_json::from_slice(payload)?;

    Ok(IssuesEvent {
        action: raw.action,
        number: IssueNumber(raw.issue.number),
    })
}

// ============================================================================
// pull_request event
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawPullRequestPayload {
    action: String,
    pull_request: RawItem,
}

fn parse_pull_request(payload: &[u8]) -> Result<PullRequestEvent, ParseError> {
    let raw: RawPullRequestPayload = serde_json::from_slice(payload)?;

    Ok(PullRequestEvent {
        action: raw.action,
        number: IssueNumber(raw.pull_request.number),
    })
}
