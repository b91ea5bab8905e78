//! GitHub webhook event types.
//!
//! Typed representations of the webhook events the engine acts on. The action
//! string is kept verbatim: which actions trigger work is decided by the
//! policy, not by the parser.
//!
//! Events carry no repository: a GitHub Action always runs inside the
//! repository that emitted the event, so the repository comes from the
//! action context instead.

use serde::{Deserialize, Serialize};

use crate::types::{IssueNumber, RepoId, Target};

/// A parsed GitHub webhook event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookEvent {
    /// An `issues` event (opened, edited, milestoned, ...).
    Issues(IssuesEvent),

    /// A `pull_request` event (opened, synchronize, ...).
    PullRequest(PullRequestEvent),

    /// Any other event type. Carried so callers can log what they skipped.
    Other { event_name: String },
}

/// An issues event.
///
/// Only the number is kept. The card id used for project placement is read
/// from the tracker at placement time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuesEvent {
    /// The action that triggered this event, exactly as GitHub sent it.
    pub action: String,

    /// The issue number.
    pub number: IssueNumber,
}

impl IssuesEvent {
    /// The issue as a target in `repo`.
    pub fn target(&self, repo: &RepoId) -> Target {
        Target::issue(repo.clone(), self.number)
    }
}

/// A pull request event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestEvent {
    /// The action that triggered this event, exactly as GitHub sent it.
    pub action: String,

    /// The pull request number.
    pub number: IssueNumber,
}

impl PullRequestEvent {
    /// The pull request as a target in `repo`.
    pub fn target(&self, repo: &RepoId) -> Target {
        Target::pull_request(repo.clone(), self.number)
    }
}
