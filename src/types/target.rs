//! Handles for the issues and pull requests the engine acts on.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IssueNumber, RepoId};

/// Whether a target is a plain issue or a pull request.
///
/// Labels and assignees go through the issues API for both kinds, but project
/// cards must reference a pull request by its pull request id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Issue,
    PullRequest,
}

impl TargetKind {
    /// The `content_type` GitHub expects when creating a project card.
    pub fn card_content_type(&self) -> &'static str {
        match self {
            TargetKind::Issue => "Issue",
            TargetKind::PullRequest => "PullRequest",
        }
    }
}

/// An issue or pull request, identified by repository and number.
///
/// Owns no state; it only says where API calls should go.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    pub repo: RepoId,
    pub number: IssueNumber,
    pub kind: TargetKind,
}

impl Target {
    pub fn issue(repo: RepoId, number: IssueNumber) -> Self {
        Target {
            repo,
            number,
            kind: TargetKind::Issue,
        }
    }

    pub fn pull_request(repo: RepoId, number: IssueNumber) -> Self {
        Target {
            repo,
            number,
            kind: TargetKind::PullRequest,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.repo, self.number)
    }
}
