//! The declarative policy: which labels, assignees and project cards an issue
//! or pull request should end up with, and which event actions trigger that.
//!
//! A policy is decoded once per run from YAML and never mutated afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::LabelSet;

/// The action every trigger list falls back to when left empty.
pub const DEFAULT_TRIGGER_ACTION: &str = "opened";

/// Errors that can occur while decoding a policy.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The policy file exists but has no content.
    #[error("unable to decode policy: the policy file is empty")]
    Empty,

    /// The YAML is malformed or doesn't match the policy schema.
    #[error("unable to decode policy: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// The complete policy, one section per target kind.
///
/// Unknown top-level sections are ignored so the file can be shared with
/// other tools. Inside a section every key must be known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Policy {
    pub issues: IssuesPolicy,
    pub pull_requests: PullRequestsPolicy,
}

/// What should happen to issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct IssuesPolicy {
    /// Event actions that trigger processing. Empty means `["opened"]`.
    pub actions: Vec<String>,

    /// Labels every matching issue should carry.
    pub labels: LabelSet,

    /// Optional "at least one of these labels" constraint.
    pub at_least_one: Option<LabelGroup>,

    /// Optional project board placement.
    pub project: Option<ProjectDirective>,
}

/// What should happen to pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct PullRequestsPolicy {
    /// Event actions that trigger processing. Empty means `["opened"]`.
    pub actions: Vec<String>,

    /// Labels every matching pull request should carry.
    pub labels: LabelSet,

    /// Assignment behaviour.
    pub assignee: AssigneeDirective,

    /// Optional project board placement.
    pub project: Option<ProjectDirective>,
}

/// A group of labels of which at least one must be present.
///
/// If none is, `default` is added. An empty group or an empty default
/// disables the check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct LabelGroup {
    pub labels: LabelSet,
    pub default: String,
}

impl LabelGroup {
    /// Returns true if the group imposes no constraint.
    pub fn is_disabled(&self) -> bool {
        self.labels.is_empty() || self.default.is_empty()
    }
}

/// Automatic assignment of pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct AssigneeDirective {
    /// Assign the pull request to the user who opened it.
    pub auto: bool,

    /// Event actions that trigger assignment. Empty means the pull request
    /// section's `actions`.
    pub actions: Vec<String>,
}

/// Where on a project board a target should be placed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ProjectDirective {
    /// The project's public URL, compared verbatim with GitHub's `html_url`.
    pub url: String,

    /// Name of the column to create the card in.
    pub column: String,

    /// Organization to search when `url` is an organization project.
    ///
    /// Defaults to the repository owner, which is only right when the
    /// repository belongs to the organization that owns the board.
    #[serde(default)]
    pub organization: Option<String>,

    /// Event actions that trigger placement. Empty means the enclosing
    /// section's `actions`.
    #[serde(default)]
    pub actions: Vec<String>,
}

impl Policy {
    /// Decodes a policy from YAML bytes.
    pub fn from_yaml(raw: &[u8]) -> Result<Self, PolicyError> {
        if !has_content(raw) {
            return Err(PolicyError::Empty);
        }

        let policy: Policy = serde_yaml::from_slice(raw)?;
        tracing::debug!(?policy, "policy decoded");
        Ok(policy)
    }
}

/// Returns false if every line is blank or a comment.
fn has_content(raw: &[u8]) -> bool {
    raw.split(|&b| b == b'\n').any(|line| {
        let line = line.trim_ascii_start();
        !line.is_empty() && line[0] != b'#'
    })
}
