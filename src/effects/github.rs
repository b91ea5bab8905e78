//! GitHub API effect types.
//!
//! These types describe the tracker calls the engine needs as data, without
//! executing them. An interpreter executes them against the actual GitHub API.

use serde::{Deserialize, Serialize};

use crate::types::{ColumnId, IssueId, IssueNumber, ProjectId, TargetKind};

/// A GitHub API effect.
///
/// Each variant describes a GitHub API operation. Effects are repo-scoped:
/// the interpreter is constructed with a `RepoId`, so effects don't include it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GitHubEffect {
    // ─── Labels ───────────────────────────────────────────────────────────────
    /// List the labels currently on an issue or pull request.
    ListLabels { issue: IssueNumber },

    /// Replace every label on an issue or pull request with `labels`.
    ReplaceLabels {
        issue: IssueNumber,
        labels: Vec<String>,
    },

    // ─── Issues ───────────────────────────────────────────────────────────────
    /// Fetch an issue or pull request to learn its internal id and author.
    ///
    /// For pull requests the id returned is the pull request id, which is what
    /// project cards need.
    GetIssue { issue: IssueNumber, kind: TargetKind },

    /// Add assignees to an issue or pull request.
    AddAssignees {
        issue: IssueNumber,
        logins: Vec<String>,
    },

    // ─── Projects ─────────────────────────────────────────────────────────────
    /// List the projects attached to the repository.
    ListRepoProjects,

    /// List the projects owned by an organization.
    ListOrgProjects { org: String },

    /// List the columns of a project.
    ListProjectColumns { project: ProjectId },

    /// Create a card in a project column pointing at an issue or pull request.
    CreateProjectCard {
        column: ColumnId,
        content_id: IssueId,
        content_kind: TargetKind,
    },

    // ─── Repository Contents ──────────────────────────────────────────────────
    /// Fetch a file from the repository at a given ref.
    GetFileContents { path: String, git_ref: String },
}

impl GitHubEffect {
    /// Short name of the operation, used in logs and unexpected-response errors.
    pub fn name(&self) -> &'static str {
        match self {
            GitHubEffect::ListLabels { .. } => "list_labels",
            GitHubEffect::ReplaceLabels { .. } => "replace_labels",
            GitHubEffect::GetIssue { .. } => "get_issue",
            GitHubEffect::AddAssignees { .. } => "add_assignees",
            GitHubEffect::ListRepoProjects => "list_repo_projects",
            GitHubEffect::ListOrgProjects { .. } => "list_org_projects",
            GitHubEffect::ListProjectColumns { .. } => "list_project_columns",
            GitHubEffect::CreateProjectCard { .. } => "create_project_card",
            GitHubEffect::GetFileContents { .. } => "get_file_contents",
        }
    }
}

// ─── Response Types ───────────────────────────────────────────────────────────

/// Issue data returned from the GitHub API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueData {
    /// The internal id (issue id, or pull request id for pull requests).
    pub id: IssueId,
    /// The issue number.
    pub number: IssueNumber,
    /// Login of the user who opened the issue.
    pub author_login: String,
}

/// A project board as listed by the repository or organization endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectData {
    pub id: ProjectId,
    pub name: String,
    /// The public URL users copy into the policy.
    pub html_url: String,
}

/// A project column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnData {
    pub id: ColumnId,
    pub name: String,
}

/// Response from a GitHub effect.
///
/// Each variant corresponds to the response from a particular effect type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum GitHubResponse {
    /// Response to `ListLabels`.
    Labels(Vec<String>),

    /// Response to `ReplaceLabels`.
    LabelsReplaced,

    /// Response to `GetIssue`.
    Issue(IssueData),

    /// Response to `AddAssignees`.
    AssigneesAdded,

    /// Response to `ListRepoProjects` and `ListOrgProjects`.
    Projects(Vec<ProjectData>),

    /// Response to `ListProjectColumns`.
    Columns(Vec<ColumnData>),

    /// Response to `CreateProjectCard`.
    CardCreated,

    /// Response to `GetFileContents`, already decoded.
    FileContents(String),
}
