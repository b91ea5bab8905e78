//! Errors produced while applying a policy to a target.
//!
//! Every tracker failure is wrapped with a message naming the call that
//! failed and the issue, project or repository it was made for. The tracker's
//! own error is kept as the source.

use std::fmt;

use thiserror::Error;

use crate::types::{IssueNumber, ProjectId, RepoId};
use crate::webhooks::ParseError;

/// A boxed interpreter error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur while processing an event.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The webhook payload could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("cannot get labels of issue ({issue}): {source}")]
    GetLabels { issue: IssueNumber, source: BoxError },

    #[error("cannot replace labels of issue ({issue}): {source}")]
    ReplaceLabels { issue: IssueNumber, source: BoxError },

    #[error("cannot get issue with number {issue}: {source}")]
    GetIssue { issue: IssueNumber, source: BoxError },

    #[error("cannot assign ({login}) to issue ({issue}): {source}")]
    Assign {
        login: String,
        issue: IssueNumber,
        source: BoxError,
    },

    #[error("cannot get repository ({repo}) projects: {source}")]
    RepoProjects { repo: RepoId, source: BoxError },

    #[error("cannot get organization ({org}) projects: {source}")]
    OrgProjects { org: String, source: BoxError },

    /// Neither the repository nor the organization has a project at `url`.
    #[error("no repository/organization ({repo}) projects found from the given url ({url})")]
    ProjectNotFound { repo: RepoId, url: String },

    #[error("cannot get project ({project}) columns: {source}")]
    ProjectColumns { project: ProjectId, source: BoxError },

    #[error("cannot add issue ({issue}) to project ({project}): {source}")]
    CreateCard {
        issue: IssueNumber,
        project: ProjectId,
        source: BoxError,
    },

    /// The project exists but has no column with the configured name.
    #[error(
        "cannot add issue ({issue}) to project ({project}): no project column found with name {column}"
    )]
    ColumnNotFound {
        issue: IssueNumber,
        project: ProjectId,
        column: String,
    },

    /// The interpreter answered with a response for a different call.
    #[error("unexpected response from GitHub for {operation}")]
    UnexpectedResponse { operation: &'static str },

    /// Several independent steps failed.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl ActionError {
    pub(crate) fn unexpected(operation: &'static str) -> Self {
        ActionError::UnexpectedResponse { operation }
    }
}

// ─── Aggregation ──────────────────────────────────────────────────────────────

/// Failures collected from steps that all run regardless of each other.
///
/// An empty aggregate means every step succeeded.
#[derive(Debug, Default)]
pub struct AggregateError {
    errors: Vec<ActionError>,
}

impl AggregateError {
    pub fn new() -> Self {
        AggregateError::default()
    }

    /// Records a failure. Nested aggregates are flattened.
    pub fn push(&mut self, error: ActionError) {
        match error {
            ActionError::Aggregate(inner) => self.errors.extend(inner.errors),
            other => self.errors.push(other),
        }
    }

    /// Records the failure of `result`, if any.
    pub fn record<T>(&mut self, result: Result<T, ActionError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.push(e);
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[ActionError] {
        &self.errors
    }

    /// `Ok(())` if nothing failed.
    ///
    /// A single failure is returned as itself rather than wrapped, so its
    /// message stays the message of the call that failed.
    pub fn into_result(mut self) -> Result<(), ActionError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(self.errors.remove(0)),
            _ => Err(ActionError::Aggregate(self)),
        }
    }
}

impl fmt::Display for AggregateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.errors.len() == 1 { "error" } else { "errors" };
        write!(f, "{} {} occurred:", self.errors.len(), noun)?;
        for error in &self.errors {
            write!(f, "\n\t* {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for AggregateError {}
