//! Effect interpreter trait.
//!
//! The trait-based design enables:
//! - A scripted interpreter for testing (see `test_utils`)
//! - The octocrab-backed interpreter in `crate::github`

use std::future::Future;

use super::github::{GitHubEffect, GitHubResponse};

/// Interprets GitHub effects against the GitHub API.
///
/// Implementations are constructed with a `RepoId`, so all effects executed
/// through a single interpreter instance are scoped to that repository.
///
/// # Example (mock for testing)
///
/// ```ignore
/// struct FixedLabels(Vec<String>);
///
/// impl GitHubInterpreter for FixedLabels {
///     type Error = GitHubApiError;
///
///     async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
///         match effect {
///             GitHubEffect::ListLabels { .. } => Ok(GitHubResponse::Labels(self.0.clone())),
///             _ => Ok(GitHubResponse::LabelsReplaced),
///         }
///     }
/// }
/// ```
pub trait GitHubInterpreter {
    /// The error type returned by this interpreter.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Execute a GitHub effect and return its response.
    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send;
}
