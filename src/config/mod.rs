//! Configuration: the run context supplied by the Actions runner and the
//! policy file stored in the repository.

pub mod context;
pub mod policy;

pub use context::{ActionContext, DEFAULT_CONFIG_PATH};
pub use policy::{
    AssigneeDirective, DEFAULT_TRIGGER_ACTION, IssuesPolicy, LabelGroup, Policy, PolicyError,
    ProjectDirective, PullRequestsPolicy,
};

use thiserror::Error;

use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::RepoId;

/// Errors that can occur while loading the policy from the repository.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be fetched.
    #[error("cannot load file {path} from {repo}@{git_ref}: {source}")]
    Fetch {
        path: String,
        repo: RepoId,
        git_ref: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The interpreter answered with a response for a different call.
    #[error("cannot load file {path}: unexpected response from GitHub")]
    UnexpectedResponse { path: String },

    /// The file was fetched but is not a valid policy.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

/// Fetches the policy file at `git_ref` and decodes it.
pub async fn load_policy<G: GitHubInterpreter>(
    github: &G,
    repo: &RepoId,
    path: &str,
    git_ref: &str,
) -> Result<Policy, LoadError> {
    let effect = GitHubEffect::GetFileContents {
        path: path.to_string(),
        git_ref: git_ref.to_string(),
    };

    let contents = match github.interpret(effect).await {
        Ok(GitHubResponse::FileContents(contents)) => contents,
        Ok(_) => {
            return Err(LoadError::UnexpectedResponse {
                path: path.to_string(),
            });
        }
        Err(e) => {
            return Err(LoadError::Fetch {
                path: path.to_string(),
                repo: repo.clone(),
                git_ref: git_ref.to_string(),
                source: Box::new(e),
            });
        }
    };

    tracing::debug!(path, git_ref, bytes = contents.len(), "policy file fetched");
    Ok(Policy::from_yaml(contents.as_bytes())?)
}
