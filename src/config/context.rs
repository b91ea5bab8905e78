//! The run context handed to the action by the GitHub Actions runner.
//!
//! Everything the action needs to know about its surroundings is read once at
//! start-up into [`ActionContext`]. Each field can be given as a flag, which
//! makes local runs easy, and falls back to the variable the runner sets.

use std::path::PathBuf;

use clap::Parser;

use crate::types::RepoId;

/// Policy location used when `INPUT_CONFIG_PATH` is not set.
pub const DEFAULT_CONFIG_PATH: &str = ".github/issue-steward.yml";

/// Run context for one webhook delivery.
#[derive(Clone, Parser)]
#[command(name = "issue-steward", version, about)]
pub struct ActionContext {
    /// Name of the event that triggered the workflow.
    #[arg(long, env = "GITHUB_EVENT_NAME")]
    pub event_name: String,

    /// Path to the file holding the webhook payload.
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: PathBuf,

    /// Repository the workflow runs in, as owner/repo.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: RepoId,

    /// Commit the policy file is read from.
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: String,

    /// Token used to call the GitHub API.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Path of the policy file inside the repository.
    #[arg(long, env = "INPUT_CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: String,
}

impl ActionContext {
    /// Reads the webhook payload from `event_path`.
    pub async fn read_payload(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.event_path).await
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("event_name", &self.event_name)
            .field("event_path", &self.event_path)
            .field("repository", &self.repository)
            .field("sha", &self.sha)
            .field("config_path", &self.config_path)
            .finish_non_exhaustive()
    }
}
