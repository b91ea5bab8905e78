//! The octocrab client the interpreter talks through.
//!
//! Effects name issues by number only, so the client is bound to the
//! repository of the Action run and builds every repository route itself.

use octocrab::Octocrab;

use crate::types::RepoId;

/// A GitHub API client scoped to a specific repository.
#[derive(Clone)]
pub struct OctocrabClient {
    /// The underlying octocrab client.
    client: Octocrab,

    /// The repository this client is scoped to.
    repo: RepoId,
}

impl OctocrabClient {
    /// Creates a new client scoped to the given repository.
    pub fn new(client: Octocrab, repo: RepoId) -> Self {
        Self { client, repo }
    }

    /// Authenticates with the workflow's `GITHUB_TOKEN` or a personal token.
    pub fn from_token(token: impl Into<String>, repo: RepoId) -> Result<Self, octocrab::Error> {
        let client = Octocrab::builder().personal_token(token.into()).build()?;
        Ok(Self::new(client, repo))
    }

    /// Returns a reference to the underlying octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.client
    }

    /// Returns the repository this client is scoped to.
    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.repo.owner
    }

    /// Returns the repository name.
    pub fn repo_name(&self) -> &str {
        &self.repo.repo
    }

    /// The REST route of `path` under this repository, e.g.
    /// `issues/7/labels` becomes `/repos/octo/hello/issues/7/labels`.
    pub fn repo_route(&self, path: &str) -> String {
        format!(
            "/repos/{}/{}/{}",
            self.owner(),
            self.repo_name(),
            path.trim_start_matches('/')
        )
    }
}

impl std::fmt::Debug for OctocrabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OctocrabClient")
            .field("repo", &self.repo)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OctocrabClient {
        OctocrabClient::from_token("ghp_test", RepoId::new("octo", "hello")).unwrap()
    }

    #[tokio::test]
    async fn repo_route_is_scoped_to_the_repository() {
        let client = client();
        assert_eq!(
            client.repo_route("issues/7/labels"),
            "/repos/octo/hello/issues/7/labels"
        );
        assert_eq!(client.repo_route("/projects"), "/repos/octo/hello/projects");
    }

    #[tokio::test]
    async fn debug_does_not_show_the_token() {
        let debug = format!("{:?}", client());
        assert!(debug.starts_with("OctocrabClient { repo: "), "{}", debug);
        assert!(!debug.contains("ghp_test"), "{}", debug);
    }
}
