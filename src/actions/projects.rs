//! Project board placement.
//!
//! A project is named in the policy by its public URL. [`ProjectResolver`]
//! turns that URL into a project id by listing the repository's projects, and
//! the organization's when the URL points at an organization board.
//! [`ProjectPlacer`] then creates a card for the target in the named column.
//!
//! Nothing is cached: projects and columns are listed afresh on every
//! placement.

use tracing::{debug, info, instrument};

use super::error::ActionError;
use crate::config::ProjectDirective;
use crate::effects::{
    ColumnData, GitHubEffect, GitHubInterpreter, GitHubResponse, IssueData, ProjectData,
};
use crate::types::{ProjectId, RepoId, Target};

/// Marker in a project URL identifying an organization board.
const ORG_URL_MARKER: &str = "orgs";

/// Where a resolved project lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectScope {
    Repository,
    Organization,
}

/// A project resolved from its URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectRef {
    pub id: ProjectId,
    pub scope: ProjectScope,
}

// ─── Resolution ───────────────────────────────────────────────────────────────

/// Finds the project a policy URL refers to.
pub struct ProjectResolver<'a, G> {
    github: &'a G,
}

impl<'a, G: GitHubInterpreter> ProjectResolver<'a, G> {
    pub fn new(github: &'a G) -> Self {
        ProjectResolver { github }
    }

    /// Resolves `project_url` to a project of `repo` or of its organization.
    ///
    /// Organization projects are only listed when the URL contains `"orgs"`.
    /// The organization searched is `organization` if given, otherwise the
    /// repository owner. Repository projects are matched first, and the first
    /// project whose `html_url` equals `project_url` exactly wins.
    #[instrument(skip(self, repo), fields(repo = %repo))]
    pub async fn resolve(
        &self,
        repo: &RepoId,
        project_url: &str,
        organization: Option<&str>,
    ) -> Result<ProjectRef, ActionError> {
        let repo_projects = match self.github.interpret(GitHubEffect::ListRepoProjects).await {
            Ok(GitHubResponse::Projects(projects)) => projects,
            Ok(_) => return Err(ActionError::unexpected("list_repo_projects")),
            Err(e) => {
                return Err(ActionError::RepoProjects {
                    repo: repo.clone(),
                    source: Box::new(e),
                });
            }
        };

        let org_projects = if project_url.contains(ORG_URL_MARKER) {
            let org = organization.unwrap_or(repo.owner.as_str());
            self.org_projects(org).await?
        } else {
            Vec::new()
        };

        let scoped = repo_projects
            .iter()
            .map(|p| (p, ProjectScope::Repository))
            .chain(org_projects.iter().map(|p| (p, ProjectScope::Organization)));

        for (project, scope) in scoped {
            if project.html_url == project_url {
                debug!(project = %project.id, ?scope, name = %project.name, "project resolved");
                return Ok(ProjectRef {
                    id: project.id,
                    scope,
                });
            }
        }

        Err(ActionError::ProjectNotFound {
            repo: repo.clone(),
            url: project_url.to_string(),
        })
    }

    async fn org_projects(&self, org: &str) -> Result<Vec<ProjectData>, ActionError> {
        let effect = GitHubEffect::ListOrgProjects {
            org: org.to_string(),
        };
        match self.github.interpret(effect).await {
            Ok(GitHubResponse::Projects(projects)) => Ok(projects),
            Ok(_) => Err(ActionError::unexpected("list_org_projects")),
            Err(e) => Err(ActionError::OrgProjects {
                org: org.to_string(),
                source: Box::new(e),
            }),
        }
    }
}

// ─── Placement ────────────────────────────────────────────────────────────────

/// Puts a target on a project board.
pub struct ProjectPlacer<'a, G> {
    github: &'a G,
}

impl<'a, G: GitHubInterpreter> ProjectPlacer<'a, G> {
    pub fn new(github: &'a G) -> Self {
        ProjectPlacer { github }
    }

    /// Creates a card for `target` in the column `directive.column` of the
    /// project at `directive.url`.
    ///
    /// Each step runs only if the previous one succeeded. The column is
    /// matched by exact name, first match wins.
    #[instrument(
        skip(self, target, directive),
        fields(target = %target, project = %directive.url, column = %directive.column)
    )]
    pub async fn place(
        &self,
        target: &Target,
        directive: &ProjectDirective,
    ) -> Result<(), ActionError> {
        let issue = get_issue(self.github, target).await?;

        let project = ProjectResolver::new(self.github)
            .resolve(
                &target.repo,
                &directive.url,
                directive.organization.as_deref(),
            )
            .await?;

        let columns = self.columns(project.id).await?;
        let Some(column) = columns.iter().find(|c| c.name == directive.column) else {
            return Err(ActionError::ColumnNotFound {
                issue: target.number,
                project: project.id,
                column: directive.column.clone(),
            });
        };

        let effect = GitHubEffect::CreateProjectCard {
            column: column.id,
            content_id: issue.id,
            content_kind: target.kind,
        };
        match self.github.interpret(effect).await {
            Ok(GitHubResponse::CardCreated) => {}
            Ok(_) => return Err(ActionError::unexpected("create_project_card")),
            Err(e) => {
                return Err(ActionError::CreateCard {
                    issue: target.number,
                    project: project.id,
                    source: Box::new(e),
                });
            }
        }

        info!(project = %project.id, column = %column.id, "added to project");
        Ok(())
    }

    async fn columns(&self, project: ProjectId) -> Result<Vec<ColumnData>, ActionError> {
        let effect = GitHubEffect::ListProjectColumns { project };
        match self.github.interpret(effect).await {
            Ok(GitHubResponse::Columns(columns)) => Ok(columns),
            Ok(_) => Err(ActionError::unexpected("list_project_columns")),
            Err(e) => Err(ActionError::ProjectColumns {
                project,
                source: Box::new(e),
            }),
        }
    }
}

/// Fetches the target's internal id and author.
pub(crate) async fn get_issue<G: GitHubInterpreter>(
    github: &G,
    target: &Target,
) -> Result<IssueData, ActionError> {
    let effect = GitHubEffect::GetIssue {
        issue: target.number,
        kind: target.kind,
    };
    match github.interpret(effect).await {
        Ok(GitHubResponse::Issue(issue)) => Ok(issue),
        Ok(_) => Err(ActionError::unexpected("get_issue")),
        Err(e) => Err(ActionError::GetIssue {
            issue: target.number,
            source: Box::new(e),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::GitHubApiError;
    use crate::test_utils::{
        ORG_PROJECT_URL, REPO_PROJECT_URL, ScriptedGitHub, columns, issue_data, issue_target,
        org_project, pull_request_target, repo, repo_project, unauthorized,
    };
    use crate::types::{ColumnId, IssueId, IssueNumber, TargetKind};

    fn directive(url: &str, column: &str) -> ProjectDirective {
        ProjectDirective {
            url: url.to_string(),
            column: column.to_string(),
            organization: None,
            actions: Vec::new(),
        }
    }

    fn projects(list: Vec<ProjectData>) -> Result<GitHubResponse, GitHubApiError> {
        Ok(GitHubResponse::Projects(list))
    }

    // ─── resolve ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn resolves_repository_project_without_listing_org() {
        let github = ScriptedGitHub::new([projects(vec![repo_project()])]);

        let project = ProjectResolver::new(&github)
            .resolve(&repo(), REPO_PROJECT_URL, None)
            .await
            .unwrap();

        assert_eq!(project.id, repo_project().id);
        assert_eq!(project.scope, ProjectScope::Repository);
        assert_eq!(github.count("list_org_projects"), 0);
    }

    #[tokio::test]
    async fn never_lists_org_projects_for_repository_url() {
        // A failing org listing must not be reached.
        let github = ScriptedGitHub::new([projects(vec![]), Err(unauthorized())]);

        let err = ProjectResolver::new(&github)
            .resolve(&repo(), REPO_PROJECT_URL, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::ProjectNotFound { .. }));
        assert_eq!(github.calls(), vec![GitHubEffect::ListRepoProjects]);
        assert_eq!(github.remaining(), 1);
    }

    #[tokio::test]
    async fn org_url_lists_projects_of_repository_owner() {
        let github = ScriptedGitHub::new([
            projects(vec![repo_project()]),
            projects(vec![org_project()]),
        ]);

        let project = ProjectResolver::new(&github)
            .resolve(&repo(), ORG_PROJECT_URL, None)
            .await
            .unwrap();

        assert_eq!(project.id, org_project().id);
        assert_eq!(project.scope, ProjectScope::Organization);
        assert_eq!(
            github.calls(),
            vec![
                GitHubEffect::ListRepoProjects,
                GitHubEffect::ListOrgProjects {
                    org: "octo".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn organization_override_is_used_for_org_listing() {
        let github = ScriptedGitHub::new([projects(vec![]), projects(vec![org_project()])]);

        ProjectResolver::new(&github)
            .resolve(&repo(), ORG_PROJECT_URL, Some("octo-org"))
            .await
            .unwrap();

        assert_eq!(
            github.calls()[1],
            GitHubEffect::ListOrgProjects {
                org: "octo-org".to_string()
            }
        );
    }

    #[tokio::test]
    async fn repository_projects_win_over_org_projects() {
        let mut shadow = org_project();
        shadow.html_url = ORG_PROJECT_URL.to_string();
        let mut first = repo_project();
        first.html_url = ORG_PROJECT_URL.to_string();

        let github = ScriptedGitHub::new([projects(vec![first.clone()]), projects(vec![shadow])]);

        let project = ProjectResolver::new(&github)
            .resolve(&repo(), ORG_PROJECT_URL, None)
            .await
            .unwrap();

        assert_eq!(project.id, first.id);
        assert_eq!(project.scope, ProjectScope::Repository);
    }

    #[tokio::test]
    async fn url_match_is_exact() {
        let github = ScriptedGitHub::new([projects(vec![repo_project()])]);
        let url = format!("{}/", REPO_PROJECT_URL);

        let err = ProjectResolver::new(&github)
            .resolve(&repo(), &url, None)
            .await
            .unwrap_err();

        assert!(matches!(err, ActionError::ProjectNotFound { .. }));
    }

    #[tokio::test]
    async fn listing_failures_name_repository_and_org() {
        let github = ScriptedGitHub::new([Err(unauthorized())]);
        let err = ProjectResolver::new(&github)
            .resolve(&repo(), ORG_PROJECT_URL, None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot get repository (octo/hello) projects: GitHub API error (HTTP 401): Bad credentials"
        );

        let github = ScriptedGitHub::new([projects(vec![]), Err(unauthorized())]);
        let err = ProjectResolver::new(&github)
            .resolve(&repo(), ORG_PROJECT_URL, None)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "cannot get organization (octo) projects: GitHub API error (HTTP 401): Bad credentials"
        );
    }

    // ─── place ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn places_issue_in_first_matching_column() {
        let github = ScriptedGitHub::new([
            Ok(GitHubResponse::Issue(issue_data(1, "alice"))),
            projects(vec![repo_project()]),
            Ok(GitHubResponse::Columns(columns())),
            Ok(GitHubResponse::CardCreated),
        ]);

        ProjectPlacer::new(&github)
            .place(&issue_target(1), &directive(REPO_PROJECT_URL, "To Do"))
            .await
            .unwrap();

        assert_eq!(
            github.calls(),
            vec![
                GitHubEffect::GetIssue {
                    issue: IssueNumber(1),
                    kind: TargetKind::Issue,
                },
                GitHubEffect::ListRepoProjects,
                GitHubEffect::ListProjectColumns {
                    project: repo_project().id,
                },
                GitHubEffect::CreateProjectCard {
                    column: ColumnId(367),
                    content_id: IssueId(444500041),
                    content_kind: TargetKind::Issue,
                },
            ]
        );
    }

    #[tokio::test]
    async fn pull_request_cards_use_pull_request_content() {
        let github = ScriptedGitHub::new([
            Ok(GitHubResponse::Issue(issue_data(2, "alice"))),
            projects(vec![repo_project()]),
            Ok(GitHubResponse::Columns(columns())),
            Ok(GitHubResponse::CardCreated),
        ]);

        ProjectPlacer::new(&github)
            .place(&pull_request_target(2), &directive(REPO_PROJECT_URL, "Backlog"))
            .await
            .unwrap();

        let calls = github.calls();
        assert_eq!(
            calls[0],
            GitHubEffect::GetIssue {
                issue: IssueNumber(2),
                kind: TargetKind::PullRequest,
            }
        );
        assert!(matches!(
            calls[3],
            GitHubEffect::CreateProjectCard {
                column: ColumnId(366),
                content_kind: TargetKind::PullRequest,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unknown_project_stops_before_columns() {
        let github = ScriptedGitHub::new([
            Ok(GitHubResponse::Issue(issue_data(1, "alice"))),
            projects(vec![repo_project()]),
        ]);
        let url = "https://github.com/octo/hello/projects/404";

        let err = ProjectPlacer::new(&github)
            .place(&issue_target(1), &directive(url, "To Do"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!("no repository/organization (octo/hello) projects found from the given url ({url})")
        );
        assert_eq!(github.count("list_project_columns"), 0);
        assert_eq!(github.count("create_project_card"), 0);
    }

    #[tokio::test]
    async fn unknown_column_stops_before_card() {
        let github = ScriptedGitHub::new([
            Ok(GitHubResponse::Issue(issue_data(1, "alice"))),
            projects(vec![repo_project()]),
            Ok(GitHubResponse::Columns(columns())),
        ]);

        let err = ProjectPlacer::new(&github)
            .place(&issue_target(1), &directive(REPO_PROJECT_URL, "Done"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot add issue (1) to project (1002604): no project column found with name Done"
        );
        assert_eq!(github.count("list_project_columns"), 1);
        assert_eq!(github.count("create_project_card"), 0);
    }

    #[tokio::test]
    async fn issue_lookup_failure_aborts_placement() {
        let github = ScriptedGitHub::new([Err(unauthorized())]);

        let err = ProjectPlacer::new(&github)
            .place(&issue_target(7), &directive(REPO_PROJECT_URL, "To Do"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "cannot get issue with number 7: GitHub API error (HTTP 401): Bad credentials"
        );
        assert_eq!(github.calls().len(), 1);
    }

    #[tokio::test]
    async fn column_and_card_failures_name_the_project() {
        let github = ScriptedGitHub::new([
            Ok(GitHubResponse::Issue(issue_data(1, "alice"))),
            projects(vec![repo_project()]),
            Err(unauthorized()),
        ]);
        let err = ProjectPlacer::new(&github)
            .place(&issue_target(1), &directive(REPO_PROJECT_URL, "To Do"))
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("cannot get project (1002604) columns: ")
        );

        let github = ScriptedGitHub::new([
            Ok(GitHubResponse::Issue(issue_data(1, "alice"))),
            projects(vec![repo_project()]),
            Ok(GitHubResponse::Columns(columns())),
            Err(unauthorized()),
        ]);
        let err = ProjectPlacer::new(&github)
            .place(&issue_target(1), &directive(REPO_PROJECT_URL, "To Do"))
            .await
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("cannot add issue (1) to project (1002604): GitHub API error")
        );
    }
}
