//! GitHub effect interpreter using octocrab.
//!
//! This module implements the `GitHubInterpreter` trait, executing GitHub effects
//! against the real GitHub API via octocrab.
//!
//! Key implementation details:
//! - Labels, assignees and classic projects go through raw REST routes, so the
//!   response shapes we rely on are declared here rather than borrowed from
//!   octocrab's models
//! - List endpoints are paginated 100 items at a time until a short page
//! - No retries: every failure is returned to the caller as-is

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::effects::{
    ColumnData, GitHubEffect, GitHubInterpreter, GitHubResponse, IssueData, ProjectData,
};
use crate::types::{ColumnId, IssueId, IssueNumber, ProjectId, TargetKind};

use super::client::OctocrabClient;
use super::error::GitHubApiError;

/// Page size used for every list endpoint (GitHub's maximum).
const PER_PAGE: u8 = 100;

// ─── Interpreter Implementation ───────────────────────────────────────────────

impl GitHubInterpreter for OctocrabClient {
    type Error = GitHubApiError;

    async fn interpret(&self, effect: GitHubEffect) -> Result<GitHubResponse, Self::Error> {
        interpret_github_effect(self, effect).await
    }
}

/// Interprets a GitHub effect, executing it against the GitHub API.
pub async fn interpret_github_effect(
    client: &OctocrabClient,
    effect: GitHubEffect,
) -> Result<GitHubResponse, GitHubApiError> {
    tracing::debug!(effect = effect.name(), repo = %client.repo(), "calling GitHub API");

    match effect {
        GitHubEffect::ListLabels { issue } => list_labels(client, issue).await,
        GitHubEffect::ReplaceLabels { issue, labels } => {
            replace_labels(client, issue, labels).await
        }
        GitHubEffect::GetIssue { issue, kind } => get_issue(client, issue, kind).await,
        GitHubEffect::AddAssignees { issue, logins } => {
            add_assignees(client, issue, logins).await
        }
        GitHubEffect::ListRepoProjects => list_repo_projects(client).await,
        GitHubEffect::ListOrgProjects { org } => list_org_projects(client, &org).await,
        GitHubEffect::ListProjectColumns { project } => {
            list_project_columns(client, project).await
        }
        GitHubEffect::CreateProjectCard {
            column,
            content_id,
            content_kind,
        } => create_project_card(client, column, content_id, content_kind).await,
        GitHubEffect::GetFileContents { path, git_ref } => {
            get_file_contents(client, &path, &git_ref).await
        }
    }
}

// ─── Pagination ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Fetches every page of a list endpoint.
async fn get_all_pages<T: DeserializeOwned>(
    client: &OctocrabClient,
    route: &str,
) -> Result<Vec<T>, GitHubApiError> {
    let mut page = 1u32;
    let mut all_items = Vec::new();

    loop {
        let params = PageParams {
            per_page: PER_PAGE,
            page,
        };
        let items: Vec<T> = client
            .inner()
            .get(route, Some(&params))
            .await
            .map_err(GitHubApiError::from_octocrab)?;

        let is_last_page = items.len() < usize::from(PER_PAGE);
        all_items.extend(items);

        if is_last_page {
            return Ok(all_items);
        }
        page += 1;
    }
}

// ─── Labels ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct LabelResponse {
    name: String,
}

async fn list_labels(
    client: &OctocrabClient,
    issue: IssueNumber,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = client.repo_route(&format!("issues/{}/labels", issue.0));

    let labels: Vec<LabelResponse> = get_all_pages(client, &route).await?;
    Ok(GitHubResponse::Labels(
        labels.into_iter().map(|l| l.name).collect(),
    ))
}

async fn replace_labels(
    client: &OctocrabClient,
    issue: IssueNumber,
    labels: Vec<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = client.repo_route(&format!("issues/{}/labels", issue.0));

    #[derive(Serialize)]
    struct ReplaceLabelsRequest {
        labels: Vec<String>,
    }

    let result: Result<serde_json::Value, _> = client
        .inner()
        .put(&route, Some(&ReplaceLabelsRequest { labels }))
        .await;

    match result {
        Ok(_) => Ok(GitHubResponse::LabelsReplaced),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

// ─── Issues ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IssueResponse {
    id: u64,
    number: u64,
    user: UserResponse,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    login: String,
}

async fn get_issue(
    client: &OctocrabClient,
    issue: IssueNumber,
    kind: TargetKind,
) -> Result<GitHubResponse, GitHubApiError> {
    // Pull request cards must reference the pull request id, which differs
    // from the id of the issue backing the same pull request.
    let collection = match kind {
        TargetKind::Issue => "issues",
        TargetKind::PullRequest => "pulls",
    };
    let route = client.repo_route(&format!("{}/{}", collection, issue.0));

    let result: Result<IssueResponse, _> = client.inner().get(&route, None::<&()>).await;

    match result {
        Ok(response) => Ok(GitHubResponse::Issue(IssueData {
            id: IssueId(response.id),
            number: IssueNumber(response.number),
            author_login: response.user.login,
        })),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

async fn add_assignees(
    client: &OctocrabClient,
    issue: IssueNumber,
    logins: Vec<String>,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = client.repo_route(&format!("issues/{}/assignees", issue.0));

    #[derive(Serialize)]
    struct AssigneesRequest {
        assignees: Vec<String>,
    }

    let result: Result<serde_json::Value, _> = client
        .inner()
        .post(&route, Some(&AssigneesRequest { assignees: logins }))
        .await;

    match result {
        Ok(_) => Ok(GitHubResponse::AssigneesAdded),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

// ─── Projects ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    id: i64,
    name: String,
    html_url: String,
}

impl From<ProjectResponse> for ProjectData {
    fn from(p: ProjectResponse) -> Self {
        ProjectData {
            id: ProjectId(p.id),
            name: p.name,
            html_url: p.html_url,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ColumnResponse {
    id: i64,
    name: String,
}

async fn list_repo_projects(client: &OctocrabClient) -> Result<GitHubResponse, GitHubApiError> {
    let route = client.repo_route("projects");
    let projects: Vec<ProjectResponse> = get_all_pages(client, &route).await?;
    Ok(GitHubResponse::Projects(
        projects.into_iter().map(ProjectData::from).collect(),
    ))
}

async fn list_org_projects(
    client: &OctocrabClient,
    org: &str,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = format!("/orgs/{}/projects", org);
    let projects: Vec<ProjectResponse> = get_all_pages(client, &route).await?;
    Ok(GitHubResponse::Projects(
        projects.into_iter().map(ProjectData::from).collect(),
    ))
}

async fn list_project_columns(
    client: &OctocrabClient,
    project: ProjectId,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = format!("/projects/{}/columns", project.0);
    let columns: Vec<ColumnResponse> = get_all_pages(client, &route).await?;
    Ok(GitHubResponse::Columns(
        columns
            .into_iter()
            .map(|c| ColumnData {
                id: ColumnId(c.id),
                name: c.name,
            })
            .collect(),
    ))
}

async fn create_project_card(
    client: &OctocrabClient,
    column: ColumnId,
    content_id: IssueId,
    content_kind: TargetKind,
) -> Result<GitHubResponse, GitHubApiError> {
    let route = format!("/projects/columns/{}/cards", column.0);

    #[derive(Serialize)]
    struct CardRequest {
        content_id: u64,
        content_type: &'static str,
    }

    let request = CardRequest {
        content_id: content_id.0,
        content_type: content_kind.card_content_type(),
    };

    let result: Result<serde_json::Value, _> = client.inner().post(&route, Some(&request)).await;

    match result {
        Ok(_) => Ok(GitHubResponse::CardCreated),
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}

// ─── Repository Contents ──────────────────────────────────────────────────────

async fn get_file_contents(
    client: &OctocrabClient,
    path: &str,
    git_ref: &str,
) -> Result<GitHubResponse, GitHubApiError> {
    let result = client
        .inner()
        .repos(client.owner(), client.repo_name())
        .get_content()
        .path(path)
        .r#ref(git_ref)
        .send()
        .await;

    match result {
        Ok(mut contents) => {
            let item = contents.take_items().into_iter().next().ok_or_else(|| {
                GitHubApiError::without_source(format!("{} is not a file", path))
            })?;
            let decoded = item.decoded_content().ok_or_else(|| {
                GitHubApiError::without_source(format!("{} has no decodable content", path))
            })?;
            Ok(GitHubResponse::FileContents(decoded))
        }
        Err(e) => Err(GitHubApiError::from_octocrab(e)),
    }
}
