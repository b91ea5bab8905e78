//! Shared test utilities: in-memory GitHub interpreters and proptest strategies.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;

use proptest::prelude::*;

use crate::effects::{
    ColumnData, GitHubEffect, GitHubInterpreter, GitHubResponse, IssueData, ProjectData,
};
use crate::github::GitHubApiError;
use crate::types::{ColumnId, IssueId, IssueNumber, LabelSet, ProjectId, RepoId, Target};

pub const OWNER: &str = "octo";
pub const REPO: &str = "hello";
pub const REPO_PROJECT_URL: &str = "https://github.com/octo/hello/projects/1";
pub const ORG_PROJECT_URL: &str = "https://github.com/orgs/octo/projects/1";

pub fn repo() -> RepoId {
    RepoId::new(OWNER, REPO)
}

pub fn issue_target(number: u64) -> Target {
    Target::issue(repo(), IssueNumber(number))
}

pub fn pull_request_target(number: u64) -> Target {
    Target::pull_request(repo(), IssueNumber(number))
}

pub fn labels(names: &[&str]) -> LabelSet {
    names.iter().copied().collect()
}

pub fn unauthorized() -> GitHubApiError {
    GitHubApiError::new(Some(401), "Bad credentials")
}

pub fn repo_project() -> ProjectData {
    ProjectData {
        id: ProjectId(1002604),
        name: "Projects Documentation".to_string(),
        html_url: REPO_PROJECT_URL.to_string(),
    }
}

pub fn org_project() -> ProjectData {
    ProjectData {
        id: ProjectId(1002605),
        name: "Organization Roadmap".to_string(),
        html_url: ORG_PROJECT_URL.to_string(),
    }
}

pub fn columns() -> Vec<ColumnData> {
    vec![
        ColumnData {
            id: ColumnId(366),
            name: "Backlog".to_string(),
        },
        ColumnData {
            id: ColumnId(367),
            name: "To Do".to_string(),
        },
        ColumnData {
            id: ColumnId(368),
            name: "To Do".to_string(),
        },
    ]
}

pub fn issue_data(number: u64, author: &str) -> IssueData {
    IssueData {
        id: IssueId(444500041),
        number: IssueNumber(number),
        author_login: author.to_string(),
    }
}

// ─── Scripted interpreter ─────────────────────────────────────────────────────

/// Replays a fixed sequence of responses, one per call, and records every
/// effect it was asked to interpret.
///
/// Running out of responses is reported as an error, so a test that scripts
/// too few responses fails on the unexpected call.
pub struct ScriptedGitHub {
    responses: Mutex<VecDeque<Result<GitHubResponse, GitHubApiError>>>,
    calls: Mutex<Vec<GitHubEffect>>,
}

impl ScriptedGitHub {
    pub fn new(
        responses: impl IntoIterator<Item = Result<GitHubResponse, GitHubApiError>>,
    ) -> Self {
        ScriptedGitHub {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every effect interpreted so far, in order.
    pub fn calls(&self) -> Vec<GitHubEffect> {
        self.calls.lock().unwrap().clone()
    }

    /// Number of interpreted effects with the given name.
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }

    /// Responses that were scripted but never consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }
}

impl GitHubInterpreter for ScriptedGitHub {
    type Error = GitHubApiError;

    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send {
        let name = effect.name();
        self.calls.lock().unwrap().push(effect);
        let response = self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GitHubApiError::without_source(format!(
                "no scripted response for {}",
                name
            )))
        });
        async move { response }
    }
}

// ─── Stateful fake ────────────────────────────────────────────────────────────

/// A tiny in-memory tracker: label writes are visible to later reads.
pub struct FakeTracker {
    pub labels: Mutex<Vec<String>>,
    pub assignees: Mutex<Vec<String>>,
    pub cards: Mutex<Vec<(ColumnId, IssueId)>>,
    pub author: String,
    pub repo_projects: Vec<ProjectData>,
    pub org_projects: Vec<ProjectData>,
    pub columns: Vec<ColumnData>,
    pub calls: Mutex<Vec<GitHubEffect>>,
}

impl FakeTracker {
    pub fn with_labels(current: &[&str]) -> Self {
        FakeTracker {
            labels: Mutex::new(current.iter().map(|s| s.to_string()).collect()),
            assignees: Mutex::new(Vec::new()),
            cards: Mutex::new(Vec::new()),
            author: "alice".to_string(),
            repo_projects: vec![repo_project()],
            org_projects: vec![org_project()],
            columns: columns(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn current_labels(&self) -> Vec<String> {
        self.labels.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.name() == name)
            .count()
    }
}

impl GitHubInterpreter for FakeTracker {
    type Error = GitHubApiError;

    fn interpret(
        &self,
        effect: GitHubEffect,
    ) -> impl Future<Output = Result<GitHubResponse, Self::Error>> + Send {
        self.calls.lock().unwrap().push(effect.clone());
        let response = match effect {
            GitHubEffect::ListLabels { .. } => GitHubResponse::Labels(self.current_labels()),
            GitHubEffect::ReplaceLabels { labels, .. } => {
                *self.labels.lock().unwrap() = labels;
                GitHubResponse::LabelsReplaced
            }
            GitHubEffect::GetIssue { issue, .. } => {
                GitHubResponse::Issue(issue_data(issue.0, &self.author))
            }
            GitHubEffect::AddAssignees { logins, .. } => {
                self.assignees.lock().unwrap().extend(logins);
                GitHubResponse::AssigneesAdded
            }
            GitHubEffect::ListRepoProjects => GitHubResponse::Projects(self.repo_projects.clone()),
            GitHubEffect::ListOrgProjects { .. } => {
                GitHubResponse::Projects(self.org_projects.clone())
            }
            GitHubEffect::ListProjectColumns { .. } => GitHubResponse::Columns(self.columns.clone()),
            GitHubEffect::CreateProjectCard {
                column, content_id, ..
            } => {
                self.cards.lock().unwrap().push((column, content_id));
                GitHubResponse::CardCreated
            }
            GitHubEffect::GetFileContents { .. } => GitHubResponse::FileContents(String::new()),
        };
        async move { Ok(response) }
    }
}

// ─── Strategies ───────────────────────────────────────────────────────────────

pub fn arb_label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9:-]{0,12}".prop_map(String::from)
}

pub fn arb_label_set() -> impl Strategy<Value = LabelSet> {
    prop::collection::vec(arb_label(), 0..8).prop_map(LabelSet::from)
}
