//! The action engine: applies the policy to the target of one webhook event.
//!
//! The engine owns the policy and the interpreter for the lifetime of a run.
//! It is effectful, unlike a pure planner: each step awaits its tracker calls
//! before the next one starts, so calls are issued strictly in order.

use tracing::{debug, info, instrument};

use super::assignee::assign_author;
use super::error::{ActionError, AggregateError};
use super::filter;
use super::labels::LabelReconciler;
use super::projects::ProjectPlacer;
use crate::config::Policy;
use crate::effects::GitHubInterpreter;
use crate::types::{RepoId, Target};
use crate::webhooks::{IssuesEvent, PullRequestEvent, WebhookEvent, parse_webhook};

/// Applies a [`Policy`] to issues and pull requests of one repository.
pub struct ActionEngine<G> {
    policy: Policy,
    repo: RepoId,
    github: G,
}

impl<G: GitHubInterpreter> ActionEngine<G> {
    /// Creates an engine for `repo`. `github` must be scoped to the same
    /// repository.
    pub fn new(policy: Policy, repo: RepoId, github: G) -> Self {
        ActionEngine {
            policy,
            repo,
            github,
        }
    }

    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    pub fn repo(&self) -> &RepoId {
        &self.repo
    }

    /// Returns the interpreter the engine issues its calls through.
    pub fn github(&self) -> &G {
        &self.github
    }

    /// Parses `payload` as an `event_name` event and handles it.
    ///
    /// A payload that cannot be parsed is returned as [`ActionError::Parse`]
    /// before any tracker call is made.
    #[instrument(skip(self, payload), fields(repo = %self.repo))]
    pub async fn dispatch(&self, event_name: &str, payload: &[u8]) -> Result<(), ActionError> {
        let event = parse_webhook(event_name, payload)?;
        self.handle(event).await
    }

    /// Handles an already parsed event.
    pub async fn handle(&self, event: WebhookEvent) -> Result<(), ActionError> {
        match event {
            WebhookEvent::Issues(event) => self.on_issue(&event).await,
            WebhookEvent::PullRequest(event) => self.on_pull_request(&event).await,
            WebhookEvent::Other { event_name } => {
                debug!(event = %event_name, "event type not handled");
                Ok(())
            }
        }
    }

    /// Labels the issue, then places it on the project board if one is
    /// configured. Each step has its own trigger list, falling back to the
    /// section's. Placement is attempted even if labelling failed.
    async fn on_issue(&self, event: &IssuesEvent) -> Result<(), ActionError> {
        let policy = &self.policy.issues;
        let action = event.action.as_str();

        let label = filter::allows(action, &policy.actions);
        let project = policy
            .project
            .as_ref()
            .filter(|p| filter::allows(action, filter::triggers(&p.actions, &policy.actions)));
        if !label && project.is_none() {
            return Ok(());
        }

        let target = event.target(&self.repo);
        info!(target = %target, action, "processing issue");

        let mut errors = AggregateError::new();
        if label {
            errors.record(
                LabelReconciler::new(&self.github)
                    .reconcile_issue(&target, &policy.labels, policy.at_least_one.as_ref())
                    .await,
            );
        }
        if let Some(project) = project {
            errors.record(ProjectPlacer::new(&self.github).place(&target, project).await);
        }

        finish(&target, errors)
    }

    /// Labels the pull request, assigns it to its author if configured, and
    /// places it on the project board if one is configured. Each step has its
    /// own trigger list, falling back to the section's, and is attempted
    /// whatever happened to the previous ones.
    async fn on_pull_request(&self, event: &PullRequestEvent) -> Result<(), ActionError> {
        let policy = &self.policy.pull_requests;
        let action = event.action.as_str();

        let label = filter::allows(action, &policy.actions);
        let assign = policy.assignee.auto
            && filter::allows(
                action,
                filter::triggers(&policy.assignee.actions, &policy.actions),
            );
        let project = policy
            .project
            .as_ref()
            .filter(|p| filter::allows(action, filter::triggers(&p.actions, &policy.actions)));
        if !label && !assign && project.is_none() {
            return Ok(());
        }

        let target = event.target(&self.repo);
        info!(target = %target, action, "processing pull request");

        let mut errors = AggregateError::new();
        if label {
            errors.record(
                LabelReconciler::new(&self.github)
                    .reconcile(&target, &policy.labels)
                    .await,
            );
        }
        if assign {
            errors.record(assign_author(&self.github, &target).await);
        }
        if let Some(project) = project {
            errors.record(ProjectPlacer::new(&self.github).place(&target, project).await);
        }

        finish(&target, errors)
    }
}

fn finish(target: &Target, errors: AggregateError) -> Result<(), ActionError> {
    if errors.is_empty() {
        info!(target = %target, "policy applied");
    } else {
        debug!(target = %target, failures = errors.len(), "policy partially applied");
    }
    errors.into_result()
}
