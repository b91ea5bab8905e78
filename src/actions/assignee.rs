//! Automatic assignment of a target to its author.

use tracing::{info, instrument};

use super::error::ActionError;
use super::projects::get_issue;
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::Target;

/// Assigns `target` to the user who opened it.
///
/// Reads the target to learn the author, then adds that login as an
/// assignee. The two calls are not atomic.
#[instrument(skip(github, target), fields(target = %target))]
pub async fn assign_author<G: GitHubInterpreter>(
    github: &G,
    target: &Target,
) -> Result<String, ActionError> {
    let issue = get_issue(github, target).await?;
    let login = issue.author_login;

    let effect = GitHubEffect::AddAssignees {
        issue: target.number,
        logins: vec![login.clone()],
    };
    match github.interpret(effect).await {
        Ok(GitHubResponse::AssigneesAdded) => {}
        Ok(_) => return Err(ActionError::unexpected("add_assignees")),
        Err(e) => {
            return Err(ActionError::Assign {
                login,
                issue: target.number,
                source: Box::new(e),
            });
        }
    }

    info!(assignee = %login, "assigned to author");
    Ok(login)
}
