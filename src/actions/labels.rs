//! Label reconciliation.
//!
//! Labels are only ever added. The reconciler reads the labels currently on
//! the target, computes what should be there and installs the result with a
//! single replace call. Labels added by people are never removed.

use tracing::{debug, info, instrument};

use super::error::{ActionError, AggregateError};
use crate::config::LabelGroup;
use crate::effects::{GitHubEffect, GitHubInterpreter, GitHubResponse};
use crate::types::{LabelSet, Target};

/// What a reconciliation step did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconciliationResult {
    /// A replace call was issued and succeeded.
    pub replaced: bool,
    /// The group default was appended.
    pub default_added: bool,
}

impl ReconciliationResult {
    fn merge(self, other: ReconciliationResult) -> ReconciliationResult {
        ReconciliationResult {
            replaced: self.replaced || other.replaced,
            default_added: self.default_added || other.default_added,
        }
    }
}

/// Brings the labels of a target in line with the policy.
pub struct LabelReconciler<'a, G> {
    github: &'a G,
}

impl<'a, G: GitHubInterpreter> LabelReconciler<'a, G> {
    pub fn new(github: &'a G) -> Self {
        LabelReconciler { github }
    }

    /// Installs `desired ∪ current` on the target.
    ///
    /// Desired labels come first, followed by the current labels not already
    /// among them. The replace call is issued even if nothing changes.
    #[instrument(skip(self, target, desired), fields(target = %target, desired = %desired))]
    pub async fn reconcile(
        &self,
        target: &Target,
        desired: &LabelSet,
    ) -> Result<ReconciliationResult, ActionError> {
        let current = self.current_labels(target).await?;
        let installed = desired.union(&current);

        debug!(current = %current, installed = %installed, "replacing labels");
        self.replace_labels(target, &installed).await?;
        info!(labels = %installed, "labels reconciled");

        Ok(ReconciliationResult {
            replaced: true,
            default_added: false,
        })
    }

    /// Makes sure at least one label of `group` is on the target.
    ///
    /// Reads the labels afresh. If none of the group's labels is present the
    /// default is appended to the current labels. A disabled group makes no
    /// calls at all.
    #[instrument(skip(self, target, group), fields(target = %target, group = %group.labels))]
    pub async fn enforce_group(
        &self,
        target: &Target,
        group: &LabelGroup,
    ) -> Result<ReconciliationResult, ActionError> {
        if group.is_disabled() {
            debug!("label group is disabled");
            return Ok(ReconciliationResult::default());
        }

        let mut current = self.current_labels(target).await?;
        if current.intersects(&group.labels) {
            debug!(current = %current, "label group already satisfied");
            return Ok(ReconciliationResult::default());
        }

        current.insert(group.default.as_str());
        self.replace_labels(target, &current).await?;
        info!(default = %group.default, "added default label of group");

        Ok(ReconciliationResult {
            replaced: true,
            default_added: true,
        })
    }

    /// Runs [`reconcile`](Self::reconcile) and then
    /// [`enforce_group`](Self::enforce_group), whatever the outcome of the
    /// first. Fails if either failed, reporting both failures.
    pub async fn reconcile_issue(
        &self,
        target: &Target,
        desired: &LabelSet,
        group: Option<&LabelGroup>,
    ) -> Result<ReconciliationResult, ActionError> {
        let mut errors = AggregateError::new();

        let reconciled = errors.record(self.reconcile(target, desired).await);
        let enforced = match group {
            Some(group) => errors.record(self.enforce_group(target, group).await),
            None => Some(ReconciliationResult::default()),
        };

        errors.into_result()?;
        Ok(reconciled
            .unwrap_or_default()
            .merge(enforced.unwrap_or_default()))
    }

    // ─── Tracker calls ────────────────────────────────────────────────────────

    async fn current_labels(&self, target: &Target) -> Result<LabelSet, ActionError> {
        let effect = GitHubEffect::ListLabels {
            issue: target.number,
        };
        match self.github.interpret(effect).await {
            Ok(GitHubResponse::Labels(labels)) => Ok(LabelSet::from(labels)),
            Ok(_) => Err(ActionError::unexpected("list_labels")),
            Err(e) => Err(ActionError::GetLabels {
                issue: target.number,
                source: Box::new(e),
            }),
        }
    }

    async fn replace_labels(&self, target: &Target, labels: &LabelSet) -> Result<(), ActionError> {
        let effect = GitHubEffect::ReplaceLabels {
            issue: target.number,
            labels: labels.as_slice().to_vec(),
        };
        match self.github.interpret(effect).await {
            Ok(GitHubResponse::LabelsReplaced) => Ok(()),
            Ok(_) => Err(ActionError::unexpected("replace_labels")),
            Err(e) => Err(ActionError::ReplaceLabels {
                issue: target.number,
                source: Box::new(e),
            }),
        }
    }
}
