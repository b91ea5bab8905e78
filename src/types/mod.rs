//! Core domain types.
//!
//! Identifiers, target handles and label sets shared by the webhook parser,
//! the effect layer and the action engine.

pub mod ids;
pub mod labels;
pub mod target;

pub use ids::{ColumnId, InvalidRepoId, IssueId, IssueNumber, ProjectId, RepoId};
pub use labels::LabelSet;
pub use target::{Target, TargetKind};
