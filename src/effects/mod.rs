//! Effects-as-data for GitHub operations.
//!
//! The action engine never talks to GitHub directly. It describes each call as
//! a [`GitHubEffect`] and hands it to a [`GitHubInterpreter`]. This enables:
//! - Testability via scripted interpreters that record every call
//! - Logging/tracing of intended operations

pub mod github;
pub mod interpreter;

pub use github::{ColumnData, GitHubEffect, GitHubResponse, IssueData, ProjectData};
pub use interpreter::GitHubInterpreter;
