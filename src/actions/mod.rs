//! Policy actions: labelling, assignment and project placement.
//!
//! # Architecture
//!
//! Each action is a small async component that describes its tracker calls as
//! [`GitHubEffect`](crate::effects::GitHubEffect) values and awaits them one at
//! a time through a [`GitHubInterpreter`](crate::effects::GitHubInterpreter):
//!
//! - [`filter`] decides whether an event action triggers anything
//! - [`LabelReconciler`] adds configured labels and enforces label groups
//! - [`assign_author`] assigns a pull request to whoever opened it
//! - [`ProjectResolver`] and [`ProjectPlacer`] put a target on a project board
//! - [`ActionEngine`] ties them together for one webhook event
//!
//! # Key Invariants
//!
//! 1. **Additive labels**: reconciliation installs the union of the configured
//!    and current labels. It never removes a label.
//!
//! 2. **No short-circuit between actions**: when several actions apply to one
//!    target, all of them run and every failure is reported in an
//!    [`AggregateError`]. Within one action the first failure stops it.

pub mod assignee;
pub mod engine;
pub mod error;
pub mod filter;
pub mod labels;
pub mod projects;


pub use assignee::assign_author;
pub use engine::ActionEngine;
pub use error::{ActionError, AggregateError, BoxError};
pub use labels::{LabelReconciler, ReconciliationResult};
pub use projects::{ProjectPlacer, ProjectRef, ProjectResolver, ProjectScope};
