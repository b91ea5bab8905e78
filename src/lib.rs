//! Issue Steward - a GitHub Action that keeps issues and pull requests in line
//! with a declarative policy.
//!
//! On each triggering event it adds the configured labels, makes sure label
//! groups are represented, assigns pull requests to their authors and places
//! targets on project boards.

pub mod actions;
pub mod config;
pub mod effects;
pub mod github;
pub mod types;
pub mod webhooks;

#[cfg(test)]
mod test_utils;
