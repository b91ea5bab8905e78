//! GitHub API client and effect interpreter.
//!
//! This module provides the implementation for executing GitHub effects via the octocrab
//! library. It implements the `GitHubInterpreter` trait defined in the effects module.

mod client;
mod error;
mod interpreter;

pub use client::OctocrabClient;
pub use error::GitHubApiError;
pub use interpreter::interpret_github_effect;
