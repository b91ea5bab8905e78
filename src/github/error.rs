//! GitHub API error type.
//!
//! Every tracker call fails the same way from the engine's point of view: a
//! transport or authorization problem with an optional HTTP status. The engine
//! never retries, so no transient/permanent split is kept here; callers wrap
//! the error with a description of the call that failed.

use std::fmt;
use thiserror::Error;

/// A GitHub API error.
#[derive(Debug, Error)]
pub struct GitHubApiError {
    /// The HTTP status code, if available.
    pub status_code: Option<u16>,

    /// A human-readable description of the error.
    pub message: String,

    /// The underlying octocrab error, if available.
    #[source]
    pub source: Option<octocrab::Error>,
}

impl fmt::Display for GitHubApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "GitHub API error (HTTP {}): {}", code, self.message),
            None => write!(f, "GitHub API error: {}", self.message),
        }
    }
}

impl GitHubApiError {
    /// Creates an error with a status code but no octocrab source.
    ///
    /// Used for responses that arrived fine but could not be interpreted, and
    /// by test interpreters.
    pub fn new(status_code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates an error without a status code or octocrab source.
    pub fn without_source(message: impl Into<String>) -> Self {
        Self::new(None, message)
    }

    /// Converts an octocrab error, keeping GitHub's own message when the API
    /// answered with an error body.
    pub fn from_octocrab(err: octocrab::Error) -> Self {
        let (status_code, message) = match &err {
            octocrab::Error::GitHub { source, .. } => {
                (Some(source.status_code.as_u16()), source.message.clone())
            }
            other => (extract_status_code(&other.to_string()), other.to_string()),
        };

        Self {
            status_code,
            message,
            source: Some(err),
        }
    }
}

/// Extracts an HTTP status code from an error message, if one is present.
///
/// Only used for octocrab errors that are not structured GitHub error bodies
/// (for example a failed JSON decode of an otherwise successful response),
/// where the status may still appear in the text as `status: NNN`.
fn extract_status_code(err_str: &str) -> Option<u16> {
    let idx = err_str.find("status: ")?;
    let digits: String = err_str[idx + 8..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}
