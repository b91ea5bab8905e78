//! Trigger filtering: does this event action warrant any work?

use tracing::info;

use crate::config::DEFAULT_TRIGGER_ACTION;

/// Returns true if `action` is one of the `configured` trigger actions.
///
/// An empty list behaves as `["opened"]`. Matching is exact and
/// case-sensitive. A rejected action is not an error, only logged.
pub fn allows(action: &str, configured: &[String]) -> bool {
    let allowed = if configured.is_empty() {
        action == DEFAULT_TRIGGER_ACTION
    } else {
        configured.iter().any(|a| a == action)
    };

    if !allowed {
        let eligible: Vec<&str> = if configured.is_empty() {
            vec![DEFAULT_TRIGGER_ACTION]
        } else {
            configured.iter().map(String::as_str).collect()
        };
        info!(action, ?eligible, "event action is not eligible");
    }

    allowed
}

/// The trigger list of a step: its own list, or `inherited` if it has none.
pub fn triggers<'a>(own: &'a [String], inherited: &'a [String]) -> &'a [String] {
    if own.is_empty() { inherited } else { own }
}
