//! Deduplicated warnings for degenerate layout input.
//!
//! [§ 7 Error handling design] treats most malformed input as a benign,
//! non-throwing case: the engine clamps or substitutes a sane default rather
//! than failing the layout pass. That still leaves something worth telling
//! the host about, without flooding its log on every frame a degenerate
//! value recurs. `warn_once` records each distinct message and only emits it
//! the first time it's seen.

use std::collections::HashSet;
use std::sync::Mutex;

/// Global set of warnings already emitted (to deduplicate).
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about a degenerate or unsupported input, once per unique message.
///
/// # Example
/// ```
/// starlight_common::warning::warn_once("starlight", "ignoring non-positive scale 0");
/// ```
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_log = WARNED
        .lock()
        .unwrap()
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if should_log {
        log::warn!(target: "starlight", "[{component}] {message}");
    }
}

/// Clear all recorded warnings (call when starting a fresh layout tree).
///
/// # Panics
/// Panics if the global warning set mutex is poisoned.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap();
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{clear_warnings, warn_once};

    #[test]
    fn warn_once_does_not_panic_on_repeat() {
        clear_warnings();
        warn_once("test", "same message");
        warn_once("test", "same message");
        warn_once("test", "different message");
    }

    #[test]
    fn clear_warnings_allows_rewarning() {
        clear_warnings();
        warn_once("test", "repeatable message");
        clear_warnings();
        warn_once("test", "repeatable message");
    }
}
