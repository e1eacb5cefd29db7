//! Boundary error types.
//!
//! [§ 7 Error handling design] — "Errors fall into four categories, all
//! non-throwing; the engine returns benign values or no-ops rather than
//! propagating exceptions." That policy governs layout itself: a malformed
//! or degenerate tree never aborts a layout pass. The one place this crate
//! still surfaces a `Result` is node teardown, where violating the
//! ownership invariant ([§ 3 Data model] invariant 1: "a child's `parent`
//! points to a node whose `children` contains it exactly once") is a host
//! programming error worth reporting rather than silently ignoring or
//! panicking.

use crate::tree::NodeId;

/// Failure modes surfaced at the [`crate::tree::Tree`] boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StarlightError {
    /// [§ 4.C Tree operations] — "`free(node)` / `free_recursive(node)` —
    /// node must be detached." Raised instead of leaking or panicking when
    /// the host calls either on a node that still has a parent.
    #[error("node {0:?} still has a parent; remove it before freeing")]
    NodeStillAttached(NodeId),
}
