//! The node arena: ownership, parent back-references, dirty propagation,
//! and per-node layout caching.
//!
//! [§ 3 Data model] — "Node. An independently owned entity..."
//! [§ 9 Design notes] — "Re-architect as an index into an arena or as a
//! weak handle; the parent owns a list of strong child handles."
//!
//! Node identity is a [`slotmap`] key rather than an owning pointer, which
//! gives us generational reuse safety (a stale `NodeId` from a freed node
//! can never alias a newly-created one) without unsafe code or reference
//! counting. This follows the same arena shape real flex engines in the
//! Rust ecosystem use for exactly this problem — see `DESIGN.md`.

use slotmap::{new_key_type, SlotMap};

use crate::error::StarlightError;
use crate::length::{Constraint, Direction};
use crate::measure::MeasureDelegate;
use crate::style::ComputedStyle;

new_key_type! {
    /// A stable, generational handle to a node in a [`Tree`].
    pub struct NodeId;
}

/// The resolved output of a layout pass for one node.
///
/// [§ 3 Data model] — "cached last-layout input signature... and last
/// output (offset, size, paddings, margins, borders, baseline)."
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutResult {
    /// Horizontal offset relative to the parent's content origin (plus the
    /// parent's border and padding — see [§ 4.H Public contract]).
    pub left: f32,
    /// Vertical offset, same coordinate space as `left`.
    pub top: f32,
    /// Resolved border-box width.
    pub width: f32,
    /// Resolved border-box height.
    pub height: f32,
    /// Resolved margin per physical edge.
    pub margin: crate::length::Edges<f32>,
    /// Resolved padding per physical edge.
    pub padding: crate::length::Edges<f32>,
    /// Resolved border per physical edge.
    pub border: crate::length::Edges<f32>,
    /// Distance from the top of the border box to the dominant baseline,
    /// when known.
    pub baseline: Option<f32>,
}

/// The signature a cached [`LayoutResult`] was produced under.
///
/// [§ 9 Design notes] — "The input-signature cache on each node is keyed
/// by `(constraint, direction)`; matching tuples and clean subtree ⇒ reuse
/// cached output."
#[derive(Debug, Clone, Copy, PartialEq)]
struct CacheKey {
    width: Constraint,
    height: Constraint,
    direction: Direction,
}

struct NodeData {
    style: ComputedStyle,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    dirty: bool,
    measure: Option<MeasureDelegate>,
    /// Opaque, host-supplied context pointer-equivalent. Stored separately
    /// from the measure delegate per [§ 4.H]'s `set_context`/`get_context`.
    context: Option<Box<dyn std::any::Any>>,
    cache_key: Option<CacheKey>,
    cache_result: Option<LayoutResult>,
}

impl NodeData {
    fn new(style: ComputedStyle) -> Self {
        NodeData {
            style,
            parent: None,
            children: Vec::new(),
            dirty: true,
            measure: None,
            context: None,
            cache_key: None,
            cache_result: None,
        }
    }
}

/// The node arena.
///
/// A single `Tree` may hold any number of disjoint root trees; there is no
/// requirement that every node be reachable from one root. Two independent
/// `Tree` values may be laid out concurrently on separate threads per
/// [§ 5 Concurrency model], since nothing here is shared across instances.
#[derive(Default)]
pub struct Tree {
    nodes: SlotMap<NodeId, NodeData>,
}

impl Tree {
    /// An empty arena.
    #[must_use]
    pub fn new() -> Self {
        Tree {
            nodes: SlotMap::with_key(),
        }
    }

    /// [§ 4.C Tree operations] — "`new` / `new_with_config` — returns a
    /// free root with default styles."
    #[must_use]
    pub fn new_node(&mut self) -> NodeId {
        self.nodes.insert(NodeData::new(ComputedStyle::default()))
    }

    fn data(&self, node: NodeId) -> &NodeData {
        self.nodes
            .get(node)
            .expect("NodeId used after its node was freed")
    }

    fn data_mut(&mut self, node: NodeId) -> &mut NodeData {
        self.nodes
            .get_mut(node)
            .expect("NodeId used after its node was freed")
    }

    /// Read-only access to a node's style.
    #[must_use]
    pub fn style(&self, node: NodeId) -> &ComputedStyle {
        &self.data(node).style
    }

    /// Mutable access to a node's style. Callers that change an observable
    /// property should call [`Tree::mark_dirty`] afterward; [`crate::api`]
    /// setters do this automatically, only marking dirty when the value
    /// actually changed.
    pub fn style_mut(&mut self, node: NodeId) -> &mut ComputedStyle {
        &mut self.data_mut(node).style
    }

    /// [§ 4.C] — "`reset(node)` — restores all styles to defaults;
    /// preserves parent linkage; marks dirty."
    pub fn reset(&mut self, node: NodeId) {
        self.data_mut(node).style = ComputedStyle::default();
        self.data_mut(node).measure = None;
        self.mark_dirty(node);
    }

    /// [§ 4.C] — "`parent` — O(1)."
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data(node).parent
    }

    /// [§ 4.C] — "`child_count` — O(1)."
    #[must_use]
    pub fn child_count(&self, node: NodeId) -> usize {
        self.data(node).children.len()
    }

    /// [§ 4.C] — "`get_child(node, idx)` — child or null when out of
    /// range."
    #[must_use]
    pub fn get_child(&self, node: NodeId, index: usize) -> Option<NodeId> {
        self.data(node).children.get(index).copied()
    }

    /// All direct children, in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.data(node).children
    }

    /// `true` iff `ancestor` is `node` itself or a transitive parent of it.
    fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.data(current).parent;
        }
        false
    }

    /// [§ 4.C] — "`insert_child(parent, child, idx)` — removes child from
    /// previous parent first; marks parent dirty. Cycle ⇒ fail silently
    /// (no-op)."
    ///
    /// `idx == -1` appends. Out-of-range non-negative indices clamp to the
    /// end, matching "append" behavior rather than panicking — consistent
    /// with [§ 7 Error handling]'s "no-op, tree unchanged" policy for
    /// structural misuse.
    pub fn insert_child(&mut self, parent: NodeId, child: NodeId, idx: isize) {
        if parent == child || self.is_ancestor_of(child, parent) {
            // Inserting a node under itself or under its own descendant
            // would create a cycle.
            return;
        }

        if let Some(previous_parent) = self.data(child).parent {
            self.remove_child(previous_parent, child);
        }

        let children = &mut self.data_mut(parent).children;
        let index = if idx < 0 {
            children.len()
        } else {
            (idx as usize).min(children.len())
        };
        children.insert(index, child);
        self.data_mut(child).parent = Some(parent);
        self.mark_dirty(parent);
    }

    /// [§ 4.C] — "`remove_child(parent, child)` — child becomes free root;
    /// parent dirty. Child not a child ⇒ no-op."
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let children = &mut self.data_mut(parent).children;
        let Some(position) = children.iter().position(|&c| c == child) else {
            return;
        };
        children.remove(position);
        self.data_mut(child).parent = None;
        self.mark_dirty(parent);
    }

    /// [§ 4.C] — "`remove_all_children(parent)` — all direct children
    /// become free; parent dirty."
    pub fn remove_all_children(&mut self, parent: NodeId) {
        let children = std::mem::take(&mut self.data_mut(parent).children);
        for child in &children {
            self.data_mut(*child).parent = None;
        }
        self.mark_dirty(parent);
    }

    /// [§ 4.C] — "`mark_dirty(node)` — sets dirty on node and every
    /// ancestor."
    ///
    /// [§ 3 Invariants] — "`dirty(node) ⇒ ∀ ancestor. dirty(ancestor)`."
    pub fn mark_dirty(&mut self, node: NodeId) {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            let data = self.data_mut(current);
            // Once a node is dirty, its ancestors already are too (if this
            // call chain has visited them before); stop early is *not*
            // sound in general because a node can be marked dirty directly
            // without its ancestors having changed, so we always walk to
            // the root.
            data.dirty = true;
            data.cache_key = None;
            cursor = data.parent;
        }
    }

    /// [§ 4.H] — "`is_dirty`."
    #[must_use]
    pub fn is_dirty(&self, node: NodeId) -> bool {
        self.data(node).dirty
    }

    /// Clear the dirty bit on exactly this node (does not affect children
    /// or ancestors). Called by [`crate::flex`] once a subtree has been
    /// fully laid out.
    pub(crate) fn clear_dirty(&mut self, node: NodeId) {
        self.data_mut(node).dirty = false;
    }

    /// Clear the dirty bit on `node` and every descendant.
    ///
    /// [§ 6 External interfaces] — after `calculate_layout` completes, no
    /// node in the laid-out subtree is dirty.
    pub(crate) fn clear_dirty_recursive(&mut self, node: NodeId) {
        self.clear_dirty(node);
        let children = self.data(node).children.clone();
        for child in children {
            self.clear_dirty_recursive(child);
        }
    }

    /// Register (or clear, with `None`) the measurement delegate for a
    /// leaf. [§ 4.E Leaf measurement]
    pub fn set_measure_delegate(&mut self, node: NodeId, delegate: Option<MeasureDelegate>) {
        self.data_mut(node).measure = delegate;
        self.mark_dirty(node);
    }

    /// `true` iff the node has a registered measurement delegate.
    #[must_use]
    pub fn has_measure_func(&self, node: NodeId) -> bool {
        self.data(node).measure.is_some()
    }

    pub(crate) fn measure_delegate(&self, node: NodeId) -> Option<&MeasureDelegate> {
        self.data(node).measure.as_ref()
    }

    /// The style-cascade direction in effect at `node`: its own explicit
    /// `direction`, or the nearest ancestor's, or [`Direction::Ltr`] at the
    /// root. [§ 6 External interfaces] — backs `is_rtl`.
    ///
    /// Unlike [`crate::style::ComputedStyle::effective_direction`], which
    /// resolves against the direction passed into a specific
    /// `calculate_layout` call, this walks the static tree — it answers
    /// "what would this node's direction be" independent of any layout
    /// pass.
    #[must_use]
    pub fn resolved_direction(&self, node: NodeId) -> Direction {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if let Some(direction) = self.data(current).style.direction {
                return direction;
            }
            cursor = self.data(current).parent;
        }
        Direction::Ltr
    }

    /// [§ 4.H] — "`set_context`/`get_context`" — an opaque host-owned
    /// value attached to the node, independent of the measure delegate.
    pub fn set_context(&mut self, node: NodeId, context: Option<Box<dyn std::any::Any>>) {
        self.data_mut(node).context = context;
    }

    /// Borrow the opaque context value, if any, downcast to `T`.
    #[must_use]
    pub fn get_context<T: 'static>(&self, node: NodeId) -> Option<&T> {
        self.data(node).context.as_deref()?.downcast_ref::<T>()
    }

    pub(crate) fn cached_result(
        &self,
        node: NodeId,
        width: Constraint,
        height: Constraint,
        direction: Direction,
    ) -> Option<LayoutResult> {
        let data = self.data(node);
        if data.dirty {
            return None;
        }
        let key = CacheKey {
            width,
            height,
            direction,
        };
        if data.cache_key == Some(key) {
            data.cache_result
        } else {
            None
        }
    }

    pub(crate) fn store_result(
        &mut self,
        node: NodeId,
        width: Constraint,
        height: Constraint,
        direction: Direction,
        result: LayoutResult,
    ) {
        let data = self.data_mut(node);
        data.cache_key = Some(CacheKey {
            width,
            height,
            direction,
        });
        data.cache_result = Some(result);
    }

    /// The last computed layout result for this node, if any layout pass
    /// has completed.
    #[must_use]
    pub fn layout_result(&self, node: NodeId) -> Option<LayoutResult> {
        self.data(node).cache_result
    }

    /// [§ 4.C] — "`free(node)` — node must be detached" (leaves descendants
    /// alone; a detached-only free of a node with children leaks them,
    /// matching the source's documented behavior).
    ///
    /// # Errors
    ///
    /// Returns [`StarlightError::NodeStillAttached`] if `node` has a
    /// parent; the node is left untouched in that case.
    pub fn free(&mut self, node: NodeId) -> Result<(), StarlightError> {
        if self.data(node).parent.is_some() {
            return Err(StarlightError::NodeStillAttached(node));
        }
        self.nodes.remove(node);
        Ok(())
    }

    /// [§ 4.C] — "`free_recursive(node)` — recursive form destroys
    /// descendants first; node must be detached."
    ///
    /// # Errors
    ///
    /// Returns [`StarlightError::NodeStillAttached`] if `node` has a
    /// parent; the node and its descendants are left untouched in that
    /// case.
    pub fn free_recursive(&mut self, node: NodeId) -> Result<(), StarlightError> {
        if self.data(node).parent.is_some() {
            return Err(StarlightError::NodeStillAttached(node));
        }
        self.free_recursive_unchecked(node);
        Ok(())
    }

    fn free_recursive_unchecked(&mut self, node: NodeId) {
        let children = std::mem::take(&mut self.data_mut(node).children);
        for child in children {
            self.free_recursive_unchecked(child);
        }
        self.nodes.remove(node);
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;

    #[test]
    fn insert_removes_from_previous_parent() {
        let mut tree = Tree::new();
        let a = tree.new_node();
        let b = tree.new_node();
        let child = tree.new_node();
        tree.insert_child(a, child, -1);
        assert_eq!(tree.child_count(a), 1);
        tree.insert_child(b, child, -1);
        assert_eq!(tree.child_count(a), 0);
        assert_eq!(tree.child_count(b), 1);
        assert_eq!(tree.parent(child), Some(b));
    }

    #[test]
    fn cycle_insertion_is_a_no_op() {
        let mut tree = Tree::new();
        let a = tree.new_node();
        let b = tree.new_node();
        tree.insert_child(a, b, -1);
        // Inserting `a` under its own child `b` would create a cycle.
        tree.insert_child(b, a, -1);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.child_count(b), 0);
    }

    #[test]
    fn mark_dirty_propagates_to_root() {
        let mut tree = Tree::new();
        let root = tree.new_node();
        let mid = tree.new_node();
        let leaf = tree.new_node();
        tree.insert_child(root, mid, -1);
        tree.insert_child(mid, leaf, -1);
        tree.clear_dirty_recursive(root);
        assert!(!tree.is_dirty(leaf));

        tree.mark_dirty(leaf);
        assert!(tree.is_dirty(leaf));
        assert!(tree.is_dirty(mid));
        assert!(tree.is_dirty(root));
    }

    #[test]
    fn remove_all_children_frees_them_as_roots() {
        let mut tree = Tree::new();
        let root = tree.new_node();
        let a = tree.new_node();
        let b = tree.new_node();
        tree.insert_child(root, a, -1);
        tree.insert_child(root, b, -1);
        tree.remove_all_children(root);
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.parent(a), None);
        assert_eq!(tree.parent(b), None);
    }
}
