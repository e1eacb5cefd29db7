//! The stable node/config handle surface.
//!
//! [§ 4.H Public contract] / [§ 6 External interfaces] — the style setter
//! and getter families, the layout entry point, and the layout result
//! readers a host (or the C-ABI veneer wrapping this crate, which is out
//! of this crate's scope — see the crate-level docs) drives a tree
//! through.
//!
//! [`crate::tree::Tree`] plus a [`crate::tree::NodeId`] together *are* the
//! "opaque handle type" of [§ 4.H]: a `NodeId` is a small `Copy` key with
//! no meaning outside the `Tree` that minted it, identical in spirit to an
//! opaque pointer, but generation-checked instead of dangling-unsafe. This
//! module only adds the property-setter/getter/layout-reader surface on
//! top of the arena primitives [`crate::tree`] already provides.

use crate::length::{Direction, Edge, Length, PhysicalEdge, StarlightValue, INDEFINITE};
use crate::measure::Measure;
use crate::style::{
    AlignContent, AlignItems, AlignSelf, BoxSizing, ComputedStyle, Display, FlexDirection,
    FlexWrap, Gap, JustifyContent, PositionType,
};
use crate::tree::{LayoutResult, NodeId, Tree};
use crate::{box_model::Rect, flex, length::Constraint};

/// A read-only snapshot of one node's resolved layout.
///
/// [§ 3 Data model] — "cached last-layout input signature... and last
/// output (offset, size, paddings, margins, borders, baseline)."
pub type Layout = LayoutResult;

/// A layout configuration.
///
/// [§ 9 Design notes] — "The config object currently holds one scalar
/// (physical-pixels-per-layout-unit) but the structure is reserved for
/// future expansion. Model it as a value type, passed by reference to
/// node construction." No layout arithmetic in this crate consults the
/// scale factor directly — it exists for the host (or a registered
/// [`crate::measure::Measure`] delegate) to align intrinsic measurements
/// to a physical pixel grid before reporting sizes back to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    physical_pixels_per_layout_unit: f32,
}

impl Default for Config {
    /// [§ 6 External interfaces] — "Default physical-pixels-per-layout-unit
    /// is `1`."
    fn default() -> Self {
        Config {
            physical_pixels_per_layout_unit: 1.0,
        }
    }
}

impl Config {
    /// A config with the default scale factor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scale factor. Non-finite or non-positive values are
    /// rejected and the previous value is kept, matching [§ 7 Error
    /// handling]'s "degenerate geometry ⇒ clamp/ignore, continue" policy
    /// for malformed numeric input.
    pub fn set_physical_pixels_per_layout_unit(&mut self, value: f32) {
        if value.is_finite() && value > 0.0 {
            self.physical_pixels_per_layout_unit = value;
        } else {
            starlight_common::warning::warn_once(
                "starlight",
                &format!("ignoring non-positive physical-pixels-per-layout-unit {value}"),
            );
        }
    }

    /// The current scale factor.
    #[must_use]
    pub fn physical_pixels_per_layout_unit(&self) -> f32 {
        self.physical_pixels_per_layout_unit
    }
}

impl Tree {
    /// [§ 4.C Tree operations] — "`new_with_config` — optional config;
    /// returns a free root with default styles." The config is not
    /// retained on the node (see [`Config`]'s docs); this exists only to
    /// mirror the constructor pair the public contract names.
    #[must_use]
    pub fn new_node_with_config(&mut self, _config: &Config) -> NodeId {
        self.new_node()
    }

    /// [§ 6 External interfaces] — "Direction query: `is_rtl`."
    #[must_use]
    pub fn is_rtl(&self, node: NodeId) -> bool {
        self.resolved_direction(node) == Direction::Rtl
    }

    /// [§ 6 External interfaces] — "Layout entry: `calculate_layout(node,
    /// owner_width, owner_height, owner_direction)`. `INDEFINITE`... passed
    /// as `owner_width` or `owner_height` means 'indefinite'."
    pub fn calculate_layout(
        &mut self,
        node: NodeId,
        owner_width: f32,
        owner_height: f32,
        owner_direction: Direction,
    ) -> Layout {
        let width = Length::from_sentinel(owner_width).map_or(Constraint::indefinite(), Constraint::exactly);
        let height = Length::from_sentinel(owner_height).map_or(Constraint::indefinite(), Constraint::exactly);
        flex::layout_node(self, node, width, height, owner_direction)
    }

    /// Register a measurement delegate for a replaced leaf.
    /// [§ 4.H] — "`set_measure_func(node, delegate)`."
    pub fn set_measure_func(&mut self, node: NodeId, delegate: impl Measure + 'static) {
        self.set_measure_delegate(node, Some(crate::measure::MeasureDelegate::new(delegate)));
    }

    /// Clear a node's measurement delegate, if any.
    pub fn clear_measure_func(&mut self, node: NodeId) {
        self.set_measure_delegate(node, None);
    }

    // ---- layout result readers -------------------------------------
    // [§ 6 External interfaces] — "Layout result readers. `layout_left`,
    // `layout_top`, `layout_width`, `layout_height`, and per-edge
    // `layout_margin`, `layout_padding`, `layout_border`."

    /// Resolved left offset, relative to the parent's border-box origin
    /// (`0.0` for a node with no layout result yet).
    #[must_use]
    pub fn layout_left(&self, node: NodeId) -> f32 {
        self.layout_result(node).map_or(0.0, |r| r.left)
    }

    /// Resolved top offset, same coordinate space as [`Tree::layout_left`].
    #[must_use]
    pub fn layout_top(&self, node: NodeId) -> f32 {
        self.layout_result(node).map_or(0.0, |r| r.top)
    }

    /// Resolved border-box width.
    #[must_use]
    pub fn layout_width(&self, node: NodeId) -> f32 {
        self.layout_result(node).map_or(0.0, |r| r.width)
    }

    /// Resolved border-box height.
    #[must_use]
    pub fn layout_height(&self, node: NodeId) -> f32 {
        self.layout_result(node).map_or(0.0, |r| r.height)
    }

    /// Resolved margin on one physical or logical edge.
    #[must_use]
    pub fn layout_margin(&self, node: NodeId, edge: Edge) -> f32 {
        let direction = self.resolved_direction(node);
        self.layout_result(node).map_or(0.0, |r| *r.margin.get_logical(edge, direction))
    }

    /// Resolved padding on one physical or logical edge.
    #[must_use]
    pub fn layout_padding(&self, node: NodeId, edge: Edge) -> f32 {
        let direction = self.resolved_direction(node);
        self.layout_result(node).map_or(0.0, |r| *r.padding.get_logical(edge, direction))
    }

    /// Resolved border width on one physical or logical edge.
    #[must_use]
    pub fn layout_border(&self, node: NodeId, edge: Edge) -> f32 {
        let direction = self.resolved_direction(node);
        self.layout_result(node).map_or(0.0, |r| *r.border.get_logical(edge, direction))
    }

    /// The resolved border box, in the same coordinate space as
    /// [`Tree::layout_left`]/[`Tree::layout_top`]. A convenience bundling
    /// of the four scalar readers above.
    #[must_use]
    pub fn layout_rect(&self, node: NodeId) -> Rect {
        Rect {
            x: self.layout_left(node),
            y: self.layout_top(node),
            width: self.layout_width(node),
            height: self.layout_height(node),
        }
    }

    // ---- scalar style setters/getters -------------------------------

    fn set_scalar<T: Copy + PartialEq>(&mut self, node: NodeId, value: T, field: impl Fn(&mut ComputedStyle) -> &mut T) {
        let changed = {
            let slot = field(self.style_mut(node));
            let changed = *slot != value;
            if changed {
                *slot = value;
            }
            changed
        };
        if changed {
            self.mark_dirty(node);
        }
    }

    /// `display` (`None`|`Flex`).
    pub fn set_display(&mut self, node: NodeId, value: Display) {
        self.set_scalar(node, value, |s| &mut s.display);
    }
    /// Current `display`.
    #[must_use]
    pub fn display(&self, node: NodeId) -> Display {
        self.style(node).display
    }

    /// `position` (`Relative`|`Absolute`).
    pub fn set_position_type(&mut self, node: NodeId, value: PositionType) {
        self.set_scalar(node, value, |s| &mut s.position);
    }
    /// Current `position`.
    #[must_use]
    pub fn position_type(&self, node: NodeId) -> PositionType {
        self.style(node).position
    }

    /// `box_sizing` (`BorderBox`|`ContentBox`).
    pub fn set_box_sizing(&mut self, node: NodeId, value: BoxSizing) {
        self.set_scalar(node, value, |s| &mut s.box_sizing);
    }
    /// Current `box_sizing`.
    #[must_use]
    pub fn box_sizing(&self, node: NodeId) -> BoxSizing {
        self.style(node).box_sizing
    }

    /// Explicit `direction`; inherits from the parent when never set.
    pub fn set_direction(&mut self, node: NodeId, value: Direction) {
        let changed = {
            let slot = &mut self.style_mut(node).direction;
            let changed = *slot != Some(value);
            *slot = Some(value);
            changed
        };
        if changed {
            self.mark_dirty(node);
        }
    }

    /// `flex_direction`. Default `Column`.
    pub fn set_flex_direction(&mut self, node: NodeId, value: FlexDirection) {
        self.set_scalar(node, value, |s| &mut s.flex_direction);
    }
    /// Current `flex_direction`.
    #[must_use]
    pub fn flex_direction(&self, node: NodeId) -> FlexDirection {
        self.style(node).flex_direction
    }

    /// `flex_wrap`. Default `NoWrap`.
    pub fn set_flex_wrap(&mut self, node: NodeId, value: FlexWrap) {
        self.set_scalar(node, value, |s| &mut s.flex_wrap);
    }
    /// Current `flex_wrap`.
    #[must_use]
    pub fn flex_wrap(&self, node: NodeId) -> FlexWrap {
        self.style(node).flex_wrap
    }

    /// `justify_content`. Default `FlexStart`.
    pub fn set_justify_content(&mut self, node: NodeId, value: JustifyContent) {
        self.set_scalar(node, value, |s| &mut s.justify_content);
    }
    /// Current `justify_content`.
    #[must_use]
    pub fn justify_content(&self, node: NodeId) -> JustifyContent {
        self.style(node).justify_content
    }

    /// `align_content`. Default `Stretch`.
    pub fn set_align_content(&mut self, node: NodeId, value: AlignContent) {
        self.set_scalar(node, value, |s| &mut s.align_content);
    }
    /// Current `align_content`.
    #[must_use]
    pub fn align_content(&self, node: NodeId) -> AlignContent {
        self.style(node).align_content
    }

    /// `align_items`. Default `Stretch`.
    pub fn set_align_items(&mut self, node: NodeId, value: AlignItems) {
        self.set_scalar(node, value, |s| &mut s.align_items);
    }
    /// Current `align_items`.
    #[must_use]
    pub fn align_items(&self, node: NodeId) -> AlignItems {
        self.style(node).align_items
    }

    /// `align_self`. Default `Auto`.
    pub fn set_align_self(&mut self, node: NodeId, value: AlignSelf) {
        self.set_scalar(node, value, |s| &mut s.align_self);
    }
    /// Current `align_self`.
    #[must_use]
    pub fn align_self(&self, node: NodeId) -> AlignSelf {
        self.style(node).align_self
    }

    /// Stable-sort key within a flex container. Default `0`.
    ///
    /// [§ 9 Open questions #1] — indistinguishable at the getter from the
    /// property never having been set; the ambiguity is preserved rather
    /// than papered over with a sentinel, per the spec's instruction not
    /// to guess intent here.
    pub fn set_order(&mut self, node: NodeId, value: i32) {
        self.set_scalar(node, value, |s| &mut s.order);
    }
    /// Current `order`.
    #[must_use]
    pub fn order(&self, node: NodeId) -> i32 {
        self.style(node).order
    }

    /// Width-to-height ratio; `0.0` means unset.
    pub fn set_aspect_ratio(&mut self, node: NodeId, value: f32) {
        self.set_scalar(node, value, |s| &mut s.aspect_ratio);
    }
    /// Current `aspect_ratio`.
    #[must_use]
    pub fn aspect_ratio(&self, node: NodeId) -> f32 {
        self.style(node).aspect_ratio
    }

    /// `flex_grow`; clamped to `>= 0` per [§ 3 Invariants].
    pub fn set_flex_grow(&mut self, node: NodeId, value: f32) {
        self.set_scalar(node, value.max(0.0), |s| &mut s.flex_grow);
    }
    /// Current `flex_grow`.
    #[must_use]
    pub fn flex_grow(&self, node: NodeId) -> f32 {
        self.style(node).flex_grow
    }

    /// `flex_shrink`; clamped to `>= 0` per [§ 3 Invariants].
    pub fn set_flex_shrink(&mut self, node: NodeId, value: f32) {
        self.set_scalar(node, value.max(0.0), |s| &mut s.flex_shrink);
    }
    /// Current `flex_shrink`.
    #[must_use]
    pub fn flex_shrink(&self, node: NodeId) -> f32 {
        self.style(node).flex_shrink
    }

    /// The `flex` convenience shorthand: `flex_grow = value`,
    /// `flex_shrink = 1`, `flex_basis = 0pt`.
    pub fn set_flex(&mut self, node: NodeId, value: f32) {
        self.style_mut(node).set_flex(value);
        self.mark_dirty(node);
    }

    // ---- length-family setters/getters ------------------------------

    fn set_length(&mut self, node: NodeId, value: Length, field: impl Fn(&mut ComputedStyle) -> &mut Length) {
        let changed = {
            let slot = field(self.style_mut(node));
            let changed = *slot != value;
            if changed {
                *slot = value;
            }
            changed
        };
        if changed {
            self.mark_dirty(node);
        }
    }

    /// Preferred width, in pixels.
    pub fn set_width(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.width);
    }
    /// Preferred width, as a percentage of the containing block.
    pub fn set_width_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.width);
    }
    /// Preferred width computed from content/free space.
    pub fn set_width_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.width);
    }
    /// Preferred width equal to the item's natural (max-content) size.
    pub fn set_width_max_content(&mut self, node: NodeId) {
        self.set_length(node, Length::MaxContent, |s| &mut s.width);
    }
    /// Preferred width equal to `min(max-content, available)`.
    pub fn set_width_fit_content(&mut self, node: NodeId) {
        self.set_length(node, Length::FitContent, |s| &mut s.width);
    }
    /// Current `width`.
    #[must_use]
    pub fn width(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).width)
    }

    /// Preferred height, in pixels.
    pub fn set_height(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.height);
    }
    /// Preferred height, as a percentage of the containing block.
    pub fn set_height_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.height);
    }
    /// Preferred height computed from content/free space.
    pub fn set_height_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.height);
    }
    /// Preferred height equal to the item's natural (max-content) size.
    pub fn set_height_max_content(&mut self, node: NodeId) {
        self.set_length(node, Length::MaxContent, |s| &mut s.height);
    }
    /// Preferred height equal to `min(max-content, available)`.
    pub fn set_height_fit_content(&mut self, node: NodeId) {
        self.set_length(node, Length::FitContent, |s| &mut s.height);
    }
    /// Current `height`.
    #[must_use]
    pub fn height(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).height)
    }

    /// Minimum width, in pixels; `Auto` means unconstrained.
    pub fn set_min_width(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.min_width);
    }
    /// Minimum width, as a percentage.
    pub fn set_min_width_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.min_width);
    }
    /// Clear the minimum width.
    pub fn set_min_width_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.min_width);
    }
    /// Current `min_width`.
    #[must_use]
    pub fn min_width(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).min_width)
    }

    /// Maximum width, in pixels; `Auto` means unconstrained.
    pub fn set_max_width(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.max_width);
    }
    /// Maximum width, as a percentage.
    pub fn set_max_width_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.max_width);
    }
    /// Clear the maximum width.
    pub fn set_max_width_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.max_width);
    }
    /// Current `max_width`.
    #[must_use]
    pub fn max_width(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).max_width)
    }

    /// Minimum height, in pixels; `Auto` means unconstrained.
    pub fn set_min_height(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.min_height);
    }
    /// Minimum height, as a percentage.
    pub fn set_min_height_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.min_height);
    }
    /// Clear the minimum height.
    pub fn set_min_height_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.min_height);
    }
    /// Current `min_height`.
    #[must_use]
    pub fn min_height(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).min_height)
    }

    /// Maximum height, in pixels; `Auto` means unconstrained.
    pub fn set_max_height(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.max_height);
    }
    /// Maximum height, as a percentage.
    pub fn set_max_height_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.max_height);
    }
    /// Clear the maximum height.
    pub fn set_max_height_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.max_height);
    }
    /// Current `max_height`.
    #[must_use]
    pub fn max_height(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).max_height)
    }

    /// `flex_basis`, in pixels.
    pub fn set_flex_basis(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Point(value), |s| &mut s.flex_basis);
    }
    /// `flex_basis`, as a percentage.
    pub fn set_flex_basis_percent(&mut self, node: NodeId, value: f32) {
        self.set_length(node, Length::Percent(value), |s| &mut s.flex_basis);
    }
    /// `flex_basis` defers to the item's main-axis size or content.
    pub fn set_flex_basis_auto(&mut self, node: NodeId) {
        self.set_length(node, Length::Auto, |s| &mut s.flex_basis);
    }
    /// `flex_basis` equal to the item's natural (max-content) size.
    pub fn set_flex_basis_max_content(&mut self, node: NodeId) {
        self.set_length(node, Length::MaxContent, |s| &mut s.flex_basis);
    }
    /// `flex_basis` equal to `min(max-content, available)`.
    pub fn set_flex_basis_fit_content(&mut self, node: NodeId) {
        self.set_length(node, Length::FitContent, |s| &mut s.flex_basis);
    }
    /// Current `flex_basis`.
    #[must_use]
    pub fn flex_basis(&self, node: NodeId) -> StarlightValue {
        StarlightValue::from(&self.style(node).flex_basis)
    }

    // ---- edge-family setters/getters --------------------------------
    // `position` (inset), `margin`, and `padding` all key off `Edge`,
    // which includes the logical `Start`/`End` and the write-only fans
    // `Horizontal`/`Vertical`/`All` — see [`crate::length::Edges::set_logical`].

    fn set_edge_length(&mut self, node: NodeId, edge: Edge, value: Length, field: impl Fn(&mut ComputedStyle) -> &mut crate::length::Edges<Length>) {
        let direction = self.resolved_direction(node);
        let before = *field(self.style_mut(node));
        field(self.style_mut(node)).set_logical(edge, direction, value);
        if *field(self.style_mut(node)) != before {
            self.mark_dirty(node);
        }
    }

    /// Inset (`top`/`right`/`bottom`/`left`) for positioned boxes, in
    /// pixels.
    pub fn set_position(&mut self, node: NodeId, edge: Edge, value: f32) {
        self.set_edge_length(node, edge, Length::Point(value), |s| &mut s.inset);
    }
    /// Inset, as a percentage of the containing block.
    pub fn set_position_percent(&mut self, node: NodeId, edge: Edge, value: f32) {
        self.set_edge_length(node, edge, Length::Percent(value), |s| &mut s.inset);
    }
    /// Clear an inset edge.
    pub fn set_position_auto(&mut self, node: NodeId, edge: Edge) {
        self.set_edge_length(node, edge, Length::Auto, |s| &mut s.inset);
    }
    /// Current inset on one physical or logical edge.
    #[must_use]
    pub fn position(&self, node: NodeId, edge: Edge) -> StarlightValue {
        let direction = self.resolved_direction(node);
        StarlightValue::from(self.style(node).inset.get_logical(edge, direction))
    }

    /// Margin, in pixels; `Auto` absorbs free space.
    pub fn set_margin(&mut self, node: NodeId, edge: Edge, value: f32) {
        self.set_edge_length(node, edge, Length::Point(value), |s| &mut s.margin);
    }
    /// Margin, as a percentage of the containing block's main axis.
    pub fn set_margin_percent(&mut self, node: NodeId, edge: Edge, value: f32) {
        self.set_edge_length(node, edge, Length::Percent(value), |s| &mut s.margin);
    }
    /// Margin that absorbs free space.
    pub fn set_margin_auto(&mut self, node: NodeId, edge: Edge) {
        self.set_edge_length(node, edge, Length::Auto, |s| &mut s.margin);
    }
    /// Current margin on one physical or logical edge.
    #[must_use]
    pub fn margin(&self, node: NodeId, edge: Edge) -> StarlightValue {
        let direction = self.resolved_direction(node);
        StarlightValue::from(self.style(node).margin.get_logical(edge, direction))
    }

    /// Padding, in pixels. `Auto` is not a legal padding value; there is no
    /// `set_padding_auto`.
    pub fn set_padding(&mut self, node: NodeId, edge: Edge, value: f32) {
        self.set_edge_length(node, edge, Length::Point(value), |s| &mut s.padding);
    }
    /// Padding, as a percentage (resolved against the containing block's
    /// width on every edge — [§ 4.D step 1]).
    pub fn set_padding_percent(&mut self, node: NodeId, edge: Edge, value: f32) {
        self.set_edge_length(node, edge, Length::Percent(value), |s| &mut s.padding);
    }
    /// Current padding on one physical or logical edge.
    #[must_use]
    pub fn padding(&self, node: NodeId, edge: Edge) -> StarlightValue {
        let direction = self.resolved_direction(node);
        StarlightValue::from(self.style(node).padding.get_logical(edge, direction))
    }

    /// Border width, in pixels; always definite.
    pub fn set_border(&mut self, node: NodeId, edge: Edge, value: f32) {
        let direction = self.resolved_direction(node);
        let changed = {
            let style = self.style_mut(node);
            let before = style.border;
            style.border.set_logical(edge, direction, value.max(0.0));
            style.border != before
        };
        if changed {
            self.mark_dirty(node);
        }
    }
    /// Current border width on one physical or logical edge.
    #[must_use]
    pub fn border(&self, node: NodeId, edge: Edge) -> f32 {
        let direction = self.resolved_direction(node);
        *self.style(node).border.get_logical(edge, direction)
    }

    /// Gap (gutter), in pixels, for the given axis (or both, via
    /// [`Gap::All`]).
    pub fn set_gap(&mut self, node: NodeId, gutter: Gap, value: f32) {
        self.set_gap_length(node, gutter, Length::Point(value));
    }
    /// Gap, as a percentage of the relevant axis.
    pub fn set_gap_percent(&mut self, node: NodeId, gutter: Gap, value: f32) {
        self.set_gap_length(node, gutter, Length::Percent(value));
    }

    fn set_gap_length(&mut self, node: NodeId, gutter: Gap, value: Length) {
        let changed = {
            let style = self.style_mut(node);
            let mut changed = false;
            if matches!(gutter, Gap::Column | Gap::All) && style.gap_column != value {
                style.gap_column = value.clone();
                changed = true;
            }
            if matches!(gutter, Gap::Row | Gap::All) && style.gap_row != value {
                style.gap_row = value;
                changed = true;
            }
            changed
        };
        if changed {
            self.mark_dirty(node);
        }
    }

    /// Current gap for one gutter. [`Gap::All`] reads the column gutter.
    #[must_use]
    pub fn gap(&self, node: NodeId, gutter: Gap) -> StarlightValue {
        let style = self.style(node);
        match gutter {
            Gap::Row => StarlightValue::from(&style.gap_row),
            Gap::Column | Gap::All => StarlightValue::from(&style.gap_column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, Tree};
    use crate::length::{Direction, Edge, PhysicalEdge, Unit};
    use crate::style::{AlignItems, Display};

    #[test]
    fn setter_then_getter_round_trips() {
        let mut tree = Tree::new();
        let node = tree.new_node();
        tree.set_width(node, 120.0);
        assert_eq!(tree.width(node).value, 120.0);
        assert_eq!(tree.width(node).unit, Unit::Point);

        tree.set_width_percent(node, 0.5);
        assert_eq!(tree.width(node).value, 0.5);
        assert_eq!(tree.width(node).unit, Unit::Percent);

        tree.set_align_items(node, AlignItems::Center);
        assert_eq!(tree.align_items(node), AlignItems::Center);
    }

    #[test]
    fn setters_mark_dirty_only_on_change() {
        let mut tree = Tree::new();
        let node = tree.new_node();
        tree.calculate_layout(node, 100.0, 100.0, Direction::Ltr);
        assert!(!tree.is_dirty(node));

        tree.set_display(node, Display::Flex); // no-op, already the default
        assert!(!tree.is_dirty(node));

        tree.set_display(node, Display::None);
        assert!(tree.is_dirty(node));
    }

    #[test]
    fn logical_edges_resolve_against_node_direction() {
        let mut tree = Tree::new();
        let node = tree.new_node();
        tree.set_direction(node, Direction::Rtl);
        tree.set_margin(node, Edge::Start, 5.0);
        assert_eq!(tree.margin(node, Edge::Right).value, 5.0);
        assert_eq!(tree.margin(node, Edge::Left).value, 0.0);
        assert_eq!(*tree.style(node).margin.get(PhysicalEdge::Right), crate::length::Length::Point(5.0));
    }

    #[test]
    fn config_rejects_non_positive_scale() {
        let mut config = Config::new();
        config.set_physical_pixels_per_layout_unit(2.0);
        assert_eq!(config.physical_pixels_per_layout_unit(), 2.0);
        config.set_physical_pixels_per_layout_unit(-1.0);
        assert_eq!(config.physical_pixels_per_layout_unit(), 2.0);
    }

    #[test]
    fn calculate_layout_with_indefinite_owner_size() {
        let mut tree = Tree::new();
        let node = tree.new_node();
        tree.set_width(node, 50.0);
        tree.set_height(node, 50.0);
        let result = tree.calculate_layout(node, crate::length::INDEFINITE, crate::length::INDEFINITE, Direction::Ltr);
        assert_eq!(result.width, 50.0);
        assert_eq!(result.height, 50.0);
    }
}
