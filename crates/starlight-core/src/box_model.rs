//! Box model resolution: percentages, `box-sizing`, min/max clamping, and
//! aspect-ratio cross-constraint.
//!
//! [§ 4.D Box model resolution]
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              margin-top                 │
//! │   ┌─────────────────────────────────┐   │
//! │   │          border-top             │   │
//! │   │   ┌─────────────────────────┐   │   │
//! │   │   │      padding-top        │   │   │
//! │   │   │   ┌─────────────────┐   │   │   │
//! │ m │ b │ p │                 │ p │ b │ m │
//! │ a │ o │ a │     CONTENT     │ a │ o │ a │
//! │ r │ r │ d │                 │ d │ r │ r │
//! │ g │ d │ d │                 │ d │ d │ g │
//! │ i │ e │ i │                 │ i │ e │ i │
//! │ n │ r │ n │                 │ n │ r │ n │
//! │   │   │ g │                 │ g │   │   │
//! │   │   │   └─────────────────┘   │   │   │
//! │   │   │      padding-bottom     │   │   │
//! │   │   └─────────────────────────┘   │   │
//! │   │          border-bottom          │   │
//! │   └─────────────────────────────────┘   │
//! │              margin-bottom              │
//! └─────────────────────────────────────────┘
//! ```

use crate::length::{Constraint, Direction, Edges};
use crate::style::{BoxSizing, ComputedStyle};

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

/// The four nested boxes of the CSS box model, anchored at a content
/// origin.
#[derive(Debug, Clone, Default)]
pub struct BoxDimensions {
    /// Content area dimensions.
    pub content: Rect,
    /// Resolved padding per physical edge.
    pub padding: Edges<f32>,
    /// Resolved border per physical edge.
    pub border: Edges<f32>,
    /// Resolved margin per physical edge (auto margins are resolved to a
    /// definite value before this struct is populated).
    pub margin: Edges<f32>,
}

impl BoxDimensions {
    /// The padding box: content plus padding.
    #[must_use]
    pub fn padding_box(&self) -> Rect {
        Rect {
            x: self.content.x - self.padding.left,
            y: self.content.y - self.padding.top,
            width: self.content.width + self.padding.left + self.padding.right,
            height: self.content.height + self.padding.top + self.padding.bottom,
        }
    }

    /// The border box: content, padding, and border.
    #[must_use]
    pub fn border_box(&self) -> Rect {
        Rect {
            x: self.content.x - self.padding.left - self.border.left,
            y: self.content.y - self.padding.top - self.border.top,
            width: self.content.width
                + self.padding.left
                + self.padding.right
                + self.border.left
                + self.border.right,
            height: self.content.height
                + self.padding.top
                + self.padding.bottom
                + self.border.top
                + self.border.bottom,
        }
    }

    /// The margin box: the outermost box, content through margin.
    #[must_use]
    pub fn margin_box(&self) -> Rect {
        Rect {
            x: self.content.x - self.padding.left - self.border.left - self.margin.left,
            y: self.content.y - self.padding.top - self.border.top - self.margin.top,
            width: self.content.width
                + self.padding.left
                + self.padding.right
                + self.border.left
                + self.border.right
                + self.margin.left
                + self.margin.right,
            height: self.content.height
                + self.padding.top
                + self.padding.bottom
                + self.border.top
                + self.border.bottom
                + self.margin.top
                + self.margin.bottom,
        }
    }
}

/// Resolved bounds for one axis: a concrete `[min, max]` pair with
/// `max >= min` always enforced.
///
/// [§ 3 Invariants] — "`min ≤ resolved_size ≤ max` always holds after
/// layout; if `min > max` then `max` is raised to `min`."
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    /// Resolved minimum; `0.0` when the style's min was `Auto`.
    pub min: f32,
    /// Resolved maximum; `f32::INFINITY` when the style's max was `Auto`.
    pub max: f32,
}

impl AxisBounds {
    /// Clamp a value into `[min, max]`.
    #[must_use]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// The box model resolved for one node under owner constraints.
///
/// [§ 4.D Box model resolution]
#[derive(Debug, Clone)]
pub struct ResolvedBox {
    /// Padding per physical edge, always pixel-definite and non-negative.
    pub padding: Edges<f32>,
    /// Border per physical edge, always pixel-definite and non-negative.
    pub border: Edges<f32>,
    /// Margin per physical edge; `None` means the edge was `auto` and is
    /// still unresolved (to be filled in once free space is known).
    pub margin: Edges<Option<f32>>,
    /// The resolved border-box width, if definite after box-sizing
    /// arithmetic and min/max clamping.
    pub border_box_width: Option<f32>,
    /// The resolved border-box height, analogous to `border_box_width`.
    pub border_box_height: Option<f32>,
    /// Resolved width bounds (border-box space).
    pub width_bounds: AxisBounds,
    /// Resolved height bounds (border-box space).
    pub height_bounds: AxisBounds,
}

fn resolve_axis_bounds(min: &crate::length::Length, max: &crate::length::Length, reference: Option<f32>) -> AxisBounds {
    let min = min.resolve(reference).filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0);
    let max = max
        .resolve(reference)
        .filter(|v| v.is_finite())
        .unwrap_or(f32::INFINITY);
    if max < min {
        AxisBounds { min, max: min }
    } else {
        AxisBounds { min, max }
    }
}

/// Resolve a node's box model against its owner constraints.
///
/// [§ 4.D step 1-4]
#[must_use]
pub fn resolve_box(style: &ComputedStyle, owner_width: Option<f32>, owner_height: Option<f32>, direction: Direction) -> ResolvedBox {
    // STEP 1: padding and border. Percentages on *all four* padding edges
    // resolve against the owner's width, per [§ 4.D step 1]: "percentages
    // on padding use `OW` for both axes."
    let padding = Edges {
        left: style.padding.get_logical(crate::length::Edge::Left, direction).resolve_non_negative(owner_width),
        right: style.padding.get_logical(crate::length::Edge::Right, direction).resolve_non_negative(owner_width),
        top: style.padding.top.resolve_non_negative(owner_width),
        bottom: style.padding.bottom.resolve_non_negative(owner_width),
    };
    let border = Edges {
        left: style.border.left.max(0.0),
        right: style.border.right.max(0.0),
        top: style.border.top.max(0.0),
        bottom: style.border.bottom.max(0.0),
    };

    // STEP 2: margin. `Auto` is preserved for later free-space absorption.
    // [§ 7 Error handling] — a NaN margin resolves as indefinite, same as
    // `Auto`, rather than poisoning every downstream offset computation.
    let resolve_margin = |length: &crate::length::Length, reference: Option<f32>| -> Option<f32> {
        if matches!(length, crate::length::Length::Auto) {
            None
        } else {
            length.resolve(reference).filter(|v| v.is_finite())
        }
    };
    let margin = Edges {
        left: resolve_margin(&style.margin.left, owner_width),
        right: resolve_margin(&style.margin.right, owner_width),
        top: resolve_margin(&style.margin.top, owner_width),
        bottom: resolve_margin(&style.margin.bottom, owner_width),
    };

    // STEP 3: width/height against OW/OH, clamped by min/max.
    let width_bounds = resolve_axis_bounds(&style.min_width, &style.max_width, owner_width);
    let height_bounds = resolve_axis_bounds(&style.min_height, &style.max_height, owner_height);

    let resolved_width = style.width.resolve(owner_width).filter(|v| v.is_finite());
    let resolved_height = style.height.resolve(owner_height).filter(|v| v.is_finite());

    // STEP 4: box-sizing arithmetic. A resolved `width`/`height` under
    // `ContentBox` denotes the content box; add border+padding to reach
    // the border box. Under `BorderBox` it already denotes the border
    // box.
    let to_border_box_width = |content_or_border: f32| match style.box_sizing {
        BoxSizing::ContentBox => content_or_border + padding.left + padding.right + border.left + border.right,
        BoxSizing::BorderBox => content_or_border,
    };
    let to_border_box_height = |content_or_border: f32| match style.box_sizing {
        BoxSizing::ContentBox => content_or_border + padding.top + padding.bottom + border.top + border.bottom,
        BoxSizing::BorderBox => content_or_border,
    };

    let border_box_width = resolved_width
        .map(|w| width_bounds.clamp(match style.box_sizing {
            BoxSizing::ContentBox => w,
            BoxSizing::BorderBox => w,
        }))
        .map(to_border_box_width);
    let border_box_height = resolved_height
        .map(|h| height_bounds.clamp(h))
        .map(to_border_box_height);

    ResolvedBox {
        padding,
        border,
        margin,
        border_box_width,
        border_box_height,
        width_bounds,
        height_bounds,
    }
}

impl ResolvedBox {
    /// When the node's own style leaves an axis indefinite but the
    /// incoming constraint pins an exact size for it, that size is
    /// authoritative — [`crate::length::MeasureMode::Exactly`]'s "the size
    /// is exact; the child must use it." Without this, an `Auto`-sized
    /// leaf under `align-items: stretch` (or any exactly-constrained
    /// block-style fill) would never pick up the size its parent handed
    /// it.
    pub fn fill_exact(&mut self, width: Constraint, height: Constraint) {
        if self.border_box_width.is_none() && width.is_exact() {
            self.border_box_width = Some(self.width_bounds.clamp(width.size));
        }
        if self.border_box_height.is_none() && height.is_exact() {
            self.border_box_height = Some(self.height_bounds.clamp(height.size));
        }
    }

    /// The content-box inner size implied by a resolved border-box size,
    /// after subtracting padding and border. Clamped to zero.
    #[must_use]
    pub fn content_width(&self) -> Option<f32> {
        self.border_box_width
            .map(|w| (w - self.padding.left - self.padding.right - self.border.left - self.border.right).max(0.0))
    }

    /// Analogous to [`ResolvedBox::content_width`] for the vertical axis.
    #[must_use]
    pub fn content_height(&self) -> Option<f32> {
        self.border_box_height
            .map(|h| (h - self.padding.top - self.padding.bottom - self.border.top - self.border.bottom).max(0.0))
    }

    /// [§ 4.D step 6] — "Emit `Constraint` for children: for each axis,
    /// pass `Exactly(inner)` when the content-box inner size is definite
    /// after step 4, else pass `AtMost(available)` if a max is finite,
    /// else `Undefined`."
    #[must_use]
    pub fn child_width_constraint(&self, owner_width: Option<f32>) -> Constraint {
        child_axis_constraint(self.content_width(), self.width_bounds, self.padding.left + self.padding.right + self.border.left + self.border.right, owner_width)
    }

    /// Analogous to [`ResolvedBox::child_width_constraint`] for height.
    #[must_use]
    pub fn child_height_constraint(&self, owner_height: Option<f32>) -> Constraint {
        child_axis_constraint(self.content_height(), self.height_bounds, self.padding.top + self.padding.bottom + self.border.top + self.border.bottom, owner_height)
    }
}

fn child_axis_constraint(content_size: Option<f32>, bounds: AxisBounds, non_content: f32, owner: Option<f32>) -> Constraint {
    if let Some(size) = content_size {
        return Constraint::exactly(size);
    }
    if bounds.max.is_finite() {
        return Constraint::at_most((bounds.max - non_content).max(0.0));
    }
    if let Some(owner) = owner {
        return Constraint::at_most((owner - non_content).max(0.0));
    }
    Constraint::indefinite()
}

/// [§ 4.D step 5] — aspect-ratio cross-constraint resolution.
///
/// Applies at most two clamp/derive iterations: derive the indefinite
/// axis from the known one, clamp by min/max, and if clamping changed the
/// known axis's implied counterpart, re-derive and re-clamp once more.
#[must_use]
pub fn apply_aspect_ratio(
    ratio: f32,
    width: Option<f32>,
    height: Option<f32>,
    width_bounds: AxisBounds,
    height_bounds: AxisBounds,
) -> (Option<f32>, Option<f32>) {
    if ratio <= 0.0 || !ratio.is_finite() {
        return (width, height);
    }

    match (width, height) {
        (Some(w), Some(_)) => (Some(w), Some(w / ratio)),
        (Some(w), None) => {
            let mut w = width_bounds.clamp(w);
            let mut h = w / ratio;
            let clamped_h = height_bounds.clamp(h);
            if clamped_h != h {
                h = clamped_h;
                w = width_bounds.clamp(h * ratio);
            }
            (Some(w), Some(h))
        }
        (None, Some(h)) => {
            let mut h = height_bounds.clamp(h);
            let mut w = h * ratio;
            let clamped_w = width_bounds.clamp(w);
            if clamped_w != w {
                w = clamped_w;
                h = height_bounds.clamp(w / ratio);
            }
            (Some(w), Some(h))
        }
        (None, None) => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_aspect_ratio, resolve_box, AxisBounds};
    use crate::length::{Direction, Length};
    use crate::style::{BoxSizing, ComputedStyle};

    #[test]
    fn content_box_adds_padding_and_border_to_reach_border_box() {
        let mut style = ComputedStyle::default();
        style.box_sizing = BoxSizing::ContentBox;
        style.width = Length::Point(100.0);
        style.padding = crate::length::Edges::uniform(Length::Point(10.0));
        style.border = crate::length::Edges::uniform(5.0);
        let resolved = resolve_box(&style, Some(400.0), None, Direction::Ltr);
        assert_eq!(resolved.border_box_width, Some(130.0));
        assert_eq!(resolved.content_width(), Some(100.0));
    }

    #[test]
    fn border_box_uses_resolved_width_directly() {
        let mut style = ComputedStyle::default();
        style.width = Length::Point(130.0);
        style.padding = crate::length::Edges::uniform(Length::Point(10.0));
        style.border = crate::length::Edges::uniform(5.0);
        let resolved = resolve_box(&style, Some(400.0), None, Direction::Ltr);
        assert_eq!(resolved.border_box_width, Some(130.0));
        assert_eq!(resolved.content_width(), Some(100.0));
    }

    #[test]
    fn min_greater_than_max_raises_max() {
        let mut style = ComputedStyle::default();
        style.min_width = Length::Point(200.0);
        style.max_width = Length::Point(100.0);
        style.width = Length::Point(50.0);
        let resolved = resolve_box(&style, Some(400.0), None, Direction::Ltr);
        assert_eq!(resolved.border_box_width, Some(200.0));
    }

    #[test]
    fn nan_width_resolves_as_indefinite() {
        let mut style = ComputedStyle::default();
        style.width = Length::Point(f32::NAN);
        let resolved = resolve_box(&style, Some(400.0), None, Direction::Ltr);
        assert_eq!(resolved.border_box_width, None);
    }

    #[test]
    fn nan_margin_resolves_as_indefinite() {
        let mut style = ComputedStyle::default();
        style.margin.left = Length::Point(f32::NAN);
        let resolved = resolve_box(&style, Some(400.0), None, Direction::Ltr);
        assert_eq!(resolved.margin.left, None);
    }

    #[test]
    fn aspect_ratio_derives_missing_axis() {
        let bounds = AxisBounds {
            min: 0.0,
            max: f32::INFINITY,
        };
        let (w, h) = apply_aspect_ratio(2.0, None, Some(100.0), bounds, bounds);
        assert_eq!(w, Some(200.0));
        assert_eq!(h, Some(100.0));
    }

    #[test]
    fn aspect_ratio_reclamps_after_max_width() {
        let width_bounds = AxisBounds {
            min: 0.0,
            max: 150.0,
        };
        let height_bounds = AxisBounds {
            min: 0.0,
            max: f32::INFINITY,
        };
        let (w, h) = apply_aspect_ratio(2.0, None, Some(100.0), width_bounds, height_bounds);
        assert_eq!(w, Some(150.0));
        assert_eq!(h, Some(75.0));
    }
}
