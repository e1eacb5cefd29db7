//! Absolute positioning.
//!
//! [§ 4.G Absolute positioning] — out-of-flow children are resolved against
//! their containing flex container's padding box once that container's
//! in-flow layout has finished, then patched into the tree the same way a
//! flex item's final position is (see [`crate::flex::layout_node`]).
//!
//! This engine recognizes only two `position` values, and a `Relative` box
//! is itself a positioned element under CSS, so the nearest positioned
//! ancestor of an `Absolute` child is always its immediate flex-container
//! parent — there is no multi-level ancestor search to perform.

use crate::box_model::{self, AxisBounds, ResolvedBox};
use crate::flex::layout_node;
use crate::length::{Constraint, Direction};
use crate::tree::{NodeId, Tree};

/// The resolved `(leading offset, size, trailing margin slack)` for one
/// axis of an absolute box, per [§ 4.G step 2]'s "at most two of the
/// three [leading, trailing, size] are independent" triple.
struct AxisResolution {
    /// Offset from the containing block's leading edge to the margin box's
    /// leading edge.
    leading_offset: f32,
    /// Border-box size, if pinned by an explicit size or by both insets
    /// being definite. `None` means the box sizes to its own content.
    size: Option<f32>,
    /// The margin actually used on the leading side, including any share
    /// of absorbed free space if that side was `auto`.
    margin_start: f32,
    /// The margin actually used on the trailing side, analogous to
    /// `margin_start`.
    margin_end: f32,
}

/// [§ 4.G step 2] — resolve one axis of the leading/trailing/size triple.
///
/// - Both insets definite, no explicit size: size is derived as
///   `container − leading − trailing − margins`; any auto margin on this
///   axis absorbs the remainder of that subtraction instead of zeroing out.
/// - An explicit size is set: it wins over a derived size ("trailing
///   yields and offsets are used directly" — §4.G). The leading edge comes
///   from whichever inset is definite (preferring `leading`), and an auto
///   margin on that side is resolved as the unused space between the
///   explicit offset and the box when both insets are present.
/// - Only one inset is definite: positions from that edge; the other
///   inset and any axis-size derivation are left to natural/intrinsic
///   sizing by the caller.
/// - Neither inset is definite: positions at the containing block's start
///   corner (offset `0`), per "unset offsets default to the position the
///   item would have had if in flow at the container's start corner."
fn resolve_axis(
    leading: Option<f32>,
    trailing: Option<f32>,
    explicit_size: Option<f32>,
    margin_start: Option<f32>,
    margin_end: Option<f32>,
    container: f32,
    bounds: AxisBounds,
) -> AxisResolution {
    match (leading, trailing, explicit_size) {
        (Some(l), Some(t), None) => {
            // Derive the size from both insets; auto margins on this axis
            // absorb whatever the subtraction leaves over instead of the
            // size consuming it.
            let auto_margins = usize::from(margin_start.is_none()) + usize::from(margin_end.is_none());
            let fixed_margins = margin_start.unwrap_or(0.0) + margin_end.unwrap_or(0.0);
            let remaining = (container - l - t - fixed_margins).max(0.0);
            let (size, margin_share) = if auto_margins > 0 {
                (0.0, remaining / auto_margins as f32)
            } else {
                (remaining, 0.0)
            };
            let resolved_margin_start = margin_start.unwrap_or(margin_share);
            let resolved_margin_end = margin_end.unwrap_or(margin_share);
            let size = bounds.clamp(size);
            AxisResolution {
                leading_offset: l + resolved_margin_start,
                size: Some(size),
                margin_start: resolved_margin_start,
                margin_end: resolved_margin_end,
            }
        }
        (leading, trailing, explicit_size) => {
            // An explicit size (or no size at all) — position from
            // whichever inset is definite; unset auto margins on this path
            // contribute no space since there is no free-space triple to
            // absorb into without two insets.
            let margin_start_resolved = margin_start.unwrap_or(0.0);
            let margin_end_resolved = margin_end.unwrap_or(0.0);
            let leading_offset = match (leading, trailing, explicit_size) {
                (Some(l), _, _) => l + margin_start_resolved,
                (None, Some(t), Some(size)) => (container - t - margin_end_resolved - size).max(0.0),
                _ => margin_start_resolved,
            };
            AxisResolution {
                leading_offset,
                size: explicit_size,
                margin_start: margin_start_resolved,
                margin_end: margin_end_resolved,
            }
        }
    }
}

/// Resolve and store the final position and size of one out-of-flow child
/// of `container`, whose in-flow content box is `(container_content_width,
/// container_content_height)`.
pub(crate) fn layout_absolute_child(tree: &mut Tree, _container: NodeId, child: NodeId, container_resolved: &ResolvedBox, container_content_width: f32, container_content_height: f32, direction: Direction) {
    let style = tree.style(child).clone();
    let effective_direction = style.effective_direction(direction);

    // The containing block is the parent's padding box: content plus
    // padding, but not border.
    let cb_width = container_content_width + container_resolved.padding.left + container_resolved.padding.right;
    let cb_height = container_content_height + container_resolved.padding.top + container_resolved.padding.bottom;

    let resolved = box_model::resolve_box(&style, Some(cb_width), Some(cb_height), effective_direction);

    // [§ 7 Error handling] — a NaN inset resolves as indefinite (as if
    // unset), not as a poisoned offset fed into `resolve_axis` below.
    let left = style.inset.left.resolve(Some(cb_width)).filter(|v| v.is_finite());
    let right = style.inset.right.resolve(Some(cb_width)).filter(|v| v.is_finite());
    let top = style.inset.top.resolve(Some(cb_height)).filter(|v| v.is_finite());
    let bottom = style.inset.bottom.resolve(Some(cb_height)).filter(|v| v.is_finite());

    let width_axis = resolve_axis(left, right, resolved.border_box_width, resolved.margin.left, resolved.margin.right, cb_width, resolved.width_bounds);
    let height_axis = resolve_axis(top, bottom, resolved.border_box_height, resolved.margin.top, resolved.margin.bottom, cb_height, resolved.height_bounds);

    let width_c = width_axis.size.map_or(Constraint::at_most(cb_width), Constraint::exactly);
    let height_c = height_axis.size.map_or(Constraint::at_most(cb_height), Constraint::exactly);

    let result = layout_node(tree, child, width_c, height_c, effective_direction);

    // [§ 4.G] — "Unset offsets default to the position the item would have
    // had if in flow at the container's start corner" — matching the
    // convention that every write-back position is local to the
    // container's *content* box until the container itself translates it
    // below — a leading offset is interpreted directly as a content-box-
    // relative coordinate.
    let local_x = width_axis.leading_offset;
    let local_y = height_axis.leading_offset;

    let mirrored_x = if effective_direction == Direction::Rtl { container_content_width - local_x - result.width } else { local_x };

    // Translate out of the container's content-box frame into its
    // border-box-relative frame, same as an in-flow child (see
    // `crate::flex::layout_node`'s step-11 write-back).
    let mut final_result = result;
    final_result.left = mirrored_x + container_resolved.padding.left + container_resolved.border.left;
    final_result.top = local_y + container_resolved.padding.top + container_resolved.border.top;
    final_result.margin = crate::length::Edges {
        left: width_axis.margin_start,
        right: width_axis.margin_end,
        top: height_axis.margin_start,
        bottom: height_axis.margin_end,
    };
    tree.store_result(child, width_c, height_c, effective_direction, final_result);
}

#[cfg(test)]
mod tests {
    use super::resolve_axis;
    use crate::box_model::AxisBounds;

    fn bounds() -> AxisBounds {
        AxisBounds {
            min: 0.0,
            max: f32::INFINITY,
        }
    }

    #[test]
    fn both_insets_definite_derive_size() {
        let axis = resolve_axis(Some(10.0), Some(20.0), None, Some(0.0), Some(0.0), 100.0, bounds());
        assert_eq!(axis.size, Some(70.0));
        assert_eq!(axis.leading_offset, 10.0);
    }

    #[test]
    fn explicit_size_wins_over_both_insets() {
        let axis = resolve_axis(Some(10.0), Some(20.0), Some(50.0), Some(0.0), Some(0.0), 100.0, bounds());
        assert_eq!(axis.size, Some(50.0));
        assert_eq!(axis.leading_offset, 10.0);
    }

    #[test]
    fn only_trailing_inset_positions_from_far_edge() {
        let axis = resolve_axis(None, Some(10.0), Some(30.0), Some(0.0), Some(0.0), 100.0, bounds());
        assert_eq!(axis.size, Some(30.0));
        assert_eq!(axis.leading_offset, 60.0);
    }

    #[test]
    fn auto_margin_absorbs_derived_free_space() {
        let axis = resolve_axis(Some(0.0), Some(0.0), None, None, Some(0.0), 100.0, bounds());
        assert_eq!(axis.size, Some(0.0));
        assert_eq!(axis.leading_offset, 100.0);
    }

    #[test]
    fn neither_inset_positions_at_start_corner() {
        let axis = resolve_axis(None, None, Some(40.0), Some(0.0), Some(0.0), 100.0, bounds());
        assert_eq!(axis.size, Some(40.0));
        assert_eq!(axis.leading_offset, 0.0);
    }
}
