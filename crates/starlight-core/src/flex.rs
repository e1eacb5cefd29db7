//! The flex layout algorithm.
//!
//! [§ 4.F Flex algorithm (the heart)]
//!
//! This module also hosts the generic per-node layout dispatch
//! (`layout_node`): display:none short-circuit, leaf measurement, and the
//! flex-container algorithm all live behind one recursive entry point so
//! that flex items, absolute children, and the public `calculate_layout`
//! boundary all go through the same cache-aware path.

use crate::box_model::{self, AxisBounds, ResolvedBox};
use crate::length::{Constraint, Direction, Edges};
use crate::measure::{measure_leaf, MeasureDelegate};
use crate::style::{AlignContent, AlignItems, ComputedStyle, Display, JustifyContent};
use crate::tree::{LayoutResult, NodeId, Tree};

const EPSILON: f32 = 1e-4;

/// Lay out `node` under the given per-axis constraints and direction,
/// returning its resolved box. Recurses into children (flex items,
/// absolute children) as needed and writes every visited node's result
/// into the tree's cache.
///
/// [§ 9 Design notes] — cache hits on a clean node with a matching
/// `(constraint, direction)` signature skip recomputation entirely.
pub fn layout_node(tree: &mut Tree, node: NodeId, width: Constraint, height: Constraint, direction: Direction) -> LayoutResult {
    let style = tree.style(node).clone();
    let effective_direction = style.effective_direction(direction);

    if let Some(cached) = tree.cached_result(node, width, height, effective_direction) {
        return cached;
    }

    if style.display == Display::None {
        let result = LayoutResult::default();
        tree.store_result(node, width, height, effective_direction, result);
        tree.clear_dirty(node);
        return result;
    }

    let mut resolved = box_model::resolve_box(&style, width.available(), height.available(), effective_direction);
    resolved.fill_exact(width, height);

    let has_children = tree.child_count(node) > 0;
    let has_measure = tree.has_measure_func(node);

    let (content_width, content_height, baseline) = if has_measure && !has_children {
        let delegate = tree.measure_delegate(node);
        measure_leaf_content(&resolved, &style, width, height, delegate)
    } else if has_children {
        layout_flex_container(tree, node, &style, &resolved, width, height, effective_direction)
    } else {
        empty_leaf_content(&resolved, &style)
    };

    let border_box_width = resolved
        .border_box_width
        .unwrap_or_else(|| content_width + resolved.padding.left + resolved.padding.right + resolved.border.left + resolved.border.right)
        .clamp(resolved.width_bounds.min, if resolved.width_bounds.max.is_finite() { resolved.width_bounds.max } else { f32::MAX });
    let border_box_height = resolved
        .border_box_height
        .unwrap_or_else(|| content_height + resolved.padding.top + resolved.padding.bottom + resolved.border.top + resolved.border.bottom)
        .clamp(resolved.height_bounds.min, if resolved.height_bounds.max.is_finite() { resolved.height_bounds.max } else { f32::MAX });

    let margin = Edges {
        left: resolved.margin.left.unwrap_or(0.0),
        right: resolved.margin.right.unwrap_or(0.0),
        top: resolved.margin.top.unwrap_or(0.0),
        bottom: resolved.margin.bottom.unwrap_or(0.0),
    };

    let result = LayoutResult {
        left: 0.0,
        top: 0.0,
        width: border_box_width,
        height: border_box_height,
        margin,
        padding: resolved.padding,
        border: resolved.border,
        baseline,
    };
    tree.store_result(node, width, height, effective_direction, result);
    tree.clear_dirty(node);
    result
}

fn measure_leaf_content(resolved: &ResolvedBox, style: &ComputedStyle, width: Constraint, height: Constraint, delegate: Option<&MeasureDelegate>) -> (f32, f32, Option<f32>) {
    let width_c = resolved.child_width_constraint(width.available());
    let height_c = resolved.child_height_constraint(height.available());
    let measured = measure_leaf(delegate, width_c, height_c);
    let (w, h) = box_model::apply_aspect_ratio(style.aspect_ratio, Some(measured.width), Some(measured.height), resolved.width_bounds, resolved.height_bounds);
    (w.unwrap_or(measured.width), h.unwrap_or(measured.height), measured.baseline)
}

fn empty_leaf_content(resolved: &ResolvedBox, style: &ComputedStyle) -> (f32, f32, Option<f32>) {
    let known_width = resolved.content_width();
    let known_height = resolved.content_height();
    let (w, h) = box_model::apply_aspect_ratio(style.aspect_ratio, known_width, known_height, resolved.width_bounds, resolved.height_bounds);
    (w.unwrap_or(0.0), h.unwrap_or(0.0), None)
}

/// [§ 4.D step 5] applied ahead of the generic flex-basis probe: an item
/// with an `aspect_ratio` but no definite main size still has a main size
/// implied by its cross size whenever that cross size is already known —
/// either set directly on the item, or handed down by a stretching
/// container with a definite cross reference. Without this, the recursive
/// probe below would see both of the item's own axes as indefinite and
/// never apply the ratio at all.
fn aspect_ratio_main_from_cross(
    child_style: &ComputedStyle,
    item_resolved: &ResolvedBox,
    cross_reference: Option<f32>,
    container_align_items: AlignItems,
    is_row: bool,
) -> Option<f32> {
    if child_style.aspect_ratio <= 0.0 || !child_style.aspect_ratio.is_finite() {
        return None;
    }
    let own_cross_border_box = if is_row { item_resolved.border_box_height } else { item_resolved.border_box_width };
    let align = child_style.align_self.resolve(container_align_items);
    let cross_border_box = own_cross_border_box.or_else(|| if align == AlignItems::Stretch { cross_reference } else { None })?;
    let non_cross = if is_row {
        item_resolved.padding.top + item_resolved.padding.bottom + item_resolved.border.top + item_resolved.border.bottom
    } else {
        item_resolved.padding.left + item_resolved.padding.right + item_resolved.border.left + item_resolved.border.right
    };
    let cross_content = (cross_border_box - non_cross).max(0.0);
    let main_content = if is_row { cross_content * child_style.aspect_ratio } else { cross_content / child_style.aspect_ratio };
    Some(main_content.max(0.0))
}

/// Per-item bookkeeping for one pass of the flex algorithm.
///
/// [§ 4.F step 1-11]
struct FlexItem {
    node: NodeId,
    resolved: ResolvedBox,
    align: AlignItems,
    grow: f32,
    shrink: f32,
    base_size: f32,
    hypothetical_main: f32,
    target_main: f32,
    frozen: bool,
    cross_size: f32,
    main_offset: f32,
    cross_offset: f32,
    baseline: Option<f32>,
    child_layout: LayoutResult,
    /// The exact `(width, height)` constraint pair `child_layout` was
    /// produced under; reused as the cache key when step 11 patches in
    /// the final position, so the entry the container's own next lookup
    /// sees matches the one this pass actually computed against.
    width_constraint: Constraint,
    height_constraint: Constraint,
}

impl FlexItem {
    fn main_margins(&self, is_row: bool) -> (Option<f32>, Option<f32>) {
        if is_row {
            (self.resolved.margin.left, self.resolved.margin.right)
        } else {
            (self.resolved.margin.top, self.resolved.margin.bottom)
        }
    }

    fn cross_margins(&self, is_row: bool) -> (Option<f32>, Option<f32>) {
        if is_row {
            (self.resolved.margin.top, self.resolved.margin.bottom)
        } else {
            (self.resolved.margin.left, self.resolved.margin.right)
        }
    }

    fn outer_main_fixed(&self, is_row: bool) -> f32 {
        let (start, end) = self.main_margins(is_row);
        let (pad_start, pad_end, border_start, border_end) = if is_row {
            (self.resolved.padding.left, self.resolved.padding.right, self.resolved.border.left, self.resolved.border.right)
        } else {
            (self.resolved.padding.top, self.resolved.padding.bottom, self.resolved.border.top, self.resolved.border.bottom)
        };
        start.unwrap_or(0.0) + end.unwrap_or(0.0) + pad_start + pad_end + border_start + border_end
    }

    fn main_auto_count(&self, is_row: bool) -> usize {
        let (start, end) = self.main_margins(is_row);
        usize::from(start.is_none()) + usize::from(end.is_none())
    }

    fn cross_outer(&self, is_row: bool) -> f32 {
        let (start, end) = self.cross_margins(is_row);
        let (pad_start, pad_end, border_start, border_end) = if is_row {
            (self.resolved.padding.top, self.resolved.padding.bottom, self.resolved.border.top, self.resolved.border.bottom)
        } else {
            (self.resolved.padding.left, self.resolved.padding.right, self.resolved.border.left, self.resolved.border.right)
        };
        start.unwrap_or(0.0) + end.unwrap_or(0.0) + pad_start + pad_end + border_start + border_end
    }
}

struct FlexLine {
    items: Vec<usize>,
    cross_size: f32,
    cross_offset: f32,
}

/// Run the flex container algorithm for `node`, writing every in-flow
/// child's position and size into the tree, and placing absolute children
/// afterward. Returns the container's own content-box size.
#[allow(clippy::too_many_arguments, clippy::too_many_lines)]
fn layout_flex_container(tree: &mut Tree, node: NodeId, style: &ComputedStyle, resolved: &ResolvedBox, owner_width: Constraint, owner_height: Constraint, direction: Direction) -> (f32, f32, Option<f32>) {
    let is_row = style.flex_direction.is_row();
    let container_width = resolved.content_width();
    let container_height = resolved.content_height();
    let main_reference = if is_row { container_width } else { container_height };
    let cross_reference = if is_row { container_height } else { container_width };

    let inner_main = main_reference.unwrap_or(0.0);

    let gap_main = (if is_row { &style.gap_column } else { &style.gap_row }).resolve_non_negative(main_reference);
    let gap_cross = (if is_row { &style.gap_row } else { &style.gap_column }).resolve_non_negative(cross_reference);

    // STEP 1: Collect in-flow items, sorted by `order` (stable), reversed
    // for `*Reverse` flex directions.
    let children: Vec<NodeId> = tree.children(node).to_vec();
    let mut absolute_children = Vec::new();
    let mut entries: Vec<(usize, NodeId, ComputedStyle)> = Vec::new();
    for (index, child) in children.into_iter().enumerate() {
        let child_style = tree.style(child).clone();
        if child_style.display == Display::None {
            continue;
        }
        if child_style.position == crate::style::PositionType::Absolute {
            absolute_children.push(child);
            continue;
        }
        entries.push((index, child, child_style));
    }
    entries.sort_by_key(|(index, _, style)| (style.order, *index));
    if style.flex_direction.is_reversed() {
        entries.reverse();
    }

    // STEP 3: Resolve each item's flex base size and hypothetical main
    // size.
    let mut items: Vec<FlexItem> = Vec::with_capacity(entries.len());
    for (_original_index, child, child_style) in entries {
        let item_resolved = box_model::resolve_box(&child_style, container_width, container_height, direction);
        let main_bounds = if is_row { item_resolved.width_bounds } else { item_resolved.height_bounds };
        let non_main = if is_row {
            item_resolved.padding.left + item_resolved.padding.right + item_resolved.border.left + item_resolved.border.right
        } else {
            item_resolved.padding.top + item_resolved.padding.bottom + item_resolved.border.top + item_resolved.border.bottom
        };
        let content_bounds = AxisBounds {
            min: (main_bounds.min - non_main).max(0.0),
            max: if main_bounds.max.is_finite() { (main_bounds.max - non_main).max(0.0) } else { f32::INFINITY },
        };

        let main_size_style = if is_row { &child_style.width } else { &child_style.height };
        // [§ 7 Error handling] — "NaN in style... treat NaN as indefinite."
        // A `resolve()` hit that isn't finite must fall through to the
        // measure/recursive-probe fallback chain below, not poison
        // `hypothetical_main` with NaN for the rest of the algorithm.
        let definite_basis = if !matches!(child_style.flex_basis, crate::length::Length::Auto) {
            child_style.flex_basis.resolve(main_reference).filter(|v| v.is_finite())
        } else {
            None
        };
        let definite_main = main_size_style.resolve(main_reference).filter(|v| v.is_finite());

        let base_size_border_box = definite_basis.or(definite_main);
        let base_size = if let Some(border_box_value) = base_size_border_box {
            match child_style.box_sizing {
                crate::style::BoxSizing::BorderBox => (border_box_value - non_main).max(0.0),
                crate::style::BoxSizing::ContentBox => border_box_value,
            }
        } else if tree.has_measure_func(child) {
            let delegate = tree.measure_delegate(child);
            let (w, h, _) = measure_leaf_content(&item_resolved, &child_style, Constraint::indefinite(), Constraint::indefinite(), delegate);
            if is_row { w } else { h }
        } else if let Some(derived) = aspect_ratio_main_from_cross(&child_style, &item_resolved, cross_reference, style.align_items, is_row) {
            derived
        } else {
            let probe_width = if is_row { Constraint::indefinite() } else { Constraint::at_most(container_width.unwrap_or(f32::MAX)) };
            let probe_height = if is_row { Constraint::at_most(container_height.unwrap_or(f32::MAX)) } else { Constraint::indefinite() };
            let probe = layout_node(tree, child, probe_width, probe_height, direction);
            (if is_row { probe.width } else { probe.height } - non_main).max(0.0)
        };

        let hypothetical_main = content_bounds.clamp(base_size);

        let align = child_style.align_self.resolve(style.align_items);
        items.push(FlexItem {
            node: child,
            resolved: item_resolved,
            align,
            grow: child_style.flex_grow.max(0.0),
            shrink: child_style.flex_shrink.max(0.0),
            base_size: hypothetical_main,
            hypothetical_main,
            target_main: hypothetical_main,
            frozen: false,
            cross_size: 0.0,
            main_offset: 0.0,
            cross_offset: 0.0,
            baseline: None,
            child_layout: LayoutResult::default(),
            width_constraint: Constraint::default(),
            height_constraint: Constraint::default(),
        });
    }

    // STEP 4: Line-break into flex lines.
    let mut lines: Vec<FlexLine> = Vec::new();
    if style.flex_wrap == crate::style::FlexWrap::NoWrap || main_reference.is_none() {
        lines.push(FlexLine {
            items: (0..items.len()).collect(),
            cross_size: 0.0,
            cross_offset: 0.0,
        });
    } else {
        let mut current: Vec<usize> = Vec::new();
        let mut current_main = 0.0_f32;
        for (i, item) in items.iter().enumerate() {
            let item_main = item.hypothetical_main + item.outer_main_fixed(is_row);
            let with_gap = if current.is_empty() { item_main } else { current_main + gap_main + item_main };
            if !current.is_empty() && with_gap > inner_main + EPSILON {
                lines.push(FlexLine { items: std::mem::take(&mut current), cross_size: 0.0, cross_offset: 0.0 });
                current_main = item_main;
            } else {
                current_main = with_gap;
            }
            current.push(i);
        }
        if !current.is_empty() {
            lines.push(FlexLine { items: current, cross_size: 0.0, cross_offset: 0.0 });
        }
        if style.flex_wrap == crate::style::FlexWrap::WrapReverse {
            lines.reverse();
        }
    }

    // A content-sized main axis (no definite `main_reference`) has no
    // external main space to grow or shrink into — STEP 4 forced it onto a
    // single line, and that line's own hypothetical content is its
    // available space, so the freeze loop and `justify-content` see no
    // free space and no overflow either way.
    let available_main = main_reference.unwrap_or_else(|| {
        let line = &lines[0];
        let sum: f32 = line.items.iter().map(|&i| items[i].hypothetical_main + items[i].outer_main_fixed(is_row)).sum();
        sum + gap_main * line.items.len().saturating_sub(1) as f32
    });

    // STEP 5: Resolve flexible lengths, per line.
    for line in &lines {
        let indices = line.items.clone();
        resolve_flexible_lengths(&mut items, &indices, available_main, gap_main, is_row);
    }

    // STEP 6: Cross-size each item, laying out its subtree with its
    // resolved main size.
    for item in &mut items {
        let main_border_box = item.target_main
            + if is_row {
                item.resolved.padding.left + item.resolved.padding.right + item.resolved.border.left + item.resolved.border.right
            } else {
                item.resolved.padding.top + item.resolved.padding.bottom + item.resolved.border.top + item.resolved.border.bottom
            };

        let (width_c, height_c) = if is_row {
            (Constraint::exactly(main_border_box), item.resolved.border_box_height.map_or(Constraint::at_most(cross_reference.unwrap_or(f32::MAX)), Constraint::exactly))
        } else {
            (item.resolved.border_box_width.map_or(Constraint::at_most(cross_reference.unwrap_or(f32::MAX)), Constraint::exactly), Constraint::exactly(main_border_box))
        };
        let child_result = layout_node(tree, item.node, width_c, height_c, direction);
        item.child_layout = child_result;
        item.baseline = child_result.baseline;
        item.width_constraint = width_c;
        item.height_constraint = height_c;

        let natural_cross = if is_row { child_result.height } else { child_result.width };
        item.cross_size = natural_cross;
    }

    // STEP 7: Cross size of each line.
    for line in &mut lines {
        line.cross_size = line
            .items
            .iter()
            .map(|&i| items[i].cross_size + items[i].cross_outer(is_row))
            .fold(0.0_f32, f32::max);
    }
    let single_line_stretch = lines.len() == 1 && style.align_content == AlignContent::Stretch;
    if single_line_stretch {
        if let Some(cross_ref) = cross_reference {
            lines[0].cross_size = lines[0].cross_size.max(cross_ref);
        }
    }

    // STEP 9 (computed before 8 purely for data-flow convenience): stretch
    // items whose cross dimension is indefinite and whose alignment is
    // `Stretch`, then re-measure if their size actually changed.
    for line in &lines {
        for &i in &line.items {
            let item = &mut items[i];
            let cross_is_definite = if is_row { item.resolved.border_box_height.is_some() } else { item.resolved.border_box_width.is_some() };
            if item.align == AlignItems::Stretch && !cross_is_definite {
                let (cross_start, cross_end) = item.cross_margins(is_row);
                if cross_start.is_some() && cross_end.is_some() {
                    let stretched = (line.cross_size - item.cross_outer(is_row)).max(0.0);
                    if (stretched - item.cross_size).abs() > EPSILON {
                        item.cross_size = stretched;
                        let main_border_box = item.target_main
                            + if is_row {
                                item.resolved.padding.left + item.resolved.padding.right + item.resolved.border.left + item.resolved.border.right
                            } else {
                                item.resolved.padding.top + item.resolved.padding.bottom + item.resolved.border.top + item.resolved.border.bottom
                            };
                        let (width_c, height_c) = if is_row {
                            (Constraint::exactly(main_border_box), Constraint::exactly(stretched))
                        } else {
                            (Constraint::exactly(stretched), Constraint::exactly(main_border_box))
                        };
                        item.child_layout = layout_node(tree, item.node, width_c, height_c, direction);
                        item.baseline = item.child_layout.baseline;
                        item.width_constraint = width_c;
                        item.height_constraint = height_c;
                    }
                }
            }
        }
    }

    // STEP 8: Distribute main-axis positions per `justify-content`, with
    // auto margins on the main axis absorbing free space first.
    for line in &mut lines {
        justify_line(&mut items, line, available_main, gap_main, style.justify_content, is_row);
    }

    // STEP 10: Line cross positions per `align-content`.
    let total_cross = cross_reference.unwrap_or_else(|| lines.iter().map(|l| l.cross_size).sum::<f32>() + gap_cross * (lines.len().saturating_sub(1)) as f32);
    position_lines(&mut lines, total_cross, gap_cross, style.align_content);

    // STEP 9: Cross-axis position per item (align-items/align-self),
    // including baseline alignment and auto-margin absorption.
    let line_max_baseline: Vec<Option<f32>> = lines
        .iter()
        .map(|line| line.items.iter().filter_map(|&i| items[i].baseline).fold(None, |acc: Option<f32>, b| Some(acc.map_or(b, |a| a.max(b)))))
        .collect();
    for (line_idx, line) in lines.iter().enumerate() {
        for &i in &line.items {
            align_item_cross(&mut items[i], line, line_max_baseline[line_idx], is_row);
        }
    }

    // STEP 11: Write back. Convert each item's (main, cross) local
    // position into (x, y) relative to the container's content origin,
    // mirroring the horizontal axis under RTL.
    for item in &mut items {
        let (local_x, local_y) = if is_row { (item.main_offset, item.cross_offset) } else { (item.cross_offset, item.main_offset) };
        let width = if is_row { item.target_main + main_non_content(&item.resolved, true) } else { item.cross_size + main_non_content(&item.resolved, false) };
        let height = if is_row { item.cross_size + main_non_content(&item.resolved, false) } else { item.target_main + main_non_content(&item.resolved, true) };

        let mirrored_x = if direction == Direction::Rtl { inner_main_for_mirror(is_row, inner_main, total_cross) - local_x - width } else { local_x };

        // [§ 4.H Public contract] — "Coordinates are relative to the
        // parent's content origin plus the parent's border+padding": the
        // item's position above is local to this container's content box,
        // so translate it into the container's own border-box-relative
        // frame before handing it back to the caller.
        let mut result = item.child_layout;
        result.left = mirrored_x + resolved.padding.left + resolved.border.left;
        result.top = local_y + resolved.padding.top + resolved.border.top;
        result.width = width;
        result.height = height;
        result.margin = Edges {
            left: item.resolved.margin.left.unwrap_or(0.0),
            right: item.resolved.margin.right.unwrap_or(0.0),
            top: item.resolved.margin.top.unwrap_or(0.0),
            bottom: item.resolved.margin.bottom.unwrap_or(0.0),
        };
        // Re-use the exact constraint pair `child_layout` was produced
        // under (step 6, possibly refreshed by step 9's stretch
        // re-measure) so this patched-in position lands under the same
        // cache key the next unchanged-tree lookup will probe.
        tree.store_result(item.node, item.width_constraint, item.height_constraint, direction, result);
    }

    // Container's own content size.
    let content_main = available_main.max(main_reference.unwrap_or(0.0));
    let content_cross = cross_reference.unwrap_or(total_cross);
    let (content_width_out, content_height_out) = if is_row { (content_main, content_cross) } else { (content_cross, content_main) };

    // Absolute children are resolved against this container's padding box
    // after in-flow layout completes.
    for child in absolute_children {
        crate::absolute::layout_absolute_child(tree, node, child, resolved, content_width_out, content_height_out, direction);
    }

    (content_width_out, content_height_out, None)
}

fn main_non_content(resolved: &ResolvedBox, is_main_axis_physical_horizontal: bool) -> f32 {
    if is_main_axis_physical_horizontal {
        resolved.padding.left + resolved.padding.right + resolved.border.left + resolved.border.right
    } else {
        resolved.padding.top + resolved.padding.bottom + resolved.border.top + resolved.border.bottom
    }
}

fn inner_main_for_mirror(is_row: bool, inner_main: f32, total_cross: f32) -> f32 {
    if is_row { inner_main } else { total_cross }
}

/// [§ 4.F step 5 / § 9.7 Resolving Flexible Lengths] — the freeze-loop
/// algorithm, scoped to one flex line's item indices.
fn resolve_flexible_lengths(items: &mut [FlexItem], line: &[usize], available_main: f32, gap_main: f32, is_row: bool) {
    if line.is_empty() {
        return;
    }
    let gaps_total = gap_main * (line.len().saturating_sub(1)) as f32;
    let available = available_main - gaps_total;

    let sum_outer_hypo: f32 = line.iter().map(|&i| items[i].hypothetical_main + items[i].outer_main_fixed(is_row)).sum();
    let growing = sum_outer_hypo < available;

    for &i in line {
        let item = &mut items[i];
        let factor = if growing { item.grow } else { item.shrink };
        let freeze = factor == 0.0 || (growing && item.base_size > item.hypothetical_main) || (!growing && item.base_size < item.hypothetical_main);
        item.target_main = item.hypothetical_main;
        item.frozen = freeze;
    }

    let sum_current = |items: &[FlexItem]| -> f32 {
        line.iter().map(|&i| if items[i].frozen { items[i].target_main } else { items[i].base_size } + items[i].outer_main_fixed(is_row)).sum()
    };
    let initial_free_space = available - sum_current(items);

    loop {
        if line.iter().all(|&i| items[i].frozen) {
            break;
        }
        let remaining_free = available - sum_current(items);
        let unfrozen_factor_sum: f32 = line.iter().filter(|&&i| !items[i].frozen).map(|&i| if growing { items[i].grow } else { items[i].shrink }).sum();

        let free_space = if unfrozen_factor_sum < 1.0 && unfrozen_factor_sum > 0.0 {
            let scaled = initial_free_space * unfrozen_factor_sum;
            if scaled.abs() < remaining_free.abs() { scaled } else { remaining_free }
        } else {
            remaining_free
        };

        if growing {
            let grow_sum: f32 = line.iter().filter(|&&i| !items[i].frozen).map(|&i| items[i].grow).sum();
            if grow_sum > 0.0 {
                for &i in line.iter().filter(|&&i| !items[i].frozen) {
                    let ratio = items[i].grow / grow_sum;
                    items[i].target_main = items[i].base_size + free_space * ratio;
                }
            }
        } else {
            let scaled_shrink_sum: f32 = line.iter().filter(|&&i| !items[i].frozen).map(|&i| items[i].shrink * items[i].base_size).sum();
            if scaled_shrink_sum > 0.0 {
                for &i in line.iter().filter(|&&i| !items[i].frozen) {
                    let scaled = items[i].shrink * items[i].base_size;
                    let ratio = scaled / scaled_shrink_sum;
                    items[i].target_main = free_space.abs().mul_add(-ratio, items[i].base_size);
                }
            }
        }

        let mut total_violation = 0.0_f32;
        for &i in line.iter().filter(|&&i| !items[i].frozen) {
            let item = &mut items[i];
            let main_bounds = AxisBounds { min: 0.0, max: f32::INFINITY };
            let clamped = main_bounds.clamp(item.target_main);
            total_violation += clamped - item.target_main;
            item.target_main = clamped;
        }

        if total_violation.abs() < EPSILON {
            for &i in line {
                items[i].frozen = true;
            }
        } else if total_violation > 0.0 {
            for &i in line.iter().filter(|&&i| !items[i].frozen) {
                if items[i].target_main <= EPSILON {
                    items[i].frozen = true;
                }
            }
        } else {
            for &i in line {
                items[i].frozen = true;
            }
        }
    }
}

/// [§ 4.F step 8] — `justify-content`, with auto margins absorbing free
/// space first.
fn justify_line(items: &mut [FlexItem], line: &mut FlexLine, inner_main: f32, gap_main: f32, justify: JustifyContent, is_row: bool) {
    let n = line.items.len();
    if n == 0 {
        return;
    }
    let gaps_total = gap_main * (n.saturating_sub(1)) as f32;
    let used: f32 = line.items.iter().map(|&i| items[i].target_main + items[i].outer_main_fixed(is_row)).sum();
    let free_space = (inner_main - used - gaps_total).max(0.0);

    let auto_margin_count: usize = line.items.iter().map(|&i| items[i].main_auto_count(is_row)).sum();
    if auto_margin_count > 0 {
        let per_auto = free_space / auto_margin_count as f32;
        for &i in &line.items {
            let (start, end) = items[i].main_margins(is_row);
            if start.is_none() {
                set_resolved_main_margin(&mut items[i], is_row, true, per_auto);
            }
            if end.is_none() {
                set_resolved_main_margin(&mut items[i], is_row, false, per_auto);
            }
        }
        place_items_sequentially(items, &line.items, 0.0, gap_main, is_row);
        return;
    }

    let (initial_offset, gap_extra) = match justify {
        JustifyContent::FlexStart | JustifyContent::Start => (0.0, 0.0),
        JustifyContent::FlexEnd | JustifyContent::End => (free_space, 0.0),
        JustifyContent::Center => (free_space / 2.0, 0.0),
        JustifyContent::SpaceBetween => {
            if n <= 1 { (0.0, 0.0) } else { (0.0, free_space / (n - 1) as f32) }
        }
        JustifyContent::SpaceAround => {
            let gap = free_space / n as f32;
            (gap / 2.0, gap)
        }
        JustifyContent::SpaceEvenly => {
            let gap = free_space / (n + 1) as f32;
            (gap, gap)
        }
        JustifyContent::Stretch => (0.0, 0.0),
    };
    place_items_sequentially(items, &line.items, initial_offset, gap_main + gap_extra, is_row);
}

fn set_resolved_main_margin(item: &mut FlexItem, is_row: bool, start: bool, value: f32) {
    if is_row {
        if start { item.resolved.margin.left = Some(value); } else { item.resolved.margin.right = Some(value); }
    } else if start {
        item.resolved.margin.top = Some(value);
    } else {
        item.resolved.margin.bottom = Some(value);
    }
}

fn place_items_sequentially(items: &mut [FlexItem], line_items: &[usize], initial_offset: f32, gap: f32, is_row: bool) {
    let mut cursor = initial_offset;
    for (idx, &i) in line_items.iter().enumerate() {
        items[i].main_offset = cursor;
        cursor += items[i].target_main + items[i].outer_main_fixed(is_row);
        if idx + 1 < line_items.len() {
            cursor += gap;
        }
    }
}

/// [§ 4.F step 10] — `align-content` across lines.
fn position_lines(lines: &mut [FlexLine], total_cross: f32, gap_cross: f32, align_content: AlignContent) {
    let n = lines.len();
    if n == 0 {
        return;
    }
    let used: f32 = lines.iter().map(|l| l.cross_size).sum::<f32>() + gap_cross * (n.saturating_sub(1)) as f32;
    let free_space = (total_cross - used).max(0.0);

    let (initial_offset, gap_extra, stretch_each) = match align_content {
        AlignContent::FlexStart => (0.0, 0.0, false),
        AlignContent::FlexEnd => (free_space, 0.0, false),
        AlignContent::Center => (free_space / 2.0, 0.0, false),
        AlignContent::Stretch => (0.0, 0.0, true),
        AlignContent::SpaceBetween => {
            if n <= 1 { (0.0, 0.0, false) } else { (0.0, free_space / (n - 1) as f32, false) }
        }
        AlignContent::SpaceAround => {
            let gap = free_space / n as f32;
            (gap / 2.0, gap, false)
        }
    };

    if stretch_each && free_space > 0.0 {
        let extra_each = free_space / n as f32;
        for line in lines.iter_mut() {
            line.cross_size += extra_each;
        }
    }

    let mut cursor = initial_offset;
    for (idx, line) in lines.iter_mut().enumerate() {
        line.cross_offset = cursor;
        cursor += line.cross_size;
        if idx + 1 < n {
            cursor += gap_cross + gap_extra;
        }
    }
}

/// [§ 4.F step 9] — per-item cross-axis alignment, including baseline and
/// auto-margin absorption.
fn align_item_cross(item: &mut FlexItem, line: &FlexLine, line_baseline: Option<f32>, is_row: bool) {
    let (cross_start, cross_end) = item.cross_margins(is_row);
    let free = (line.cross_size - item.cross_size - item.cross_outer(is_row)).max(0.0);

    if cross_start.is_none() || cross_end.is_none() {
        let auto_count = usize::from(cross_start.is_none()) + usize::from(cross_end.is_none());
        let per_auto = free / auto_count as f32;
        if cross_start.is_none() {
            set_resolved_cross_margin(item, is_row, true, per_auto);
        }
        if cross_end.is_none() {
            set_resolved_cross_margin(item, is_row, false, per_auto);
        }
        item.cross_offset = line.cross_offset;
        return;
    }

    let local_offset = match item.align {
        AlignItems::FlexStart => 0.0,
        AlignItems::FlexEnd => free,
        AlignItems::Center => free / 2.0,
        AlignItems::Stretch => 0.0,
        AlignItems::Baseline => match (item.baseline, line_baseline) {
            (Some(b), Some(max_b)) => (max_b - b).max(0.0),
            _ => 0.0,
        },
    };
    item.cross_offset = line.cross_offset + local_offset;
}

fn set_resolved_cross_margin(item: &mut FlexItem, is_row: bool, start: bool, value: f32) {
    if is_row {
        if start { item.resolved.margin.top = Some(value); } else { item.resolved.margin.bottom = Some(value); }
    } else if start {
        item.resolved.margin.left = Some(value);
    } else {
        item.resolved.margin.right = Some(value);
    }
}
