//! The per-node computed style record.
//!
//! [§ 3 Data model] — "`ComputedStyle` per node, flat record containing..."
//!
//! Enum discriminants below intentionally mirror the numeric values of the
//! original C ABI's enums where an observer could depend on them (e.g. a
//! host that serializes raw integers across the boundary). Where the
//! original's default discriminant (`0`) disagrees with this specification's
//! stated default (`FlexDirection::Column == 0` but `FlexWrap::Wrap == 0`
//! while the *default* is `NoWrap`), [`ComputedStyle::default`] sets fields
//! explicitly rather than relying on `#[derive(Default)]` discriminant
//! order.

use crate::length::{Direction, Edges, Length};

/// [§ 4.H Public contract] — "`display` (`None`|`Flex`)."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// The node and its subtree generate no boxes.
    None = 0,
    /// The node is a flex container.
    Flex = 1,
}

/// [§ 3 Data model] — "`position` (`Relative`|`Absolute`)."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionType {
    /// Out-of-flow, positioned against the nearest positioned ancestor.
    Absolute = 0,
    /// In-flow; `position[edge]` offsets shift the box after flow layout.
    /// (Not modeled separately from `Flex`'s own positioning in this
    /// engine — `Relative` items still participate in flex flow.)
    Relative = 1,
}

/// [§ 3 Data model] — "`box_sizing` (`BorderBox`|`ContentBox`)."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSizing {
    /// `width`/`height` denote the border box directly.
    BorderBox = 0,
    /// `width`/`height` denote the content box; border and padding are
    /// added to form the border box.
    ContentBox = 1,
}

/// [§ 4.F step 2] — "Row-family: main=horizontal, cross=vertical;
/// Column-family: swapped."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    /// Main axis vertical, top to bottom. The default.
    Column = 0,
    /// Main axis horizontal, left to right (mirrored under RTL).
    Row = 1,
    /// Main axis horizontal, reversed.
    RowReverse = 2,
    /// Main axis vertical, reversed.
    ColumnReverse = 3,
}

impl FlexDirection {
    /// `true` for `Row`/`RowReverse`.
    #[must_use]
    pub fn is_row(self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }

    /// `true` for the `*Reverse` variants.
    #[must_use]
    pub fn is_reversed(self) -> bool {
        matches!(
            self,
            FlexDirection::RowReverse | FlexDirection::ColumnReverse
        )
    }
}

/// [§ 4.F step 4] — "If `flex_wrap == NoWrap`, a single line contains all
/// items. Otherwise, greedily pack items into lines..."
///
/// Note the discriminant of `Wrap` is `0` (matching the original ABI) even
/// though the *default value* of this property is `NoWrap` — see the
/// module-level doc comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexWrap {
    /// Items wrap onto additional lines.
    Wrap = 0,
    /// All items on a single line, shrinking or overflowing as needed.
    NoWrap = 1,
    /// Items wrap, but lines are produced in reverse cross-axis order.
    WrapReverse = 2,
}

/// [§ 4.F step 8] — main-axis free-space distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JustifyContent {
    /// Pack at the leading edge of the main axis.
    FlexStart,
    /// Pack at the line's logical start (identical to `FlexStart` here;
    /// direction mirroring is handled upstream of this keyword).
    Start,
    /// Equal space before and after the items as a group.
    Center,
    /// Pack at the trailing edge of the main axis.
    FlexEnd,
    /// Pack at the line's logical end.
    End,
    /// `free/(n-1)` between items, none at the ends.
    SpaceBetween,
    /// `free/n` outside, `free/n` between, half at each end.
    SpaceAround,
    /// `free/(n+1)` everywhere, including both ends.
    SpaceEvenly,
    /// Flex extension: items without an explicit main size share free
    /// space equally.
    Stretch,
}

/// [§ 4.F step 10] — cross-axis free-space distribution across lines.
///
/// Note this enumeration has no `SpaceEvenly` variant, matching the
/// original ABI's `align-content` surface (unlike `justify-content`, which
/// does).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignContent {
    /// Pack lines at the leading cross-axis edge.
    FlexStart,
    /// Pack lines at the trailing cross-axis edge.
    FlexEnd,
    /// Equal space before and after the lines as a group.
    Center,
    /// Lines expand to fill the container's cross size. The default.
    Stretch,
    /// `free/(n-1)` between lines, none at the ends.
    SpaceBetween,
    /// `free/n` outside, `free/n` between, half at each end.
    SpaceAround,
}

/// [§ 4.F step 9] — per-item cross-axis alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignItems {
    /// Align to the leading cross-axis edge.
    FlexStart,
    /// Align to the trailing cross-axis edge.
    FlexEnd,
    /// Center within the line's cross extent.
    Center,
    /// Stretch to fill the line's cross extent. The default.
    Stretch,
    /// Align the items' first baseline.
    Baseline,
}

/// [§ 4.F step 9] — `align-self` overrides `align-items` per item, with an
/// extra `Auto` meaning "defer to the container's `align-items`".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignSelf {
    /// Defer to the container's `align_items`. The default.
    Auto,
    /// Align to the leading cross-axis edge.
    FlexStart,
    /// Align to the trailing cross-axis edge.
    FlexEnd,
    /// Center within the line's cross extent.
    Center,
    /// Stretch to fill the line's cross extent.
    Stretch,
    /// Align the item's first baseline.
    Baseline,
}

impl AlignSelf {
    /// Resolve against the container's `align_items`, expanding `Auto`.
    #[must_use]
    pub fn resolve(self, align_items: AlignItems) -> AlignItems {
        match self {
            AlignSelf::Auto => align_items,
            AlignSelf::FlexStart => AlignItems::FlexStart,
            AlignSelf::FlexEnd => AlignItems::FlexEnd,
            AlignSelf::Center => AlignItems::Center,
            AlignSelf::Stretch => AlignItems::Stretch,
            AlignSelf::Baseline => AlignItems::Baseline,
        }
    }
}

/// Which gutter a `gap` setter targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// The gutter between columns (main axis in a row container).
    Column,
    /// The gutter between rows (main axis in a column container).
    Row,
    /// Both gutters at once.
    All,
}

/// The flat per-node style record.
///
/// [§ 3 Data model]
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedStyle {
    // --- Box ---
    /// `display` (`None`|`Flex`). Default `Flex`.
    pub display: Display,
    /// `position` (`Relative`|`Absolute`). Default `Relative`.
    pub position: PositionType,
    /// `box_sizing` (`BorderBox`|`ContentBox`). Default `BorderBox`.
    pub box_sizing: BoxSizing,
    /// Explicit direction, or `None` to inherit from the parent (the root
    /// inherits `Ltr`).
    pub direction: Option<Direction>,
    /// Stable-sort key within a flex container. Default `0`; see
    /// `DESIGN.md` for the documented ambiguity with `aspect_ratio == 0`.
    pub order: i32,
    /// Width-to-height ratio; `0.0` means unset.
    pub aspect_ratio: f32,

    // --- Dimensions ---
    /// Preferred width.
    pub width: Length,
    /// Preferred height.
    pub height: Length,
    /// Minimum width; `Auto` means unconstrained (`0`).
    pub min_width: Length,
    /// Maximum width; `Auto` means unconstrained (`+inf`).
    pub max_width: Length,
    /// Minimum height; `Auto` means unconstrained (`0`).
    pub min_height: Length,
    /// Maximum height; `Auto` means unconstrained (`+inf`).
    pub max_height: Length,

    // --- Insets ---
    /// `top`/`right`/`bottom`/`left` offsets for positioned boxes.
    pub inset: Edges<Length>,

    // --- Box model ---
    /// Margin per edge; `Auto` absorbs free space.
    pub margin: Edges<Length>,
    /// Padding per edge; `Auto` is not a legal value (never constructed by
    /// the setters in [`crate::api`]).
    pub padding: Edges<Length>,
    /// Border width per edge, in pixels (always definite).
    pub border: Edges<f32>,
    /// Column (horizontal) gutter between flex items.
    pub gap_column: Length,
    /// Row (vertical) gutter between flex items.
    pub gap_row: Length,

    // --- Flex container ---
    /// Main-axis direction. Default `Column`.
    pub flex_direction: FlexDirection,
    /// Line-wrapping behavior. Default `NoWrap`.
    pub flex_wrap: FlexWrap,
    /// Main-axis free-space distribution. Default `FlexStart`.
    pub justify_content: JustifyContent,
    /// Cross-axis free-space distribution across lines. Default `Stretch`.
    pub align_content: AlignContent,
    /// Default per-item cross-axis alignment. Default `Stretch`.
    pub align_items: AlignItems,

    // --- Flex item ---
    /// Growth factor; `>= 0`.
    pub flex_grow: f32,
    /// Shrink factor; `>= 0`.
    pub flex_shrink: f32,
    /// Flex basis; `Auto` defers to the item's main-axis size or content.
    pub flex_basis: Length,
    /// Per-item override of the container's `align_items`. Default `Auto`.
    pub align_self: AlignSelf,
}

impl Default for ComputedStyle {
    /// [§ 6 External interfaces] — "Sentinels and defaults."
    fn default() -> Self {
        ComputedStyle {
            display: Display::Flex,
            position: PositionType::Relative,
            box_sizing: BoxSizing::BorderBox,
            direction: None,
            order: 0,
            aspect_ratio: 0.0,

            width: Length::Auto,
            height: Length::Auto,
            min_width: Length::Auto,
            max_width: Length::Auto,
            min_height: Length::Auto,
            max_height: Length::Auto,

            inset: Edges::uniform(Length::Auto),

            margin: Edges::uniform(Length::Point(0.0)),
            padding: Edges::uniform(Length::Point(0.0)),
            border: Edges::uniform(0.0),
            gap_column: Length::Point(0.0),
            gap_row: Length::Point(0.0),

            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_content: AlignContent::Stretch,
            align_items: AlignItems::Stretch,

            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Length::Auto,
            align_self: AlignSelf::Auto,
        }
    }
}

impl ComputedStyle {
    /// Apply the `flex` convenience shorthand.
    ///
    /// [§ 6 External interfaces] — "The `flex` convenience setter expands
    /// to `flex_grow = value`, `flex_shrink = 1`, `flex_basis = 0pt`."
    pub fn set_flex(&mut self, value: f32) {
        self.flex_grow = value;
        self.flex_shrink = 1.0;
        self.flex_basis = Length::Point(0.0);
    }

    /// The effective direction, inheriting from `parent_direction` when
    /// unset (root nodes inherit `Ltr`).
    #[must_use]
    pub fn effective_direction(&self, parent_direction: Direction) -> Direction {
        self.direction.unwrap_or(parent_direction)
    }
}

#[cfg(test)]
mod tests {
    use super::{AlignItems, AlignSelf, BoxSizing, ComputedStyle, Display, FlexDirection};
    use crate::length::Length;

    #[test]
    fn defaults_match_specification() {
        let style = ComputedStyle::default();
        assert_eq!(style.display, Display::Flex);
        assert_eq!(style.flex_direction, FlexDirection::Column);
        assert_eq!(style.box_sizing, BoxSizing::BorderBox);
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.flex_grow, 0.0);
    }

    #[test]
    fn flex_shorthand_expands() {
        let mut style = ComputedStyle::default();
        style.set_flex(2.0);
        assert_eq!(style.flex_grow, 2.0);
        assert_eq!(style.flex_shrink, 1.0);
        assert_eq!(style.flex_basis, Length::Point(0.0));
    }

    #[test]
    fn align_self_auto_defers_to_container() {
        assert_eq!(
            AlignSelf::Auto.resolve(AlignItems::Center),
            AlignItems::Center
        );
        assert_eq!(
            AlignSelf::Baseline.resolve(AlignItems::Stretch),
            AlignItems::Baseline
        );
    }
}
