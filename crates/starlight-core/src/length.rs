//! Length values, edges, and measurement constraints.
//!
//! [§ 4.A Value types](https://www.w3.org/TR/css-flexbox-1/) (informal — see
//! crate-level docs for the governing specifications).

/// The sentinel used at the public boundary to mean "indefinite".
///
/// Chosen larger than any real layout size, matching the original C ABI's
/// `SLUndefined` constant bit-for-bit. Internal code should prefer
/// `Option<f32>`; this constant only appears at [`crate::api`] boundaries.
pub const INDEFINITE: f32 = 1e21;

/// A CSS length: a tagged union of the value kinds a layout property can
/// hold.
///
/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
#[derive(Debug, Clone, PartialEq)]
pub enum Length {
    /// A fixed length in logical pixels.
    Point(f32),
    /// A percentage of the reference axis (0.0..=1.0 is the common case but
    /// not enforced; values outside that range are valid CSS).
    Percent(f32),
    /// The engine computes the value from content or free space.
    Auto,
    /// Resolves to the natural (max-content) size of the item's content.
    MaxContent,
    /// Resolves to `min(max-content, available)`.
    FitContent,
    /// A left-to-right sum of child lengths, each itself `Point` or
    /// `Percent`.
    Calc(Vec<Length>),
}

impl Default for Length {
    fn default() -> Self {
        Length::Auto
    }
}

impl Length {
    /// Resolve this length against a reference size, returning `None` for
    /// indefinite variants (`Auto`, `MaxContent`, `FitContent`, or a `Calc`
    /// containing an indefinite term).
    ///
    /// [§ 4.A Value types] — "Resolution against a reference `R` yields:
    /// `Point` → `f`; `Percent` → `p · R`; `Auto`/`MaxContent`/`FitContent`
    /// → indefinite; `Calc` → recursive sum."
    #[must_use]
    pub fn resolve(&self, reference: Option<f32>) -> Option<f32> {
        match self {
            Length::Point(v) => Some(*v),
            Length::Percent(p) => reference.map(|r| p * r),
            Length::Auto | Length::MaxContent | Length::FitContent => None,
            Length::Calc(parts) => {
                let mut sum = 0.0_f32;
                for part in parts {
                    sum += part.resolve(reference)?;
                }
                Some(sum)
            }
        }
    }

    /// `true` iff resolution against `reference` yields a finite, definite
    /// value (not `None`, and not the `INDEFINITE` sentinel itself).
    #[must_use]
    pub fn is_definite(&self, reference: Option<f32>) -> bool {
        matches!(self.resolve(reference), Some(v) if v.is_finite() && v < INDEFINITE)
    }

    /// Resolve this length, clamping the result to zero. Used for padding
    /// and border, which can never be negative.
    ///
    /// [§ 4.A] — "Arithmetic helpers clamp negatives to zero for padding/
    /// border (never for position offsets or margins)."
    #[must_use]
    pub fn resolve_non_negative(&self, reference: Option<f32>) -> f32 {
        self.resolve(reference).unwrap_or(0.0).max(0.0)
    }

    /// Convert a boundary value expressed with the [`INDEFINITE`] sentinel
    /// into `Option<f32>`.
    #[must_use]
    pub fn from_sentinel(value: f32) -> Option<f32> {
        if !value.is_finite() || value.abs() >= INDEFINITE {
            None
        } else {
            Some(value)
        }
    }

    /// Convert an `Option<f32>` back into the boundary sentinel
    /// representation.
    #[must_use]
    pub fn to_sentinel(value: Option<f32>) -> f32 {
        value.unwrap_or(INDEFINITE)
    }
}

/// One of the four physical box edges, or a logical/fan shortcut used only
/// at the style-setter boundary.
///
/// [§ 4.H Public contract] — "Shortcuts `Horizontal`, `Vertical`, `All` are
/// write-only fans that update multiple sides."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Physical left edge.
    Left,
    /// Physical right edge.
    Right,
    /// Physical top edge.
    Top,
    /// Physical bottom edge.
    Bottom,
    /// Logical start edge: `Left` in LTR, `Right` in RTL.
    Start,
    /// Logical end edge: `Right` in LTR, `Left` in RTL.
    End,
    /// Write-only fan: both `Left` and `Right`.
    Horizontal,
    /// Write-only fan: both `Top` and `Bottom`.
    Vertical,
    /// Write-only fan: all four physical edges.
    All,
}

/// Inline/block flow direction.
///
/// [§ 6 Extensions](https://www.w3.org/TR/css-writing-modes-4/#direction) —
/// governs which physical edge `Start`/`End` resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Left-to-right; the root default.
    #[default]
    Ltr,
    /// Right-to-left.
    Rtl,
}

impl Edge {
    /// Resolve a logical or physical edge to one of the four physical
    /// edges, given the prevailing direction. Fan shortcuts are not valid
    /// inputs here; callers expand them before reaching per-edge storage.
    #[must_use]
    pub fn resolve(self, direction: Direction) -> PhysicalEdge {
        match self {
            Edge::Left => PhysicalEdge::Left,
            Edge::Right => PhysicalEdge::Right,
            Edge::Top => PhysicalEdge::Top,
            Edge::Bottom => PhysicalEdge::Bottom,
            Edge::Start => {
                if direction == Direction::Rtl {
                    PhysicalEdge::Right
                } else {
                    PhysicalEdge::Left
                }
            }
            Edge::End => {
                if direction == Direction::Rtl {
                    PhysicalEdge::Left
                } else {
                    PhysicalEdge::Right
                }
            }
            Edge::Horizontal | Edge::Vertical | Edge::All => {
                unreachable!("fan shortcuts must be expanded before resolution")
            }
        }
    }
}

/// One of the four physical box edges (no logical or fan variants).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhysicalEdge {
    /// Physical left edge.
    Left,
    /// Physical right edge.
    Right,
    /// Physical top edge.
    Top,
    /// Physical bottom edge.
    Bottom,
}

/// A value of `T` for each of the four physical box edges.
///
/// [§ 3 Data model] — "A value of `T` for each of Left, Right, Top, Bottom.
/// An accessor by logical edge (Start/End) resolves against the current
/// direction."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Edges<T> {
    /// Left edge value.
    pub left: T,
    /// Right edge value.
    pub right: T,
    /// Top edge value.
    pub top: T,
    /// Bottom edge value.
    pub bottom: T,
}

impl<T: Clone> Edges<T> {
    /// Construct edges with the same value on all four sides.
    pub fn uniform(value: T) -> Self {
        Edges {
            left: value.clone(),
            right: value.clone(),
            top: value.clone(),
            bottom: value,
        }
    }

    /// Read the physical edge value.
    #[must_use]
    pub fn get(&self, edge: PhysicalEdge) -> &T {
        match edge {
            PhysicalEdge::Left => &self.left,
            PhysicalEdge::Right => &self.right,
            PhysicalEdge::Top => &self.top,
            PhysicalEdge::Bottom => &self.bottom,
        }
    }

    /// Write the physical edge value.
    pub fn set(&mut self, edge: PhysicalEdge, value: T) {
        match edge {
            PhysicalEdge::Left => self.left = value,
            PhysicalEdge::Right => self.right = value,
            PhysicalEdge::Top => self.top = value,
            PhysicalEdge::Bottom => self.bottom = value,
        }
    }

    /// Read a logical-or-physical edge, resolving `Start`/`End` against
    /// `direction`. Fan shortcuts are not valid here.
    #[must_use]
    pub fn get_logical(&self, edge: Edge, direction: Direction) -> &T {
        self.get(edge.resolve(direction))
    }

    /// Write every physical edge named by a (possibly fan) logical edge.
    pub fn set_logical(&mut self, edge: Edge, direction: Direction, value: T) {
        match edge {
            Edge::Horizontal => {
                self.left = value.clone();
                self.right = value;
            }
            Edge::Vertical => {
                self.top = value.clone();
                self.bottom = value;
            }
            Edge::All => {
                self.left = value.clone();
                self.right = value.clone();
                self.top = value.clone();
                self.bottom = value;
            }
            other => self.set(other.resolve(direction), value),
        }
    }
}

/// One of the three measurement modes passed alongside a size when
/// measuring a node or a subtree.
///
/// [§ 3 Data model] — "One of `Undefined`, `Exactly`, `AtMost`."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MeasureMode {
    /// The size is not known; the child should report its natural size.
    #[default]
    Undefined,
    /// The size is exact; the child must use it.
    Exactly,
    /// The size is an upper bound; the child may be smaller.
    AtMost,
}

/// A `(size, mode)` pair for one axis of a measurement pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Constraint {
    /// The constrained size. Meaningless when `mode` is `Undefined`, by
    /// convention `0.0` in that case.
    pub size: f32,
    /// How `size` should be interpreted.
    pub mode: MeasureMode,
}

impl Constraint {
    /// An exact constraint of `size`.
    #[must_use]
    pub fn exactly(size: f32) -> Self {
        Constraint {
            size,
            mode: MeasureMode::Exactly,
        }
    }

    /// An upper-bound constraint of `size`.
    #[must_use]
    pub fn at_most(size: f32) -> Self {
        Constraint {
            size,
            mode: MeasureMode::AtMost,
        }
    }

    /// The indefinite constraint: `(INDEFINITE, Undefined)`.
    #[must_use]
    pub fn indefinite() -> Self {
        Constraint {
            size: INDEFINITE,
            mode: MeasureMode::Undefined,
        }
    }

    /// `true` iff this constraint pins a definite value the child must use.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.mode == MeasureMode::Exactly
    }

    /// The available size as an `Option`, `None` when `Undefined`.
    #[must_use]
    pub fn available(&self) -> Option<f32> {
        match self.mode {
            MeasureMode::Undefined => None,
            MeasureMode::Exactly | MeasureMode::AtMost => Some(self.size),
        }
    }
}

/// The unit tag of a [`StarlightValue`].
///
/// [§ 6 External interfaces] — "Style getters... length-valued properties
/// return a `StarlightValue = { value, unit }` where `unit ∈ {Point,
/// Percent, Auto, MaxContent, FitContent}`."
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    /// `value` is in logical pixels.
    Point,
    /// `value` is a raw percentage (not yet multiplied by a reference).
    Percent,
    /// The engine computes the value; `value` is `0.0` and meaningless.
    Auto,
    /// Resolves to the natural size of the item's content; `value` is
    /// `0.0` and meaningless.
    MaxContent,
    /// Resolves to `min(max-content, available)`; `value` is `0.0` and
    /// meaningless.
    FitContent,
}

/// The boundary representation of a [`Length`] returned by style getters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarlightValue {
    /// The raw numeric payload; `0.0` when `unit` carries no magnitude.
    pub value: f32,
    /// Which variant `value` should be interpreted as.
    pub unit: Unit,
}

impl From<&Length> for StarlightValue {
    /// `Length::Calc` has no single-unit boundary representation; it
    /// collapses to its reference-free resolution (`Point`), which is
    /// exact for a `Calc` of only `Point` terms and otherwise a best
    /// effort — `Calc` is never produced by the public setters in
    /// [`crate::api`], only by internal construction.
    fn from(length: &Length) -> Self {
        match length {
            Length::Point(v) => StarlightValue { value: *v, unit: Unit::Point },
            Length::Percent(p) => StarlightValue { value: *p, unit: Unit::Percent },
            Length::Auto => StarlightValue { value: 0.0, unit: Unit::Auto },
            Length::MaxContent => StarlightValue { value: 0.0, unit: Unit::MaxContent },
            Length::FitContent => StarlightValue { value: 0.0, unit: Unit::FitContent },
            Length::Calc(_) => StarlightValue { value: length.resolve(None).unwrap_or(0.0), unit: Unit::Point },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Direction, Edge, Edges, Length, PhysicalEdge, INDEFINITE};

    #[test]
    fn point_resolves_to_itself() {
        assert_eq!(Length::Point(12.0).resolve(Some(100.0)), Some(12.0));
        assert_eq!(Length::Point(12.0).resolve(None), Some(12.0));
    }

    #[test]
    fn percent_resolves_against_reference() {
        assert_eq!(Length::Percent(0.5).resolve(Some(200.0)), Some(100.0));
        assert_eq!(Length::Percent(0.5).resolve(None), None);
    }

    #[test]
    fn auto_and_content_keywords_are_indefinite() {
        assert_eq!(Length::Auto.resolve(Some(100.0)), None);
        assert_eq!(Length::MaxContent.resolve(Some(100.0)), None);
        assert_eq!(Length::FitContent.resolve(Some(100.0)), None);
    }

    #[test]
    fn calc_sums_children_left_to_right() {
        let calc = Length::Calc(vec![Length::Point(10.0), Length::Percent(0.1)]);
        assert_eq!(calc.resolve(Some(100.0)), Some(20.0));
        assert_eq!(calc.resolve(None), None);
    }

    #[test]
    fn sentinel_round_trips() {
        assert_eq!(Length::from_sentinel(INDEFINITE), None);
        assert_eq!(Length::from_sentinel(50.0), Some(50.0));
        assert_eq!(Length::to_sentinel(None), INDEFINITE);
        assert_eq!(Length::to_sentinel(Some(50.0)), 50.0);
    }

    #[test]
    fn logical_edges_resolve_by_direction() {
        let mut edges: Edges<f32> = Edges::default();
        edges.set_logical(Edge::Start, Direction::Ltr, 5.0);
        assert_eq!(*edges.get(PhysicalEdge::Left), 5.0);
        assert_eq!(*edges.get_logical(Edge::Start, Direction::Rtl), 0.0);
        assert_eq!(*edges.get_logical(Edge::End, Direction::Rtl), 5.0);
    }
}
