//! The leaf measurement delegate.
//!
//! [§ 4.E Leaf measurement] — "A node with a registered measure callback
//! is treated as a replaced element."
//!
//! [§ 9 Design notes] — "The source uses a C function pointer + opaque
//! instance. Re-architect as a capability with the operations `{measure,
//! optional baseline}` plus an opaque instance; callers register
//! implementations."

use crate::length::MeasureMode;

/// The size a [`MeasureDelegate`] reports for a given pair of axis
/// constraints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredSize {
    /// Reported width.
    pub width: f32,
    /// Reported height.
    pub height: f32,
    /// Distance from the top of the reported box to the dominant
    /// baseline, if the delegate implements `baseline`.
    pub baseline: Option<f32>,
}

/// An externally supplied intrinsic-sizing capability for a replaced leaf
/// (text, images, embedded content the engine does not understand).
///
/// [§ 5 Concurrency model] — "Measurement callbacks are invoked
/// synchronously on the same thread and must not reenter the engine on
/// that tree." [§ 3 Invariants] — "Measurement callbacks never mutate the
/// tree structure." Both are contracts on the implementor, not something
/// this trait can enforce.
pub trait Measure {
    /// Report the natural size of the leaf under the given per-axis
    /// constraints. `width`/`height` are `0.0` when the corresponding mode
    /// is [`MeasureMode::Undefined`], per [§ 4.E]: "sizes default to `0`
    /// when the mode is `Undefined` (the callback must not assume a
    /// meaningful size for undefined axes)."
    fn measure(
        &self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> (f32, f32);

    /// Report the baseline of the box this delegate last measured, if the
    /// leaf participates in baseline alignment. Returning `None` means
    /// "no opinion" — the flex algorithm falls back to the box's bottom
    /// margin edge as its baseline, per common CSS practice.
    fn baseline(&self, _width: f32, _height: f32) -> Option<f32> {
        None
    }
}

/// A boxed [`Measure`] implementation, the "opaque instance" of
/// [§ 4.H Public contract]'s `measure_func` + `instance` pair.
pub struct MeasureDelegate {
    inner: Box<dyn Measure>,
}

impl std::fmt::Debug for MeasureDelegate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureDelegate").finish_non_exhaustive()
    }
}

impl MeasureDelegate {
    /// Wrap a [`Measure`] implementation for attachment to a node.
    pub fn new(measure: impl Measure + 'static) -> Self {
        MeasureDelegate {
            inner: Box::new(measure),
        }
    }

    /// Run the delegate, honoring the short-circuit documented in
    /// [`measure_leaf`].
    #[must_use]
    pub fn measure(
        &self,
        width: f32,
        width_mode: MeasureMode,
        height: f32,
        height_mode: MeasureMode,
    ) -> MeasuredSize {
        let (w, h) = self.inner.measure(width, width_mode, height, height_mode);
        let baseline = self.inner.baseline(w, h);
        MeasuredSize {
            width: w,
            height: h,
            baseline,
        }
    }
}

/// Resolve a leaf's size given its registered delegate (or lack of one)
/// and the incoming per-axis constraints.
///
/// [§ 4.E] — "The engine supplies `(width, width_mode, height,
/// height_mode)`... The callback returns `(width, height)` and optionally
/// a baseline."
///
/// Mirrors the original engine's optimization: when both axes are
/// `Exactly`, the constrained sizes are used directly without invoking the
/// delegate at all — the delegate has no freedom to disagree with an
/// exact constraint.
#[must_use]
pub fn measure_leaf(
    delegate: Option<&MeasureDelegate>,
    width: MeasureConstraint,
    height: MeasureConstraint,
) -> MeasuredSize {
    if width.mode == MeasureMode::Exactly && height.mode == MeasureMode::Exactly {
        return MeasuredSize {
            width: width.size,
            height: height.size,
            baseline: None,
        };
    }

    let base_width = if width.mode == MeasureMode::Undefined {
        0.0
    } else {
        width.size
    };
    let base_height = if height.mode == MeasureMode::Undefined {
        0.0
    } else {
        height.size
    };

    match delegate {
        Some(delegate) => delegate.measure(base_width, width.mode, base_height, height.mode),
        None => MeasuredSize {
            width: base_width,
            height: base_height,
            baseline: None,
        },
    }
}

/// A size/mode pair for one axis, as passed to [`measure_leaf`]. Distinct
/// from [`crate::length::Constraint`] only in field naming at this call
/// site; kept as a type alias to avoid a confusing re-import cycle.
pub type MeasureConstraint = crate::length::Constraint;

#[cfg(test)]
mod tests {
    use super::{measure_leaf, Measure, MeasureDelegate};
    use crate::length::{Constraint, MeasureMode};

    struct FixedText {
        width: f32,
        height: f32,
    }

    impl Measure for FixedText {
        fn measure(
            &self,
            _width: f32,
            _width_mode: MeasureMode,
            _height: f32,
            _height_mode: MeasureMode,
        ) -> (f32, f32) {
            (self.width, self.height)
        }
    }

    #[test]
    fn both_exact_short_circuits_the_delegate() {
        let delegate = MeasureDelegate::new(FixedText {
            width: 999.0,
            height: 999.0,
        });
        let result = measure_leaf(
            Some(&delegate),
            Constraint::exactly(10.0),
            Constraint::exactly(20.0),
        );
        assert_eq!(result.width, 10.0);
        assert_eq!(result.height, 20.0);
    }

    #[test]
    fn undefined_axis_reports_zero_to_delegate() {
        let delegate = MeasureDelegate::new(FixedText {
            width: 40.0,
            height: 15.0,
        });
        let result = measure_leaf(
            Some(&delegate),
            Constraint::indefinite(),
            Constraint::at_most(100.0),
        );
        assert_eq!(result.width, 40.0);
        assert_eq!(result.height, 15.0);
    }

    #[test]
    fn no_delegate_falls_back_to_constrained_size() {
        let result = measure_leaf(None, Constraint::at_most(30.0), Constraint::indefinite());
        assert_eq!(result.width, 30.0);
        assert_eq!(result.height, 0.0);
    }
}
