//! Screen-edge clamping for drag and resize gestures.
//!
//! A gesture produces a cumulative pointer delta relative to the session
//! baseline. Before the delta is applied it may be clamped so that the edges
//! being moved stay inside the usable screen frame. For a resize only the two
//! edges meeting at the grabbed corner move, so each corner clamps a different
//! pair of edges. A drag moves the window rigidly and clamps all four.
//!
//! Clamping is gated by [`ConstraintPolicy::should_constrain`]:
//!
//! - a fast pointer (smoothed speed at or above the threshold) is never
//!   constrained, which allows throwing a window off-screen;
//! - a window whose baseline already sticks out of the usable frame is never
//!   constrained, so it does not snap back when the pointer slows down.

use super::corner::Corner;
use super::geometry::{Point, Rect, Size};

/// Speed (logical pixels per second) at or above which clamping is skipped.
pub const DEFAULT_SPEED_THRESHOLD: f64 = 1000.0;

// ============================================================================
// Policy
// ============================================================================

/// Decides whether clamping applies to the current sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstraintPolicy {
    /// Speed threshold in logical pixels per second.
    pub speed_threshold: f64,

    /// Master switch. When false, deltas always pass through unclamped.
    pub enabled: bool,
}

impl Default for ConstraintPolicy {
    fn default() -> Self { Self { speed_threshold: DEFAULT_SPEED_THRESHOLD, enabled: true } }
}

impl ConstraintPolicy {
    /// Returns true when the pointer is slower than the threshold and the
    /// baseline window lies fully inside the usable frame.
    #[must_use]
    pub fn should_constrain(&self, speed: f64, baseline: &Rect, usable: &Rect) -> bool {
        self.enabled && speed < self.speed_threshold && usable.contains_rect(baseline)
    }
}

// ============================================================================
// Clamping
// ============================================================================

/// Smallest delta that keeps the left/top edges inside the frame.
fn floor(baseline: &Rect, usable: &Rect) -> Point {
    Point::new(usable.min_x() - baseline.min_x(), usable.min_y() - baseline.min_y())
}

/// Largest delta that keeps the right/bottom edges inside the frame.
fn cap(baseline: &Rect, usable: &Rect) -> Point {
    Point::new(usable.max_x() - baseline.max_x(), usable.max_y() - baseline.max_y())
}

/// Clamps a raw cumulative delta against the usable frame.
///
/// `corner` is the grabbed corner of a resize, or `None` for a drag. When `constrain` is
/// false the delta is returned unchanged.
#[must_use]
pub fn clamp_delta(
    baseline: &Rect,
    delta: Point,
    corner: Option<Corner>,
    usable: &Rect,
    constrain: bool,
) -> Point {
    if !constrain {
        return delta;
    }

    let lo = floor(baseline, usable);
    let hi = cap(baseline, usable);

    match corner {
        Some(Corner::TopLeft) => Point::new(delta.x.max(lo.x), delta.y.max(lo.y)),
        Some(Corner::TopRight) => Point::new(delta.x.min(hi.x), delta.y.max(lo.y)),
        Some(Corner::BottomLeft) => Point::new(delta.x.max(lo.x), delta.y.min(hi.y)),
        Some(Corner::BottomRight) => Point::new(delta.x.min(hi.x), delta.y.min(hi.y)),
        // The floor is applied last so an oversized window keeps its
        // left/top edge visible.
        None => Point::new(delta.x.min(hi.x).max(lo.x), delta.y.min(hi.y).max(lo.y)),
    }
}

// ============================================================================
// Transform
// ============================================================================

/// New geometry for a window. `None` fields are left untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowTransform {
    pub position: Option<Point>,
    pub size: Option<Size>,
}

impl WindowTransform {
    /// Whether the transform writes anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool { self.position.is_none() && self.size.is_none() }

    /// The resulting frame, using `baseline` for untouched fields.
    #[must_use]
    pub fn resulting_frame(&self, baseline: &Rect) -> Rect {
        Rect::from_parts(
            self.position.unwrap_or_else(|| baseline.origin()),
            self.size.unwrap_or_else(|| baseline.size()),
        )
    }
}

/// Applies a (clamped) delta to the baseline geometry.
///
/// For a resize the edges meeting at the grabbed corner follow the delta; the
/// opposite edges stay fixed.
#[must_use]
pub fn apply(baseline: &Rect, delta: Point, corner: Option<Corner>) -> WindowTransform {
    let Rect { x, y, width, height } = *baseline;

    let (position, size) = match corner {
        None => (Some(Point::new(x + delta.x, y + delta.y)), None),
        Some(Corner::TopLeft) => (
            Some(Point::new(x + delta.x, y + delta.y)),
            Some(Size::new(width - delta.x, height - delta.y)),
        ),
        Some(Corner::TopRight) => (
            Some(Point::new(x, y + delta.y)),
            Some(Size::new(width + delta.x, height - delta.y)),
        ),
        Some(Corner::BottomLeft) => (
            Some(Point::new(x + delta.x, y)),
            Some(Size::new(width - delta.x, height + delta.y)),
        ),
        Some(Corner::BottomRight) => (None, Some(Size::new(width + delta.x, height + delta.y))),
    };

    WindowTransform { position, size }
}

/// Clamps `delta` (when `constrain` is set) and applies it to the baseline.
#[must_use]
pub fn transform(
    baseline: &Rect,
    delta: Point,
    corner: Option<Corner>,
    usable: &Rect,
    constrain: bool,
) -> WindowTransform {
    apply(baseline, clamp_delta(baseline, delta, corner, usable, constrain), corner)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORNERS: [Option<Corner>; 5] = [
        None,
        Some(Corner::TopLeft),
        Some(Corner::TopRight),
        Some(Corner::BottomLeft),
        Some(Corner::BottomRight),
    ];

    fn frame() -> Rect { Rect::new(0.0, 0.0, 1600.0, 1000.0) }

    #[test]
    fn test_slow_drag_inside_frame() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        let policy = ConstraintPolicy::default();
        assert!(policy.should_constrain(10.0, &baseline, &frame()));

        let result = transform(&baseline, Point::new(50.0, 20.0), None, &frame(), true);
        assert_eq!(result.position, Some(Point::new(150.0, 120.0)));
        assert_eq!(result.size, None);
    }

    #[test]
    fn test_top_left_resize_floors_at_left_edge() {
        let baseline = Rect::new(0.0, 0.0, 300.0, 200.0);
        let delta = clamp_delta(
            &baseline,
            Point::new(-50.0, 0.0),
            Some(Corner::TopLeft),
            &frame(),
            true,
        );
        assert_eq!(delta.x, 0.0);

        let result = apply(&baseline, delta, Some(Corner::TopLeft));
        assert_eq!(result.position.map(|p| p.x), Some(0.0));
        assert_eq!(result.size.map(|s| s.width), Some(300.0));
    }

    #[test]
    fn test_fast_drag_passes_through() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        let policy = ConstraintPolicy::default();
        let constrain = policy.should_constrain(1500.0, &baseline, &frame());
        assert!(!constrain);

        let result = transform(&baseline, Point::new(-900.0, 0.0), None, &frame(), constrain);
        assert_eq!(result.position, Some(Point::new(-800.0, 100.0)));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        let policy = ConstraintPolicy::default();
        assert!(policy.should_constrain(999.9, &baseline, &frame()));
        assert!(!policy.should_constrain(1000.0, &baseline, &frame()));
    }

    #[test]
    fn test_offscreen_baseline_is_never_constrained() {
        let baseline = Rect::new(-50.0, 100.0, 400.0, 300.0);
        let policy = ConstraintPolicy::default();
        assert!(!policy.should_constrain(0.0, &baseline, &frame()));
    }

    #[test]
    fn test_disabled_policy_never_constrains() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        let policy = ConstraintPolicy { enabled: false, ..ConstraintPolicy::default() };
        assert!(!policy.should_constrain(0.0, &baseline, &frame()));
    }

    #[test]
    fn test_top_right_caps_x_and_floors_y() {
        let baseline = Rect::new(1200.0, 50.0, 300.0, 200.0);
        let delta = clamp_delta(
            &baseline,
            Point::new(500.0, -500.0),
            Some(Corner::TopRight),
            &frame(),
            true,
        );
        assert_eq!(delta, Point::new(100.0, -50.0));

        let result = apply(&baseline, delta, Some(Corner::TopRight));
        assert_eq!(result.position, Some(Point::new(1200.0, 0.0)));
        assert_eq!(result.size, Some(Size::new(400.0, 250.0)));
    }

    #[test]
    fn test_bottom_left_floors_x_and_caps_y() {
        let baseline = Rect::new(30.0, 600.0, 300.0, 200.0);
        let delta = clamp_delta(
            &baseline,
            Point::new(-100.0, 500.0),
            Some(Corner::BottomLeft),
            &frame(),
            true,
        );
        assert_eq!(delta, Point::new(-30.0, 200.0));

        let result = apply(&baseline, delta, Some(Corner::BottomLeft));
        assert_eq!(result.position, Some(Point::new(0.0, 600.0)));
        assert_eq!(result.size, Some(Size::new(330.0, 400.0)));
    }

    #[test]
    fn test_bottom_right_caps_both_and_keeps_position() {
        let baseline = Rect::new(1000.0, 500.0, 400.0, 300.0);
        let delta = clamp_delta(
            &baseline,
            Point::new(900.0, 900.0),
            Some(Corner::BottomRight),
            &frame(),
            true,
        );
        assert_eq!(delta, Point::new(200.0, 200.0));

        let result = apply(&baseline, delta, Some(Corner::BottomRight));
        assert_eq!(result.position, None);
        assert_eq!(result.size, Some(Size::new(600.0, 500.0)));
    }

    #[test]
    fn test_resize_only_clamps_moving_edges() {
        // Shrinking from the bottom-right never crosses the frame, so a
        // negative delta must pass through untouched.
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        let delta = clamp_delta(
            &baseline,
            Point::new(-350.0, -250.0),
            Some(Corner::BottomRight),
            &frame(),
            true,
        );
        assert_eq!(delta, Point::new(-350.0, -250.0));
    }

    #[test]
    fn test_drag_clamps_all_edges() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        assert_eq!(
            clamp_delta(&baseline, Point::new(-500.0, -500.0), None, &frame(), true),
            Point::new(-100.0, -100.0)
        );
        assert_eq!(
            clamp_delta(&baseline, Point::new(5000.0, 5000.0), None, &frame(), true),
            Point::new(1100.0, 600.0)
        );
    }

    #[test]
    fn test_zero_delta_is_identity() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        for corner in CORNERS {
            for constrain in [true, false] {
                let result = transform(&baseline, Point::zero(), corner, &frame(), constrain);
                assert_eq!(result.resulting_frame(&baseline), baseline, "{corner:?}");
            }
        }
    }

    #[test]
    fn test_unconstrained_matches_raw_apply() {
        let baseline = Rect::new(100.0, 100.0, 400.0, 300.0);
        let delta = Point::new(-2000.0, 3000.0);
        for corner in CORNERS {
            assert_eq!(
                transform(&baseline, delta, corner, &frame(), false),
                apply(&baseline, delta, corner)
            );
        }
    }

    #[test]
    fn test_constrained_edges_stay_inside_frame() {
        let usable = Rect::new(0.0, 25.0, 1600.0, 975.0);
        let baseline = Rect::new(200.0, 150.0, 500.0, 400.0);
        let steps = [-3000.0, -400.0, -37.5, 0.0, 12.25, 600.0, 4000.0];

        for corner in CORNERS {
            for dx in steps {
                for dy in steps {
                    let result =
                        transform(&baseline, Point::new(dx, dy), corner, &usable, true);
                    let moved = result.resulting_frame(&baseline);
                    let eps = 1e-9;

                    let (check_left, check_top, check_right, check_bottom) = match corner {
                        None => (true, true, true, true),
                        Some(Corner::TopLeft) => (true, true, false, false),
                        Some(Corner::TopRight) => (false, true, true, false),
                        Some(Corner::BottomLeft) => (true, false, false, true),
                        Some(Corner::BottomRight) => (false, false, true, true),
                    };

                    if check_left {
                        assert!(moved.min_x() >= usable.min_x() - eps, "{corner:?} {dx} {dy}");
                    }
                    if check_top {
                        assert!(moved.min_y() >= usable.min_y() - eps, "{corner:?} {dx} {dy}");
                    }
                    if check_right {
                        assert!(moved.max_x() <= usable.max_x() + eps, "{corner:?} {dx} {dy}");
                    }
                    if check_bottom {
                        assert!(moved.max_y() <= usable.max_y() + eps, "{corner:?} {dx} {dy}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_opposite_edges_do_not_move() {
        let baseline = Rect::new(200.0, 150.0, 500.0, 400.0);
        let delta = Point::new(37.0, -21.0);

        let tl = apply(&baseline, delta, Some(Corner::TopLeft)).resulting_frame(&baseline);
        assert_eq!((tl.max_x(), tl.max_y()), (baseline.max_x(), baseline.max_y()));

        let tr = apply(&baseline, delta, Some(Corner::TopRight)).resulting_frame(&baseline);
        assert_eq!((tr.min_x(), tr.max_y()), (baseline.min_x(), baseline.max_y()));

        let bl = apply(&baseline, delta, Some(Corner::BottomLeft)).resulting_frame(&baseline);
        assert_eq!((bl.max_x(), bl.min_y()), (baseline.max_x(), baseline.min_y()));

        let br = apply(&baseline, delta, Some(Corner::BottomRight)).resulting_frame(&baseline);
        assert_eq!((br.min_x(), br.min_y()), (baseline.min_x(), baseline.min_y()));
    }

    #[test]
    fn test_oversized_window_drag_keeps_left_edge() {
        let baseline = Rect::new(0.0, 0.0, 2000.0, 1200.0);
        let delta = clamp_delta(&baseline, Point::new(100.0, 100.0), None, &frame(), true);
        assert_eq!(delta, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_empty_transform() {
        assert!(WindowTransform::default().is_empty());
        assert!(!apply(&frame(), Point::zero(), None).is_empty());
    }
}
