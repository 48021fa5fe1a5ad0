//! Which corner a resize grabs.
//!
//! A resize gesture moves the two edges that meet at the corner nearest the
//! pointer when the gesture starts. The corner is picked once per session.

use super::geometry::{Point, Rect};

/// The corner of a window that a resize gesture grabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// Returns the corner name as a static string, used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

/// Returns the corner of `frame` nearest to `pointer`.
///
/// Comparisons are strict on the left/top side, so a pointer lying exactly on
/// a midpoint line resolves toward the right/bottom.
#[must_use]
pub fn classify(frame: &Rect, pointer: &Point) -> Corner {
    let mid = frame.center();
    let left = pointer.x < mid.x;
    let above = pointer.y < mid.y;

    match (left, above) {
        (true, true) => Corner::TopLeft,
        (false, true) => Corner::TopRight,
        (true, false) => Corner::BottomLeft,
        (false, false) => Corner::BottomRight,
    }
}
