//! Geometry primitives shared by the manipulation engine.
//!
//! All coordinates use the global display space of the Accessibility API:
//! the origin is the top-left corner of the primary display and y grows
//! downward. Window positions, pointer locations and usable screen frames are
//! all expressed in this space.

use serde::{Deserialize, Serialize};

// ============================================================================
// Point
// ============================================================================

/// A point (or a displacement) in screen coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }

    /// The origin, also used as the zero displacement.
    #[must_use]
    pub const fn zero() -> Self { Self::new(0.0, 0.0) }

    /// Component-wise difference `self - other`.
    #[must_use]
    pub fn delta_from(&self, other: &Self) -> Self { Self::new(self.x - other.x, self.y - other.y) }

    /// Translate this point by a displacement.
    #[must_use]
    pub fn offset(&self, delta: &Self) -> Self { Self::new(self.x + delta.x, self.y + delta.y) }

    /// Euclidean distance between two points.
    #[must_use]
    pub fn distance_to(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Whether both components are finite.
    #[must_use]
    pub fn is_finite(&self) -> bool { self.x.is_finite() && self.y.is_finite() }
}

// ============================================================================
// Size
// ============================================================================

/// A width/height pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }
}

// ============================================================================
// Rect
// ============================================================================

/// A rectangle with position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Build a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// The top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point { Point::new(self.x, self.y) }

    /// The rectangle's size.
    #[must_use]
    pub const fn size(&self) -> Size { Size::new(self.width, self.height) }

    #[must_use]
    pub const fn min_x(&self) -> f64 { self.x }

    #[must_use]
    pub const fn min_y(&self) -> f64 { self.y }

    #[must_use]
    pub fn max_x(&self) -> f64 { self.x + self.width }

    #[must_use]
    pub fn max_y(&self) -> f64 { self.y + self.height }

    /// Get the center point of this rectangle.
    #[must_use]
    pub fn center(&self) -> Point { Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0) }

    /// Check if `other` lies entirely within this rectangle (edges may touch).
    #[must_use]
    pub fn contains_rect(&self, other: &Self) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Check if this rectangle contains a point.
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }
}

// ============================================================================
// Screen Frame
// ============================================================================

/// The usable area of a display, captured once per manipulation session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenFrame {
    /// Usable frame (excluding dock, menu bar), top-left origin.
    pub usable: Rect,

    /// `HiDPI` scale factor (e.g., 2.0 for Retina).
    pub scale_factor: f64,
}

impl ScreenFrame {
    /// Create a new screen frame.
    #[must_use]
    pub const fn new(usable: Rect, scale_factor: f64) -> Self { Self { usable, scale_factor } }
}

impl Default for ScreenFrame {
    fn default() -> Self { Self::new(Rect::default(), 1.0) }
}
