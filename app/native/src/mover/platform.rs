//! Capabilities the engine consumes from the host platform.
//!
//! The engine never talks to the operating system directly. Every window,
//! screen, process and pointer-feed operation goes through these traits, so
//! the manipulation logic can be driven by the macOS implementation in
//! [`crate::platform`] or by an in-memory fake in tests.
//!
//! Coordinates follow the Accessibility API convention: global display space,
//! top-left origin of the primary display, y growing downward. Window
//! positions name the window's top-left corner.

use std::time::Duration;

use super::geometry::{Point, Rect, ScreenFrame, Size};
use super::intent::IntentState;
use crate::error::ModMoveError;

/// One pointer-movement event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    /// Pointer location in screen coordinates.
    pub position: Point,
    /// Monotonic event time.
    pub timestamp: Duration,
}

impl PointerSample {
    #[must_use]
    pub const fn new(position: Point, timestamp: Duration) -> Self { Self { position, timestamp } }
}

/// A window owned by some process.
///
/// Getters return `None` when the window is gone or the attribute cannot be
/// read.
pub trait WindowHandle {
    /// Top-left corner of the window.
    fn position(&self) -> Option<Point>;

    fn size(&self) -> Option<Size>;

    /// Moves the window's top-left corner.
    ///
    /// # Errors
    ///
    /// Returns an error if the position cannot be written.
    fn set_position(&self, position: Point) -> Result<(), ModMoveError>;

    /// # Errors
    ///
    /// Returns an error if the size cannot be written.
    fn set_size(&self, size: Size) -> Result<(), ModMoveError>;

    /// Process identifier of the owning application.
    fn pid(&self) -> Option<i32>;

    /// Brings the window to the front of its application.
    ///
    /// # Errors
    ///
    /// Returns an error if the window cannot be raised.
    fn raise(&self) -> Result<(), ModMoveError>;

    /// Position and size together, if both are readable.
    fn frame(&self) -> Option<Rect> { Some(Rect::from_parts(self.position()?, self.size()?)) }
}

/// Hit-tests the topmost window at a screen point.
pub trait WindowLocator {
    type Window: WindowHandle;

    fn window_at(&self, point: Point) -> Option<Self::Window>;
}

/// Reports the usable frame of the current display.
pub trait ScreenQuery {
    /// Frame of the display showing `point`, or of the main display.
    fn screen_frame(&self, point: Point) -> Option<ScreenFrame>;
}

/// Application activation.
pub trait ProcessActivator {
    /// Process identifier of the frontmost application.
    fn frontmost_pid(&self) -> Option<i32>;

    /// Asks the given process to become frontmost. Returns whether the request
    /// was accepted.
    fn activate(&self, pid: i32) -> bool;
}

/// The global pointer-movement feed.
///
/// A subscription is an owned guard: while it is alive the platform delivers
/// [`PointerSample`]s to the engine, and dropping it releases the underlying
/// hook.
pub trait PointerFeed {
    type Subscription;

    /// Acquires the feed for the given intent. Returns `None` if the hook
    /// could not be installed.
    fn subscribe(&mut self, intent: IntentState) -> Option<Self::Subscription>;
}

/// Everything the engine needs from the host.
pub trait Platform: WindowLocator + ScreenQuery + ProcessActivator + PointerFeed {}

impl<T> Platform for T where T: WindowLocator + ScreenQuery + ProcessActivator + PointerFeed {}
