//! The baseline captured when a gesture starts.

use super::constraint::WindowTransform;
use super::corner::{self, Corner};
use super::geometry::{Point, Rect, ScreenFrame};
use super::intent::IntentState;
use super::platform::WindowHandle;
use crate::error::ModMoveError;

/// State of one continuous drag or resize gesture.
///
/// All baseline fields are captured together by [`ManipulationSession::capture`]
/// and are read-only afterwards; only the live pointer position changes from
/// sample to sample.
#[derive(Debug)]
pub struct ManipulationSession<W> {
    mouse: Point,
    baseline: Rect,
    corner: Option<Corner>,
    screen: ScreenFrame,
    window: W,
}

impl<W: WindowHandle> ManipulationSession<W> {
    /// Captures the baseline for `window`.
    ///
    /// The corner is only classified for [`IntentState::Resize`]. When the
    /// window geometry cannot be read the window is handed back unchanged.
    ///
    /// # Errors
    ///
    /// Returns the window if its position or size is unavailable.
    pub fn capture(
        window: W,
        mouse: Point,
        intent: IntentState,
        screen: ScreenFrame,
    ) -> Result<Self, W> {
        let Some(baseline) = window.frame() else {
            return Err(window);
        };

        let corner = match intent {
            IntentState::Resize => Some(corner::classify(&baseline, &mouse)),
            IntentState::Drag | IntentState::Ignore => None,
        };

        Ok(Self { mouse, baseline, corner, screen, window })
    }

    /// Pointer position when the gesture started.
    #[must_use]
    pub const fn mouse(&self) -> Point { self.mouse }

    /// Window frame when the gesture started.
    #[must_use]
    pub const fn baseline(&self) -> Rect { self.baseline }

    /// Grabbed corner, `None` for a drag.
    #[must_use]
    pub const fn corner(&self) -> Option<Corner> { self.corner }

    #[must_use]
    pub const fn screen(&self) -> ScreenFrame { self.screen }

    #[must_use]
    pub const fn window(&self) -> &W { &self.window }

    /// Cumulative pointer travel since the gesture started.
    #[must_use]
    pub fn delta(&self, pointer: Point) -> Point { pointer.delta_from(&self.mouse) }

    /// Writes the transform to the window.
    ///
    /// Position is written before size. Both writes are attempted even if the
    /// first one fails.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn write(&self, transform: &WindowTransform) -> Result<(), ModMoveError> {
        let position = transform.position.map_or(Ok(()), |p| self.window.set_position(p));
        let size = transform.size.map_or(Ok(()), |s| self.window.set_size(s));
        position.and(size)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::mover::geometry::Size;

    #[derive(Debug, Default)]
    struct StubWindow {
        frame: Option<Rect>,
        writes: RefCell<Vec<&'static str>>,
        fail_position: bool,
    }

    impl WindowHandle for StubWindow {
        fn position(&self) -> Option<Point> { self.frame.map(|f| f.origin()) }

        fn size(&self) -> Option<Size> { self.frame.map(|f| f.size()) }

        fn set_position(&self, _position: Point) -> Result<(), ModMoveError> {
            self.writes.borrow_mut().push("position");
            if self.fail_position {
                Err(ModMoveError::Accessibility("set position".to_string()))
            } else {
                Ok(())
            }
        }

        fn set_size(&self, _size: Size) -> Result<(), ModMoveError> {
            self.writes.borrow_mut().push("size");
            Ok(())
        }

        fn pid(&self) -> Option<i32> { Some(1) }

        fn raise(&self) -> Result<(), ModMoveError> { Ok(()) }
    }

    fn screen() -> ScreenFrame { ScreenFrame::new(Rect::new(0.0, 0.0, 1600.0, 1000.0), 1.0) }

    #[test]
    fn test_capture_drag_has_no_corner() {
        let window = StubWindow {
            frame: Some(Rect::new(100.0, 100.0, 400.0, 300.0)),
            ..StubWindow::default()
        };
        let session =
            ManipulationSession::capture(window, Point::new(120.0, 120.0), IntentState::Drag, screen())
                .unwrap();
        assert_eq!(session.corner(), None);
        assert_eq!(session.baseline(), Rect::new(100.0, 100.0, 400.0, 300.0));
        assert_eq!(session.mouse(), Point::new(120.0, 120.0));
    }

    #[test]
    fn test_capture_resize_classifies_corner() {
        let window = StubWindow {
            frame: Some(Rect::new(100.0, 100.0, 400.0, 300.0)),
            ..StubWindow::default()
        };
        let session = ManipulationSession::capture(
            window,
            Point::new(120.0, 120.0),
            IntentState::Resize,
            screen(),
        )
        .unwrap();
        assert_eq!(session.corner(), Some(Corner::TopLeft));
    }

    #[test]
    fn test_capture_hands_window_back_when_unreadable() {
        let window = StubWindow::default();
        let result =
            ManipulationSession::capture(window, Point::zero(), IntentState::Drag, screen());
        assert!(result.is_err());
    }

    #[test]
    fn test_delta_is_relative_to_baseline_mouse() {
        let window = StubWindow {
            frame: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            ..StubWindow::default()
        };
        let session =
            ManipulationSession::capture(window, Point::new(5.0, 5.0), IntentState::Drag, screen())
                .unwrap();
        assert_eq!(session.delta(Point::new(55.0, 25.0)), Point::new(50.0, 20.0));
    }

    #[test]
    fn test_write_attempts_both_fields() {
        let window = StubWindow {
            frame: Some(Rect::new(0.0, 0.0, 10.0, 10.0)),
            fail_position: true,
            ..StubWindow::default()
        };
        let session =
            ManipulationSession::capture(window, Point::zero(), IntentState::Resize, screen())
                .unwrap();
        let transform = WindowTransform {
            position: Some(Point::new(1.0, 1.0)),
            size: Some(Size::new(9.0, 9.0)),
        };

        assert!(session.write(&transform).is_err());
        assert_eq!(*session.window().writes.borrow(), vec!["position", "size"]);
    }
}
