//! Usable display area from `NSScreen`.
//!
//! `NSScreen` frames use a bottom-left origin with y growing upward. The
//! Accessibility API and Core Graphics events use a top-left origin at the
//! primary display, so every frame is flipped before it reaches the engine.

use objc::runtime::{Class, Object};
use objc::{msg_send, sel, sel_impl};

use crate::mover::{Point, Rect, ScreenFrame};

/// Objective-C `NSRect` structure.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct NSRect {
    origin: NSPoint,
    size: NSSize,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct NSPoint {
    x: f64,
    y: f64,
}

#[repr(C)]
#[derive(Debug, Copy, Clone)]
struct NSSize {
    width: f64,
    height: f64,
}

/// Usable frame and scale of the display showing `point`.
///
/// Falls back to `mainScreen` when no display contains the point.
#[must_use]
pub fn screen_frame(point: Point) -> Option<ScreenFrame> {
    unsafe {
        let screen_class = Class::get("NSScreen")?;

        let ns_screens: *mut Object = msg_send![screen_class, screens];
        if ns_screens.is_null() {
            return None;
        }

        let count: usize = msg_send![ns_screens, count];
        if count == 0 {
            return None;
        }

        // The primary display, the one holding the menu bar, is always first.
        let primary: *mut Object = msg_send![ns_screens, objectAtIndex: 0usize];
        let primary_frame: NSRect = msg_send![primary, frame];
        let primary_height = primary_frame.size.height;

        let mut target: *mut Object = std::ptr::null_mut();
        for i in 0..count {
            let ns_screen: *mut Object = msg_send![ns_screens, objectAtIndex: i];
            if ns_screen.is_null() {
                continue;
            }

            let frame: NSRect = msg_send![ns_screen, frame];
            if to_top_left(frame, primary_height).contains_point(&point) {
                target = ns_screen;
                break;
            }
        }

        if target.is_null() {
            target = msg_send![screen_class, mainScreen];
        }
        if target.is_null() {
            return None;
        }

        let visible_frame: NSRect = msg_send![target, visibleFrame];
        let scale_factor: f64 = msg_send![target, backingScaleFactor];

        Some(ScreenFrame::new(to_top_left(visible_frame, primary_height), scale_factor))
    }
}

/// Flips an `NSRect` from bottom-left to top-left origin.
///
/// `new_y = primary_height - y - height`
fn to_top_left(rect: NSRect, primary_height: f64) -> Rect {
    let y = primary_height - rect.origin.y - rect.size.height;
    Rect::new(rect.origin.x, y, rect.size.width, rect.size.height)
}
