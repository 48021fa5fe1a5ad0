//! Listen-only `CGEventTap`s on the current run loop.
//!
//! An [`EventTap`] is installed on the calling thread's `CFRunLoop` and stays
//! active until dropped. Dropping it disables the tap, removes its run loop
//! source and invalidates the port, so no callback can fire afterwards.
//!
//! The system disables a tap whose callback is too slow or when secure input
//! kicks in; such taps are re-enabled from the callback.

use std::cell::Cell;
use std::ffi::c_void;
use std::ptr;

use core_foundation::base::TCFType;
use core_foundation::mach_port::CFMachPort;
use core_foundation::runloop::{CFRunLoop, CFRunLoopSource, kCFRunLoopCommonModes};
use core_graphics::geometry::CGPoint;
use tracing::debug;

use super::timebase::Timebase;

use crate::error::ModMoveError;
use crate::mover::{Point, PointerSample};

// ============================================================================
// FFI Declarations
// ============================================================================

pub type CGEventRef = *mut c_void;
type CGEventTapProxy = *mut c_void;
type RawMachPort = *mut c_void;

type CGEventTapCallBack = extern "C" fn(
    proxy: CGEventTapProxy,
    event_type: u32,
    event: CGEventRef,
    user_info: *mut c_void,
) -> CGEventRef;

#[link(name = "CoreGraphics", kind = "framework")]
unsafe extern "C" {
    fn CGEventTapCreate(
        tap: u32,
        place: u32,
        options: u32,
        events_of_interest: u64,
        callback: CGEventTapCallBack,
        user_info: *mut c_void,
    ) -> RawMachPort;
    fn CGEventTapEnable(tap: RawMachPort, enable: bool);
    fn CGEventGetFlags(event: CGEventRef) -> u64;
    fn CGEventGetLocation(event: CGEventRef) -> CGPoint;
    fn CGEventGetTimestamp(event: CGEventRef) -> u64;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFMachPortInvalidate(port: RawMachPort);
}

const K_CG_SESSION_EVENT_TAP: u32 = 1;
const K_CG_HEAD_INSERT_EVENT_TAP: u32 = 0;
const K_CG_EVENT_TAP_OPTION_LISTEN_ONLY: u32 = 1;

const K_CG_EVENT_MOUSE_MOVED: u32 = 5;
const K_CG_EVENT_FLAGS_CHANGED: u32 = 12;
const K_CG_EVENT_TAP_DISABLED_BY_TIMEOUT: u32 = 0xFFFF_FFFE;
const K_CG_EVENT_TAP_DISABLED_BY_USER_INPUT: u32 = 0xFFFF_FFFF;

/// Modifier key transitions.
pub const FLAGS_CHANGED_MASK: u64 = 1 << K_CG_EVENT_FLAGS_CHANGED;

/// Pointer movement with no button held.
pub const MOUSE_MOVED_MASK: u64 = 1 << K_CG_EVENT_MOUSE_MOVED;

/// Called for every delivered event.
pub type EventHandler = fn(CGEventRef);

/// State reachable from the C callback.
struct TapContext {
    port: Cell<RawMachPort>,
    handler: EventHandler,
    name: &'static str,
}

// ============================================================================
// EventTap
// ============================================================================

/// An installed event tap. Removed from the run loop on drop.
pub struct EventTap {
    port: CFMachPort,
    source: CFRunLoopSource,
    run_loop: CFRunLoop,
    // Boxed so the address handed to the callback stays put.
    context: Box<TapContext>,
}

impl EventTap {
    /// Installs a tap for `mask` on the current run loop.
    ///
    /// # Errors
    ///
    /// Returns `ModMoveError::EventTap` if the tap cannot be created, usually
    /// because Accessibility access has not been granted.
    pub fn install(
        name: &'static str,
        mask: u64,
        handler: EventHandler,
    ) -> Result<Self, ModMoveError> {
        let context = Box::new(TapContext {
            port: Cell::new(ptr::null_mut()),
            handler,
            name,
        });
        let user_info = ptr::from_ref::<TapContext>(&*context).cast_mut().cast::<c_void>();

        let raw = unsafe {
            CGEventTapCreate(
                K_CG_SESSION_EVENT_TAP,
                K_CG_HEAD_INSERT_EVENT_TAP,
                K_CG_EVENT_TAP_OPTION_LISTEN_ONLY,
                mask,
                tap_callback,
                user_info,
            )
        };

        if raw.is_null() {
            return Err(ModMoveError::EventTap(format!(
                "failed to create {name} event tap - check accessibility permissions"
            )));
        }

        context.port.set(raw);

        // SAFETY: CGEventTapCreate returned a new +1 CFMachPort.
        let port = unsafe { CFMachPort::wrap_under_create_rule(raw.cast()) };
        let Ok(source) = port.create_runloop_source(0) else {
            unsafe { CFMachPortInvalidate(raw) };
            return Err(ModMoveError::EventTap(format!(
                "failed to create run loop source for {name} event tap"
            )));
        };

        let run_loop = CFRunLoop::get_current();
        run_loop.add_source(&source, unsafe { kCFRunLoopCommonModes });
        unsafe { CGEventTapEnable(raw, true) };

        debug!(tap = name, "event tap installed");

        Ok(Self { port, source, run_loop, context })
    }

    fn raw(&self) -> RawMachPort { self.port.as_concrete_TypeRef().cast() }
}

impl Drop for EventTap {
    fn drop(&mut self) {
        let raw = self.raw();
        unsafe { CGEventTapEnable(raw, false) };
        self.run_loop.remove_source(&self.source, unsafe { kCFRunLoopCommonModes });
        unsafe { CFMachPortInvalidate(raw) };
        self.context.port.set(ptr::null_mut());
        debug!(tap = self.context.name, "event tap removed");
    }
}

impl std::fmt::Debug for EventTap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventTap").field("name", &self.context.name).finish_non_exhaustive()
    }
}

extern "C" fn tap_callback(
    _proxy: CGEventTapProxy,
    event_type: u32,
    event: CGEventRef,
    user_info: *mut c_void,
) -> CGEventRef {
    if user_info.is_null() {
        return event;
    }

    // SAFETY: user_info points at the boxed context, which outlives the port.
    let context = unsafe { &*user_info.cast::<TapContext>() };

    match event_type {
        K_CG_EVENT_TAP_DISABLED_BY_TIMEOUT | K_CG_EVENT_TAP_DISABLED_BY_USER_INPUT => {
            let port = context.port.get();
            if !port.is_null() {
                unsafe { CGEventTapEnable(port, true) };
                debug!(tap = context.name, event_type, "event tap re-enabled");
            }
        }
        _ if !event.is_null() => (context.handler)(event),
        _ => {}
    }

    event
}

// ============================================================================
// Event Accessors
// ============================================================================

/// Modifier flags carried by an event.
#[must_use]
pub fn event_flags(event: CGEventRef) -> u64 { unsafe { CGEventGetFlags(event) } }

/// Location and timestamp of a pointer event.
///
/// The location uses the global top-left-origin coordinate space. The
/// timestamp arrives in mach ticks and is converted with the host timebase.
#[must_use]
pub fn pointer_sample(event: CGEventRef) -> PointerSample {
    let location = unsafe { CGEventGetLocation(event) };
    let timestamp = unsafe { CGEventGetTimestamp(event) };
    PointerSample::new(Point::new(location.x, location.y), Timebase::host().duration(timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_masks() {
        assert_eq!(FLAGS_CHANGED_MASK, 0x1000);
        assert_eq!(MOUSE_MOVED_MASK, 0x20);
    }

    #[test]
    fn test_disabled_event_types() {
        assert_eq!(K_CG_EVENT_TAP_DISABLED_BY_TIMEOUT, 0xFFFF_FFFE);
        assert_eq!(K_CG_EVENT_TAP_DISABLED_BY_USER_INPUT, 0xFFFF_FFFF);
    }
}
