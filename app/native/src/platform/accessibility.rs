//! Safe wrapper for macOS Accessibility API (`AXUIElement`).
//!
//! [`AXElement`] owns an `AXUIElementRef` and releases it on drop. It is the
//! [`WindowHandle`] the engine manipulates.

use std::cell::OnceCell;
use std::ffi::c_void;
use std::ptr;

use core_foundation::base::TCFType;
use core_foundation::string::CFString;
use core_graphics::geometry::{CGPoint, CGSize};

use crate::error::ModMoveError;
use crate::mover::{Point, Size, WindowHandle};

// ============================================================================
// FFI Declarations
// ============================================================================

type AXUIElementRef = *mut c_void;
type AXError = i32;

const K_AX_ERROR_SUCCESS: AXError = 0;
const K_AX_ERROR_INVALID_UI_ELEMENT: AXError = -25202;
const K_AX_ERROR_CANNOT_COMPLETE: AXError = -25204;
const K_AX_ERROR_ATTRIBUTE_UNSUPPORTED: AXError = -25205;
const K_AX_ERROR_ACTION_UNSUPPORTED: AXError = -25206;
const K_AX_ERROR_NOT_IMPLEMENTED: AXError = -25208;
const K_AX_ERROR_API_DISABLED: AXError = -25211;

const K_AX_VALUE_TYPE_CG_POINT: i32 = 1;
const K_AX_VALUE_TYPE_CG_SIZE: i32 = 2;

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXUIElementCreateSystemWide() -> AXUIElementRef;
    fn AXUIElementCopyElementAtPosition(
        application: AXUIElementRef,
        x: f32,
        y: f32,
        element: *mut AXUIElementRef,
    ) -> AXError;
    fn AXUIElementCopyAttributeValue(
        element: AXUIElementRef,
        attribute: *const c_void,
        value: *mut *mut c_void,
    ) -> AXError;
    fn AXUIElementSetAttributeValue(
        element: AXUIElementRef,
        attribute: *const c_void,
        value: *const c_void,
    ) -> AXError;
    fn AXUIElementPerformAction(element: AXUIElementRef, action: *const c_void) -> AXError;
    fn AXUIElementGetPid(element: AXUIElementRef, pid: *mut i32) -> AXError;
    fn AXValueCreate(value_type: i32, value: *const c_void) -> *mut c_void;
    fn AXValueGetValue(value: *const c_void, value_type: i32, value_ptr: *mut c_void) -> bool;
}

#[link(name = "CoreFoundation", kind = "framework")]
unsafe extern "C" {
    fn CFGetTypeID(cf: *const c_void) -> u64;
    fn CFRelease(cf: *const c_void);
    fn CFRetain(cf: *const c_void) -> *const c_void;
}

// ============================================================================
// Cached CFStrings
// ============================================================================

thread_local! {
    static CF_ROLE: OnceCell<CFString> = const { OnceCell::new() };
    static CF_WINDOW: OnceCell<CFString> = const { OnceCell::new() };
    static CF_POSITION: OnceCell<CFString> = const { OnceCell::new() };
    static CF_SIZE: OnceCell<CFString> = const { OnceCell::new() };
    static CF_RAISE: OnceCell<CFString> = const { OnceCell::new() };
}

macro_rules! cached_cfstring {
    ($cell:expr, $value:expr) => {
        $cell.with(|cell| cell.get_or_init(|| CFString::new($value)).as_concrete_TypeRef().cast())
    };
}

#[inline]
fn cf_role() -> *const c_void { cached_cfstring!(CF_ROLE, "AXRole") }

#[inline]
fn cf_window() -> *const c_void { cached_cfstring!(CF_WINDOW, "AXWindow") }

#[inline]
fn cf_position() -> *const c_void { cached_cfstring!(CF_POSITION, "AXPosition") }

#[inline]
fn cf_size() -> *const c_void { cached_cfstring!(CF_SIZE, "AXSize") }

#[inline]
fn cf_raise() -> *const c_void { cached_cfstring!(CF_RAISE, "AXRaise") }

const ROLE_WINDOW: &str = "AXWindow";

// ============================================================================
// AXElement
// ============================================================================

/// An owned `AXUIElementRef`. Never null.
pub struct AXElement {
    raw: AXUIElementRef,
}

impl AXElement {
    /// The system-wide element used for hit-testing.
    #[must_use]
    pub fn system_wide() -> Option<Self> {
        // SAFETY: returns a new +1 reference or null.
        unsafe { Self::from_raw(AXUIElementCreateSystemWide()) }
    }

    /// Takes ownership of a +1 reference.
    ///
    /// # Safety
    ///
    /// `raw` must be null or a valid `AXUIElementRef` the caller owns.
    #[must_use]
    const unsafe fn from_raw(raw: AXUIElementRef) -> Option<Self> {
        if raw.is_null() { None } else { Some(Self { raw }) }
    }

    /// The deepest element at a screen point.
    ///
    /// Only meaningful on the system-wide element.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn element_at(&self, point: Point) -> Option<Self> {
        let mut element: AXUIElementRef = ptr::null_mut();
        let result = unsafe {
            AXUIElementCopyElementAtPosition(
                self.raw,
                point.x as f32,
                point.y as f32,
                &raw mut element,
            )
        };

        if result != K_AX_ERROR_SUCCESS {
            return None;
        }

        unsafe { Self::from_raw(element) }
    }

    /// The window containing this element, or the element itself if it is a
    /// window.
    #[must_use]
    pub fn window(self) -> Option<Self> {
        if self.role().as_deref() == Some(ROLE_WINDOW) {
            return Some(self);
        }

        let value = unsafe { copy_attribute(self.raw, cf_window()) }?;
        // SAFETY: AXWindow holds an AXUIElement; the copy is ours.
        unsafe { Self::from_raw(value) }
    }

    /// The element's `AXRole`.
    #[must_use]
    pub fn role(&self) -> Option<String> {
        let value = unsafe { copy_attribute(self.raw, cf_role()) }?;

        if unsafe { CFGetTypeID(value) } != CFString::type_id() as u64 {
            unsafe { CFRelease(value) };
            return None;
        }

        // SAFETY: the copied value is a +1 CFString.
        let role = unsafe { CFString::wrap_under_create_rule(value.cast()) };
        Some(role.to_string())
    }
}

impl WindowHandle for AXElement {
    fn position(&self) -> Option<Point> {
        let mut point = CGPoint::new(0.0, 0.0);
        unsafe {
            get_value_attr(self.raw, cf_position(), K_AX_VALUE_TYPE_CG_POINT, (&raw mut point).cast())
        }
        .then(|| Point::new(point.x, point.y))
    }

    fn size(&self) -> Option<Size> {
        let mut size = CGSize::new(0.0, 0.0);
        unsafe {
            get_value_attr(self.raw, cf_size(), K_AX_VALUE_TYPE_CG_SIZE, (&raw mut size).cast())
        }
        .then(|| Size::new(size.width, size.height))
    }

    fn set_position(&self, position: Point) -> Result<(), ModMoveError> {
        let point = CGPoint::new(position.x, position.y);
        unsafe {
            set_value_attr(
                self.raw,
                cf_position(),
                K_AX_VALUE_TYPE_CG_POINT,
                (&raw const point).cast(),
                "set position",
            )
        }
    }

    fn set_size(&self, size: Size) -> Result<(), ModMoveError> {
        let size = CGSize::new(size.width, size.height);
        unsafe {
            set_value_attr(
                self.raw,
                cf_size(),
                K_AX_VALUE_TYPE_CG_SIZE,
                (&raw const size).cast(),
                "set size",
            )
        }
    }

    fn pid(&self) -> Option<i32> {
        let mut pid = 0;
        let result = unsafe { AXUIElementGetPid(self.raw, &raw mut pid) };
        (result == K_AX_ERROR_SUCCESS && pid > 0).then_some(pid)
    }

    fn raise(&self) -> Result<(), ModMoveError> {
        let result = unsafe { AXUIElementPerformAction(self.raw, cf_raise()) };
        ax_result_to_error(result, "raise window")
    }
}

impl Drop for AXElement {
    fn drop(&mut self) {
        // SAFETY: self.raw is non-null and owned.
        unsafe { CFRelease(self.raw.cast()) };
    }
}

impl Clone for AXElement {
    fn clone(&self) -> Self {
        unsafe { CFRetain(self.raw.cast()) };
        Self { raw: self.raw }
    }
}

impl std::fmt::Debug for AXElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AXElement").field("raw", &self.raw).finish()
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Copies an attribute value. The caller owns the result.
unsafe fn copy_attribute(element: AXUIElementRef, attr: *const c_void) -> Option<*mut c_void> {
    let mut value: *mut c_void = ptr::null_mut();
    let result = unsafe { AXUIElementCopyAttributeValue(element, attr, &raw mut value) };

    (result == K_AX_ERROR_SUCCESS && !value.is_null()).then_some(value)
}

/// Reads an `AXValue` attribute into `out`. Returns whether it succeeded.
unsafe fn get_value_attr(
    element: AXUIElementRef,
    attr: *const c_void,
    value_type: i32,
    out: *mut c_void,
) -> bool {
    let Some(value) = (unsafe { copy_attribute(element, attr) }) else {
        return false;
    };

    let success = unsafe { AXValueGetValue(value.cast_const(), value_type, out) };
    unsafe { CFRelease(value.cast_const()) };
    success
}

/// Wraps `input` in an `AXValue` and writes it to the attribute.
unsafe fn set_value_attr(
    element: AXUIElementRef,
    attr: *const c_void,
    value_type: i32,
    input: *const c_void,
    operation: &str,
) -> Result<(), ModMoveError> {
    let value = unsafe { AXValueCreate(value_type, input) };
    if value.is_null() {
        return Err(ModMoveError::Accessibility(format!("{operation}: failed to create AXValue")));
    }

    let result = unsafe { AXUIElementSetAttributeValue(element, attr, value.cast_const()) };
    unsafe { CFRelease(value.cast_const()) };

    ax_result_to_error(result, operation)
}

/// Converts an AX error code to a `Result`.
fn ax_result_to_error(result: AXError, operation: &str) -> Result<(), ModMoveError> {
    if result == K_AX_ERROR_SUCCESS {
        return Ok(());
    }

    let message = match result {
        K_AX_ERROR_INVALID_UI_ELEMENT => "Invalid UI element",
        K_AX_ERROR_ATTRIBUTE_UNSUPPORTED => "Attribute unsupported",
        K_AX_ERROR_ACTION_UNSUPPORTED => "Action unsupported",
        K_AX_ERROR_NOT_IMPLEMENTED => "Not implemented",
        K_AX_ERROR_CANNOT_COMPLETE => "Cannot complete operation",
        K_AX_ERROR_API_DISABLED => "Accessibility access not granted",
        _ => "Unknown error",
    };
    Err(ModMoveError::Accessibility(format!("{operation}: {message} (error {result})")))
}
