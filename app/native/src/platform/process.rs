//! Application activation via `NSWorkspace` and `NSRunningApplication`.

use objc::runtime::{BOOL, Class, Object, YES};
use objc::{msg_send, sel, sel_impl};

/// `NSApplicationActivateIgnoringOtherApps`.
const ACTIVATE_IGNORING_OTHER_APPS: u64 = 1 << 1;

/// Process identifier of the frontmost application.
#[must_use]
pub fn frontmost_pid() -> Option<i32> {
    unsafe {
        let workspace_class = Class::get("NSWorkspace")?;
        let workspace: *mut Object = msg_send![workspace_class, sharedWorkspace];
        if workspace.is_null() {
            return None;
        }

        let frontmost_app: *mut Object = msg_send![workspace, frontmostApplication];
        if frontmost_app.is_null() {
            return None;
        }

        let pid: i32 = msg_send![frontmost_app, processIdentifier];
        (pid > 0).then_some(pid)
    }
}

/// Asks the application with `pid` to become frontmost.
#[must_use]
pub fn activate(pid: i32) -> bool {
    unsafe {
        let Some(app_class) = Class::get("NSRunningApplication") else {
            return false;
        };

        let app: *mut Object = msg_send![app_class, runningApplicationWithProcessIdentifier: pid];
        if app.is_null() {
            return false;
        }

        let result: BOOL = msg_send![app, activateWithOptions: ACTIVATE_IGNORING_OTHER_APPS];
        result == YES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_unknown_pid_fails() { assert!(!activate(-1)); }
}
