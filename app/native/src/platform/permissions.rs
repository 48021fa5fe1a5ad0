//! Accessibility permission checks.
//!
//! Moving other applications' windows requires the process to be trusted
//! under Privacy & Security > Accessibility.

use std::ffi::c_void;

use core_foundation::base::TCFType;
use core_foundation::boolean::CFBoolean;
use core_foundation::dictionary::CFDictionary;
use core_foundation::string::CFString;

#[link(name = "ApplicationServices", kind = "framework")]
unsafe extern "C" {
    fn AXIsProcessTrusted() -> bool;
    fn AXIsProcessTrustedWithOptions(options: *const c_void) -> bool;
}

const K_AX_TRUSTED_CHECK_OPTION_PROMPT: &str = "AXTrustedCheckOptionPrompt";

/// Returns whether the process is trusted, without prompting.
#[must_use]
pub fn is_trusted() -> bool { unsafe { AXIsProcessTrusted() } }

/// Returns whether the process is trusted, showing the system prompt if not.
///
/// A newly granted permission usually needs a restart to take effect.
#[must_use]
pub fn check_and_prompt() -> bool {
    let key = CFString::new(K_AX_TRUSTED_CHECK_OPTION_PROMPT);
    let value = CFBoolean::true_value();

    let pairs = [(key.as_CFType(), value.as_CFType())];
    let options = CFDictionary::from_CFType_pairs(&pairs);

    unsafe { AXIsProcessTrustedWithOptions(options.as_concrete_TypeRef().cast()) }
}
