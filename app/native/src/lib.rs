//! `ModMove` - move and resize macOS windows by holding modifier keys.
//!
//! Hold Control+Option and move the pointer to drag the window underneath it.
//! Add Shift to resize it from the nearest corner. Slow gestures keep the
//! window inside the visible screen area; a quick flick pushes it past the
//! edge.
//!
//! The manipulation logic in [`mover`] is platform-independent. The macOS
//! event taps and Accessibility calls that drive it are only built on macOS.

pub mod cli;
pub mod config;
pub mod error;
pub mod mover;

#[cfg(target_os = "macos")]
mod platform;

use error::ModMoveError;

/// Loads the configuration and runs the agent until its run loop stops.
///
/// # Errors
///
/// Returns an error if the event taps cannot be installed, or on platforms
/// other than macOS.
pub fn run() -> Result<(), ModMoveError> {
    let config = config::init();
    if let Some(path) = config::get_config_path() {
        tracing::info!(path = %path.display(), "using configuration file");
    }

    run_platform(config)
}

#[cfg(target_os = "macos")]
fn run_platform(config: &config::ModMoveConfig) -> Result<(), ModMoveError> {
    platform::run(config)
}

#[cfg(not(target_os = "macos"))]
fn run_platform(_config: &config::ModMoveConfig) -> Result<(), ModMoveError> {
    Err(ModMoveError::Command("ModMove only supports macOS.".to_string()))
}

/// Reports whether the process may control other applications' windows.
///
/// With `prompt`, the system permission dialog is shown if access is missing.
///
/// # Errors
///
/// Returns an error on platforms other than macOS.
#[cfg(target_os = "macos")]
pub fn accessibility_trusted(prompt: bool) -> Result<bool, ModMoveError> {
    let trusted = if prompt {
        platform::permissions::check_and_prompt()
    } else {
        platform::permissions::is_trusted()
    };
    Ok(trusted)
}

/// Reports whether the process may control other applications' windows.
///
/// # Errors
///
/// Always fails: Accessibility permissions only exist on macOS.
#[cfg(not(target_os = "macos"))]
pub fn accessibility_trusted(_prompt: bool) -> Result<bool, ModMoveError> {
    Err(ModMoveError::Permission("Accessibility permissions only exist on macOS.".to_string()))
}
