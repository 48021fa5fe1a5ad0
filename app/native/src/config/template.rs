//! Configuration template generation.

use std::fs;
use std::path::Path;

/// Generates a configuration template with all options commented out.
#[must_use]
pub fn generate_config_template() -> String {
    r#"// ModMove Configuration File
// ==========================
// This file uses JSONC format (JSON with comments).
// All options below are commented out and show their default values.
// Uncomment and modify the options you want to configure.
//
// Available modifiers: "control", "option", "command", "shift"

{
  // ============================================================================
  // Triggers
  // ============================================================================
  // Hold these keys and move the pointer to move the window under it.
  // "drag": {
  //   "modifiers": ["control", "option"]
  // },

  // Hold these keys and move the pointer to resize the window from the
  // corner nearest to the pointer. Checked before "drag".
  // "resize": {
  //   "modifiers": ["control", "option", "shift"]
  // },

  // ============================================================================
  // Screen Edges
  // ============================================================================
  // Keep windows inside the visible screen area while moving slowly.
  // "constrainToScreen": true,

  // Pointer speed (logical pixels per second) at which edges stop holding
  // the window back. Flick the pointer to push a window past the edge.
  // "speedThreshold": 1000,

  // Weight of the newest sample in the smoothed speed, between 0 and 1.
  // "smoothing": 0.1,

  // ============================================================================
  // Focus
  // ============================================================================
  // Bring the application to the front when grabbing one of its windows.
  // "activateOwner": true
}
"#
    .to_string()
}

/// Writes the template to `path`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn create_config_file(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, generate_config_template())
}
