//! Accessibility permission command.

use colored::Colorize;

use crate::error::ModMoveError;

/// Prints whether Accessibility access is granted.
///
/// # Errors
///
/// Returns `ModMoveError::Permission` when access is missing, so scripts can
/// check the exit status.
pub fn execute(prompt: bool) -> Result<(), ModMoveError> {
    if crate::accessibility_trusted(prompt)? {
        println!("{} Accessibility access granted", "✓".green());
        return Ok(());
    }

    println!("{} Accessibility access missing", "✗".red());
    println!(
        "\nAllow modmove under System Settings > Privacy & Security > Accessibility,\n\
        then restart it."
    );
    if !prompt {
        println!("Run 'modmove permissions --prompt' to open the system prompt.");
    }

    Err(ModMoveError::Permission("Accessibility access not granted".to_string()))
}
