//! Config CLI commands.

use std::path::PathBuf;

use clap::Subcommand;
use colored::Colorize;

use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, config_paths};
use crate::error::ModMoveError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  modmove config init              # Create config at default location
  modmove config init --force      # Overwrite existing config
  modmove config init --path ~/my-config.jsonc  # Create at custom path
  modmove config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses ~/.config/modmove/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Print the effective configuration as JSON.
    ///
    /// Loads the active configuration file, fills in defaults for missing
    /// options and prints the result.
    Show,

    /// Show the configuration file search paths.
    Path,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), ModMoveError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                Ok(())
            } else {
                init_config(*force, path.clone())
            }
        }
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
    }
}

/// Initialize a new configuration file.
fn init_config(force: bool, custom_path: Option<PathBuf>) -> Result<(), ModMoveError> {
    let config_path = custom_path
        .or_else(config::default_config_path)
        .unwrap_or_else(|| PathBuf::from("config.jsonc"));

    if config_path.exists() && !force {
        return Err(ModMoveError::Config(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            config_path.display()
        )));
    }

    create_config_file(&config_path).map_err(|e| {
        ModMoveError::Config(format!("Failed to create config file {}: {e}", config_path.display()))
    })?;

    println!("Configuration file created at: {}", config_path.display());
    println!("\nAll options are commented out by default.");
    println!("Edit the file and uncomment the options you want to configure.");

    Ok(())
}

/// Print the effective configuration.
fn show_config() -> Result<(), ModMoveError> {
    let (config, source) = match config::load() {
        Ok((config, path)) => (config, Some(path)),
        Err(config::ConfigError::NotFound) => (config::ModMoveConfig::default(), None),
        Err(err) => return Err(ModMoveError::Config(err.to_string())),
    };

    match source {
        Some(path) => eprintln!("{} {}", "Loaded from".dimmed(), path.display()),
        None => eprintln!("{}", "No configuration file found, showing defaults.".yellow()),
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

/// Show the configuration file path.
fn show_config_path() {
    if let Some(path) = config::custom_config_path() {
        println!("Using custom configuration file:\n\n  {}", path.display());
        return;
    }

    println!("Configuration file search paths (in priority order):\n");

    let mut found_config = false;

    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)".green().to_string()
        } else if exists {
            " (exists)".dimmed().to_string()
        } else {
            String::new()
        };

        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if !found_config {
        println!("\nNo configuration file found.");
        println!("Run 'modmove config init' to create one.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_writes_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        init_config(false, Some(path.clone())).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, generate_config_template());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(&path, "{}").unwrap();

        let result = init_config(false, Some(path.clone()));
        assert!(matches!(result, Err(ModMoveError::Config(_))));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.jsonc");
        std::fs::write(&path, "{}").unwrap();

        init_config(true, Some(path.clone())).unwrap();
        assert_ne!(std::fs::read_to_string(&path).unwrap(), "{}");
    }
}
