//! CLI command definitions using Clap.
//!
//! - `config_cmd` - Configuration file management
//! - `permissions` - Accessibility permission status

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::config::{self, ModMoveConfig};
use crate::error::ModMoveError;

pub mod config_cmd;
pub mod permissions;

pub use config_cmd::ConfigCommands;

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// `ModMove` - move and resize windows by holding modifier keys.
#[derive(Parser, Debug)]
#[command(name = "modmove")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace).
    ///
    /// Ignored when `RUST_LOG` is set.
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Start the background agent.
    ///
    /// Listens for the configured modifier combinations and moves or resizes
    /// the window under the pointer. This is the default when no subcommand
    /// is given.
    Run,

    /// Configuration file management commands.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Check the Accessibility permission.
    ///
    /// Window geometry can only be changed once this executable is trusted
    /// under System Settings > Privacy & Security > Accessibility.
    Permissions {
        /// Show the system prompt if the permission is missing.
        #[arg(long)]
        prompt: bool,
    },

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Usage:
    ///   eval "$(modmove completions --shell zsh)"
    ///   modmove completions --shell fish > ~/.config/fish/completions/modmove.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// The requested command, defaulting to [`Commands::Run`].
    #[must_use]
    pub fn command_or_default(&self) -> &Commands {
        self.command.as_ref().unwrap_or(&Commands::Run)
    }

    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), ModMoveError> {
        if let Some(path) = &self.config {
            // `config init` may target a file that does not exist yet.
            let creates_file =
                matches!(self.command_or_default(), Commands::Config(ConfigCommands::Init { .. }));
            if !creates_file && !path.exists() {
                return Err(ModMoveError::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            config::set_custom_config_path(path.clone());
        }

        match self.command_or_default() {
            Commands::Run => crate::run(),
            Commands::Config(cmd) => config_cmd::execute(cmd),
            Commands::Permissions { prompt } => permissions::execute(*prompt),
            Commands::Schema => {
                println!("{}", schema_json()?);
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "modmove", &mut io::stdout());
    }
}

/// Renders the configuration JSON Schema.
///
/// # Errors
///
/// Returns an error if the schema cannot be serialized.
pub fn schema_json() -> Result<String, ModMoveError> {
    let schema = schemars::schema_for!(ModMoveConfig);
    Ok(serde_json::to_string_pretty(&schema)?)
}
