//! CLI module for `ModMove`.
//!
//! Running `modmove` without a subcommand starts the background agent. The
//! remaining subcommands inspect configuration and permissions and exit.

mod commands;

pub use commands::{Cli, Commands, ConfigCommands};
