//! Error types for `ModMove`.
//!
//! This module provides the unified error type used outside the manipulation
//! core: configuration, permissions, event taps, Accessibility writes and the
//! CLI. The core itself never fails; it logs and skips the current sample.

use thiserror::Error;

/// Errors that can occur during application execution.
#[derive(Debug, Error)]
pub enum ModMoveError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Accessibility permission is missing.
    #[error("Permission error: {0}")]
    Permission(String),
    /// A Core Graphics event tap could not be installed.
    #[error("Event tap error: {0}")]
    EventTap(String),
    /// An Accessibility API call failed.
    #[error("Accessibility error: {0}")]
    Accessibility(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(String),
    /// Generic command error.
    #[error("{0}")]
    Command(String),
}

impl From<std::io::Error> for ModMoveError {
    fn from(err: std::io::Error) -> Self { Self::Io(err.to_string()) }
}

impl From<serde_json::Error> for ModMoveError {
    fn from(err: serde_json::Error) -> Self { Self::Command(err.to_string()) }
}

impl From<String> for ModMoveError {
    fn from(msg: String) -> Self { Self::Command(msg) }
}

impl From<&str> for ModMoveError {
    fn from(msg: &str) -> Self { Self::Command(msg.to_string()) }
}
