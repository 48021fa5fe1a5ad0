//! Configuration types and file discovery.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mover::intent::flags;

/// Keyboard modifier that can take part in a trigger combination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Control key (^).
    Control,
    /// Option/Alt key (⌥).
    Option,
    /// Command key (⌘).
    Command,
    /// Shift key (⇧).
    Shift,
}

impl Modifier {
    /// The `CGEventFlags` bit for this modifier.
    #[must_use]
    pub const fn flag(self) -> u64 {
        match self {
            Self::Control => flags::CONTROL,
            Self::Option => flags::OPTION,
            Self::Command => flags::COMMAND,
            Self::Shift => flags::SHIFT,
        }
    }
}

/// A set of modifiers that must all be held.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModifierCombo {
    /// Keys that must be held together.
    pub modifiers: Vec<Modifier>,
}

impl ModifierCombo {
    #[must_use]
    pub const fn new(modifiers: Vec<Modifier>) -> Self { Self { modifiers } }

    /// Returns the combination as a `CGEventFlags` bitmask.
    ///
    /// An empty combination yields `0`, which never matches.
    #[must_use]
    pub fn required_flags(&self) -> u64 {
        self.modifiers.iter().fold(0, |mask, modifier| mask | modifier.flag())
    }
}

fn default_drag() -> ModifierCombo {
    ModifierCombo::new(vec![Modifier::Control, Modifier::Option])
}

fn default_resize() -> ModifierCombo {
    ModifierCombo::new(vec![Modifier::Control, Modifier::Option, Modifier::Shift])
}

/// Root configuration.
///
/// Every field is optional in the file; missing fields take their default.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct ModMoveConfig {
    /// Modifiers that start a move.
    /// Default: `["control", "option"]`
    pub drag: ModifierCombo,

    /// Modifiers that start a resize. Checked before `drag`, so a superset of
    /// the drag keys wins.
    /// Default: `["control", "option", "shift"]`
    pub resize: ModifierCombo,

    /// Pointer speed in logical pixels per second at or above which screen
    /// edges stop constraining the window.
    /// Default: `1000`
    pub speed_threshold: f64,

    /// Weight of the newest sample in the smoothed speed, in `(0, 1]`.
    /// Default: `0.1`
    pub smoothing: f64,

    /// Keep windows inside the usable screen frame during slow gestures.
    /// Default: `true`
    pub constrain_to_screen: bool,

    /// Bring a background application to the front when one of its windows
    /// is grabbed.
    /// Default: `true`
    pub activate_owner: bool,
}

impl Default for ModMoveConfig {
    fn default() -> Self {
        Self {
            drag: default_drag(),
            resize: default_resize(),
            speed_threshold: crate::mover::constraint::DEFAULT_SPEED_THRESHOLD,
            smoothing: crate::mover::speed::DEFAULT_SMOOTHING,
            constrain_to_screen: true,
            activate_owner: true,
        }
    }
}

/// Errors that can occur when loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    #[error(
        "No configuration file found. Expected at ~/.config/modmove/config.jsonc, \
        ~/Library/Application Support/modmove/config.jsonc, or ~/.modmove.jsonc"
    )]
    NotFound,
    /// The configuration file exists but could not be read.
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),
    /// The configuration file contains invalid JSON.
    #[error("Failed to parse configuration file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".modmove.jsonc", ".modmove.json"];

const APP_DIR: &str = "modmove";

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/modmove/config.jsonc` when the variable is set
/// 2. `~/.config/modmove/config.jsonc`
/// 3. `~/Library/Application Support/modmove/config.jsonc` (macOS native)
/// 4. `~/.modmove.jsonc`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    let mut push_dir = |dir: PathBuf| {
        for filename in CONFIG_FILE_NAMES {
            let path = dir.join(filename);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    };

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config.is_empty() {
            push_dir(PathBuf::from(xdg_config).join(APP_DIR));
        }
    }

    if let Some(home) = dirs::home_dir() {
        push_dir(home.join(".config").join(APP_DIR));
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_dir(config_dir.join(APP_DIR));
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Parses JSONC text into a configuration.
///
/// # Errors
///
/// Returns `ConfigError::Parse` if the text is not valid JSON once comments
/// are stripped.
pub fn parse_config(text: &str) -> Result<ModMoveConfig, ConfigError> {
    parse_reader(text.as_bytes())
}

fn parse_reader(reader: impl Read) -> Result<ModMoveConfig, ConfigError> {
    let reader = json_comments::StripComments::new(reader);
    Ok(serde_json::from_reader(reader)?)
}

/// Loads the configuration from the first available config file.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of
/// the expected locations, `ConfigError::Io` if the file could not be read and
/// `ConfigError::Parse` if it contains invalid JSON.
pub fn load_config() -> Result<(ModMoveConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), |path| load_config_from_path(&path))
}

/// Loads the configuration from an explicit path.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, otherwise the
/// same errors as [`load_config`].
pub fn load_config_from_path(path: &Path) -> Result<(ModMoveConfig, PathBuf), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    let config = parse_reader(file)?;
    Ok((config, path.to_path_buf()))
}
