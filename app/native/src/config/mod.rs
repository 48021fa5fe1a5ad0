//! `ModMove` settings.
//!
//! Settings live in a JSONC file, so `//` and `/* */` comments are fine.
//! The file is read once when the agent starts; restart it to apply edits.

pub mod template;
pub mod types;

use std::path::PathBuf;
use std::sync::OnceLock;

pub use types::{
    ConfigError, ModMoveConfig, Modifier, ModifierCombo, config_paths,
    load_config as load_config_default, load_config_from_path, parse_config,
};

static CONFIG: OnceLock<ModMoveConfig> = OnceLock::new();

/// File the active settings came from.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// `--config` override.
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Points [`init`] at `path` instead of the search paths.
///
/// Has no effect once [`init`] has run. Returns `false` if an override was
/// already registered.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

#[must_use]
pub fn custom_config_path() -> Option<&'static PathBuf> { CUSTOM_CONFIG_PATH.get() }

/// Reads settings from the `--config` override, or the first search path
/// that exists.
///
/// # Errors
///
/// See [`load_config_from_path`].
pub fn load() -> Result<(ModMoveConfig, PathBuf), ConfigError> {
    CUSTOM_CONFIG_PATH
        .get()
        .map_or_else(load_config_default, |path| load_config_from_path(path))
}

fn load_or_default() -> ModMoveConfig {
    match load() {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "configuration loaded");
            let _ = CONFIG_PATH.set(path);
            config
        }
        Err(ConfigError::NotFound) if CUSTOM_CONFIG_PATH.get().is_some() => {
            tracing::warn!("--config file not found, using defaults");
            ModMoveConfig::default()
        }
        Err(ConfigError::NotFound) => {
            if let Some(path) = write_template() {
                let _ = CONFIG_PATH.set(path);
            }
            ModMoveConfig::default()
        }
        Err(err) => {
            tracing::warn!(error = %err, "invalid configuration, using defaults");
            ModMoveConfig::default()
        }
    }
}

/// Where `config init` writes when no path is given.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    CUSTOM_CONFIG_PATH.get().cloned().or_else(|| config_paths().into_iter().next())
}

/// Seeds the preferred search path with the commented template on first run.
fn write_template() -> Option<PathBuf> {
    let path = config_paths().into_iter().next()?;
    if path.exists() {
        return None;
    }

    template::create_config_file(&path)
        .inspect(|()| tracing::info!(path = %path.display(), "wrote configuration template"))
        .inspect_err(|err| {
            tracing::debug!(error = %err, path = %path.display(), "could not write template");
        })
        .ok()?;

    Some(path)
}

/// Returns the process-wide settings, loading them on first use.
pub fn init() -> &'static ModMoveConfig { CONFIG.get_or_init(load_or_default) }

/// The file the settings were read from, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_are_available() {
        let config = ModMoveConfig::default();
        assert!(config.constrain_to_screen);
        assert_eq!(config.drag.modifiers, vec![Modifier::Control, Modifier::Option]);
    }

    #[test]
    fn test_config_error() {
        let err = ConfigError::NotFound;
        assert!(err.to_string().contains("No configuration file found"));
    }
}
