// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::model::{LauncherConfig, RawLauncherConfig};
use crate::errors::{LauncherError, Result};

/// File name looked up next to the launcher binary.
pub const DEFAULT_CONFIG_FILE: &str = "launchshim.toml";

/// Environment variable that points at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "LAUNCHSHIM_CONFIG";

/// Load a configuration file and return the raw `RawLauncherConfig`.
///
/// This only performs TOML deserialization. Use [`load_and_validate`] for
/// semantic checks.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawLauncherConfig> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawLauncherConfig = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and validate it.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<LauncherConfig> {
    let raw_config = load_from_path(&path)?;
    let config = LauncherConfig::try_from(raw_config)?;
    Ok(config)
}

/// Default config location: `launchshim.toml` inside the install directory.
pub fn default_config_path(install_dir: &Path) -> PathBuf {
    install_dir.join(DEFAULT_CONFIG_FILE)
}

/// Resolve the configuration for a launcher installed in `install_dir`.
///
/// - An explicit path (from `LAUNCHSHIM_CONFIG`) must exist.
/// - The default path is optional; when absent the built-in defaults apply.
pub fn load_for_install_dir(
    install_dir: &Path,
    explicit: Option<&Path>,
) -> Result<LauncherConfig> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(LauncherError::ConfigError(format!(
                "config file {} (from {CONFIG_ENV_VAR}) does not exist",
                path.display()
            )));
        }
        debug!(path = %path.display(), "loading explicit launcher config");
        return load_and_validate(path);
    }

    let path = default_config_path(install_dir);
    if path.is_file() {
        debug!(path = %path.display(), "loading launcher config");
        load_and_validate(&path)
    } else {
        debug!(path = %path.display(), "no launcher config found; using defaults");
        Ok(LauncherConfig::default())
    }
}
