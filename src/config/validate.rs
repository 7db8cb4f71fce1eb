// src/config/validate.rs

use std::path::{Component, Path};
use std::str::FromStr;

use crate::config::model::{LauncherConfig, RawLauncherConfig};
use crate::errors::{LauncherError, Result};
use crate::platform::HostPlatform;

impl TryFrom<RawLauncherConfig> for LauncherConfig {
    type Error = LauncherError;

    fn try_from(raw: RawLauncherConfig) -> std::result::Result<Self, Self::Error> {
        validate_target(&raw.target)?;
        validate_runtime(&raw.runtime)?;
        let native = validate_native_platform(&raw.native_platform)?;
        Ok(LauncherConfig::new_unchecked(
            raw.target,
            raw.runtime.trim().to_string(),
            native,
            raw.stdin,
        ))
    }
}

/// The target must stay inside the installation directory.
fn validate_target(target: &Path) -> Result<()> {
    if target.as_os_str().is_empty() {
        return Err(LauncherError::ConfigError(
            "`target` must not be empty".to_string(),
        ));
    }
    if target.is_absolute() || target.has_root() {
        return Err(LauncherError::ConfigError(format!(
            "`target` must be relative to the install directory (got {})",
            target.display()
        )));
    }
    if target.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(LauncherError::ConfigError(format!(
            "`target` must not contain `..` (got {})",
            target.display()
        )));
    }
    Ok(())
}

fn validate_runtime(runtime: &str) -> Result<()> {
    if runtime.trim().is_empty() {
        return Err(LauncherError::ConfigError(
            "`runtime` must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_native_platform(name: &str) -> Result<HostPlatform> {
    HostPlatform::from_str(name)
        .map_err(|e| LauncherError::ConfigError(format!("`native_platform`: {e}")))
}
