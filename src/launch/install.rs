// src/launch/install.rs

//! Locating the launcher's installation directory and the bundled target.

use std::path::{Path, PathBuf};

use crate::errors::{LauncherError, Result};

/// Directory holding the running launcher binary, with symlinks resolved.
///
/// Independent of the caller's working directory.
pub fn install_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let exe = exe.canonicalize().unwrap_or(exe);
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        LauncherError::ConfigError(format!(
            "launcher executable {} has no parent directory",
            exe.display()
        ))
    })
}

/// Join `target` onto `install_dir`.
///
/// `install_dir` must be absolute so the result never depends on the current
/// working directory.
pub fn resolve_target(install_dir: &Path, target: &Path) -> Result<PathBuf> {
    if !install_dir.is_absolute() {
        return Err(LauncherError::ConfigError(format!(
            "install directory must be absolute (got {})",
            install_dir.display()
        )));
    }
    Ok(install_dir.join(target))
}
