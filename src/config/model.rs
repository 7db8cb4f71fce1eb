// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

use crate::platform::{HostPlatform, InvocationPolicy};
use crate::types::StdinMode;

/// Configuration as read from `launchshim.toml`.
///
/// ```toml
/// target = "Release/zebra.exe"
/// runtime = "mono"
/// native_platform = "windows"
/// stdin = "null"
/// ```
///
/// Every key is optional. Unknown keys are rejected so typos surface early.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawLauncherConfig {
    /// Target executable, relative to the launcher's installation directory.
    #[serde(default = "default_target")]
    pub target: PathBuf,

    /// Interpreter used on hosts that cannot run the target natively.
    #[serde(default = "default_runtime")]
    pub runtime: String,

    /// Host platform that executes the target directly.
    ///
    /// Any name accepted by `HostPlatform::from_str` (`windows`, `win32`,
    /// `linux`, `macos`, ...).
    #[serde(default = "default_native_platform")]
    pub native_platform: String,

    /// What the child's stdin is connected to.
    #[serde(default)]
    pub stdin: StdinMode,
}

fn default_target() -> PathBuf {
    PathBuf::from("Release").join("zebra.exe")
}

fn default_runtime() -> String {
    "mono".to_string()
}

fn default_native_platform() -> String {
    "windows".to_string()
}

impl Default for RawLauncherConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            runtime: default_runtime(),
            native_platform: default_native_platform(),
            stdin: StdinMode::default(),
        }
    }
}

/// Validated launcher configuration.
///
/// Only obtainable through `TryFrom<RawLauncherConfig>` (see `validate.rs`)
/// or [`LauncherConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherConfig {
    target: PathBuf,
    runtime: String,
    native_platform: HostPlatform,
    stdin: StdinMode,
}

impl LauncherConfig {
    pub(crate) fn new_unchecked(
        target: PathBuf,
        runtime: String,
        native_platform: HostPlatform,
        stdin: StdinMode,
    ) -> Self {
        Self {
            target,
            runtime,
            native_platform,
            stdin,
        }
    }

    pub fn target(&self) -> &std::path::Path {
        &self.target
    }

    pub fn runtime(&self) -> &str {
        &self.runtime
    }

    pub fn native_platform(&self) -> &HostPlatform {
        &self.native_platform
    }

    pub fn stdin(&self) -> StdinMode {
        self.stdin
    }

    pub fn policy(&self) -> InvocationPolicy {
        InvocationPolicy::new(self.native_platform.clone(), self.runtime.clone())
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self::new_unchecked(
            default_target(),
            default_runtime(),
            HostPlatform::Windows,
            StdinMode::default(),
        )
    }
}
