use std::path::PathBuf;

use launchshim::config::{LauncherConfig, RawLauncherConfig};
use launchshim::types::StdinMode;

/// Builder for `LauncherConfig` to simplify test setup.
pub struct LauncherConfigBuilder {
    raw: RawLauncherConfig,
}

impl LauncherConfigBuilder {
    pub fn new() -> Self {
        Self {
            raw: RawLauncherConfig::default(),
        }
    }

    pub fn target(mut self, target: &str) -> Self {
        self.raw.target = PathBuf::from(target);
        self
    }

    pub fn runtime(mut self, runtime: &str) -> Self {
        self.raw.runtime = runtime.to_string();
        self
    }

    pub fn native_platform(mut self, platform: &str) -> Self {
        self.raw.native_platform = platform.to_string();
        self
    }

    pub fn stdin(mut self, stdin: StdinMode) -> Self {
        self.raw.stdin = stdin;
        self
    }

    pub fn raw(self) -> RawLauncherConfig {
        self.raw
    }

    pub fn build(self) -> LauncherConfig {
        LauncherConfig::try_from(self.raw).expect("Failed to build valid config from builder")
    }
}

impl Default for LauncherConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
