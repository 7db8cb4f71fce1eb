// src/platform/mode.rs

use super::HostPlatform;

/// How the target executable is started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvocationMode {
    /// Execute the target itself.
    Direct,
    /// Hand the target to an interpreter, e.g. `mono zebra.exe ...`.
    ViaRuntime(String),
}

/// Maps a host platform to an [`InvocationMode`].
///
/// Hosts equal to `native` run the target directly; every other host goes
/// through `runtime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationPolicy {
    pub native: HostPlatform,
    pub runtime: String,
}

impl InvocationPolicy {
    pub fn new(native: HostPlatform, runtime: impl Into<String>) -> Self {
        Self {
            native,
            runtime: runtime.into(),
        }
    }

    pub fn mode_for(&self, host: &HostPlatform) -> InvocationMode {
        if *host == self.native {
            InvocationMode::Direct
        } else {
            InvocationMode::ViaRuntime(self.runtime.clone())
        }
    }
}

impl Default for InvocationPolicy {
    fn default() -> Self {
        Self::new(HostPlatform::Windows, "mono")
    }
}
