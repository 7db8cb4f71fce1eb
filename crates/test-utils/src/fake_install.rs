//! A throwaway installation directory holding fake target executables.
//!
//! Scripts are plain (non-executable) files run through `sh`, and "native"
//! targets are symlinks to `/bin/sh`. Neither writes a fresh executable, so
//! tests never race into `ETXTBSY` while other tests fork.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use launchshim::launch::ProcessLauncher;
use launchshim::platform::{HostPlatform, InvocationPolicy, PlatformProbe};
use tempfile::TempDir;

use crate::FixedPlatform;

pub struct FakeInstall {
    dir: TempDir,
}

impl FakeInstall {
    pub fn new() -> anyhow::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a shell script at `rel` (relative to the install dir).
    pub fn write_script(&self, rel: &str, body: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, body)?;
        Ok(path)
    }

    /// Place a symlink to `/bin/sh` at `rel`, usable as a directly executed
    /// target (`target -c '...'`).
    #[cfg(unix)]
    pub fn link_shell(&self, rel: &str) -> anyhow::Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        std::os::unix::fs::symlink("/bin/sh", &path)?;
        Ok(path)
    }

    /// Launcher whose target is `rel` and which always sees `host`.
    pub fn launcher(
        &self,
        rel: &str,
        policy: InvocationPolicy,
        host: HostPlatform,
    ) -> anyhow::Result<ProcessLauncher> {
        let probe: Arc<dyn PlatformProbe> = FixedPlatform::shared(host);
        Ok(ProcessLauncher::new(self.path(), Path::new(rel), policy)?.with_probe(probe))
    }

    /// Launcher that runs `rel` through `sh`, as a non-native host would run
    /// the target through its interpreter.
    pub fn sh_launcher(&self, rel: &str) -> anyhow::Result<ProcessLauncher> {
        self.launcher(
            rel,
            InvocationPolicy::new(HostPlatform::Windows, "sh"),
            HostPlatform::Linux,
        )
    }

    /// Launcher that executes `rel` directly.
    pub fn direct_launcher(&self, rel: &str) -> anyhow::Result<ProcessLauncher> {
        self.launcher(
            rel,
            InvocationPolicy::new(HostPlatform::Linux, "sh"),
            HostPlatform::Linux,
        )
    }

    /// Block (async) until `path` exists.
    pub async fn wait_for_file(path: &Path) {
        for _ in 0..500 {
            if path.exists() {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        panic!("{} never appeared", path.display());
    }
}
