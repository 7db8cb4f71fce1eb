// src/launch/launcher.rs

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use tracing::debug;

use crate::config::LauncherConfig;
use crate::errors::{Result, SpawnError};
use crate::launch::handle::ChildHandle;
use crate::launch::install::resolve_target;
use crate::launch::spec::LaunchSpec;
use crate::platform::{InvocationMode, InvocationPolicy, PlatformProbe, RealPlatform};
use crate::types::StdinMode;

/// Starts the bundled target executable.
///
/// The target path is resolved once, when the launcher is built. Every call
/// to [`launch`](Self::launch) creates a new, independent child and hands
/// the caller full ownership of it; the launcher keeps nothing.
#[derive(Debug, Clone)]
pub struct ProcessLauncher {
    executable: PathBuf,
    policy: InvocationPolicy,
    probe: Arc<dyn PlatformProbe>,
    stdin: StdinMode,
}

impl ProcessLauncher {
    /// Build a launcher for `target`, relative to `install_dir`.
    pub fn new(install_dir: &Path, target: &Path, policy: InvocationPolicy) -> Result<Self> {
        let executable = resolve_target(install_dir, target)?;
        Ok(Self {
            executable,
            policy,
            probe: Arc::new(RealPlatform),
            stdin: StdinMode::default(),
        })
    }

    pub fn from_config(install_dir: &Path, config: &LauncherConfig) -> Result<Self> {
        Ok(Self::new(install_dir, config.target(), config.policy())?.with_stdin(config.stdin()))
    }

    /// Replace the host platform probe (tests use a fixed platform).
    pub fn with_probe(mut self, probe: Arc<dyn PlatformProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_stdin(mut self, stdin: StdinMode) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Build the spec for one launch, detecting the invocation mode now.
    pub fn spec_for<I, S>(&self, args: I) -> LaunchSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let host = self.probe.host();
        let mode = self.policy.mode_for(&host);
        debug!(%host, ?mode, "selected invocation mode");
        LaunchSpec::new(self.executable.clone(), mode, args)
    }

    /// Spawn the target with `args` forwarded verbatim.
    ///
    /// stdout/stderr are piped and available from the returned handle.
    /// Must be called from within a Tokio runtime.
    pub fn launch<I, S>(&self, args: I) -> std::result::Result<ChildHandle, SpawnError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        let spec = self.spec_for(args);

        if !spec.executable().is_file() {
            return Err(SpawnError::ExecutableNotFound(spec.executable().to_path_buf()));
        }

        let mode = spec.mode().clone();
        let executable = spec.executable().to_path_buf();
        let line = spec.into_command_line();
        debug!(program = ?line.program, args = ?line.args, "spawning child");

        let mut cmd = line.to_command();
        cmd.stdin(match self.stdin {
            StdinMode::Null => Stdio::null(),
            StdinMode::Inherit => Stdio::inherit(),
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

        let child = cmd
            .spawn()
            .map_err(|e| classify_spawn_error(e, &mode, &executable, &line.program))?;

        Ok(ChildHandle::supervise(child))
    }
}

fn classify_spawn_error(
    err: io::Error,
    mode: &InvocationMode,
    executable: &Path,
    program: &std::ffi::OsStr,
) -> SpawnError {
    match (err.kind(), mode) {
        (io::ErrorKind::NotFound, InvocationMode::ViaRuntime(runtime)) => {
            SpawnError::RuntimeNotFound {
                runtime: runtime.clone(),
            }
        }
        (io::ErrorKind::NotFound, InvocationMode::Direct) => {
            SpawnError::ExecutableNotFound(executable.to_path_buf())
        }
        (io::ErrorKind::PermissionDenied, _) => SpawnError::PermissionDenied {
            program: program.to_string_lossy().into_owned(),
            source: err,
        },
        _ => SpawnError::Os {
            program: program.to_string_lossy().into_owned(),
            source: err,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::HostPlatform;

    #[derive(Debug)]
    struct Fixed(HostPlatform);

    impl PlatformProbe for Fixed {
        fn host(&self) -> HostPlatform {
            self.0.clone()
        }
    }

    fn launcher(host: HostPlatform) -> (tempfile::TempDir, ProcessLauncher) {
        let dir = tempfile::tempdir().unwrap();
        let launcher = ProcessLauncher::new(
            dir.path(),
            Path::new("Release/zebra.exe"),
            InvocationPolicy::default(),
        )
        .unwrap()
        .with_probe(Arc::new(Fixed(host)));
        (dir, launcher)
    }

    #[test]
    fn mode_is_chosen_from_the_probe() {
        let (_dir, on_windows) = launcher(HostPlatform::Windows);
        assert_eq!(on_windows.spec_for(["x"]).mode(), &InvocationMode::Direct);

        let (_dir, on_linux) = launcher(HostPlatform::Linux);
        assert_eq!(
            on_linux.spec_for(["x"]).mode(),
            &InvocationMode::ViaRuntime("mono".into())
        );
    }

    #[test]
    fn executable_is_under_install_dir() {
        let (dir, launcher) = launcher(HostPlatform::Linux);
        assert!(launcher.executable().starts_with(dir.path()));
        assert!(launcher.executable().ends_with("Release/zebra.exe"));
    }

    #[test]
    fn not_found_is_attributed_by_mode() {
        let exe = Path::new("/x/zebra.exe");
        let via = classify_spawn_error(
            io::Error::from(io::ErrorKind::NotFound),
            &InvocationMode::ViaRuntime("mono".into()),
            exe,
            "mono".as_ref(),
        );
        assert!(matches!(via, SpawnError::RuntimeNotFound { runtime } if runtime == "mono"));

        let direct = classify_spawn_error(
            io::Error::from(io::ErrorKind::NotFound),
            &InvocationMode::Direct,
            exe,
            exe.as_os_str(),
        );
        assert!(matches!(direct, SpawnError::ExecutableNotFound(p) if p == exe));
    }
}
