// src/launch/spec.rs

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::platform::InvocationMode;

/// Everything needed to start the target once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    executable: PathBuf,
    mode: InvocationMode,
    extra_args: Vec<OsString>,
}

impl LaunchSpec {
    pub fn new<I, S>(executable: impl Into<PathBuf>, mode: InvocationMode, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            executable: executable.into(),
            mode,
            extra_args: args.into_iter().map(Into::into).collect(),
        }
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn mode(&self) -> &InvocationMode {
        &self.mode
    }

    pub fn extra_args(&self) -> &[OsString] {
        &self.extra_args
    }

    /// Consume the spec and produce the effective command line.
    ///
    /// - `Direct`: `executable args...`
    /// - `ViaRuntime(rt)`: `rt executable args...`
    pub fn into_command_line(self) -> CommandLine {
        match self.mode {
            InvocationMode::Direct => CommandLine {
                program: self.executable.into_os_string(),
                args: self.extra_args,
            },
            InvocationMode::ViaRuntime(runtime) => {
                let mut args = Vec::with_capacity(self.extra_args.len() + 1);
                args.push(self.executable.into_os_string());
                args.extend(self.extra_args);
                CommandLine {
                    program: OsString::from(runtime),
                    args,
                }
            }
        }
    }
}

/// Program plus arguments, exactly as handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandLine {
    /// Program followed by every argument.
    pub fn tokens(&self) -> impl Iterator<Item = &OsStr> {
        std::iter::once(self.program.as_os_str()).chain(self.args.iter().map(OsString::as_os_str))
    }

    pub fn to_command(&self) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}
