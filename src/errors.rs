// src/errors.rs

//! Crate-wide error types.
//!
//! - [`SpawnError`] covers everything that can stop a child from being
//!   created. It is surfaced synchronously by `ProcessLauncher::launch`.
//! - [`LauncherError`] is the umbrella type for the rest of the crate
//!   (config, relays, signal delivery).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::StreamKind;

/// The OS could not create the child process.
#[derive(Error, Debug)]
pub enum SpawnError {
    #[error("target executable not found at {}", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("runtime interpreter '{runtime}' not found on PATH")]
    RuntimeNotFound { runtime: String },

    #[error("permission denied starting '{program}': {source}")]
    PermissionDenied {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to start '{program}': {source}")]
    Os {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl SpawnError {
    /// Exit status the wrapper reports when the child never started.
    ///
    /// Follows the shell convention: 127 for "not found", 126 for "found but
    /// not executable".
    pub fn exit_code(&self) -> i32 {
        match self {
            SpawnError::ExecutableNotFound(_) | SpawnError::RuntimeNotFound { .. } => 127,
            SpawnError::PermissionDenied { .. } => 126,
            SpawnError::Os { .. } => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error(transparent)]
    Spawn(#[from] SpawnError),

    #[error("relay of child {stream} failed: {source}")]
    Relay {
        stream: StreamKind,
        #[source]
        source: io::Error,
    },

    #[error("Unknown signal: {0}")]
    UnknownSignal(String),

    #[error("failed to deliver {signal} to child: {reason}")]
    SignalDelivery { signal: String, reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LauncherError {
    /// Exit status for errors that end the wrapper before the child exits.
    pub fn exit_code(&self) -> i32 {
        match self {
            LauncherError::Spawn(e) => e.exit_code(),
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
