// src/platform/mod.rs

//! Host platform detection.
//!
//! The launcher never calls `std::env::consts::OS` directly. It asks a
//! [`PlatformProbe`] for the host at launch time and feeds the answer into
//! the pure [`InvocationPolicy`](mode::InvocationPolicy). Tests swap in a
//! probe that reports a fixed platform.

pub mod mode;

use std::fmt;
use std::str::FromStr;

pub use mode::{InvocationMode, InvocationPolicy};

/// Operating system family the launcher is running on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HostPlatform {
    Windows,
    MacOs,
    Linux,
    Other(String),
}

impl HostPlatform {
    /// Platform of the running process.
    pub fn current() -> Self {
        let os = std::env::consts::OS;
        HostPlatform::from_str(os).unwrap_or_else(|_| HostPlatform::Other(os.to_string()))
    }
}

impl FromStr for HostPlatform {
    type Err = String;

    /// Accepts Rust's `std::env::consts::OS` names plus the common aliases
    /// `win32` and `darwin`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err("platform name must not be empty".to_string()),
            "windows" | "win32" => Ok(HostPlatform::Windows),
            "macos" | "darwin" => Ok(HostPlatform::MacOs),
            "linux" => Ok(HostPlatform::Linux),
            other => Ok(HostPlatform::Other(other.to_string())),
        }
    }
}

impl fmt::Display for HostPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostPlatform::Windows => f.write_str("windows"),
            HostPlatform::MacOs => f.write_str("macos"),
            HostPlatform::Linux => f.write_str("linux"),
            HostPlatform::Other(name) => f.write_str(name),
        }
    }
}

/// Source of the host platform, consulted on every launch.
pub trait PlatformProbe: Send + Sync + fmt::Debug {
    fn host(&self) -> HostPlatform;
}

/// Probe backed by the compile target of the running binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealPlatform;

impl PlatformProbe for RealPlatform {
    fn host(&self) -> HostPlatform {
        HostPlatform::current()
    }
}
