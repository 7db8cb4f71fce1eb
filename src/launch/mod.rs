// src/launch/mod.rs

//! Locating and starting the bundled target executable.
//!
//! - [`install`] resolves the launcher's installation directory and the
//!   target path inside it.
//! - [`spec`] turns a target plus invocation mode into a concrete command
//!   line.
//! - [`launcher`] owns `ProcessLauncher`, which spawns the child.
//! - [`handle`] is the caller-owned `ChildHandle` (streams, exit, kill).
//! - [`signal`] names the signals that can be relayed to a child.

pub mod handle;
pub mod install;
pub mod launcher;
pub mod signal;
pub mod spec;

pub use handle::{ChildHandle, ChildState, Termination, propagate_signal};
pub use install::{install_dir, resolve_target};
pub use launcher::ProcessLauncher;
pub use signal::ChildSignal;
pub use spec::{CommandLine, LaunchSpec};
