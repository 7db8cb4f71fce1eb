// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod launch;
pub mod logging;
pub mod platform;
pub mod relay;
pub mod types;

use std::ffi::OsString;
use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{CONFIG_ENV_VAR, load_for_install_dir};
use crate::errors::Result;
use crate::launch::{ChildSignal, ProcessLauncher, install_dir};
use crate::relay::{Session, SessionOutcome, os_signal_channel};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - install directory + config resolution
/// - the process launcher
/// - OS signal listeners feeding the session's cancellation channel
/// - stdout/stderr relays
///
/// Returns the exit status the wrapper should terminate with.
pub async fn run(args: CliArgs) -> Result<i32> {
    let install_dir = install_dir()?;
    let explicit_config = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
    let config = load_for_install_dir(&install_dir, explicit_config.as_deref())?;
    let launcher = ProcessLauncher::from_config(&install_dir, &config)?;

    // Listeners go in before the child exists so no interrupt is missed.
    let signals = os_signal_channel()?;

    let outcome = launch_and_relay(&launcher, args.args, signals).await?;
    Ok(outcome.termination.exit_code())
}

/// Launch the target and mirror it onto this process's stdout/stderr.
pub async fn launch_and_relay(
    launcher: &ProcessLauncher,
    args: Vec<OsString>,
    signals: mpsc::Receiver<ChildSignal>,
) -> Result<SessionOutcome> {
    let handle = launcher.launch(args)?;
    info!(
        pid = ?handle.id(),
        executable = %launcher.executable().display(),
        "child started"
    );

    Session::new(handle)
        .run(tokio::io::stdout(), tokio::io::stderr(), signals)
        .await
}
