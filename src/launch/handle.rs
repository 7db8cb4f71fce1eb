// src/launch/handle.rs

//! Caller-owned handle to a running (or finished) child.
//!
//! Each handle is backed by one supervisor task that owns the
//! `tokio::process::Child`. The supervisor:
//! - waits for the child to exit and publishes `ChildState::Exited` exactly
//!   once on a `watch` channel;
//! - serves signal requests in between, so a signal is never sent to a pid
//!   that has already been reaped (and possibly reused).

use std::process::ExitStatus;

use anyhow::anyhow;
use tokio::process::{Child, ChildStderr, ChildStdout};
use tokio::sync::{mpsc, oneshot, watch};
use tracing::debug;

use crate::errors::{LauncherError, Result};
use crate::launch::signal::ChildSignal;

/// How a child process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Normal exit with a status code.
    Exited(i32),
    /// Killed by a signal it did not handle.
    Signaled { name: String, number: i32 },
}

impl Termination {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Termination::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;

            if let Some(number) = status.signal() {
                return Termination::Signaled {
                    name: crate::launch::signal::signal_name(number),
                    number,
                };
            }
        }

        Termination::Exited(-1)
    }

    pub fn is_abnormal(&self) -> bool {
        matches!(self, Termination::Signaled { .. })
    }

    /// Status the wrapper should exit with.
    ///
    /// Signal deaths become `128 + signo`, as shells report them.
    pub fn exit_code(&self) -> i32 {
        match self {
            Termination::Exited(code) => *code,
            Termination::Signaled { number, .. } => 128 + number,
        }
    }
}

/// Lifecycle of a child as seen by its handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChildState {
    Running,
    Exited(Termination),
}

struct SignalRequest {
    signal: ChildSignal,
    reply: oneshot::Sender<Result<()>>,
}

/// Output streams, exit notification and kill capability for one child.
#[derive(Debug)]
pub struct ChildHandle {
    pid: Option<u32>,
    stdout: Option<ChildStdout>,
    stderr: Option<ChildStderr>,
    state_rx: watch::Receiver<ChildState>,
    signal_tx: mpsc::UnboundedSender<SignalRequest>,
}

impl ChildHandle {
    /// Take ownership of `child` and start its supervisor task.
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn supervise(mut child: Child) -> Self {
        let pid = child.id();
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let (state_tx, state_rx) = watch::channel(ChildState::Running);
        let (signal_tx, signal_rx) = mpsc::unbounded_channel();

        tokio::spawn(run_supervisor(child, signal_rx, state_tx));

        Self {
            pid,
            stdout,
            stderr,
            state_rx,
            signal_tx,
        }
    }

    /// OS process id captured at spawn time.
    pub fn id(&self) -> Option<u32> {
        self.pid
    }

    pub fn take_stdout(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    pub fn take_stderr(&mut self) -> Option<ChildStderr> {
        self.stderr.take()
    }

    pub fn state(&self) -> ChildState {
        self.state_rx.borrow().clone()
    }

    /// Resolve once the child has exited. Repeated calls return the same
    /// termination.
    pub async fn wait(&self) -> Result<Termination> {
        let mut rx = self.state_rx.clone();
        let lost = || {
            LauncherError::Other(anyhow!(
                "child supervisor stopped before the exit status was observed"
            ))
        };

        let state = rx
            .wait_for(|s| matches!(s, ChildState::Exited(_)))
            .await
            .map_err(|_| lost())?;

        match &*state {
            ChildState::Exited(termination) => Ok(termination.clone()),
            ChildState::Running => Err(lost()),
        }
    }

    /// Deliver `signal` to the child.
    ///
    /// A no-op once the child has exited.
    pub async fn kill(&self, signal: ChildSignal) -> Result<()> {
        let exited = matches!(*self.state_rx.borrow(), ChildState::Exited(_));
        if exited {
            return Ok(());
        }

        let (reply, reply_rx) = oneshot::channel();
        if self.signal_tx.send(SignalRequest { signal, reply }).is_err() {
            // Supervisor is gone: the child has been reaped.
            return Ok(());
        }

        reply_rx.await.unwrap_or(Ok(()))
    }
}

/// Parse `signal_name` and deliver it to the child behind `handle`.
///
/// Entry point for the wrapper's own signal handling.
pub async fn propagate_signal(handle: &ChildHandle, signal_name: &str) -> Result<()> {
    let signal: ChildSignal = signal_name.parse()?;
    handle.kill(signal).await
}

async fn run_supervisor(
    mut child: Child,
    mut signal_rx: mpsc::UnboundedReceiver<SignalRequest>,
    state_tx: watch::Sender<ChildState>,
) {
    let pid = child.id();
    let status = loop {
        tokio::select! {
            status = child.wait() => break status,
            Some(request) = signal_rx.recv() => {
                let result = deliver(&mut child, request.signal);
                let _ = request.reply.send(result);
            }
        }
    };

    match status {
        Ok(status) => {
            let termination = Termination::from_status(status);
            debug!(?pid, ?termination, "child exited");
            // Later signal requests find the channel closed and become no-ops.
            signal_rx.close();
            state_tx.send_replace(ChildState::Exited(termination));
        }
        Err(e) => {
            debug!(?pid, error = %e, "failed to wait for child");
        }
    }
}

#[cfg(unix)]
fn deliver(child: &mut Child, signal: ChildSignal) -> Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Some(pid) = child.id() else {
        return Ok(());
    };

    match kill(Pid::from_raw(pid as i32), signal.to_nix()) {
        Ok(()) | Err(Errno::ESRCH) => {
            debug!(pid, %signal, "signal delivered to child");
            Ok(())
        }
        Err(e) => Err(LauncherError::SignalDelivery {
            signal: signal.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(not(unix))]
fn deliver(child: &mut Child, signal: ChildSignal) -> Result<()> {
    // No named signals here; every request terminates the child.
    match child.start_kill() {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
        Err(e) => Err(LauncherError::SignalDelivery {
            signal: signal.to_string(),
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_pass_through() {
        assert_eq!(Termination::Exited(0).exit_code(), 0);
        assert_eq!(Termination::Exited(7).exit_code(), 7);
        assert!(!Termination::Exited(7).is_abnormal());
    }

    #[test]
    fn signal_deaths_are_abnormal_and_nonzero() {
        let t = Termination::Signaled {
            name: "SIGINT".into(),
            number: 2,
        };
        assert!(t.is_abnormal());
        assert_eq!(t.exit_code(), 130);
    }

    #[cfg(unix)]
    #[test]
    fn from_status_decodes_raw_wait_status() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(
            Termination::from_status(ExitStatus::from_raw(7 << 8)),
            Termination::Exited(7)
        );
        assert_eq!(
            Termination::from_status(ExitStatus::from_raw(15)),
            Termination::Signaled {
                name: "SIGTERM".into(),
                number: 15
            }
        );
    }
}
