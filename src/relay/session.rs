// src/relay/session.rs

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{LauncherError, Result};
use crate::launch::{ChildHandle, ChildSignal, Termination};
use crate::relay::stream::relay_stream;
use crate::types::StreamKind;

/// How long output is still relayed once the child has exited.
///
/// Descendants of the child may inherit its pipes and hold them open long
/// after it is gone.
pub const EXIT_DRAIN_GRACE: Duration = Duration::from_millis(500);

/// Result of supervising one child to completion.
#[derive(Debug)]
pub struct SessionOutcome {
    pub termination: Termination,
    /// Non-fatal relay failures; the child was left running when they
    /// happened.
    pub relay_errors: Vec<LauncherError>,
}

/// Drives a launched child on behalf of the CLI wrapper.
///
/// - Relays the child's stdout/stderr into the given writers.
/// - Forwards every `ChildSignal` received on the cancellation channel.
/// - Returns once the exit notification has fired and both relays have
///   drained. Relays still open [`EXIT_DRAIN_GRACE`] after the exit are
///   abandoned, and a signal arriving after the exit ends the session at
///   once.
#[derive(Debug)]
pub struct Session {
    handle: ChildHandle,
    drain_grace: Duration,
}

impl Session {
    pub fn new(handle: ChildHandle) -> Self {
        Self {
            handle,
            drain_grace: EXIT_DRAIN_GRACE,
        }
    }

    pub fn with_drain_grace(mut self, grace: Duration) -> Self {
        self.drain_grace = grace;
        self
    }

    pub async fn run<O, E>(
        mut self,
        stdout: O,
        stderr: E,
        mut signals: mpsc::Receiver<ChildSignal>,
    ) -> Result<SessionOutcome>
    where
        O: AsyncWrite + Unpin,
        E: AsyncWrite + Unpin,
    {
        let child_stdout = self.handle.take_stdout();
        let child_stderr = self.handle.take_stderr();

        let relays = async move {
            let (out, err) = tokio::join!(
                relay_optional(child_stdout, stdout, StreamKind::Stdout),
                relay_optional(child_stderr, stderr, StreamKind::Stderr),
            );
            [out, err]
                .into_iter()
                .filter_map(std::result::Result::err)
                .collect::<Vec<_>>()
        };
        tokio::pin!(relays);

        let handle = &self.handle;
        let exit = handle.wait();
        tokio::pin!(exit);

        // Armed when the child exits.
        let grace = self.drain_grace;
        let drain_deadline = tokio::time::sleep(grace);
        tokio::pin!(drain_deadline);

        let mut relay_errors: Option<Vec<LauncherError>> = None;
        let mut termination: Option<Termination> = None;
        let mut signals_open = true;

        while relay_errors.is_none() || termination.is_none() {
            tokio::select! {
                errors = &mut relays, if relay_errors.is_none() => {
                    for e in &errors {
                        warn!(error = %e, "output relay failed; child left running");
                    }
                    relay_errors = Some(errors);
                }
                result = &mut exit, if termination.is_none() => {
                    let t = result?;
                    info!(?t, "child exited");
                    termination = Some(t);
                    drain_deadline.as_mut().reset(Instant::now() + grace);
                }
                () = &mut drain_deadline, if termination.is_some() && relay_errors.is_none() => {
                    debug!("child pipes still open after exit; abandoning relays");
                    break;
                }
                received = signals.recv(), if signals_open => match received {
                    Some(signal) if termination.is_some() => {
                        debug!(%signal, "signal received after child exit; ending session");
                        break;
                    }
                    Some(signal) => forward(handle, signal).await,
                    None => {
                        debug!("signal channel closed");
                        signals_open = false;
                    }
                },
            }
        }

        Ok(SessionOutcome {
            termination: termination.unwrap_or(Termination::Exited(-1)),
            relay_errors: relay_errors.unwrap_or_default(),
        })
    }
}

async fn relay_optional<R, W>(reader: Option<R>, writer: W, stream: StreamKind) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    match reader {
        Some(reader) => relay_stream(reader, writer, stream).await,
        None => Ok(0),
    }
}

async fn forward(handle: &ChildHandle, signal: ChildSignal) {
    info!(%signal, pid = ?handle.id(), "relaying signal to child");
    if let Err(e) = handle.kill(signal).await {
        warn!(%signal, error = %e, "failed to relay signal to child");
    }
}
