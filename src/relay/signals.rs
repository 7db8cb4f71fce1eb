// src/relay/signals.rs

use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;
use crate::launch::ChildSignal;

/// Listen for the wrapper's own termination signals and report them as
/// `ChildSignal`s.
///
/// Installing the listeners replaces the default "terminate the wrapper"
/// action, so the wrapper stays alive until the child exits.
///
/// - Ctrl-C / SIGINT -> `Interrupt`
/// - SIGTERM -> `Terminate` (unix)
/// - SIGHUP -> `Hangup` (unix)
pub fn os_signal_channel() -> Result<mpsc::Receiver<ChildSignal>> {
    let (tx, rx) = mpsc::channel(8);

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let kinds = [
            (SignalKind::interrupt(), ChildSignal::Interrupt),
            (SignalKind::terminate(), ChildSignal::Terminate),
            (SignalKind::hangup(), ChildSignal::Hangup),
        ];

        for (kind, child_signal) in kinds {
            let mut stream = signal(kind)?;
            let tx = tx.clone();
            tokio::spawn(async move {
                while stream.recv().await.is_some() {
                    debug!(signal = %child_signal, "wrapper received signal");
                    if tx.send(child_signal).await.is_err() {
                        break;
                    }
                }
            });
        }
    }

    #[cfg(not(unix))]
    {
        let tx = tx.clone();
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                debug!("wrapper received Ctrl+C");
                if tx.send(ChildSignal::Interrupt).await.is_err() {
                    break;
                }
            }
        });
    }

    Ok(rx)
}
