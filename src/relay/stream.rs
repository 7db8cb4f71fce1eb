// src/relay/stream.rs

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::trace;

use crate::errors::{LauncherError, Result};
use crate::types::StreamKind;

const RELAY_CHUNK: usize = 8 * 1024;

/// Copy `reader` into `writer` until EOF, flushing after every chunk.
///
/// Returns the number of bytes written. If the writer fails, the reader is
/// still drained to EOF (so the child never blocks on a full pipe) and the
/// first write error is returned.
pub async fn relay_stream<R, W>(mut reader: R, mut writer: W, stream: StreamKind) -> Result<u64>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; RELAY_CHUNK];
    let mut copied: u64 = 0;
    let mut write_error: Option<io::Error> = None;

    loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(source) => return Err(LauncherError::Relay { stream, source }),
        };

        if write_error.is_some() {
            continue;
        }

        match write_chunk(&mut writer, &buf[..n]).await {
            Ok(()) => {
                copied += n as u64;
                trace!(%stream, bytes = n, "relayed chunk");
            }
            Err(e) => write_error = Some(e),
        }
    }

    match write_error {
        Some(source) => Err(LauncherError::Relay { stream, source }),
        None => Ok(copied),
    }
}

async fn write_chunk<W: AsyncWrite + Unpin>(writer: &mut W, chunk: &[u8]) -> io::Result<()> {
    writer.write_all(chunk).await?;
    writer.flush().await
}
