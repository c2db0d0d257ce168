//! Concurrent stdin/stdout/stderr pumping.
//!
//! The input write and both output drains run concurrently and are joined
//! before the child is waited on. Pipe buffers are bounded, so doing them in
//! sequence would deadlock once the tool's output fills its pipe while we are
//! still blocked writing its input.

use std::io;
use std::process::Output;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin};
use xmlsec_core::{XmlSecError, XmlSecResult};

async fn feed(stdin: Option<ChildStdin>, input: &[u8]) -> io::Result<()> {
    if let Some(mut stdin) = stdin {
        stdin.write_all(input).await?;
        stdin.flush().await?;
        // Dropping closes the pipe and signals end of input
    }
    Ok(())
}

async fn drain<R: AsyncRead + Unpin>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}

/// Feed `input` to the child, capture both output streams and reap it.
///
/// The child is always waited on, even when a stream fails. A broken stdin
/// pipe is tolerated only when the child exits unsuccessfully and left
/// diagnostics, since the tool commonly bails out before reading all input
/// and its own message explains why. Otherwise the EPIPE is the error.
pub async fn pump(mut child: Child, input: &[u8]) -> XmlSecResult<Output> {
    let stdin = child.stdin.take();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (written, out, err) = tokio::join!(feed(stdin, input), drain(stdout), drain(stderr));

    let status = child.wait().await.map_err(|source| XmlSecError::StreamIo {
        stream: "wait",
        source,
    })?;

    let stdout = out.map_err(|source| XmlSecError::StreamIo {
        stream: "stdout",
        source,
    })?;
    let stderr = err.map_err(|source| XmlSecError::StreamIo {
        stream: "stderr",
        source,
    })?;

    if let Err(source) = written {
        let explained = !status.success() && !stderr.is_empty();
        if source.kind() == io::ErrorKind::BrokenPipe && explained {
            tracing::debug!(%status, "tool closed stdin early");
        } else {
            tracing::warn!(%status, error = %source, "failed writing document to tool");
            return Err(XmlSecError::StreamIo {
                stream: "stdin",
                source,
            });
        }
    }

    tracing::debug!(
        %status,
        input_bytes = input.len(),
        stdout_bytes = stdout.len(),
        stderr_bytes = stderr.len(),
        "streams pumped"
    );

    Ok(Output {
        status,
        stdout,
        stderr,
    })
}
