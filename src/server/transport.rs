//! Line-delimited JSON transport.
//!
//! One JSON-RPC message per line, each terminated by `\n`.

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::trace;

/// Errors from the stdio transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Reading from the input stream failed
    #[error("read error: {0}")]
    Read(String),
    /// Writing or flushing the output stream failed
    #[error("write error: {0}")]
    Write(String),
}

/// Reads messages from one stream and writes responses to another.
///
/// Generic over reader/writer so tests can drive it from memory.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl StdioTransport<tokio::io::Stdin, tokio::io::Stdout> {
    /// Transport bound to the process stdin/stdout
    pub fn stdio() -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
    }
}

impl<R, W> StdioTransport<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Wrap a reader and writer
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Next line as raw bytes with surrounding whitespace trimmed, `None` on EOF.
    ///
    /// Bytes are not required to be UTF-8; decoding is left to the caller so
    /// a malformed line can be answered instead of ending the stream.
    pub async fn read_line(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut line = Vec::new();
        let bytes_read = self
            .reader
            .read_until(b'\n', &mut line)
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let trimmed = trim_ascii_whitespace(&line).to_vec();
        trace!(len = trimmed.len(), "read message");
        Ok(Some(trimmed))
    }

    /// Write one message followed by `\n`, then flush
    pub async fn write_line(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");

        self.writer
            .write_all(message.as_bytes())
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;

        Ok(())
    }

    /// Flush and shut down the write side
    pub async fn close(&mut self) -> Result<(), TransportError> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }

    /// Give back the writer
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn trim_ascii_whitespace(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let end = bytes
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &bytes[start..end]
}
