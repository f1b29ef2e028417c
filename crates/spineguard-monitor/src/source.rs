//! Sample-source adapters.
//!
//! Monitoring consumes a line-oriented byte stream; the physical sensor
//! driver is out of scope. Adapters here expose capture files (replay),
//! stdin (pipe from a driver process), and arbitrary async readers
//! behind one buffered line-reading surface.

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader, Lines};

use spineguard_core::SourceError;

/// A line-oriented stream of raw sensor readings.
pub struct SampleSource {
    lines: Lines<BufReader<Box<dyn AsyncRead + Send + Unpin>>>,
}

impl std::fmt::Debug for SampleSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SampleSource").finish_non_exhaustive()
    }
}

impl SampleSource {
    /// Replay a capture file.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Open`] if the file cannot be opened; the
    /// session refuses to start.
    pub async fn open_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let file = File::open(path).await.map_err(|e| SourceError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self::from_reader(file))
    }

    /// Read samples piped to stdin.
    #[must_use]
    pub fn stdin() -> Self {
        Self::from_reader(tokio::io::stdin())
    }

    /// Wrap any async byte stream that yields sample lines.
    #[must_use]
    pub fn from_reader(reader: impl AsyncRead + Send + Unpin + 'static) -> Self {
        let boxed: Box<dyn AsyncRead + Send + Unpin> = Box::new(reader);
        Self {
            lines: BufReader::new(boxed).lines(),
        }
    }

    /// Read the next line, or `None` once the stream ends.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the underlying read fails; the
    /// session treats this as fatal.
    pub async fn next_line(&mut self) -> Result<Option<String>, SourceError> {
        Ok(self.lines.next_line().await?)
    }
}
