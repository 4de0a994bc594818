//! Domain-level errors (no external dependencies)

use std::io;
use thiserror::Error;

/// Errors surfaced by the writer tree.
///
/// Formatting and node creation are infallible; only moving bytes into a
/// buffer or out to a sink can fail.
#[derive(Error, Debug)]
pub enum NestError {
    /// The sink handed to `flush_to` rejected a write.
    /// `written` counts the bytes that did reach the sink before the failure.
    #[error("sink write failed after {written} bytes: {source}")]
    SinkWrite {
        written: u64,
        #[source]
        source: io::Error,
    },

    #[error("buffer append failed: {0}")]
    Buffer(#[source] io::Error),
}

impl NestError {
    /// Bytes that reached the sink before the error, zero for buffer failures.
    pub fn bytes_written(&self) -> u64 {
        match self {
            NestError::SinkWrite { written, .. } => *written,
            NestError::Buffer(_) => 0,
        }
    }
}

/// Result type for writer tree operations.
pub type NestResult<T> = Result<T, NestError>;
