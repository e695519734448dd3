//! Error types for media resource handling.

use thiserror::Error;

/// Errors that can occur while decoding media records or resolving their
/// payloads.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (EOF, malformed array length, ...).
    #[error("{0}")]
    Common(#[from] veles_common::Error),

    /// A payload range that does not fit its source bounds.
    #[error("resource payload [{offset}, {offset}+{size}) exceeds source length {source_len}")]
    PayloadOutOfBounds {
        offset: u64,
        size: u64,
        source_len: u64,
    },

    /// External resource file missing at resolution time.
    #[error("resource file not found: {0}")]
    ResourceNotFound(String),

    /// I/O error while resolving a payload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for media operations.
pub type Result<T> = std::result::Result<T, Error>;
