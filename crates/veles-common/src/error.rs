//! Error types for veles-common.

use thiserror::Error;

/// Common error type for Veles operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer at offset {offset}: needed {needed} bytes but only {available} available")]
    UnexpectedEof {
        needed: usize,
        available: usize,
        offset: usize,
    },

    /// An array count that cannot fit in the remaining bytes.
    #[error("malformed array length at offset {offset}: count {count} exceeds {remaining} remaining bytes")]
    MalformedArrayLength {
        count: u32,
        remaining: usize,
        offset: usize,
    },

    /// Could not parse a Unity version string.
    #[error("invalid Unity version: {0}")]
    InvalidVersion(String),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
