//! Error types for shader sub-program decoding and export.

use thiserror::Error;
use veles_common::UnityVersion;

use crate::program_type::{BuildTarget, GpuPlatform, ShaderGpuProgramType};

/// Errors that can occur while decoding or exporting shader sub-programs.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error (EOF, malformed array length, ...).
    #[error("{0}")]
    Common(#[from] veles_common::Error),

    /// Version outside the supported sub-program layout range.
    #[error("unsupported Unity version for shader sub-program: {0} (5.4 and greater required)")]
    UnsupportedVersion(UnityVersion),

    /// Raw program type byte outside the enum domain selected by version.
    #[error("unknown GPU program type {raw} for version {version}")]
    UnknownProgramType { raw: u8, version: UnityVersion },

    /// No platform identifier exists for this program type / build target pair.
    #[error("no GPU platform mapping for program type {program_type:?} on target {target:?}")]
    UnmappedPlatform {
        program_type: ShaderGpuProgramType,
        target: BuildTarget,
    },

    /// The blob catalog has no table for the resolved platform.
    #[error("no blob table for platform {0}")]
    MissingPlatformBlobTable(GpuPlatform),

    /// Blob index past the end of the platform's table.
    #[error("blob index {index} out of range for platform {platform} (table size: {len})")]
    BlobIndexOutOfRange {
        index: u32,
        len: usize,
        platform: GpuPlatform,
    },

    /// I/O error while writing the export text.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for shader operations.
pub type Result<T> = std::result::Result<T, Error>;
