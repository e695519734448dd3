//! Veles - version-aware Unity asset record decoding.
//!
//! This crate provides a unified interface to the Veles library ecosystem
//! for decoding version-dependent records out of Unity serialized asset
//! files.
//!
//! # Crates
//!
//! - [`veles_common`] - Binary reading and the structured engine version
//! - [`veles_shader`] - Shader sub-program decoding and textual export
//! - [`veles_media`] - Streamed resource pointers and media records
//!
//! # Example
//!
//! ```no_run
//! use veles::prelude::*;
//!
//! let data: Vec<u8> = std::fs::read("subprogram.bin")?;
//! let version: UnityVersion = "2019.4.13f1".parse()?;
//!
//! let mut reader = AssetReader::new(&data, version);
//! let sub = ShaderSubProgram::read(&mut reader)?;
//! println!("blob index: {}", sub.blob_index);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use veles_common as common;
pub use veles_media as media;
pub use veles_shader as shader;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use veles_common::{AssetReader, UnityVersion, UnityVersionType};
    pub use veles_media::{locate, ResourceHandle, StreamedResource, VideoClip};
    pub use veles_shader::{
        BlobCatalog, BlobTable, BuildTarget, Disassembler, GpuPlatform, ShaderExportWriter,
        ShaderGpuProgramType, ShaderParameters, ShaderSubProgram,
    };
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
