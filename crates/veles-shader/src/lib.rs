//! Version-aware shader sub-program decoding for Unity asset files.
//!
//! The on-disk layout of a compiled shader variant record changed
//! field-by-field across dozens of engine releases. This crate decodes
//! those records into one normalized shape and exports them back to the
//! textual `SubProgram` block form.
//!
//! # Quick Start
//!
//! ```no_run
//! use veles_common::{AssetReader, UnityVersion};
//! use veles_shader::ShaderSubProgram;
//!
//! let data: Vec<u8> = std::fs::read("subprogram.bin")?;
//! let version: UnityVersion = "2019.4.13f1".parse()?;
//!
//! let mut reader = AssetReader::new(&data, version);
//! let sub = ShaderSubProgram::read(&mut reader)?;
//! println!("blob {} on tier {}", sub.blob_index, sub.hardware_tier);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Architecture
//!
//! - [`gates`] - one pure predicate per layout decision, keyed on version
//! - [`params`] - the resource binding parameter set, in both its legacy
//!   and unified wire schemas
//! - [`program_type`] - the two version-scoped raw enum domains and the
//!   platform identifier mapping
//! - [`sub_program`] - the record decode state machine
//! - [`export`] - the textual `SubProgram "..." { ... }` projection

mod error;

pub mod export;
pub mod gates;
pub mod params;
pub mod program_type;
pub mod sub_program;

pub use error::{Error, Result};
pub use export::{BlobCatalog, BlobTable, Disassembler, ShaderExportWriter};
pub use params::{ProgramParameters, ShaderParameters};
pub use program_type::{BuildTarget, GpuPlatform, ShaderGpuProgramType};
pub use sub_program::{BindChannels, ShaderBindChannel, ShaderSubProgram};
