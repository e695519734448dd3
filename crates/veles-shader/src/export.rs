//! Textual export of decoded sub-programs.
//!
//! Export is a projection, not an inverse of decode: the record's program
//! type byte is resolved to a platform identifier, the platform's blob
//! table is consulted at the record's blob index, and the disassembled
//! text of that blob is wrapped in a `SubProgram "..." { ... }` block.
//! Disassembly itself is a collaborator concern behind [`Disassembler`].

use std::io::Write;

use veles_common::UnityVersion;

use crate::program_type::{BuildTarget, GpuPlatform, ShaderGpuProgramType};
use crate::sub_program::ShaderSubProgram;
use crate::{Error, Result};

/// The compiled blobs of one platform, indexed by `blob_index`.
#[derive(Debug, Clone, Default)]
pub struct BlobTable {
    pub sub_programs: Vec<Vec<u8>>,
}

/// The per-platform blob tables of one shader asset.
///
/// Platforms and tables are parallel sequences, mirroring the container's
/// own platform list / blob list pairing. Populate fully before export;
/// export only reads.
#[derive(Debug, Clone, Default)]
pub struct BlobCatalog {
    platforms: Vec<GpuPlatform>,
    tables: Vec<BlobTable>,
}

impl BlobCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a platform's blob table.
    pub fn insert(&mut self, platform: GpuPlatform, table: BlobTable) {
        self.platforms.push(platform);
        self.tables.push(table);
    }

    /// Look up the table for a platform, if the shader was compiled for it.
    pub fn table_for(&self, platform: GpuPlatform) -> Option<&BlobTable> {
        self.platforms
            .iter()
            .position(|p| *p == platform)
            .map(|i| &self.tables[i])
    }

    /// The platforms this catalog holds tables for.
    pub fn platforms(&self) -> &[GpuPlatform] {
        &self.platforms
    }
}

/// Disassembly collaborator: turns a raw compiled blob into its textual
/// rendering. Opaque to the export path.
pub trait Disassembler {
    fn disassemble(
        &self,
        blob: &[u8],
        program_type: ShaderGpuProgramType,
        blob_index: u32,
    ) -> String;
}

impl<F> Disassembler for F
where
    F: Fn(&[u8], ShaderGpuProgramType, u32) -> String,
{
    fn disassemble(
        &self,
        blob: &[u8],
        program_type: ShaderGpuProgramType,
        blob_index: u32,
    ) -> String {
        self(blob, program_type, blob_index)
    }
}

/// Writer for exported shader text.
///
/// Holds everything export needs besides the record itself: the sink, the
/// container version, the build target, the read-only blob catalog, the
/// disassembler, and the caller-defined indent unit.
pub struct ShaderExportWriter<'a, W: Write> {
    out: W,
    version: UnityVersion,
    target: BuildTarget,
    catalog: &'a BlobCatalog,
    disassembler: &'a dyn Disassembler,
    indent_unit: &'a str,
}

impl<'a, W: Write> ShaderExportWriter<'a, W> {
    pub fn new(
        out: W,
        version: UnityVersion,
        target: BuildTarget,
        catalog: &'a BlobCatalog,
        disassembler: &'a dyn Disassembler,
    ) -> Self {
        Self {
            out,
            version,
            target,
            catalog,
            disassembler,
            indent_unit: "\t",
        }
    }

    /// Replace the default tab indent unit.
    pub fn with_indent_unit(mut self, unit: &'a str) -> Self {
        self.indent_unit = unit;
        self
    }

    fn write_indent(&mut self, depth: usize) -> Result<()> {
        for _ in 0..depth {
            self.out.write_all(self.indent_unit.as_bytes())?;
        }
        Ok(())
    }

    /// Write one sub-program block at the given nesting depth.
    ///
    /// The opening and closing lines sit at `depth` indents, the
    /// disassembled body at `depth + 1`. The hardware tier suffix is
    /// rendered zero-padded to two digits only when `include_tier_suffix`
    /// is set. Any failure leaves this export unfinished without touching
    /// other records.
    pub fn write_sub_program(
        &mut self,
        sub: &ShaderSubProgram,
        include_tier_suffix: bool,
        depth: usize,
    ) -> Result<()> {
        let program_type = sub.program_type(self.version)?;
        let platform = program_type.to_gpu_platform(self.target)?;

        let table = self
            .catalog
            .table_for(platform)
            .ok_or(Error::MissingPlatformBlobTable(platform))?;
        let blob = table
            .sub_programs
            .get(sub.blob_index as usize)
            .ok_or(Error::BlobIndexOutOfRange {
                index: sub.blob_index,
                len: table.sub_programs.len(),
                platform,
            })?;

        let body = self
            .disassembler
            .disassemble(blob, program_type, sub.blob_index);

        self.write_indent(depth)?;
        write!(self.out, "SubProgram \"{} ", platform)?;
        if include_tier_suffix {
            write!(self.out, "hw_tier{:02} ", sub.hardware_tier)?;
        }
        self.out.write_all(b"\" {\n")?;

        self.write_indent(depth + 1)?;
        self.out.write_all(body.as_bytes())?;

        self.out.write_all(b"\n")?;
        self.write_indent(depth)?;
        self.out.write_all(b"}\n")?;
        Ok(())
    }

    /// Consume the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
