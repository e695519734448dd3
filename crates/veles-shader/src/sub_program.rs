//! Shader sub-program record decoding.
//!
//! One sub-program is one compiled shader variant: a blob index into the
//! per-platform blob tables, the keyword indices selecting the variant,
//! the hardware tier, the version-scoped program type byte, and the
//! resource binding parameters. The decode is a single forward pass whose
//! conditional steps each consult one layout gate.

use veles_common::{AssetReader, FromBytes, Immutable, IntoBytes, KnownLayout, UnityVersion};

use crate::params::ShaderParameters;
use crate::program_type::ShaderGpuProgramType;
use crate::{gates, Error, Result};

/// A vertex input binding channel. Fixed 2-byte wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct ShaderBindChannel {
    pub source: i8,
    pub target: i8,
}

/// The channel binding sub-record.
///
/// Consumed from the stream so the cursor stays in sync, but not
/// interpreted further here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindChannels {
    pub channels: Vec<ShaderBindChannel>,
    pub source_map: u32,
}

impl BindChannels {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let channels =
            reader.read_array(|r| r.read_struct::<ShaderBindChannel>().map_err(Error::from))?;
        reader.align4();
        let source_map = reader.read_u32()?;
        Ok(Self {
            channels,
            source_map,
        })
    }
}

/// One decoded shader sub-program record.
///
/// Fully constructed by [`ShaderSubProgram::read`] in a single pass and
/// immutable afterwards; sequences a version does not serialize are empty.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShaderSubProgram {
    /// Index into the per-platform table of compiled shader blobs.
    pub blob_index: u32,
    pub channels: BindChannels,
    pub global_keyword_indices: Vec<u16>,
    /// Present from 2019.1; empty before.
    pub local_keyword_indices: Vec<u16>,
    pub hardware_tier: u8,
    /// The raw, version-scoped program type byte as stored on disk.
    pub raw_program_type: u8,
    pub parameters: ShaderParameters,
    /// Present from 2017.2. 32-bit on disk before 2021, sign-extended.
    pub shader_requirements: i64,
}

impl ShaderSubProgram {
    /// Decode one sub-program record at the reader's current position.
    ///
    /// The version is a property of the enclosing container and is fixed
    /// for the whole decode; each gated step consults it exactly once.
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let version = reader.version();
        if !gates::has_sub_programs(version) {
            return Err(Error::UnsupportedVersion(version));
        }

        let blob_index = reader.read_u32()?;
        let channels = BindChannels::read(reader)?;

        let global_keyword_indices = reader.read_u16_array()?;
        if gates::is_align_keyword_indices(version) {
            reader.align4();
        }

        let local_keyword_indices = if gates::has_local_keyword_indices(version) {
            let indices = reader.read_u16_array()?;
            reader.align4();
            indices
        } else {
            Vec::new()
        };

        let hardware_tier = reader.read_u8()?;
        let raw_program_type = reader.read_u8()?;
        reader.align4();

        let parameters = ShaderParameters::read(reader)?;

        let shader_requirements = if gates::has_shader_requirements(version) {
            if gates::is_shader_requirements_i64(version) {
                reader.read_i64()?
            } else {
                i64::from(reader.read_i32()?)
            }
        } else {
            0
        };

        Ok(Self {
            blob_index,
            channels,
            global_keyword_indices,
            local_keyword_indices,
            hardware_tier,
            raw_program_type,
            parameters,
            shader_requirements,
        })
    }

    /// Resolve the raw program type byte under this version's enum domain.
    pub fn program_type(&self, version: UnityVersion) -> Result<ShaderGpuProgramType> {
        ShaderGpuProgramType::from_raw(self.raw_program_type, version)
    }
}
