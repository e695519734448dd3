//! Shader resource binding parameters.
//!
//! A sub-program carries the set of resources it binds: vectors, matrices,
//! textures, buffers, constant buffers, constant buffer bindings,
//! unordered-access views, and (from 2017.1) samplers. Two wire shapes
//! exist historically: a legacy one where the seven sequences are written
//! back-to-back, and a unified one where they are wrapped in a single
//! nested structure. [`ShaderParameters::read`] picks exactly one of the
//! two based on the version, never both.

use veles_common::{AssetReader, FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::gates;
use crate::Result;

/// A vector (float1..float4) shader parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VectorParameter {
    pub name_index: i32,
    pub index: i32,
    pub array_size: i32,
    pub ty: i8,
    pub dim: i8,
}

impl VectorParameter {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let index = reader.read_i32()?;
        let array_size = reader.read_i32()?;
        let ty = reader.read_i8()?;
        let dim = reader.read_i8()?;
        reader.align4();
        Ok(Self {
            name_index,
            index,
            array_size,
            ty,
            dim,
        })
    }
}

/// A matrix shader parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatrixParameter {
    pub name_index: i32,
    pub index: i32,
    pub array_size: i32,
    pub ty: i8,
    pub row_count: i8,
}

impl MatrixParameter {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let index = reader.read_i32()?;
        let array_size = reader.read_i32()?;
        let ty = reader.read_i8()?;
        let row_count = reader.read_i8()?;
        reader.align4();
        Ok(Self {
            name_index,
            index,
            array_size,
            ty,
            row_count,
        })
    }
}

/// A texture binding.
///
/// The multi-sampled flag joined the layout in 2017.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureParameter {
    pub name_index: i32,
    pub index: i32,
    pub sampler_index: i32,
    pub multi_sampled: bool,
    pub dim: i8,
}

impl TextureParameter {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let index = reader.read_i32()?;
        let sampler_index = reader.read_i32()?;
        let multi_sampled = if gates::has_multi_sampled(reader.version()) {
            reader.read_bool()?
        } else {
            false
        };
        let dim = reader.read_i8()?;
        reader.align4();
        Ok(Self {
            name_index,
            index,
            sampler_index,
            multi_sampled,
            dim,
        })
    }
}

/// A buffer (or constant buffer) binding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BufferBinding {
    pub name_index: i32,
    pub index: i32,
    pub array_size: i32,
}

impl BufferBinding {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let index = reader.read_i32()?;
        let array_size = if gates::has_buffer_array_size(reader.version()) {
            reader.read_i32()?
        } else {
            0
        };
        Ok(Self {
            name_index,
            index,
            array_size,
        })
    }
}

/// A struct-typed parameter inside a constant buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StructParameter {
    pub name_index: i32,
    pub index: i32,
    pub array_size: i32,
    pub struct_size: i32,
    pub vector_members: Vec<VectorParameter>,
    pub matrix_members: Vec<MatrixParameter>,
}

impl StructParameter {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let index = reader.read_i32()?;
        let array_size = reader.read_i32()?;
        let struct_size = reader.read_i32()?;
        let vector_members = reader.read_array(VectorParameter::read)?;
        let matrix_members = reader.read_array(MatrixParameter::read)?;
        Ok(Self {
            name_index,
            index,
            array_size,
            struct_size,
            vector_members,
            matrix_members,
        })
    }
}

/// A constant buffer declaration with its member parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantBuffer {
    pub name_index: i32,
    pub matrix_params: Vec<MatrixParameter>,
    pub vector_params: Vec<VectorParameter>,
    pub struct_params: Vec<StructParameter>,
    pub size: i32,
    pub is_partial_cb: bool,
}

impl ConstantBuffer {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let matrix_params = reader.read_array(MatrixParameter::read)?;
        let vector_params = reader.read_array(VectorParameter::read)?;
        let struct_params = if gates::has_struct_params(reader.version()) {
            reader.read_array(StructParameter::read)?
        } else {
            Vec::new()
        };
        let size = reader.read_i32()?;
        let is_partial_cb = if gates::has_partial_cb(reader.version()) {
            let b = reader.read_bool()?;
            reader.align4();
            b
        } else {
            false
        };
        Ok(Self {
            name_index,
            matrix_params,
            vector_params,
            struct_params,
            size,
            is_partial_cb,
        })
    }
}

/// A sampler state binding. Fixed 8-byte wire shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct SamplerParameter {
    pub sampler: u32,
    pub bind_point: i32,
}

impl SamplerParameter {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        Ok(reader.read_struct::<Self>()?)
    }
}

/// An unordered-access-view binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UavParameter {
    pub name_index: i32,
    pub index: i32,
    pub original_index: i32,
}

impl UavParameter {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let name_index = reader.read_i32()?;
        let index = reader.read_i32()?;
        let original_index = reader.read_i32()?;
        Ok(Self {
            name_index,
            index,
            original_index,
        })
    }
}

/// The unified nested parameter structure (2020.3.0f2+ / 2021.1.4+).
///
/// The seven sequences serialized back-to-back inside one record. Its
/// element layouts use the same version gates as the legacy path.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgramParameters {
    pub vector_params: Vec<VectorParameter>,
    pub matrix_params: Vec<MatrixParameter>,
    pub texture_params: Vec<TextureParameter>,
    pub buffer_params: Vec<BufferBinding>,
    pub constant_buffers: Vec<ConstantBuffer>,
    pub constant_buffer_bindings: Vec<BufferBinding>,
    pub uav_params: Vec<UavParameter>,
}

impl ProgramParameters {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        Ok(Self {
            vector_params: reader.read_array(VectorParameter::read)?,
            matrix_params: reader.read_array(MatrixParameter::read)?,
            texture_params: reader.read_array(TextureParameter::read)?,
            buffer_params: reader.read_array(BufferBinding::read)?,
            constant_buffers: reader.read_array(ConstantBuffer::read)?,
            constant_buffer_bindings: reader.read_array(BufferBinding::read)?,
            uav_params: reader.read_array(UavParameter::read)?,
        })
    }
}

/// The normalized parameter set of one sub-program.
///
/// Sequences that a version does not serialize are empty, never absent;
/// callers see one shape for every supported version.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShaderParameters {
    pub vector_params: Vec<VectorParameter>,
    pub matrix_params: Vec<MatrixParameter>,
    pub texture_params: Vec<TextureParameter>,
    pub buffer_params: Vec<BufferBinding>,
    pub constant_buffers: Vec<ConstantBuffer>,
    pub constant_buffer_bindings: Vec<BufferBinding>,
    pub uav_params: Vec<UavParameter>,
    pub samplers: Vec<SamplerParameter>,
}

impl ShaderParameters {
    /// Decode the parameter set in whichever schema the version uses.
    ///
    /// Unified versions read one nested [`ProgramParameters`] and flatten
    /// it; legacy versions read the seven sequences independently, in the
    /// fixed wire order. Samplers are an eighth, always-independent
    /// sequence from 2017.1 on.
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let version = reader.version();

        let mut params = if gates::has_unified_parameters(version) {
            let unified = ProgramParameters::read(reader)?;
            Self {
                vector_params: unified.vector_params,
                matrix_params: unified.matrix_params,
                texture_params: unified.texture_params,
                buffer_params: unified.buffer_params,
                constant_buffers: unified.constant_buffers,
                constant_buffer_bindings: unified.constant_buffer_bindings,
                uav_params: unified.uav_params,
                samplers: Vec::new(),
            }
        } else {
            Self {
                vector_params: reader.read_array(VectorParameter::read)?,
                matrix_params: reader.read_array(MatrixParameter::read)?,
                texture_params: reader.read_array(TextureParameter::read)?,
                buffer_params: reader.read_array(BufferBinding::read)?,
                constant_buffers: reader.read_array(ConstantBuffer::read)?,
                constant_buffer_bindings: reader.read_array(BufferBinding::read)?,
                uav_params: reader.read_array(UavParameter::read)?,
                samplers: Vec::new(),
            }
        };

        if gates::has_samplers(version) {
            params.samplers = reader.read_array(SamplerParameter::read)?;
        }

        Ok(params)
    }

    /// True when every sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.vector_params.is_empty()
            && self.matrix_params.is_empty()
            && self.texture_params.is_empty()
            && self.buffer_params.is_empty()
            && self.constant_buffers.is_empty()
            && self.constant_buffer_bindings.is_empty()
            && self.uav_params.is_empty()
            && self.samplers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veles_common::{UnityVersion, UnityVersionType};

    fn reader(data: &[u8], version: UnityVersion) -> AssetReader<'_> {
        AssetReader::new(data, version)
    }

    fn v2018_4() -> UnityVersion {
        UnityVersion::new(2018, 4, 0, UnityVersionType::Final, 1)
    }

    fn v2021_2() -> UnityVersion {
        UnityVersion::new(2021, 2, 0, UnityVersionType::Final, 1)
    }

    #[test]
    fn test_vector_parameter_alignment() {
        let data = [
            0x07, 0x00, 0x00, 0x00, // name_index = 7
            0x01, 0x00, 0x00, 0x00, // index = 1
            0x00, 0x00, 0x00, 0x00, // array_size = 0
            0x00, // ty = 0 (float)
            0x04, // dim = 4
            0x00, 0x00, // padding
            0xAA, 0xBB, 0xCC, 0xDD, // next field
        ];
        let mut r = reader(&data, v2018_4());
        let p = VectorParameter::read(&mut r).unwrap();
        assert_eq!(p.name_index, 7);
        assert_eq!(p.dim, 4);
        assert_eq!(r.position(), 16);
    }

    #[test]
    fn test_texture_parameter_multi_sampled_gate() {
        // 2017.2: no multi-sampled flag, 13 bytes before padding.
        let data = [
            0x01, 0x00, 0x00, 0x00, // name_index
            0x00, 0x00, 0x00, 0x00, // index
            0xFF, 0xFF, 0xFF, 0xFF, // sampler_index = -1
            0x02, // dim = 2
            0x00, 0x00, 0x00, // padding
        ];
        let old = UnityVersion::new(2017, 2, 0, UnityVersionType::Final, 1);
        let mut r = reader(&data, old);
        let p = TextureParameter::read(&mut r).unwrap();
        assert!(!p.multi_sampled);
        assert_eq!(p.dim, 2);
        assert_eq!(r.position(), 16);

        // 2017.3: flag present before dim.
        let data = [
            0x01, 0x00, 0x00, 0x00, // name_index
            0x00, 0x00, 0x00, 0x00, // index
            0xFF, 0xFF, 0xFF, 0xFF, // sampler_index
            0x01, // multi_sampled = true
            0x02, // dim = 2
            0x00, 0x00, // padding
        ];
        let new = UnityVersion::new(2017, 3, 0, UnityVersionType::Final, 1);
        let mut r = reader(&data, new);
        let p = TextureParameter::read(&mut r).unwrap();
        assert!(p.multi_sampled);
        assert_eq!(p.dim, 2);
        assert_eq!(r.position(), 16);
    }

    #[test]
    fn test_buffer_binding_array_size_gate() {
        let data = [
            0x03, 0x00, 0x00, 0x00, // name_index = 3
            0x02, 0x00, 0x00, 0x00, // index = 2
            0x05, 0x00, 0x00, 0x00, // array_size = 5 (2020+ only)
        ];

        let mut r = reader(&data, v2018_4());
        let b = BufferBinding::read(&mut r).unwrap();
        assert_eq!(b.array_size, 0);
        assert_eq!(r.position(), 8);

        let v2020 = UnityVersion::new(2020, 1, 0, UnityVersionType::Final, 1);
        let mut r = reader(&data, v2020);
        let b = BufferBinding::read(&mut r).unwrap();
        assert_eq!(b.array_size, 5);
        assert_eq!(r.position(), 12);
    }

    /// Seven empty legacy sequences plus an empty sampler array.
    fn empty_legacy_set() -> Vec<u8> {
        vec![0u8; 8 * 4]
    }

    #[test]
    fn test_legacy_schema_empty_set() {
        let data = empty_legacy_set();
        let mut r = reader(&data, v2018_4());
        let params = ShaderParameters::read(&mut r).unwrap();
        assert!(params.is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_unified_schema_empty_set() {
        // Unified versions consume the same bytes for an empty set: the
        // nested structure's seven counts, then the sampler count.
        let data = empty_legacy_set();
        let mut r = reader(&data, v2021_2());
        let params = ShaderParameters::read(&mut r).unwrap();
        assert!(params.is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_legacy_schema_with_samplers() {
        let mut data = vec![0u8; 7 * 4]; // seven empty sequences
        data.extend_from_slice(&[
            0x01, 0x00, 0x00, 0x00, // sampler count = 1
            0x2A, 0x00, 0x00, 0x00, // sampler = 42
            0x03, 0x00, 0x00, 0x00, // bind_point = 3
        ]);
        let mut r = reader(&data, v2018_4());
        let params = ShaderParameters::read(&mut r).unwrap();
        assert_eq!(
            params.samplers,
            vec![SamplerParameter {
                sampler: 42,
                bind_point: 3
            }]
        );
    }

    #[test]
    fn test_pre_2017_has_no_samplers() {
        // 5.6: seven sequences only, no sampler array follows.
        let data = vec![0u8; 7 * 4];
        let v = UnityVersion::new(5, 6, 0, UnityVersionType::Final, 1);
        let mut r = reader(&data, v);
        let params = ShaderParameters::read(&mut r).unwrap();
        assert!(params.samplers.is_empty());
        assert!(r.is_empty());
    }

    #[test]
    fn test_constant_buffer_legacy_layout() {
        let data = [
            0x09, 0x00, 0x00, 0x00, // name_index = 9
            0x00, 0x00, 0x00, 0x00, // matrix count = 0
            0x00, 0x00, 0x00, 0x00, // vector count = 0
            0x00, 0x00, 0x00, 0x00, // struct count = 0 (2017.3+)
            0x80, 0x00, 0x00, 0x00, // size = 128
        ];
        let mut r = reader(&data, v2018_4());
        let cb = ConstantBuffer::read(&mut r).unwrap();
        assert_eq!(cb.name_index, 9);
        assert_eq!(cb.size, 128);
        assert!(!cb.is_partial_cb);
        assert!(r.is_empty());
    }

    #[test]
    fn test_constant_buffer_partial_flag() {
        let data = [
            0x09, 0x00, 0x00, 0x00, // name_index
            0x00, 0x00, 0x00, 0x00, // matrix count
            0x00, 0x00, 0x00, 0x00, // vector count
            0x00, 0x00, 0x00, 0x00, // struct count
            0x80, 0x00, 0x00, 0x00, // size
            0x01, 0x00, 0x00, 0x00, // is_partial_cb = true + padding
        ];
        let mut r = reader(&data, v2021_2());
        let cb = ConstantBuffer::read(&mut r).unwrap();
        assert!(cb.is_partial_cb);
        assert!(r.is_empty());
    }

    #[test]
    fn test_malformed_count_propagates() {
        // Vector parameter count far beyond the remaining bytes.
        let data = [0xFF, 0xFF, 0xFF, 0x7F];
        let mut r = reader(&data, v2018_4());
        match ShaderParameters::read(&mut r) {
            Err(crate::Error::Common(veles_common::Error::MalformedArrayLength { .. })) => {}
            other => panic!("expected MalformedArrayLength, got {:?}", other),
        }
    }
}
