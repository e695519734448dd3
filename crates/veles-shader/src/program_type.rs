//! GPU program type resolution.
//!
//! The raw program type byte in a sub-program record is version-scoped:
//! two disjoint enum domains exist historically, split at 5.5. The byte is
//! interpreted under exactly one domain, selected once per decode; an
//! out-of-range byte is a decode failure, never a default, because a
//! defaulted value would attribute the blob to the wrong platform at
//! export time.

use std::fmt;

use veles_common::UnityVersion;

use crate::{gates, Error, Result};

/// Canonical GPU program type, independent of the on-disk enum revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShaderGpuProgramType {
    Unknown,
    GLLegacy,
    GLES31AEP,
    GLES31,
    GLES3,
    GLES,
    GLCore32,
    GLCore41,
    GLCore43,
    DX9VertexSM20,
    DX9VertexSM30,
    DX9PixelSM20,
    DX9PixelSM30,
    DX10Level9Vertex,
    DX10Level9Pixel,
    DX11VertexSM40,
    DX11VertexSM50,
    DX11PixelSM40,
    DX11PixelSM50,
    DX11GeometrySM40,
    DX11GeometrySM50,
    DX11HullSM50,
    DX11DomainSM50,
    MetalVS,
    MetalFS,
    Spirv,
    ConsoleVS,
    ConsoleFS,
    ConsoleHS,
    ConsoleDS,
    ConsoleGS,
    RayTracing,
    Ps5NGGC,
}

impl ShaderGpuProgramType {
    /// Resolve a raw program type byte under the domain the version uses.
    ///
    /// Pure and total over its inputs: the same `(raw, version)` pair
    /// always yields the same result or the same failure.
    pub fn from_raw(raw: u8, version: UnityVersion) -> Result<Self> {
        let resolved = if gates::is_revised_program_type(version) {
            Self::from_raw_revised(raw)
        } else {
            Self::from_raw_legacy(raw)
        };
        resolved.ok_or(Error::UnknownProgramType { raw, version })
    }

    /// The 5.5+ enum domain.
    fn from_raw_revised(raw: u8) -> Option<Self> {
        use ShaderGpuProgramType::*;
        Some(match raw {
            0 => Unknown,
            1 => GLLegacy,
            2 => GLES31AEP,
            3 => GLES31,
            4 => GLES3,
            5 => GLES,
            6 => GLCore32,
            7 => GLCore41,
            8 => GLCore43,
            9 => DX9VertexSM20,
            10 => DX9VertexSM30,
            11 => DX9PixelSM20,
            12 => DX9PixelSM30,
            13 => DX10Level9Vertex,
            14 => DX10Level9Pixel,
            15 => DX11VertexSM40,
            16 => DX11VertexSM50,
            17 => DX11PixelSM40,
            18 => DX11PixelSM50,
            19 => DX11GeometrySM40,
            20 => DX11GeometrySM50,
            21 => DX11HullSM50,
            22 => DX11DomainSM50,
            23 => MetalVS,
            24 => MetalFS,
            25 => Spirv,
            26 => ConsoleVS,
            27 => ConsoleFS,
            28 => ConsoleHS,
            29 => ConsoleDS,
            30 => ConsoleGS,
            31 => RayTracing,
            32 => Ps5NGGC,
            _ => return None,
        })
    }

    /// The pre-5.5 enum domain. No Unknown slot, no console or SPIR-V
    /// entries; the numbering is shifted by one relative to the revised
    /// domain.
    fn from_raw_legacy(raw: u8) -> Option<Self> {
        use ShaderGpuProgramType::*;
        Some(match raw {
            0 => GLLegacy,
            1 => GLES31AEP,
            2 => GLES31,
            3 => GLES3,
            4 => GLES,
            5 => GLCore32,
            6 => GLCore41,
            7 => GLCore43,
            8 => DX9VertexSM20,
            9 => DX9VertexSM30,
            10 => DX9PixelSM20,
            11 => DX9PixelSM30,
            12 => DX10Level9Vertex,
            13 => DX10Level9Pixel,
            14 => DX11VertexSM40,
            15 => DX11VertexSM50,
            16 => DX11PixelSM40,
            17 => DX11PixelSM50,
            18 => DX11GeometrySM40,
            19 => DX11GeometrySM50,
            20 => DX11HullSM50,
            21 => DX11DomainSM50,
            22 => MetalVS,
            23 => MetalFS,
            _ => return None,
        })
    }

    /// Map this program type (plus the build target, for console entries)
    /// to the platform identifier used for blob table lookup and export
    /// headers. An unmapped combination is an error, surfaced before any
    /// lookup happens.
    pub fn to_gpu_platform(self, target: BuildTarget) -> Result<GpuPlatform> {
        use ShaderGpuProgramType::*;
        let platform = match self {
            GLLegacy => GpuPlatform::OpenGL,
            GLES => GpuPlatform::Gles,
            GLES3 | GLES31 | GLES31AEP => GpuPlatform::Gles3,
            GLCore32 | GLCore41 | GLCore43 => GpuPlatform::GlCore,
            DX9VertexSM20 | DX9VertexSM30 | DX9PixelSM20 | DX9PixelSM30 => GpuPlatform::D3d9,
            DX10Level9Vertex | DX10Level9Pixel => GpuPlatform::D3d11_9x,
            DX11VertexSM40 | DX11VertexSM50 | DX11PixelSM40 | DX11PixelSM50
            | DX11GeometrySM40 | DX11GeometrySM50 | DX11HullSM50 | DX11DomainSM50 => {
                GpuPlatform::D3d11
            }
            MetalVS | MetalFS => GpuPlatform::Metal,
            Spirv => GpuPlatform::Vulkan,
            RayTracing => GpuPlatform::D3d11,
            Ps5NGGC => GpuPlatform::Ps5,
            ConsoleVS | ConsoleFS | ConsoleHS | ConsoleDS | ConsoleGS => match target {
                BuildTarget::Ps4 => GpuPlatform::Ps4,
                BuildTarget::Ps5 => GpuPlatform::Ps5,
                BuildTarget::XboxOne => GpuPlatform::XboxOne,
                BuildTarget::Switch => GpuPlatform::Switch,
                _ => {
                    return Err(Error::UnmappedPlatform {
                        program_type: self,
                        target,
                    })
                }
            },
            Unknown => {
                return Err(Error::UnmappedPlatform {
                    program_type: self,
                    target,
                })
            }
        };
        Ok(platform)
    }
}

/// Target graphics backend identifier.
///
/// Used both as the blob table key and, via `Display`, as the platform
/// name in exported `SubProgram` headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GpuPlatform {
    OpenGL,
    Gles,
    Gles3,
    GlCore,
    D3d9,
    D3d11_9x,
    D3d11,
    Metal,
    Vulkan,
    Ps4,
    Ps5,
    XboxOne,
    Switch,
}

impl GpuPlatform {
    /// The display form used in export headers.
    pub const fn name(self) -> &'static str {
        match self {
            GpuPlatform::OpenGL => "openGL",
            GpuPlatform::Gles => "gles",
            GpuPlatform::Gles3 => "gles3",
            GpuPlatform::GlCore => "glcore",
            GpuPlatform::D3d9 => "d3d9",
            GpuPlatform::D3d11_9x => "d3d11_9x",
            GpuPlatform::D3d11 => "d3d11",
            GpuPlatform::Metal => "metal",
            GpuPlatform::Vulkan => "vulkan",
            GpuPlatform::Ps4 => "ps4",
            GpuPlatform::Ps5 => "ps5",
            GpuPlatform::XboxOne => "xboxone",
            GpuPlatform::Switch => "switch",
        }
    }
}

impl fmt::Display for GpuPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The build target an export is produced for.
///
/// Only consulted for the console program types, whose platform depends on
/// where the container was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BuildTarget {
    Standalone,
    Android,
    Ios,
    WebGL,
    Ps4,
    Ps5,
    XboxOne,
    Switch,
}

#[cfg(test)]
mod tests {
    use super::*;
    use veles_common::UnityVersionType::Final;

    fn v(major: u16, minor: u16, build: u16) -> UnityVersion {
        UnityVersion::new(major, minor, build, Final, 1)
    }

    #[test]
    fn test_revised_domain_resolution() {
        let version = v(2018, 4, 0);
        assert_eq!(
            ShaderGpuProgramType::from_raw(15, version).unwrap(),
            ShaderGpuProgramType::DX11VertexSM40
        );
        assert_eq!(
            ShaderGpuProgramType::from_raw(25, version).unwrap(),
            ShaderGpuProgramType::Spirv
        );
    }

    #[test]
    fn test_legacy_domain_resolution() {
        // The same byte means a different program type before 5.5.
        let legacy = v(5, 4, 2);
        let revised = v(5, 5, 0);
        assert_eq!(
            ShaderGpuProgramType::from_raw(14, legacy).unwrap(),
            ShaderGpuProgramType::DX11VertexSM40
        );
        assert_eq!(
            ShaderGpuProgramType::from_raw(14, revised).unwrap(),
            ShaderGpuProgramType::DX10Level9Pixel
        );
    }

    #[test]
    fn test_out_of_range_byte_fails() {
        // 24 (MetalFS in the revised domain) is out of range before 5.5.
        match ShaderGpuProgramType::from_raw(24, v(5, 4, 2)) {
            Err(Error::UnknownProgramType { raw: 24, .. }) => {}
            other => panic!("expected UnknownProgramType, got {:?}", other),
        }
        match ShaderGpuProgramType::from_raw(33, v(2021, 2, 0)) {
            Err(Error::UnknownProgramType { raw: 33, .. }) => {}
            other => panic!("expected UnknownProgramType, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let version = v(2019, 4, 13);
        let first = ShaderGpuProgramType::from_raw(18, version).unwrap();
        let second = ShaderGpuProgramType::from_raw(18, version).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_platform_mapping() {
        use ShaderGpuProgramType::*;
        let t = BuildTarget::Standalone;
        assert_eq!(DX11PixelSM50.to_gpu_platform(t).unwrap(), GpuPlatform::D3d11);
        assert_eq!(MetalFS.to_gpu_platform(t).unwrap(), GpuPlatform::Metal);
        assert_eq!(Spirv.to_gpu_platform(t).unwrap(), GpuPlatform::Vulkan);
        assert_eq!(GLES3.to_gpu_platform(t).unwrap(), GpuPlatform::Gles3);
        assert_eq!(
            DX10Level9Vertex.to_gpu_platform(t).unwrap(),
            GpuPlatform::D3d11_9x
        );
    }

    #[test]
    fn test_console_mapping_depends_on_target() {
        use ShaderGpuProgramType::ConsoleVS;
        assert_eq!(
            ConsoleVS.to_gpu_platform(BuildTarget::Ps4).unwrap(),
            GpuPlatform::Ps4
        );
        assert_eq!(
            ConsoleVS.to_gpu_platform(BuildTarget::Switch).unwrap(),
            GpuPlatform::Switch
        );
        assert!(matches!(
            ConsoleVS.to_gpu_platform(BuildTarget::Standalone),
            Err(Error::UnmappedPlatform { .. })
        ));
    }

    #[test]
    fn test_unknown_never_maps() {
        assert!(matches!(
            ShaderGpuProgramType::Unknown.to_gpu_platform(BuildTarget::Standalone),
            Err(Error::UnmappedPlatform { .. })
        ));
    }

    #[test]
    fn test_platform_display_names() {
        assert_eq!(GpuPlatform::D3d11.to_string(), "d3d11");
        assert_eq!(GpuPlatform::OpenGL.to_string(), "openGL");
        assert_eq!(GpuPlatform::D3d11_9x.to_string(), "d3d11_9x");
    }
}
