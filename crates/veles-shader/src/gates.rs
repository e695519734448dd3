//! Layout gates for the shader sub-program wire format.
//!
//! Every place the on-disk layout changed across engine releases is a pure
//! predicate over [`UnityVersion`] collected here, so the decode path reads
//! as an ordered list of gated steps and each threshold is testable on its
//! own. These thresholds are format facts and the only source of layout
//! truth.

use veles_common::UnityVersion;

/// Lowest version with the sub-program layout handled here. The earlier
/// layout was never observed finished in the wild; decoding below this
/// floor fails explicitly instead of guessing.
pub fn has_sub_programs(v: UnityVersion) -> bool {
    v.is_at_least(5, 4, 0)
}

/// 5.5 and greater: the raw GPU program type byte uses the revised enum
/// domain. Below, the legacy domain. Exclusive boundary; exactly one
/// domain applies to any version.
pub fn is_revised_program_type(v: UnityVersion) -> bool {
    v.is_at_least(5, 5, 0)
}

/// 2017.1 and greater: the stream is aligned after the global keyword
/// index array.
pub fn is_align_keyword_indices(v: UnityVersion) -> bool {
    v.is_at_least(2017, 1, 0)
}

/// 2019.1 and greater: local keyword indices are present (keyword indices
/// were split into global and local).
pub fn has_local_keyword_indices(v: UnityVersion) -> bool {
    v.is_at_least(2019, 1, 0)
}

/// 2020.3.0f2 through 2020.3.x, or 2021.1.4 and greater: the seven
/// parameter sequences are serialized as one nested structure.
pub fn has_unified_parameters(v: UnityVersion) -> bool {
    use veles_common::UnityVersionType::Final;
    if v.major == 2020 {
        v >= UnityVersion::new(2020, 3, 0, Final, 2)
    } else {
        v.is_at_least(2021, 1, 4)
    }
}

/// 2017.1 and greater: sampler parameters are present.
pub fn has_samplers(v: UnityVersion) -> bool {
    v.is_at_least(2017, 1, 0)
}

/// 2017.2 and greater: the shader requirements field is present.
pub fn has_shader_requirements(v: UnityVersion) -> bool {
    v.is_at_least(2017, 2, 0)
}

/// 2021 and greater: shader requirements widen from 32 to 64 bits.
pub fn is_shader_requirements_i64(v: UnityVersion) -> bool {
    v.is_at_least(2021, 1, 0)
}

/// 2017.3 and greater: texture parameters carry a multi-sampled flag.
pub fn has_multi_sampled(v: UnityVersion) -> bool {
    v.is_at_least(2017, 3, 0)
}

/// 2017.3 and greater: constant buffers carry struct parameters.
pub fn has_struct_params(v: UnityVersion) -> bool {
    v.is_at_least(2017, 3, 0)
}

/// 2020.1 and greater: buffer bindings carry an array size.
pub fn has_buffer_array_size(v: UnityVersion) -> bool {
    v.is_at_least(2020, 1, 0)
}

/// Same range as [`has_unified_parameters`]: constant buffers carry the
/// partial-CB flag.
pub fn has_partial_cb(v: UnityVersion) -> bool {
    has_unified_parameters(v)
}
