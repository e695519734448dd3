//! VideoClip record decoding.
//!
//! The video payload itself is never read eagerly: decoding ends by
//! classifying the clip's streamed resource pointer into a deferred
//! [`ResourceHandle`], inline or external.

use veles_common::{AssetReader, UnityVersion};

use crate::resource::{locate, ResourceHandle, StreamedResource};
use crate::Result;

/// A reference to another object in the asset graph.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PPtr {
    pub file_id: i32,
    pub path_id: i64,
}

impl PPtr {
    /// 5.0 and greater: path IDs widened from 32 to 64 bits.
    fn is_path_id_i64(v: UnityVersion) -> bool {
        v.is_at_least(5, 0, 0)
    }

    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let file_id = reader.read_i32()?;
        let path_id = if Self::is_path_id_i64(reader.version()) {
            reader.read_i64()?
        } else {
            i64::from(reader.read_i32()?)
        };
        Ok(Self { file_id, path_id })
    }
}

/// 2017.2 and greater: pixel aspect ratio fields are present.
fn has_pixel_aspect_ratio(v: UnityVersion) -> bool {
    v.is_at_least(2017, 2, 0)
}

/// 2020.1 and greater: per-clip shader references and the sRGB flag.
fn has_video_shaders(v: UnityVersion) -> bool {
    v.is_at_least(2020, 1, 0)
}

/// A decoded video clip record.
///
/// `video_data` borrows the source stream for inline payloads, so the
/// record is tied to the buffer it was decoded from until resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoClip<'a> {
    pub name: String,
    pub original_path: String,
    pub proxy_width: u32,
    pub proxy_height: u32,
    pub width: u32,
    pub height: u32,
    pub pixel_aspect_ratio_num: u32,
    pub pixel_aspect_ratio_den: u32,
    pub frame_rate: f64,
    pub frame_count: u64,
    pub format: i32,
    pub audio_channel_count: Vec<u16>,
    pub audio_sample_rate: Vec<u32>,
    pub audio_language: Vec<String>,
    pub video_shaders: Vec<PPtr>,
    pub external_resources: StreamedResource,
    pub has_split_alpha: bool,
    pub srgb: bool,
    /// Deferred payload handle; no video bytes are read at decode time.
    pub video_data: ResourceHandle<'a>,
}

impl<'a> VideoClip<'a> {
    /// Decode one video clip record at the reader's current position.
    pub fn read(reader: &mut AssetReader<'a>) -> Result<Self> {
        let version = reader.version();

        let name = reader.read_aligned_string()?;
        let original_path = reader.read_aligned_string()?;
        let proxy_width = reader.read_u32()?;
        let proxy_height = reader.read_u32()?;
        let width = reader.read_u32()?;
        let height = reader.read_u32()?;

        let (pixel_aspect_ratio_num, pixel_aspect_ratio_den) = if has_pixel_aspect_ratio(version) {
            (reader.read_u32()?, reader.read_u32()?)
        } else {
            (1, 1)
        };

        let frame_rate = reader.read_f64()?;
        let frame_count = reader.read_u64()?;
        let format = reader.read_i32()?;

        let audio_channel_count = reader.read_u16_array()?;
        reader.align4();
        let audio_sample_rate = reader.read_u32_array()?;
        let audio_language = reader.read_string_array()?;

        let video_shaders = if has_video_shaders(version) {
            reader.read_array(PPtr::read)?
        } else {
            Vec::new()
        };

        let external_resources = StreamedResource::read(reader)?;
        let has_split_alpha = reader.read_bool()?;
        let srgb = if has_video_shaders(version) {
            reader.read_bool()?
        } else {
            false
        };

        // The fixed fields end here; an inline payload starts at exactly
        // this cursor position.
        let video_data = locate(&external_resources, reader)?;

        Ok(Self {
            name,
            original_path,
            proxy_width,
            proxy_height,
            width,
            height,
            pixel_aspect_ratio_num,
            pixel_aspect_ratio_den,
            frame_rate,
            frame_count,
            format,
            audio_channel_count,
            audio_sample_rate,
            audio_language,
            video_shaders,
            external_resources,
            has_split_alpha,
            srgb,
            video_data,
        })
    }
}
