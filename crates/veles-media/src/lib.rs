//! Streamed media resource handling for Unity asset files.
//!
//! Media records keep their bulk payloads out of line: either in a named
//! external side-file or inline right after the record's fixed fields.
//! This crate decodes the pointer form ([`StreamedResource`]), classifies
//! it into a deferred [`ResourceHandle`], and decodes the [`VideoClip`]
//! record that owns one.
//!
//! # Example
//!
//! ```no_run
//! use veles_common::{AssetReader, UnityVersion};
//! use veles_media::VideoClip;
//!
//! let data: Vec<u8> = std::fs::read("videoclip.bin")?;
//! let version: UnityVersion = "2019.4.13f1".parse()?;
//!
//! let mut reader = AssetReader::new(&data, version);
//! let clip = VideoClip::read(&mut reader)?;
//!
//! // Payload bytes are only read here, on demand.
//! let payload = clip.video_data.read(std::path::Path::new("extracted"))?;
//! println!("{}: {} bytes", clip.name, payload.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod resource;
mod video_clip;

pub use error::{Error, Result};
pub use resource::{locate, ResourceHandle, StreamedResource};
pub use video_clip::{PPtr, VideoClip};
