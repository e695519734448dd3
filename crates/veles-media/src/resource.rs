//! Streamed resource pointers and deferred payload handles.
//!
//! Large media payloads are not stored with the record that owns them.
//! The record carries a [`StreamedResource`] pointer instead: either a
//! named external side-file plus a byte range, or - when the name is
//! empty - the payload sits inline, immediately after the record's fixed
//! fields in the same stream. [`locate`] classifies the pointer into a
//! [`ResourceHandle`] at decode time; the bytes themselves are only read
//! when the handle is resolved.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use veles_common::AssetReader;

use crate::{Error, Result};

/// The on-disk pointer to a streamed payload.
///
/// An empty `source` means the payload is inline in the current stream;
/// a non-empty `source` names the external file holding it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StreamedResource {
    pub source: String,
    pub offset: u64,
    pub size: u64,
}

impl StreamedResource {
    pub fn read(reader: &mut AssetReader<'_>) -> Result<Self> {
        let source = reader.read_aligned_string()?;
        let offset = reader.read_u64()?;
        let size = reader.read_u64()?;
        Ok(Self {
            source,
            offset,
            size,
        })
    }

    /// True when the payload lives in a named external file.
    pub fn is_external(&self) -> bool {
        !self.source.is_empty()
    }
}

/// A deferred, lazily-readable payload handle.
///
/// Produced at decode time without reading any payload bytes. Inline
/// handles borrow the source stream's slice - the borrow is the stream
/// identity - so resolving one can never read from the wrong stream.
/// Resolution is idempotent and safe from any thread; every call performs
/// its own I/O, caching is a collaborator concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceHandle<'a> {
    /// Payload inside the owning record's stream.
    Inline {
        data: &'a [u8],
        offset: usize,
        size: u64,
    },
    /// Payload in a named external side-file.
    External {
        source: String,
        offset: u64,
        size: u64,
    },
}

/// Classify a streamed resource pointer into a payload handle.
///
/// For an inline pointer the payload starts exactly at the reader's
/// current position, so the caller must have consumed the record's fixed
/// fields - and nothing more - before calling this. The inline range is
/// checked against the stream bounds here; external ranges can only be
/// checked once the file is opened.
pub fn locate<'a>(
    resource: &StreamedResource,
    reader: &AssetReader<'a>,
) -> Result<ResourceHandle<'a>> {
    if resource.is_external() {
        return Ok(ResourceHandle::External {
            source: resource.source.clone(),
            offset: resource.offset,
            size: resource.size,
        });
    }

    let offset = reader.position();
    // Both operands come off the wire; compare against the remaining
    // bytes instead of summing, so an absurd size cannot overflow.
    if resource.size > reader.len().saturating_sub(offset) as u64 {
        return Err(Error::PayloadOutOfBounds {
            offset: offset as u64,
            size: resource.size,
            source_len: reader.len() as u64,
        });
    }
    Ok(ResourceHandle::Inline {
        data: reader.data(),
        offset,
        size: resource.size,
    })
}

impl ResourceHandle<'_> {
    /// The payload size in bytes.
    pub fn size(&self) -> u64 {
        match self {
            ResourceHandle::Inline { size, .. } => *size,
            ResourceHandle::External { size, .. } => *size,
        }
    }

    /// Resolve the handle, reading the payload bytes.
    ///
    /// `resource_dir` is where external side-files are looked up, by the
    /// file name component of the recorded source path (sources are
    /// written as archive-internal paths like
    /// `archive:/CAB-xxxx/CAB-xxxx.resource`).
    pub fn read(&self, resource_dir: &Path) -> Result<Vec<u8>> {
        match self {
            ResourceHandle::Inline { data, offset, size } => {
                let end = offset + *size as usize;
                Ok(data[*offset..end].to_vec())
            }
            ResourceHandle::External {
                source,
                offset,
                size,
            } => {
                let file_name = source.rsplit('/').next().unwrap_or(source);
                let path = resource_dir.join(file_name);

                let mut file = match File::open(&path) {
                    Ok(f) => f,
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        return Err(Error::ResourceNotFound(source.clone()));
                    }
                    Err(e) => return Err(e.into()),
                };

                let file_len = file.metadata()?.len();
                if *offset > file_len || *size > file_len - *offset {
                    return Err(Error::PayloadOutOfBounds {
                        offset: *offset,
                        size: *size,
                        source_len: file_len,
                    });
                }

                file.seek(SeekFrom::Start(*offset))?;
                let mut payload = vec![0u8; *size as usize];
                file.read_exact(&mut payload)?;
                Ok(payload)
            }
        }
    }
}
