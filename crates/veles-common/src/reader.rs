//! Binary reader for Unity serialized object data.
//!
//! This module provides [`AssetReader`], a cursor-like type that reads
//! little-endian binary data from a byte slice without copying, carries the
//! container's declared [`UnityVersion`], and implements the format's
//! alignment and length-prefixed array conventions.

use zerocopy::FromBytes;

use crate::{Error, Result, UnityVersion};

/// A binary reader over one serialized object's bytes.
///
/// The reader owns the cursor for exactly one decode: every field's offset
/// depends on the bytes consumed by every preceding field and alignment
/// step, so a record is decoded in a single forward pass.
///
/// # Example
///
/// ```
/// use veles_common::{AssetReader, UnityVersion};
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = AssetReader::new(&data, UnityVersion::from_parts(2019, 4, 13));
///
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
/// assert_eq!(reader.read_u32().unwrap(), 0x08070605);
/// assert!(reader.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct AssetReader<'a> {
    data: &'a [u8],
    position: usize,
    version: UnityVersion,
}

impl<'a> AssetReader<'a> {
    /// Create a new reader from a byte slice and the container's version.
    #[inline]
    pub const fn new(data: &'a [u8], version: UnityVersion) -> Self {
        Self {
            data,
            position: 0,
            version,
        }
    }

    /// The container version this stream was serialized with.
    ///
    /// Fixed for the reader's lifetime; all layout gates consult it.
    #[inline]
    pub const fn version(&self) -> UnityVersion {
        self.version
    }

    /// Get the current position in the buffer.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Get the total length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Get the number of bytes remaining to read.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Check if there are no more bytes to read.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Seek to an absolute position.
    #[inline]
    pub fn seek(&mut self, position: usize) {
        self.position = position;
    }

    /// Advance the position by a number of bytes.
    #[inline]
    pub fn advance(&mut self, count: usize) {
        self.position = self.position.saturating_add(count);
    }

    /// The full underlying slice, independent of the cursor.
    #[inline]
    pub const fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Round the cursor forward to the next 4-byte boundary.
    ///
    /// Alignment is relative to the start of the slice. Moving past the end
    /// is not an error here; the next read reports the EOF.
    #[inline]
    pub fn align4(&mut self) {
        self.position = (self.position + 3) & !3;
    }

    /// Read bytes and advance the position.
    #[inline]
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        if self.remaining() < count {
            return Err(Error::UnexpectedEof {
                needed: count,
                available: self.remaining(),
                offset: self.position,
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|b| b[0])
    }

    /// Read a signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8> {
        self.read_u8().map(|b| b as i8)
    }

    /// Read a boolean (non-zero = true).
    #[inline]
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_u8().map(|b| b != 0)
    }

    /// Read a little-endian u16.
    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian i16.
    #[inline]
    pub fn read_i16(&mut self) -> Result<i16> {
        let bytes = self.read_bytes(2)?;
        Ok(i16::from_le_bytes([bytes[0], bytes[1]]))
    }

    /// Read a little-endian u32.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian i32.
    #[inline]
    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.read_bytes(4)?;
        Ok(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian u64.
    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.read_bytes(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a little-endian i64.
    #[inline]
    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.read_bytes(8)?;
        Ok(i64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a little-endian f32.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        let bytes = self.read_bytes(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian f64.
    #[inline]
    pub fn read_f64(&mut self) -> Result<f64> {
        let bytes = self.read_bytes(8)?;
        Ok(f64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Read a packed wire struct using zerocopy.
    #[inline]
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            needed: size,
            available: bytes.len(),
            offset: self.position,
        })
    }

    /// Read the count prefix of a length-prefixed array.
    ///
    /// The format carries no authoritative maximum, so the sanity ceiling
    /// lives here: a count that cannot fit in the remaining bytes even at
    /// one byte per element is a malformed stream, reported before any
    /// allocation happens.
    fn read_array_count(&mut self) -> Result<usize> {
        let offset = self.position;
        let count = self.read_u32()?;
        if count as usize > self.remaining() {
            return Err(Error::MalformedArrayLength {
                count,
                remaining: self.remaining(),
                offset,
            });
        }
        Ok(count as usize)
    }

    /// Read a length-prefixed array: a `u32` count, then `count` elements
    /// decoded by `read_elem`.
    ///
    /// Generic over the element reader's error type so decoders in
    /// downstream crates can pass their own `read` functions directly.
    pub fn read_array<T, E>(
        &mut self,
        mut read_elem: impl FnMut(&mut Self) -> std::result::Result<T, E>,
    ) -> std::result::Result<Vec<T>, E>
    where
        E: From<Error>,
    {
        let count = self.read_array_count().map_err(E::from)?;
        let mut result = Vec::with_capacity(count);
        for _ in 0..count {
            result.push(read_elem(self)?);
        }
        Ok(result)
    }

    /// Read a length-prefixed array of u16 values.
    pub fn read_u16_array(&mut self) -> Result<Vec<u16>> {
        self.read_array(Self::read_u16)
    }

    /// Read a length-prefixed array of u32 values.
    pub fn read_u32_array(&mut self) -> Result<Vec<u32>> {
        self.read_array(Self::read_u32)
    }

    /// Read an aligned string: `u32` byte length, UTF-8 bytes, then
    /// alignment to the next 4-byte boundary.
    pub fn read_aligned_string(&mut self) -> Result<String> {
        let length = self.read_array_count()?;
        let bytes = self.read_bytes(length)?;
        let s = std::str::from_utf8(bytes)?.to_string();
        self.align4();
        Ok(s)
    }

    /// Read a length-prefixed array of aligned strings.
    pub fn read_string_array(&mut self) -> Result<Vec<String>> {
        self.read_array(Self::read_aligned_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(data: &[u8]) -> AssetReader<'_> {
        AssetReader::new(data, UnityVersion::from_parts(2019, 4, 13))
    }

    #[test]
    fn test_read_primitives() {
        let data = [
            0x01u8, 0x02, 0x03, 0x04, // u32: 0x04030201
            0xFF, 0xFF, 0xFF, 0xFF, // u32: 0xFFFFFFFF
        ];
        let mut r = reader(&data);

        assert_eq!(r.read_u32().unwrap(), 0x04030201);
        assert_eq!(r.read_u32().unwrap(), 0xFFFFFFFF);
        assert!(r.is_empty());
    }

    #[test]
    fn test_align4() {
        let data = [0u8; 16];
        let mut r = reader(&data);

        r.align4();
        assert_eq!(r.position(), 0);

        r.read_u8().unwrap();
        r.align4();
        assert_eq!(r.position(), 4);

        r.read_u16().unwrap();
        r.read_u8().unwrap();
        r.align4();
        assert_eq!(r.position(), 8);
    }

    #[test]
    fn test_read_u16_array() {
        let data = [
            0x02, 0x00, 0x00, 0x00, // count = 2
            0x05, 0x00, // 5
            0x07, 0x00, // 7
        ];
        let mut r = reader(&data);
        assert_eq!(r.read_u16_array().unwrap(), vec![5, 7]);
    }

    #[test]
    fn test_read_empty_array() {
        let data = [0x00, 0x00, 0x00, 0x00];
        let mut r = reader(&data);
        assert_eq!(r.read_u16_array().unwrap(), Vec::<u16>::new());
        assert!(r.is_empty());
    }

    #[test]
    fn test_malformed_array_length() {
        // Count claims 4096 elements but only 2 bytes follow.
        let data = [0x00, 0x10, 0x00, 0x00, 0xAA, 0xBB];
        let mut r = reader(&data);

        match r.read_u16_array() {
            Err(Error::MalformedArrayLength {
                count,
                remaining,
                offset,
            }) => {
                assert_eq!(count, 0x1000);
                assert_eq!(remaining, 2);
                assert_eq!(offset, 0);
            }
            other => panic!("expected MalformedArrayLength, got {:?}", other),
        }
    }

    #[test]
    fn test_read_aligned_string() {
        let data = [
            0x05, 0x00, 0x00, 0x00, // length = 5
            b'h', b'e', b'l', b'l', b'o', // "hello"
            0x00, 0x00, 0x00, // padding to 12
            0x2A, 0x00, 0x00, 0x00, // u32: 42
        ];
        let mut r = reader(&data);

        assert_eq!(r.read_aligned_string().unwrap(), "hello");
        assert_eq!(r.position(), 12);
        assert_eq!(r.read_u32().unwrap(), 42);
    }

    #[test]
    fn test_read_aligned_string_exact_boundary() {
        let data = [
            0x04, 0x00, 0x00, 0x00, // length = 4
            b'a', b'b', b'c', b'd', // no padding needed
        ];
        let mut r = reader(&data);

        assert_eq!(r.read_aligned_string().unwrap(), "abcd");
        assert_eq!(r.position(), 8);
    }

    #[test]
    fn test_eof_reports_offset() {
        let data = [0x01, 0x02];
        let mut r = reader(&data);

        match r.read_u32() {
            Err(Error::UnexpectedEof {
                needed,
                available,
                offset,
            }) => {
                assert_eq!(needed, 4);
                assert_eq!(available, 2);
                assert_eq!(offset, 0);
            }
            other => panic!("expected UnexpectedEof, got {:?}", other),
        }
    }
}
