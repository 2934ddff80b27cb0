//! Primitive encoding/decoding for the binary node format.
//!
//! Implements the header byte with its size classes, and big-endian
//! fixed-width numbers.

use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_SIZE;

/// Bits of the header byte holding the data type.
pub const DATA_TYPE_MASK: u8 = 0b0001_1111;

/// Shift of the 3-bit size class within the header byte.
pub const SIZE_CLASS_SHIFT: u8 = 5;

/// Sizes below this are stored in the size class itself.
pub const INLINE_SIZE_LIMIT: usize = 5;

/// Size class followed by a one-byte size.
pub const SIZE_CLASS_U8: u8 = 5;

/// Size class followed by a two-byte size.
pub const SIZE_CLASS_U16: u8 = 6;

/// Size class followed by a four-byte size.
pub const SIZE_CLASS_U32: u8 = 7;

/// Returns the size class used for `size`.
pub fn size_class(size: usize) -> u8 {
    match size {
        0..INLINE_SIZE_LIMIT => size as u8,
        INLINE_SIZE_LIMIT..=0xFF => SIZE_CLASS_U8,
        0x100..=0xFFFF => SIZE_CLASS_U16,
        _ => SIZE_CLASS_U32,
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Reader for decoding binary data.
///
/// Wraps a byte slice and provides methods for reading primitives
/// with bounds checking and error handling.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn remaining_len(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns true if all data has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.data.len()
    }

    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        if self.pos >= self.data.len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let byte = self.data[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    /// Reads exactly n bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        if n > self.remaining_len() {
            return Err(DecodeError::UnexpectedEof { context });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    #[inline]
    fn read_array<const N: usize>(&mut self, context: &'static str) -> Result<[u8; N], DecodeError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N, context)?);
        Ok(out)
    }

    pub fn read_i8(&mut self, context: &'static str) -> Result<i8, DecodeError> {
        Ok(self.read_byte(context)? as i8)
    }

    pub fn read_u16(&mut self, context: &'static str) -> Result<u16, DecodeError> {
        self.read_array(context).map(u16::from_be_bytes)
    }

    pub fn read_i16(&mut self, context: &'static str) -> Result<i16, DecodeError> {
        self.read_array(context).map(i16::from_be_bytes)
    }

    pub fn read_u32(&mut self, context: &'static str) -> Result<u32, DecodeError> {
        self.read_array(context).map(u32::from_be_bytes)
    }

    pub fn read_i32(&mut self, context: &'static str) -> Result<i32, DecodeError> {
        self.read_array(context).map(i32::from_be_bytes)
    }

    pub fn read_i64(&mut self, context: &'static str) -> Result<i64, DecodeError> {
        self.read_array(context).map(i64::from_be_bytes)
    }

    pub fn read_f32(&mut self, context: &'static str) -> Result<f32, DecodeError> {
        self.read_array(context).map(f32::from_be_bytes)
    }

    pub fn read_f64(&mut self, context: &'static str) -> Result<f64, DecodeError> {
        self.read_array(context).map(f64::from_be_bytes)
    }

    /// Reads a 0/1 byte as a bool; any other value is rejected.
    pub fn read_bool(&mut self, context: &'static str) -> Result<bool, DecodeError> {
        match self.read_byte(context)? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { value }),
        }
    }

    /// Reads a char as its 32-bit Unicode scalar value.
    pub fn read_char(&mut self, context: &'static str) -> Result<char, DecodeError> {
        let value = self.read_u32(context)?;
        char::from_u32(value).ok_or(DecodeError::InvalidChar { value })
    }

    /// Reads the size announced by `header`, following its size class.
    pub fn read_size(&mut self, header: u8, context: &'static str) -> Result<usize, DecodeError> {
        match header >> SIZE_CLASS_SHIFT {
            SIZE_CLASS_U8 => Ok(self.read_byte(context)? as usize),
            SIZE_CLASS_U16 => Ok(self.read_u16(context)? as usize),
            SIZE_CLASS_U32 => {
                let size = self.read_u32(context)? as usize;
                if size > MAX_SIZE {
                    return Err(DecodeError::SizeExceedsLimit {
                        context,
                        size: size as u64,
                        max: MAX_SIZE as u64,
                    });
                }
                Ok(size)
            }
            inline => Ok(inline as usize),
        }
    }

    /// Reads `len` bytes of UTF-8.
    pub fn read_str(&mut self, len: usize, field: &'static str) -> Result<&'a str, DecodeError> {
        let bytes = self.read_bytes(len, field)?;
        std::str::from_utf8(bytes).map_err(|_| DecodeError::InvalidUtf8 { field })
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_bool(&mut self, value: bool) {
        self.buf.push(value as u8);
    }

    pub fn write_char(&mut self, value: char) {
        self.write_u32(value as u32);
    }

    /// Writes a header byte for `data_type` carrying `size`, followed by the
    /// extra size bytes its size class needs.
    pub fn write_header(
        &mut self,
        data_type: u8,
        size: usize,
        context: &'static str,
    ) -> Result<(), EncodeError> {
        if size > MAX_SIZE {
            return Err(EncodeError::SizeExceedsLimit {
                context,
                size,
                max: MAX_SIZE,
            });
        }
        let class = size_class(size);
        self.write_byte((class << SIZE_CLASS_SHIFT) | (data_type & DATA_TYPE_MASK));
        match class {
            SIZE_CLASS_U8 => self.write_byte(size as u8),
            SIZE_CLASS_U16 => self.write_u16(size as u16),
            SIZE_CLASS_U32 => self.write_u32(size as u32),
            _ => {}
        }
        Ok(())
    }
}
