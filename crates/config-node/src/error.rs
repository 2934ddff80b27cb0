//! Error types for the node tree and the binary format.

use std::io;

use thiserror::Error;

/// Error raised by tree operations whose misuse is reported as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("comment is not set")]
    CommentNotSet,
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("unsupported data type: {data_type:#04x}")]
    UnsupportedDataType { data_type: u8 },

    #[error("unsupported array type: {value_type:#04x}")]
    UnsupportedArrayType { value_type: u8 },

    #[error("value type {data_type:#04x} cannot carry size class {size_class}")]
    UnexpectedSizeClass { data_type: u8, size_class: u8 },

    #[error("size {size} in {context} exceeds maximum {max}")]
    SizeExceedsLimit {
        context: &'static str,
        size: u64,
        max: u64,
    },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("invalid char scalar value: {value:#x}")]
    InvalidChar { value: u32 },

    #[error("invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("{kind} node cannot be used as a map key")]
    InvalidKey { kind: &'static str },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceedsLimit { max: usize },

    #[error("{count} trailing bytes after root node")]
    TrailingBytes { count: usize },

    #[error("zstd decompression failed: {0}")]
    DecompressionFailed(String),
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{kind} nodes cannot be encoded")]
    Unsupported { kind: &'static str },

    #[error("{context} size {size} exceeds maximum {max}")]
    SizeExceedsLimit {
        context: &'static str,
        size: usize,
        max: usize,
    },

    #[error("nesting depth exceeds maximum {max}")]
    DepthExceedsLimit { max: usize },

    #[error("zstd compression failed: {0}")]
    CompressionFailed(String),
}

/// Error returned by the file and stream entry points of [`BinaryFormat`].
///
/// [`BinaryFormat`]: crate::codec::BinaryFormat
#[derive(Debug, Error)]
pub enum FormatError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("root node is {found}, expected a map")]
    NotAMap { found: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error_messages() {
        let err = DecodeError::UnsupportedDataType { data_type: 0x0e };
        assert_eq!(err.to_string(), "unsupported data type: 0x0e");

        let err = DecodeError::UnexpectedEof { context: "string" };
        assert_eq!(err.to_string(), "unexpected end of input while reading string");
    }

    #[test]
    fn test_format_error_from_decode() {
        let err: FormatError = DecodeError::TrailingBytes { count: 3 }.into();
        assert!(matches!(err, FormatError::Decode(DecodeError::TrailingBytes { count: 3 })));
        assert_eq!(err.to_string(), "3 trailing bytes after root node");
    }
}
