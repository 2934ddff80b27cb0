//! Limits applied by the binary encoder and decoder.
//!
//! Decoding is recursive, so nesting is bounded to keep hostile or corrupted
//! input from exhausting the call stack. Sizes are bounded by the widest size
//! class of the wire format.

/// Maximum nesting depth of lists and maps (root is depth 0).
pub const MAX_DEPTH: usize = 512;

/// Largest size the widest size class can carry (a 32-bit signed length).
pub const MAX_SIZE: usize = i32::MAX as usize;

/// Upper bound on elements preallocated before the payload has been read.
///
/// Sizes come from untrusted headers, so buffers grow on demand past this.
pub const MAX_PREALLOC: usize = 4096;

/// Largest payload accepted after zstd decompression (256 MiB).
pub const MAX_DECOMPRESSED_SIZE: usize = 256 * 1024 * 1024;
