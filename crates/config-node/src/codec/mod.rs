//! Binary encoding/decoding for node trees.
//!
//! [`BinaryFormat`] is the entry point for files and streams; the functions
//! re-exported from [`node`] work on byte buffers directly.

pub mod format;
pub mod node;
pub mod primitives;

pub use format::BinaryFormat;
pub use node::{decode_node, encode_map, encode_node, read_node, write_node};
pub use primitives::{Reader, Writer};
