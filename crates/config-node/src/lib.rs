//! Configuration value trees with a compact binary format.
//!
//! This crate provides an in-memory tree for structured configuration data
//! and a binary codec that persists and restores it.
//!
//! # Overview
//!
//! A tree is built from [`Node`] values:
//! - **Scalars**: booleans, integers of four widths, floats, chars, strings,
//!   and enum constants, all compared by value
//! - **Arrays**: fixed-length buffers of one primitive type
//! - **Containers**: insertion-ordered [`ListNode`] and [`MapNode`], shared
//!   handles compared by identity
//! - **Comments**: attached natively to containers, or through a wrapper
//!
//! Containers hand out read-only views ([`ListView`], [`MapView`]) that see
//! every later mutation of their owner. Values stored into a container are
//! converted with [`IntoNode`], which deep-copies any container passed in.
//!
//! # Quick Start
//!
//! ```rust
//! use config_node::{BinaryFormat, MapNode, Node};
//!
//! let config = MapNode::new();
//! config.set("name", "example");
//! config.set("port", 8080);
//! config.create_list("tags").add_all(["a", "b"]);
//!
//! let view = config.as_view();
//! config.set("debug", true);
//! assert!(view.get_bool("debug", false));
//!
//! // Encode to binary
//! let bytes = BinaryFormat::DEFAULT.map_to_bytes(&config).unwrap();
//!
//! // Decode back
//! let decoded = BinaryFormat::DEFAULT.from_bytes(&bytes).unwrap();
//! assert!(decoded.deep_eq(&Node::Map(config)));
//! assert_eq!(decoded.to_string(), "{name=example,port=8080,tags=[a,b],debug=true}");
//! ```
//!
//! # Modules
//!
//! - [`model`]: Node variants, containers, comments and visitors
//! - [`codec`]: Binary encoding/decoding with optional zstd compression
//! - [`error`]: Error types
//! - [`limits`]: Limits applied while encoding and decoding
//!
//! # Threading
//!
//! Containers use `Rc` and `RefCell`, so trees are neither `Send` nor `Sync`.
//! Move data between threads by encoding it.
//!
//! # Wire Format
//!
//! Every node is a header byte (3-bit size class, 5-bit data type) followed
//! by its payload. Sizes 0 to 4 fit in the header; larger sizes take one,
//! two or four extra big-endian bytes. See [`codec::node`] for the data
//! type table.

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;

// Re-export commonly used types at crate root
pub use codec::{decode_node, encode_node, BinaryFormat};
pub use error::{DecodeError, EncodeError, FormatError, NodeError};
pub use model::{
    ArrayNode, Comment, ConfigEnum, EnumValue, FromNode, IntoNode, Key, ListNode, ListView,
    MapNode, MapView, Node, NodeVisitor, VisitResult,
};
