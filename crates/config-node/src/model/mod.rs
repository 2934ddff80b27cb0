//! Data model types for configuration trees.
//!
//! This module contains every node variant and the containers built on them:
//! - Scalars, enum and object holders, primitive arrays ([`Node`])
//! - Map keys ([`Key`])
//! - Ordered lists and maps with read-only views ([`ListNode`], [`MapNode`])
//! - Comments attached natively or through a wrapper ([`Comment`])
//! - Tree traversal ([`NodeVisitor`])

pub mod array;
pub mod comment;
pub mod enum_value;
pub mod key;
pub mod list;
pub mod map;
pub mod node;
pub mod number;
pub mod object;
pub mod printer;
pub mod visitor;

pub use array::ArrayNode;
pub use comment::{with_comment, Comment, CommentedNode};
pub use enum_value::{ConfigEnum, EnumValue};
pub use key::Key;
pub use list::{ListNode, ListView};
pub use map::{MapNode, MapView};
pub use node::{FromNode, IntoNode, Node};
pub use object::ObjectNode;
pub use printer::{quote_and_escape, StringVisitor};
pub use visitor::{NodeVisitor, VisitResult};
