//! The node type and the conversions into and out of it.
//!
//! A [`Node`] is one value in a configuration tree. Scalars are immutable and
//! compared by value. Lists and maps are shared handles compared by identity,
//! see [`ListNode`] and [`MapNode`].

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::sync::Arc;

use lazy_static::lazy_static;

use super::{
    with_comment, ArrayNode, CommentedNode, EnumValue, Key, ListNode, ListView, MapNode, MapView,
    ObjectNode,
};
use super::number::{double_eq, float_eq};

lazy_static! {
    /// Shared instance for every empty string node.
    static ref EMPTY_STRING: Arc<str> = Arc::from("");
}

/// A value in a configuration tree.
///
/// `Null` stands for "absent": lookups that find nothing return it, and
/// storing it into a map removes the key.
///
/// Containers use single-threaded shared ownership, so a tree is neither
/// `Send` nor `Sync`. Hand a tree to another thread by encoding it.
#[derive(Debug, Clone, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    String(Arc<str>),
    Enum(EnumValue),
    Array(ArrayNode),
    List(ListNode),
    Map(MapNode),
    Object(ObjectNode),
    Commented(CommentedNode),
}

impl Node {
    /// Creates a string node. Every empty string shares one allocation.
    pub fn string(value: &str) -> Node {
        if value.is_empty() {
            Node::String(EMPTY_STRING.clone())
        } else {
            Node::String(Arc::from(value))
        }
    }

    /// Converts any supported value into a node.
    ///
    /// Containers passed in (owned or viewed) are deep-copied so the new node
    /// never aliases them. Absent values become [`Node::Null`].
    pub fn from_object(value: impl IntoNode) -> Node {
        value.into_node()
    }

    /// Creates an enum node from a constant of a [`ConfigEnum`] type.
    ///
    /// [`ConfigEnum`]: super::ConfigEnum
    pub fn from_enum<E: super::ConfigEnum>(value: &E) -> Node {
        Node::Enum(EnumValue::new(value))
    }

    /// Short lowercase name of the variant, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Byte(_) => "byte",
            Node::Short(_) => "short",
            Node::Int(_) => "int",
            Node::Long(_) => "long",
            Node::Float(_) => "float",
            Node::Double(_) => "double",
            Node::Char(_) => "char",
            Node::String(_) => "string",
            Node::Enum(_) => "enum",
            Node::Array(array) => array.kind(),
            Node::List(_) => "list",
            Node::Map(_) => "map",
            Node::Object(_) => "object",
            Node::Commented(_) => "commented",
        }
    }

    /// Returns false only for [`Node::Null`].
    pub fn has_value(&self) -> bool {
        !self.is_null()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Returns the wrapped node of a [`Node::Commented`], or `self`.
    pub fn unwrap_commented(&self) -> &Node {
        match self {
            Node::Commented(commented) => commented.node().unwrap_commented(),
            other => other,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.unwrap_commented() {
            Node::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self.unwrap_commented() {
            Node::Char(v) => Some(*v),
            _ => None,
        }
    }

    /// Borrows the content of a string node.
    pub fn as_str(&self) -> Option<&str> {
        match self.unwrap_commented() {
            Node::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        match self.unwrap_commented() {
            Node::Enum(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        match self.unwrap_commented() {
            Node::Array(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&ListNode> {
        match self.unwrap_commented() {
            Node::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapNode> {
        match self.unwrap_commented() {
            Node::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self.unwrap_commented() {
            Node::Object(v) => Some(v),
            _ => None,
        }
    }

    /// Textual form of a string-representable node.
    ///
    /// Booleans, numbers, chars, strings and enums have one; everything
    /// else returns `None`.
    pub fn as_string(&self) -> Option<String> {
        match self.unwrap_commented() {
            Node::Bool(v) => Some(v.to_string()),
            Node::Byte(v) => Some(v.to_string()),
            Node::Short(v) => Some(v.to_string()),
            Node::Int(v) => Some(v.to_string()),
            Node::Long(v) => Some(v.to_string()),
            Node::Float(v) => Some(super::number::format_float(*v)),
            Node::Double(v) => Some(super::number::format_double(*v)),
            Node::Char(v) => Some(v.to_string()),
            Node::String(v) => Some(v.to_string()),
            Node::Enum(v) => Some(v.name().to_string()),
            _ => None,
        }
    }

    /// Structural equality: containers are compared by content in order,
    /// comments are ignored.
    ///
    /// `==` compares lists and maps by identity instead.
    pub fn deep_eq(&self, other: &Node) -> bool {
        match (self.unwrap_commented(), other.unwrap_commented()) {
            (Node::List(a), Node::List(b)) => a.deep_eq(b),
            (Node::Map(a), Node::Map(b)) => a.deep_eq(b),
            (a, b) => a == b,
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Node::Null, Node::Null) => true,
            (Node::Bool(a), Node::Bool(b)) => a == b,
            (Node::Byte(a), Node::Byte(b)) => a == b,
            (Node::Short(a), Node::Short(b)) => a == b,
            (Node::Int(a), Node::Int(b)) => a == b,
            (Node::Long(a), Node::Long(b)) => a == b,
            (Node::Float(a), Node::Float(b)) => float_eq(*a, *b),
            (Node::Double(a), Node::Double(b)) => double_eq(*a, *b),
            (Node::Char(a), Node::Char(b)) => a == b,
            (Node::String(a), Node::String(b)) => a == b,
            (Node::Enum(a), Node::Enum(b)) => a == b,
            (Node::Array(a), Node::Array(b)) => a == b,
            (Node::List(a), Node::List(b)) => a == b,
            (Node::Map(a), Node::Map(b)) => a == b,
            (Node::Object(a), Node::Object(b)) => a == b,
            (Node::Commented(a), Node::Commented(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// CONVERSION INTO NODES
// =============================================================================

/// Conversion of a plain value into a [`Node`].
///
/// Containers are always deep-copied: the resulting node never shares state
/// with the value it was built from.
pub trait IntoNode {
    fn into_node(self) -> Node;
}

impl IntoNode for Node {
    fn into_node(self) -> Node {
        match self {
            Node::List(list) => Node::List(list.copy()),
            Node::Map(map) => Node::Map(map.copy()),
            Node::Commented(commented) => {
                let (node, comment) = commented.into_parts();
                with_comment(node.into_node(), comment)
            }
            other => other,
        }
    }
}

impl IntoNode for &Node {
    fn into_node(self) -> Node {
        self.clone().into_node()
    }
}

macro_rules! scalar_into_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl IntoNode for $ty {
                fn into_node(self) -> Node {
                    Node::$variant(self)
                }
            }
        )*
    };
}

scalar_into_node! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    EnumValue => Enum,
    ArrayNode => Array,
    ObjectNode => Object,
}

impl IntoNode for &str {
    fn into_node(self) -> Node {
        Node::string(self)
    }
}

impl IntoNode for String {
    fn into_node(self) -> Node {
        Node::string(&self)
    }
}

impl IntoNode for &String {
    fn into_node(self) -> Node {
        Node::string(self)
    }
}

impl IntoNode for Arc<str> {
    fn into_node(self) -> Node {
        if self.is_empty() {
            Node::string("")
        } else {
            Node::String(self)
        }
    }
}

impl IntoNode for Key {
    fn into_node(self) -> Node {
        self.to_node()
    }
}

impl IntoNode for &Key {
    fn into_node(self) -> Node {
        self.to_node()
    }
}

impl IntoNode for ListNode {
    fn into_node(self) -> Node {
        Node::List(self.copy())
    }
}

impl IntoNode for &ListNode {
    fn into_node(self) -> Node {
        Node::List(self.copy())
    }
}

impl IntoNode for ListView {
    fn into_node(self) -> Node {
        Node::List(self.copy())
    }
}

impl IntoNode for &ListView {
    fn into_node(self) -> Node {
        Node::List(self.copy())
    }
}

impl IntoNode for MapNode {
    fn into_node(self) -> Node {
        Node::Map(self.copy())
    }
}

impl IntoNode for &MapNode {
    fn into_node(self) -> Node {
        Node::Map(self.copy())
    }
}

impl IntoNode for MapView {
    fn into_node(self) -> Node {
        Node::Map(self.copy())
    }
}

impl IntoNode for &MapView {
    fn into_node(self) -> Node {
        Node::Map(self.copy())
    }
}

impl IntoNode for CommentedNode {
    fn into_node(self) -> Node {
        Node::Commented(self).into_node()
    }
}

impl<T: IntoNode> IntoNode for Option<T> {
    fn into_node(self) -> Node {
        match self {
            Some(value) => value.into_node(),
            None => Node::Null,
        }
    }
}

impl<T: IntoNode> IntoNode for Vec<T> {
    fn into_node(self) -> Node {
        Node::List(self.into_iter().collect())
    }
}

impl<K: Into<Key>, V: IntoNode> IntoNode for BTreeMap<K, V> {
    fn into_node(self) -> Node {
        Node::Map(self.into_iter().collect())
    }
}

impl<K: Into<Key>, V: IntoNode, S: BuildHasher> IntoNode for HashMap<K, V, S> {
    fn into_node(self) -> Node {
        Node::Map(self.into_iter().collect())
    }
}

// =============================================================================
// EXTRACTION FROM NODES
// =============================================================================

/// Strict typed extraction: succeeds only when the node holds exactly `Self`.
///
/// No numeric widening or parsing happens here; use the `as_*` accessors or
/// the typed map getters for lenient reads.
pub trait FromNode: Sized {
    fn from_node(node: &Node) -> Option<Self>;
}

macro_rules! scalar_from_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromNode for $ty {
                fn from_node(node: &Node) -> Option<Self> {
                    match node {
                        Node::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_from_node! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
    Arc<str> => String,
    EnumValue => Enum,
    ArrayNode => Array,
    ListNode => List,
    MapNode => Map,
    ObjectNode => Object,
}

impl FromNode for String {
    fn from_node(node: &Node) -> Option<Self> {
        match node {
            Node::String(v) => Some(v.to_string()),
            _ => None,
        }
    }
}

impl FromNode for Node {
    fn from_node(node: &Node) -> Option<Self> {
        Some(node.clone())
    }
}
