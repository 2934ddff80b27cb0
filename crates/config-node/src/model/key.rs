//! Map keys.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use super::number::{double_bits, float_bits};
use super::{EnumValue, Node};

/// A hashable scalar used as a map key.
///
/// Keys of different variants never collide: `Key::Int(1)` and
/// `Key::Long(1)` are distinct.
#[derive(Debug, Clone)]
pub enum Key {
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
}

impl Key {
    /// Builds a key from a scalar node. Containers, arrays, objects and
    /// `Null` are not keys.
    pub fn from_node(node: &Node) -> Option<Key> {
        match node.unwrap_commented() {
            Node::Bool(v) => Some(Key::Bool(*v)),
            Node::Byte(v) => Some(Key::Byte(*v)),
            Node::Short(v) => Some(Key::Short(*v)),
            Node::Int(v) => Some(Key::Int(*v)),
            Node::Long(v) => Some(Key::Long(*v)),
            Node::Float(v) => Some(Key::Float(*v)),
            Node::Double(v) => Some(Key::Double(*v)),
            Node::Char(v) => Some(Key::Char(*v)),
            Node::String(v) => Some(Key::String(v.clone())),
            Node::Enum(v) => Some(Key::Enum(*v)),
            _ => None,
        }
    }

    pub fn to_node(&self) -> Node {
        match self {
            Key::Bool(v) => Node::Bool(*v),
            Key::Byte(v) => Node::Byte(*v),
            Key::Short(v) => Node::Short(*v),
            Key::Int(v) => Node::Int(*v),
            Key::Long(v) => Node::Long(*v),
            Key::Float(v) => Node::Float(*v),
            Key::Double(v) => Node::Double(*v),
            Key::Char(v) => Node::Char(*v),
            Key::String(v) => Node::String(v.clone()),
            Key::Enum(v) => Node::Enum(*v),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::String(v) => Some(v),
            _ => None,
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Key::Bool(a), Key::Bool(b)) => a == b,
            (Key::Byte(a), Key::Byte(b)) => a == b,
            (Key::Short(a), Key::Short(b)) => a == b,
            (Key::Int(a), Key::Int(b)) => a == b,
            (Key::Long(a), Key::Long(b)) => a == b,
            (Key::Float(a), Key::Float(b)) => float_bits(*a) == float_bits(*b),
            (Key::Double(a), Key::Double(b)) => double_bits(*a) == double_bits(*b),
            (Key::Char(a), Key::Char(b)) => a == b,
            (Key::String(a), Key::String(b)) => a == b,
            (Key::Enum(a), Key::Enum(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Key::Bool(v) => v.hash(state),
            Key::Byte(v) => v.hash(state),
            Key::Short(v) => v.hash(state),
            Key::Int(v) => v.hash(state),
            Key::Long(v) => v.hash(state),
            Key::Float(v) => float_bits(*v).hash(state),
            Key::Double(v) => double_bits(*v).hash(state),
            Key::Char(v) => v.hash(state),
            Key::String(v) => v.hash(state),
            Key::Enum(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_node(), f)
    }
}

macro_rules! key_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Key {
                fn from(value: $ty) -> Self {
                    Key::$variant(value)
                }
            }
        )*
    };
}

key_from! {
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
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::String(Arc::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::String(Arc::from(value))
    }
}

impl From<&String> for Key {
    fn from(value: &String) -> Self {
        Key::String(Arc::from(value.as_str()))
    }
}

impl From<&Key> for Key {
    fn from(value: &Key) -> Self {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ListNode;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_variants_are_distinct() {
        let mut keys = FxHashSet::default();
        keys.insert(Key::from(1i32));
        keys.insert(Key::from(1i64));
        keys.insert(Key::from("1"));
        keys.insert(Key::from(String::from("1")));
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_nan_keys_match() {
        assert_eq!(Key::Double(f64::NAN), Key::Double(-f64::NAN));
        assert_ne!(Key::Double(0.0), Key::Double(-0.0));
    }

    #[test]
    fn test_from_node() {
        assert_eq!(Key::from_node(&Node::string("a")), Some(Key::from("a")));
        assert_eq!(Key::from_node(&Node::Char('c')), Some(Key::Char('c')));
        assert_eq!(Key::from_node(&Node::Null), None);
        assert_eq!(Key::from_node(&Node::List(ListNode::new())), None);
    }
}
