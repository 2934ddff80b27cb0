//! Enum constants stored in a tree.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A closed set of named constants that can live in a configuration tree.
///
/// ```
/// use config_node::model::{ConfigEnum, Node};
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Fast,
///     Safe,
/// }
///
/// impl ConfigEnum for Mode {
///     fn name(&self) -> &'static str {
///         match self {
///             Mode::Fast => "FAST",
///             Mode::Safe => "SAFE",
///         }
///     }
///
///     fn from_name(name: &str) -> Option<Self> {
///         match name {
///             "FAST" => Some(Mode::Fast),
///             "SAFE" => Some(Mode::Safe),
///             _ => None,
///         }
///     }
/// }
///
/// let node = Node::from_enum(&Mode::Safe);
/// assert_eq!(node.as_string().as_deref(), Some("SAFE"));
/// assert_eq!(node.as_enum().and_then(|e| e.get::<Mode>()), Some(Mode::Safe));
/// ```
pub trait ConfigEnum: Sized + 'static {
    /// Canonical name of the constant. Names are case-sensitive.
    fn name(&self) -> &'static str;

    /// Looks up a constant by its exact name.
    fn from_name(name: &str) -> Option<Self>;
}

/// An enum constant with its type erased.
///
/// Two values are equal when they come from the same enum type and carry the
/// same name.
#[derive(Clone, Copy)]
pub struct EnumValue {
    type_id: TypeId,
    type_name: &'static str,
    name: &'static str,
}

impl EnumValue {
    pub fn new<E: ConfigEnum>(value: &E) -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            type_name: type_name::<E>(),
            name: value.name(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Rust path of the enum type the constant belongs to.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<E: ConfigEnum>(&self) -> bool {
        self.type_id == TypeId::of::<E>()
    }

    /// Recovers the typed constant if this value belongs to `E`.
    pub fn get<E: ConfigEnum>(&self) -> Option<E> {
        if self.is::<E>() {
            E::from_name(self.name)
        } else {
            None
        }
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id && self.name == other.name
    }
}

impl Eq for EnumValue {}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Debug for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.type_name, self.name)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub(crate) enum Color {
        Red,
        Green,
    }

    impl ConfigEnum for Color {
        fn name(&self) -> &'static str {
            match self {
                Color::Red => "RED",
                Color::Green => "GREEN",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            match name {
                "RED" => Some(Color::Red),
                "GREEN" => Some(Color::Green),
                _ => None,
            }
        }
    }

    #[derive(Debug, PartialEq)]
    pub(crate) enum Shade {
        Red,
    }

    impl ConfigEnum for Shade {
        fn name(&self) -> &'static str {
            "RED"
        }

        fn from_name(name: &str) -> Option<Self> {
            (name == "RED").then_some(Shade::Red)
        }
    }

    #[test]
    fn test_equality_includes_type() {
        assert_eq!(EnumValue::new(&Color::Red), EnumValue::new(&Color::Red));
        assert_ne!(EnumValue::new(&Color::Red), EnumValue::new(&Color::Green));
        assert_ne!(EnumValue::new(&Color::Red), EnumValue::new(&Shade::Red));
    }

    #[test]
    fn test_get_checks_type() {
        let value = EnumValue::new(&Color::Green);
        assert_eq!(value.get::<Color>(), Some(Color::Green));
        assert_eq!(value.get::<Shade>(), None);
        assert_eq!(value.to_string(), "GREEN");
    }
}
