//! Fixed-length primitive arrays.

use std::fmt;
use std::rc::Rc;

use super::number::{double_eq, float_eq, format_double, format_float};

/// A fixed-length buffer of one primitive element type.
///
/// The buffer is shared, never copied, when the node is cloned. Arrays built
/// from a `Rc<[T]>` share it with the caller.
#[derive(Debug, Clone)]
pub enum ArrayNode {
    Bool(Rc<[bool]>),
    Byte(Rc<[i8]>),
    Short(Rc<[i16]>),
    Int(Rc<[i32]>),
    Long(Rc<[i64]>),
    Float(Rc<[f32]>),
    Double(Rc<[f64]>),
    Char(Rc<[char]>),
}

impl ArrayNode {
    pub fn len(&self) -> usize {
        match self {
            ArrayNode::Bool(v) => v.len(),
            ArrayNode::Byte(v) => v.len(),
            ArrayNode::Short(v) => v.len(),
            ArrayNode::Int(v) => v.len(),
            ArrayNode::Long(v) => v.len(),
            ArrayNode::Float(v) => v.len(),
            ArrayNode::Double(v) => v.len(),
            ArrayNode::Char(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name of the array type, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ArrayNode::Bool(_) => "bool array",
            ArrayNode::Byte(_) => "byte array",
            ArrayNode::Short(_) => "short array",
            ArrayNode::Int(_) => "int array",
            ArrayNode::Long(_) => "long array",
            ArrayNode::Float(_) => "float array",
            ArrayNode::Double(_) => "double array",
            ArrayNode::Char(_) => "char array",
        }
    }

    /// Creates an array holding a fresh copy of this one's elements.
    pub fn copy(&self) -> ArrayNode {
        match self {
            ArrayNode::Bool(v) => ArrayNode::Bool(Rc::from(&v[..])),
            ArrayNode::Byte(v) => ArrayNode::Byte(Rc::from(&v[..])),
            ArrayNode::Short(v) => ArrayNode::Short(Rc::from(&v[..])),
            ArrayNode::Int(v) => ArrayNode::Int(Rc::from(&v[..])),
            ArrayNode::Long(v) => ArrayNode::Long(Rc::from(&v[..])),
            ArrayNode::Float(v) => ArrayNode::Float(Rc::from(&v[..])),
            ArrayNode::Double(v) => ArrayNode::Double(Rc::from(&v[..])),
            ArrayNode::Char(v) => ArrayNode::Char(Rc::from(&v[..])),
        }
    }

    /// Returns true if both arrays share the same buffer.
    pub fn ptr_eq(&self, other: &ArrayNode) -> bool {
        match (self, other) {
            (ArrayNode::Bool(a), ArrayNode::Bool(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Byte(a), ArrayNode::Byte(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Short(a), ArrayNode::Short(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Int(a), ArrayNode::Int(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Long(a), ArrayNode::Long(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Float(a), ArrayNode::Float(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Double(a), ArrayNode::Double(b)) => Rc::ptr_eq(a, b),
            (ArrayNode::Char(a), ArrayNode::Char(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Arrays are equal when they hold the same element type and contents.
impl PartialEq for ArrayNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ArrayNode::Bool(a), ArrayNode::Bool(b)) => a == b,
            (ArrayNode::Byte(a), ArrayNode::Byte(b)) => a == b,
            (ArrayNode::Short(a), ArrayNode::Short(b)) => a == b,
            (ArrayNode::Int(a), ArrayNode::Int(b)) => a == b,
            (ArrayNode::Long(a), ArrayNode::Long(b)) => a == b,
            (ArrayNode::Float(a), ArrayNode::Float(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| float_eq(*x, *y))
            }
            (ArrayNode::Double(a), ArrayNode::Double(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| double_eq(*x, *y))
            }
            (ArrayNode::Char(a), ArrayNode::Char(b)) => a == b,
            _ => false,
        }
    }
}

macro_rules! array_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for ArrayNode {
                fn from(values: Vec<$ty>) -> Self {
                    ArrayNode::$variant(Rc::from(values))
                }
            }

            impl From<&[$ty]> for ArrayNode {
                fn from(values: &[$ty]) -> Self {
                    ArrayNode::$variant(Rc::from(values))
                }
            }

            impl From<Rc<[$ty]>> for ArrayNode {
                fn from(values: Rc<[$ty]>) -> Self {
                    ArrayNode::$variant(values)
                }
            }
        )*
    };
}

array_from! {
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    char => Char,
}

fn write_joined<T>(
    f: &mut fmt::Formatter<'_>,
    values: &[T],
    mut item: impl FnMut(&T) -> String,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        f.write_str(&item(value))?;
    }
    f.write_str("]")
}

/// Renders as `[1, 2, 3]`.
impl fmt::Display for ArrayNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayNode::Bool(v) => write_joined(f, &v[..], |x| x.to_string()),
            ArrayNode::Byte(v) => write_joined(f, &v[..], |x| x.to_string()),
            ArrayNode::Short(v) => write_joined(f, &v[..], |x| x.to_string()),
            ArrayNode::Int(v) => write_joined(f, &v[..], |x| x.to_string()),
            ArrayNode::Long(v) => write_joined(f, &v[..], |x| x.to_string()),
            ArrayNode::Float(v) => write_joined(f, &v[..], |x| format_float(*x)),
            ArrayNode::Double(v) => write_joined(f, &v[..], |x| format_double(*x)),
            ArrayNode::Char(v) => write_joined(f, &v[..], |x| x.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_equality() {
        let a = ArrayNode::from(vec![1i32, 2, 3]);
        let b = ArrayNode::from(&[1i32, 2, 3][..]);
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert_ne!(a, ArrayNode::from(vec![1i64, 2, 3]));
    }

    #[test]
    fn test_shared_buffer() {
        let buffer: Rc<[f64]> = Rc::from(vec![0.5, 1.5]);
        let array = ArrayNode::from(buffer.clone());
        assert!(matches!(&array, ArrayNode::Double(v) if Rc::ptr_eq(v, &buffer)));

        let copy = array.copy();
        assert_eq!(copy, array);
        assert!(!copy.ptr_eq(&array));
    }

    #[test]
    fn test_display() {
        assert_eq!(ArrayNode::from(vec![1i32, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(ArrayNode::from(vec![1.0f64, 2.5]).to_string(), "[1.0, 2.5]");
        assert_eq!(ArrayNode::from(vec!['a', 'b']).to_string(), "[a, b]");
        assert_eq!(ArrayNode::from(Vec::<bool>::new()).to_string(), "[]");
    }
}
