//! Opaque runtime values carried through a tree.

use std::any::{type_name, Any};
use std::fmt;
use std::rc::Rc;

/// Holds an arbitrary value that has no dedicated node variant.
///
/// Object nodes are compared by identity and cannot be encoded.
#[derive(Clone)]
pub struct ObjectNode {
    value: Rc<dyn Any>,
    type_name: &'static str,
}

impl ObjectNode {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            value: Rc::new(value),
            type_name: type_name::<T>(),
        }
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.value.is::<T>()
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.value, &other.value)
    }
}

impl fmt::Debug for ObjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ObjectNode").field(&self.type_name).finish()
    }
}
