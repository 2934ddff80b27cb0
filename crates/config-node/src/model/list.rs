//! Ordered lists of nodes.
//!
//! A [`ListNode`] owns a shared backing sequence and exposes every mutator. A
//! [`ListView`] reads the same backing without any way to change it, so
//! mutations made through the owner show up in every view immediately.
//!
//! ```compile_fail
//! use config_node::model::ListNode;
//!
//! let list = ListNode::new();
//! let view = list.as_view();
//! view.add(1); // views have no mutators
//! ```

use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use super::comment::{new_cell, CommentCell};
use super::{Comment, FromNode, IntoNode, MapNode, Node};
use crate::error::NodeError;

/// Read-only access to a list.
#[derive(Clone)]
pub struct ListView {
    backing: Rc<RefCell<Vec<Node>>>,
    comment: CommentCell,
}

/// An ordered, growable list of nodes.
///
/// Cloning the handle aliases the same list. Use [`ListView::copy`] for an
/// independent deep copy. Equality is identity: two handles are equal only
/// when they share the same backing sequence.
#[derive(Clone)]
pub struct ListNode {
    view: ListView,
}

impl ListView {
    pub(crate) fn from_vec(nodes: Vec<Node>) -> Self {
        Self {
            backing: Rc::new(RefCell::new(nodes)),
            comment: new_cell(None),
        }
    }

    /// A view of a fresh empty list, returned by lookups that find no list.
    pub fn empty() -> ListView {
        ListView::from_vec(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.backing.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.backing.borrow().is_empty()
    }

    /// Returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn get(&self, index: usize) -> Node {
        match self.try_get(index) {
            Some(node) => node,
            None => panic!("index {index} out of range for list of length {}", self.len()),
        }
    }

    pub fn try_get(&self, index: usize) -> Option<Node> {
        self.backing.borrow().get(index).cloned()
    }

    /// Membership by node equality after converting `value` into a node.
    pub fn contains(&self, value: impl IntoNode) -> bool {
        let node = value.into_node();
        self.backing.borrow().contains(&node)
    }

    /// Snapshot of the elements in order.
    pub fn to_vec(&self) -> Vec<Node> {
        self.backing.borrow().clone()
    }

    /// Iterates over a snapshot taken when the iterator is created.
    pub fn iter(&self) -> std::vec::IntoIter<Node> {
        self.to_vec().into_iter()
    }

    /// Elements that are exactly of type `T`, in order; others are skipped.
    pub fn as_list<T: FromNode>(&self) -> Vec<T> {
        self.backing
            .borrow()
            .iter()
            .filter_map(|node| T::from_node(node.unwrap_commented()))
            .collect()
    }

    /// Deep copy: nested lists and maps are copied too, comments included.
    pub fn copy(&self) -> ListNode {
        let nodes = self
            .backing
            .borrow()
            .iter()
            .map(IntoNode::into_node)
            .collect();
        let copy = ListNode {
            view: ListView::from_vec(nodes),
        };
        copy.set_comment(self.comment_or_none());
        copy
    }

    /// Another read-only handle on the same list.
    pub fn as_view(&self) -> ListView {
        self.clone()
    }

    pub fn has_comment(&self) -> bool {
        self.comment.borrow().is_some()
    }

    pub fn comment(&self) -> Result<Comment, NodeError> {
        self.comment_or_none().ok_or(NodeError::CommentNotSet)
    }

    pub fn comment_or_none(&self) -> Option<Comment> {
        self.comment.borrow().clone()
    }

    /// Element-wise [`Node::deep_eq`].
    pub fn deep_eq(&self, other: &ListView) -> bool {
        if self == other {
            return true;
        }
        let (a, b) = (self.to_vec(), other.to_vec());
        a.len() == b.len() && a.iter().zip(&b).all(|(x, y)| x.deep_eq(y))
    }
}

impl ListNode {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            view: ListView::from_vec(Vec::with_capacity(capacity)),
        }
    }

    /// Appends `value`, converted into a node.
    pub fn add(&self, value: impl IntoNode) {
        let node = value.into_node();
        self.backing.borrow_mut().push(node);
    }

    pub fn add_all<I>(&self, values: I)
    where
        I: IntoIterator,
        I::Item: IntoNode,
    {
        let nodes: Vec<Node> = values.into_iter().map(IntoNode::into_node).collect();
        self.backing.borrow_mut().extend(nodes);
    }

    /// Appends a new empty list and returns a handle to it.
    pub fn add_list(&self) -> ListNode {
        self.add_list_with_capacity(0)
    }

    pub fn add_list_with_capacity(&self, capacity: usize) -> ListNode {
        let list = ListNode::with_capacity(capacity);
        self.backing.borrow_mut().push(Node::List(list.clone()));
        list
    }

    /// Appends a new empty map and returns a handle to it.
    pub fn add_map(&self) -> MapNode {
        let map = MapNode::new();
        self.backing.borrow_mut().push(Node::Map(map.clone()));
        map
    }

    /// Replaces the element at `index`, returning the previous one.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn set(&self, index: usize, value: impl IntoNode) -> Node {
        let node = value.into_node();
        let mut backing = self.backing.borrow_mut();
        let len = backing.len();
        match backing.get_mut(index) {
            Some(slot) => std::mem::replace(slot, node),
            None => panic!("index {index} out of range for list of length {len}"),
        }
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&self, index: usize) -> Node {
        let mut backing = self.backing.borrow_mut();
        let len = backing.len();
        if index >= len {
            panic!("index {index} out of range for list of length {len}");
        }
        backing.remove(index)
    }

    /// Removes the first element equal to `value`. Returns whether one was found.
    pub fn remove_value(&self, value: impl IntoNode) -> bool {
        let node = value.into_node();
        let mut backing = self.backing.borrow_mut();
        match backing.iter().position(|element| *element == node) {
            Some(index) => {
                backing.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes every element matching `predicate`, returning how many were removed.
    pub fn remove_if<F: FnMut(&Node) -> bool>(&self, mut predicate: F) -> usize {
        let mut nodes = self.to_vec();
        let before = nodes.len();
        nodes.retain(|node| !predicate(node));
        let removed = before - nodes.len();
        if removed > 0 {
            *self.backing.borrow_mut() = nodes;
        }
        removed
    }

    /// Replaces every element with the converted result of `mapper`.
    pub fn replace_all<F, R>(&self, mut mapper: F)
    where
        F: FnMut(Node) -> R,
        R: IntoNode,
    {
        let nodes: Vec<Node> = self
            .to_vec()
            .into_iter()
            .map(|node| mapper(node).into_node())
            .collect();
        *self.backing.borrow_mut() = nodes;
    }

    /// Stable sort with the given comparator.
    pub fn sort_by<F: FnMut(&Node, &Node) -> Ordering>(&self, compare: F) {
        let mut nodes = self.to_vec();
        nodes.sort_by(compare);
        *self.backing.borrow_mut() = nodes;
    }

    pub fn clear(&self) {
        self.backing.borrow_mut().clear();
    }

    /// Sets or clears the comment, visible through every view.
    pub fn set_comment(&self, comment: Option<Comment>) {
        *self.comment.borrow_mut() = comment;
    }

    /// Appends a decoded node as-is, without copying containers.
    pub(crate) fn push_raw(&self, node: Node) {
        self.backing.borrow_mut().push(node);
    }
}

impl Default for ListNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for ListNode {
    type Target = ListView;

    fn deref(&self) -> &ListView {
        &self.view
    }
}

impl<T: IntoNode> FromIterator<T> for ListNode {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let nodes: Vec<Node> = iter.into_iter().map(IntoNode::into_node).collect();
        ListNode {
            view: ListView::from_vec(nodes),
        }
    }
}

impl PartialEq for ListView {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backing, &other.backing)
    }
}

impl PartialEq for ListNode {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
    }
}

impl PartialEq<ListView> for ListNode {
    fn eq(&self, other: &ListView) -> bool {
        self.view == *other
    }
}

impl PartialEq<ListNode> for ListView {
    fn eq(&self, other: &ListNode) -> bool {
        *self == other.view
    }
}

impl fmt::Debug for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        list.entries(self.backing.borrow().iter());
        list.finish()?;
        if let Some(comment) = self.comment.borrow().as_ref() {
            write!(f, " /* {} */", comment.content())?;
        }
        Ok(())
    }
}

impl fmt::Debug for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc() -> ListNode {
        ["a", "b", "c"].into_iter().collect()
    }

    #[test]
    fn test_add_and_get() {
        let list = ListNode::new();
        list.add(1);
        list.add("two");
        list.add(3.0f64);
        assert_eq!(list.len(), 3);
        assert_eq!(list.get(0), Node::Int(1));
        assert_eq!(list.get(1).as_str(), Some("two"));
        assert_eq!(list.try_get(3), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range_panics() {
        abc().get(3);
    }

    #[test]
    fn test_view_reflects_owner_mutations() {
        let list = abc();
        let view = list.as_view();
        list.add("d");
        list.remove(0);
        assert_eq!(view.as_list::<String>(), vec!["b", "c", "d"]);
        assert_eq!(view, list);
        assert_eq!(view.as_view(), list);
    }

    #[test]
    fn test_set_and_remove_return_previous() {
        let list = abc();
        assert_eq!(list.set(1, "x").as_str(), Some("b"));
        assert_eq!(list.remove(0).as_str(), Some("a"));
        assert_eq!(list.as_list::<String>(), vec!["x", "c"]);
    }

    #[test]
    fn test_remove_value_and_remove_if() {
        let list: ListNode = (1..=6).collect();
        assert!(list.remove_value(3));
        assert!(!list.remove_value(3));
        assert!(!list.remove_value(4i64));
        assert_eq!(list.remove_if(|n| n.as_int().is_some_and(|v| v % 2 == 0)), 3);
        assert_eq!(list.as_list::<i32>(), vec![1, 5]);
    }

    #[test]
    fn test_replace_all_normalizes_absent() {
        let list: ListNode = (1..=3).collect();
        list.replace_all(|n| match n.as_int() {
            Some(2) => None,
            Some(v) => Some(v * 10),
            None => None,
        });
        assert_eq!(list.to_vec(), vec![Node::Int(10), Node::Null, Node::Int(30)]);
    }

    #[test]
    fn test_sort_by() {
        let list: ListNode = ["pear", "apple", "fig"].into_iter().collect();
        list.sort_by(|a, b| a.as_str().cmp(&b.as_str()));
        assert_eq!(list.as_list::<String>(), vec!["apple", "fig", "pear"]);
    }

    #[test]
    fn test_nested_creation_aliases_child() {
        let list = ListNode::new();
        let child = list.add_list();
        child.add(1);
        let map = list.add_map();
        map.set("k", true);

        assert_eq!(list.get(0), Node::List(child.clone()));
        assert_eq!(list.get(0).as_list().map(|l| l.len()), Some(1));
        assert_eq!(list.get(1).as_map().map(|m| m.get("k")), Some(Node::Bool(true)));
    }

    #[test]
    fn test_adding_container_copies_it() {
        let inner = abc();
        let list = ListNode::new();
        list.add(&inner);
        inner.clear();
        assert_eq!(list.get(0).as_list().map(|l| l.len()), Some(3));
        assert!(!list.contains(&inner));
    }

    #[test]
    fn test_push_raw_keeps_identity() {
        let inner = abc();
        let list = ListNode::new();
        list.push_raw(Node::List(inner.clone()));
        assert_eq!(list.get(0), Node::List(inner.clone()));

        inner.add("d");
        assert_eq!(list.get(0).as_list().map(|l| l.len()), Some(4));
    }

    #[test]
    fn test_copy_is_deep_and_independent() {
        let list = ListNode::new();
        list.add_list().add("deep");
        list.set_comment(Some(Comment::new("c")));

        let copy = list.copy();
        assert!(copy.deep_eq(&list));
        assert_ne!(copy, list);
        assert_eq!(copy.comment_or_none(), Some(Comment::new("c")));

        let nested = list.get(0);
        nested.as_list().expect("nested list").add("more");
        assert_eq!(copy.get(0).as_list().map(|l| l.len()), Some(1));

        copy.set_comment(None);
        assert!(list.has_comment());
    }

    #[test]
    fn test_identity_equality() {
        let a = abc();
        let b = abc();
        assert_ne!(a, b);
        assert!(a.deep_eq(&b));
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_contains_uses_value_equality() {
        let list = abc();
        assert!(list.contains("b"));
        assert!(!list.contains("z"));
        assert!(!list.contains('a'));
    }

    #[test]
    fn test_empty_view() {
        let view = ListView::empty();
        assert!(view.is_empty());
        assert_ne!(view, ListView::empty());
    }
}
