//! Insertion-ordered maps from [`Key`] to [`Node`].
//!
//! As with lists, a [`MapNode`] owns the backing entries and a [`MapView`]
//! only reads them:
//!
//! ```compile_fail
//! use config_node::model::MapNode;
//!
//! let map = MapNode::new();
//! let view = map.as_view();
//! view.set("key", 1); // views have no mutators
//! ```

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::comment::{new_cell, CommentCell};
use super::{Comment, ConfigEnum, IntoNode, Key, ListNode, ListView, Node};
use crate::error::NodeError;

// =============================================================================
// ENTRY STORAGE
// =============================================================================

/// Entries in insertion order with a hash index into them.
#[derive(Debug, Clone, Default)]
pub(crate) struct Entries {
    entries: Vec<(Key, Node)>,
    indices: FxHashMap<Key, usize>,
}

impl Entries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, key: &Key) -> Option<&Node> {
        self.indices.get(key).map(|&i| &self.entries[i].1)
    }

    /// Inserts or overwrites. An existing key keeps its position.
    pub(crate) fn insert(&mut self, key: Key, node: Node) -> Option<Node> {
        if let Some(&i) = self.indices.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, node));
        }
        self.indices.insert(key.clone(), self.entries.len());
        self.entries.push((key, node));
        None
    }

    fn remove(&mut self, key: &Key) -> Option<Node> {
        let index = self.indices.remove(key)?;
        let (_, node) = self.entries.remove(index);
        for (i, (key, _)) in self.entries.iter().enumerate().skip(index) {
            self.indices.insert(key.clone(), i);
        }
        Some(node)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// Read-only access to a map.
///
/// Lookups return [`Node::Null`] for missing keys. The typed getters fall
/// back to a default when the key is missing or holds a different kind.
#[derive(Clone)]
pub struct MapView {
    backing: Rc<RefCell<Entries>>,
    comment: CommentCell,
}

/// An insertion-ordered map from keys to nodes.
///
/// Cloning the handle aliases the same map; equality is identity.
#[derive(Clone)]
pub struct MapNode {
    view: MapView,
}

impl MapView {
    fn from_entries(entries: Entries) -> Self {
        Self {
            backing: Rc::new(RefCell::new(entries)),
            comment: new_cell(None),
        }
    }

    /// A view of a fresh empty map, returned by lookups that find no map.
    pub fn empty() -> MapView {
        MapView::from_entries(Entries::default())
    }

    pub fn len(&self) -> usize {
        self.backing.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value for `key`, or [`Node::Null`] when absent.
    pub fn get(&self, key: impl Into<Key>) -> Node {
        self.backing
            .borrow()
            .get(&key.into())
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_or_default(&self, key: impl Into<Key>, default: Node) -> Node {
        match self.get(key) {
            Node::Null => default,
            node => node,
        }
    }

    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        self.backing.borrow().indices.contains_key(&key.into())
    }

    /// Membership by node equality. `Null` is never considered present.
    pub fn contains_value(&self, value: impl IntoNode) -> bool {
        let node = value.into_node();
        if node.is_null() {
            return false;
        }
        self.backing.borrow().entries.iter().any(|(_, v)| *v == node)
    }

    pub fn keys(&self) -> Vec<Key> {
        self.backing.borrow().entries.iter().map(|(k, _)| k.clone()).collect()
    }

    pub fn values(&self) -> Vec<Node> {
        self.backing.borrow().entries.iter().map(|(_, v)| v.clone()).collect()
    }

    /// Iterates over a snapshot of the entries in insertion order.
    pub fn iter(&self) -> std::vec::IntoIter<(Key, Node)> {
        self.backing.borrow().entries.clone().into_iter()
    }

    pub(crate) fn entry_at(&self, index: usize) -> Option<(Key, Node)> {
        self.backing.borrow().entries.get(index).cloned()
    }

    /// Deep copy: nested lists and maps are copied too, comments included.
    pub fn copy(&self) -> MapNode {
        let source = self.backing.borrow();
        let mut entries = Entries::with_capacity(source.len());
        for (key, node) in &source.entries {
            entries.insert(key.clone(), node.into_node());
        }
        let copy = MapNode {
            view: MapView::from_entries(entries),
        };
        copy.set_comment(self.comment_or_none());
        copy
    }

    /// Another read-only handle on the same map.
    pub fn as_view(&self) -> MapView {
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

    /// Entry-wise [`Node::deep_eq`], including key order.
    pub fn deep_eq(&self, other: &MapView) -> bool {
        if self == other {
            return true;
        }
        let (a, b) = (self.iter(), other.iter());
        a.len() == b.len()
            && a.zip(b)
                .all(|((ka, va), (kb, vb))| ka == kb && va.deep_eq(&vb))
    }

    // ===== typed getters =====

    fn raw(&self, key: impl Into<Key>) -> Node {
        match self.get(key) {
            Node::Commented(commented) => commented.into_parts().0,
            node => node,
        }
    }

    /// Content of a string node; any other kind reads as `None`.
    pub fn get_string_or_none(&self, key: impl Into<Key>) -> Option<String> {
        self.raw(key).as_str().map(str::to_string)
    }

    pub fn get_string(&self, key: impl Into<Key>, default: &str) -> String {
        self.get_string_or_none(key)
            .unwrap_or_else(|| default.to_string())
    }

    pub fn get_bool(&self, key: impl Into<Key>, default: bool) -> bool {
        self.raw(key).as_bool().unwrap_or(default)
    }

    pub fn get_char(&self, key: impl Into<Key>, default: char) -> char {
        self.raw(key).as_char().unwrap_or(default)
    }

    pub fn get_byte(&self, key: impl Into<Key>, default: i8) -> i8 {
        self.raw(key).as_byte().unwrap_or(default)
    }

    pub fn get_short(&self, key: impl Into<Key>, default: i16) -> i16 {
        self.raw(key).as_short().unwrap_or(default)
    }

    pub fn get_int(&self, key: impl Into<Key>, default: i32) -> i32 {
        self.raw(key).as_int().unwrap_or(default)
    }

    pub fn get_long(&self, key: impl Into<Key>, default: i64) -> i64 {
        self.raw(key).as_long().unwrap_or(default)
    }

    pub fn get_float(&self, key: impl Into<Key>, default: f32) -> f32 {
        self.raw(key).as_float().unwrap_or(default)
    }

    pub fn get_double(&self, key: impl Into<Key>, default: f64) -> f64 {
        self.raw(key).as_double().unwrap_or(default)
    }

    /// Reads an enum constant of type `E`.
    ///
    /// An enum node of exactly `E` is returned as-is. A string node is matched
    /// by name, first exactly and then uppercased.
    pub fn get_enum_or_none<E: ConfigEnum>(&self, key: impl Into<Key>) -> Option<E> {
        match self.raw(key) {
            Node::Enum(value) => value.get::<E>(),
            Node::String(name) => {
                E::from_name(&name).or_else(|| E::from_name(&name.to_uppercase()))
            }
            _ => None,
        }
    }

    pub fn get_enum<E: ConfigEnum>(&self, key: impl Into<Key>, default: E) -> E {
        self.get_enum_or_none(key).unwrap_or(default)
    }

    /// View of the list under `key`, or of a fresh empty list.
    pub fn get_list(&self, key: impl Into<Key>) -> ListView {
        match self.raw(key) {
            Node::List(list) => list.as_view(),
            _ => ListView::empty(),
        }
    }

    /// View of the map under `key`, or of a fresh empty map.
    pub fn get_map(&self, key: impl Into<Key>) -> MapView {
        match self.raw(key) {
            Node::Map(map) => map.as_view(),
            _ => MapView::empty(),
        }
    }
}

// =============================================================================
// OWNER
// =============================================================================

impl MapNode {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            view: MapView::from_entries(Entries::with_capacity(capacity)),
        }
    }

    /// Stores `value` under `key`, returning the previous value or `Null`.
    ///
    /// Storing `Null` removes the key. Otherwise the key moves to the end of
    /// the map, and a comment on the previous value carries over unless the
    /// new value brings its own.
    pub fn set(&self, key: impl Into<Key>, value: impl IntoNode) -> Node {
        let key = key.into();
        let node = value.into_node();
        let mut entries = self.backing.borrow_mut();
        let previous = entries.remove(&key);
        if node.is_null() {
            return previous.unwrap_or_default();
        }
        let inherited = match &previous {
            Some(previous) if !node.has_comment() => previous.comment_or_none(),
            _ => None,
        };
        let node = match inherited {
            Some(comment) => node.with_comment(Some(comment)),
            None => node,
        };
        entries.insert(key, node);
        previous.unwrap_or_default()
    }

    /// Stores `value` only if `key` is absent. Returns the existing value if
    /// there was one.
    pub fn set_if_absent(&self, key: impl Into<Key>, value: impl IntoNode) -> Option<Node> {
        let key = key.into();
        if let Some(existing) = self.backing.borrow().get(&key) {
            return Some(existing.clone());
        }
        let node = value.into_node();
        if !node.is_null() {
            self.backing.borrow_mut().insert(key, node);
        }
        None
    }

    /// Overwrites `key` in place only if it is present, returning the
    /// previous value or `Null`. Replacing with `Null` removes the key.
    pub fn replace(&self, key: impl Into<Key>, value: impl IntoNode) -> Node {
        let key = key.into();
        let node = value.into_node();
        let mut entries = self.backing.borrow_mut();
        if node.is_null() {
            return entries.remove(&key).unwrap_or_default();
        }
        if entries.get(&key).is_none() {
            return Node::Null;
        }
        entries.insert(key, node).unwrap_or_default()
    }

    /// Removes `key`, returning its value or `Null`.
    pub fn remove(&self, key: impl Into<Key>) -> Node {
        self.backing
            .borrow_mut()
            .remove(&key.into())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        self.backing.borrow_mut().clear();
    }

    /// Sets every entry of `other` into this map, in order.
    pub fn put_all(&self, other: &MapView) {
        for (key, node) in other.iter() {
            self.set(key, node);
        }
    }

    /// Creates an empty list under `key`, replacing any previous value.
    pub fn create_list(&self, key: impl Into<Key>) -> ListNode {
        let list = ListNode::new();
        self.backing
            .borrow_mut()
            .insert(key.into(), Node::List(list.clone()));
        list
    }

    /// Returns the list under `key`, creating it if the value is not a list.
    pub fn get_or_create_list(&self, key: impl Into<Key>) -> ListNode {
        let key = key.into();
        match self.raw(key.clone()) {
            Node::List(list) => list,
            _ => self.create_list(key),
        }
    }

    pub fn create_map(&self, key: impl Into<Key>) -> MapNode {
        let map = MapNode::new();
        self.backing
            .borrow_mut()
            .insert(key.into(), Node::Map(map.clone()));
        map
    }

    pub fn get_or_create_map(&self, key: impl Into<Key>) -> MapNode {
        let key = key.into();
        match self.raw(key.clone()) {
            Node::Map(map) => map,
            _ => self.create_map(key),
        }
    }

    /// Sets or clears the comment, visible through every view.
    pub fn set_comment(&self, comment: Option<Comment>) {
        *self.comment.borrow_mut() = comment;
    }

    /// Inserts a decoded entry verbatim, `Null` values included.
    pub(crate) fn insert_raw(&self, key: Key, node: Node) {
        self.backing.borrow_mut().insert(key, node);
    }
}

impl Default for MapNode {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for MapNode {
    type Target = MapView;

    fn deref(&self) -> &MapView {
        &self.view
    }
}

/// Builds a map from key/value pairs. Later duplicates overwrite earlier
/// ones in place; `Null` values are kept.
impl<K: Into<Key>, V: IntoNode> FromIterator<(K, V)> for MapNode {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Entries::default();
        for (key, value) in iter {
            entries.insert(key.into(), value.into_node());
        }
        MapNode {
            view: MapView::from_entries(entries),
        }
    }
}

impl PartialEq for MapView {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.backing, &other.backing)
    }
}

impl PartialEq for MapNode {
    fn eq(&self, other: &Self) -> bool {
        self.view == other.view
    }
}

impl PartialEq<MapView> for MapNode {
    fn eq(&self, other: &MapView) -> bool {
        self.view == *other
    }
}

impl PartialEq<MapNode> for MapView {
    fn eq(&self, other: &MapNode) -> bool {
        *self == other.view
    }
}

impl fmt::Debug for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        map.entries(self.backing.borrow().entries.iter().map(|(k, v)| (k, v)));
        map.finish()?;
        if let Some(comment) = self.comment.borrow().as_ref() {
            write!(f, " /* {} */", comment.content())?;
        }
        Ok(())
    }
}

impl fmt::Debug for MapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.view, f)
    }
}
