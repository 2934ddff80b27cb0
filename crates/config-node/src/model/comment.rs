//! Comments attached to nodes.
//!
//! Lists and maps carry a comment slot of their own, shared with their views.
//! Every other node gets one by being wrapped in a [`CommentedNode`].

use std::cell::RefCell;
use std::rc::Rc;

use super::Node;
use crate::error::NodeError;

/// Free-form comment text with an optional kind tag (e.g. `"line"`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Comment {
    content: String,
    kind: String,
}

impl Comment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: String::new(),
        }
    }

    pub fn with_kind(content: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            kind: kind.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Empty when no kind was given.
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl From<&str> for Comment {
    fn from(content: &str) -> Self {
        Comment::new(content)
    }
}

impl From<String> for Comment {
    fn from(content: String) -> Self {
        Comment::new(content)
    }
}

/// Comment slot of a list or map, shared by the owner handle and its views.
pub(crate) type CommentCell = Rc<RefCell<Option<Comment>>>;

pub(crate) fn new_cell(comment: Option<Comment>) -> CommentCell {
    Rc::new(RefCell::new(comment))
}

/// A node that cannot hold a comment itself, paired with one.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentedNode {
    node: Box<Node>,
    comment: Option<Comment>,
}

impl CommentedNode {
    pub(crate) fn new(node: Node, comment: Option<Comment>) -> Self {
        Self {
            node: Box::new(node),
            comment,
        }
    }

    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn into_parts(self) -> (Node, Option<Comment>) {
        (*self.node, self.comment)
    }

    pub fn has_comment(&self) -> bool {
        self.comment.is_some()
    }

    pub fn comment(&self) -> Result<&Comment, NodeError> {
        self.comment.as_ref().ok_or(NodeError::CommentNotSet)
    }

    pub fn comment_or_none(&self) -> Option<&Comment> {
        self.comment.as_ref()
    }

    pub fn set_comment(&mut self, comment: Option<Comment>) {
        self.comment = comment;
    }
}

/// Attaches `comment` to `node`, returning the commented node.
///
/// Lists and maps store it in their own slot (replacing any previous one)
/// and are returned as-is. A [`Node::Commented`] has its comment replaced.
/// Any other node is wrapped in a [`CommentedNode`], even when `comment` is
/// `None`.
pub fn with_comment(node: Node, comment: Option<Comment>) -> Node {
    match node {
        Node::List(list) => {
            list.set_comment(comment);
            Node::List(list)
        }
        Node::Map(map) => {
            map.set_comment(comment);
            Node::Map(map)
        }
        Node::Commented(mut commented) => {
            commented.set_comment(comment);
            Node::Commented(commented)
        }
        other => Node::Commented(CommentedNode::new(other, comment)),
    }
}

impl Node {
    /// See [`with_comment`].
    pub fn with_comment(self, comment: Option<Comment>) -> Node {
        with_comment(self, comment)
    }

    pub fn has_comment(&self) -> bool {
        match self {
            Node::List(list) => list.has_comment(),
            Node::Map(map) => map.has_comment(),
            Node::Commented(commented) => commented.has_comment(),
            _ => false,
        }
    }

    /// Returns the attached comment, or [`NodeError::CommentNotSet`].
    pub fn comment(&self) -> Result<Comment, NodeError> {
        self.comment_or_none().ok_or(NodeError::CommentNotSet)
    }

    pub fn comment_or_none(&self) -> Option<Comment> {
        match self {
            Node::List(list) => list.comment_or_none(),
            Node::Map(map) => map.comment_or_none(),
            Node::Commented(commented) => commented.comment_or_none().cloned(),
            _ => None,
        }
    }
}
