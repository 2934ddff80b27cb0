//! Depth-first traversal of a node tree.
//!
//! Every callback returns a [`VisitResult`] that steers the walk:
//!
//! | Result     | From `start_*`                   | From `visit_element` / `visit_entry` |
//! |------------|----------------------------------|--------------------------------------|
//! | `Continue` | visit the children               | descend into the child               |
//! | `Skip`     | skip the container, no `end_*`   | do not descend, go to next sibling   |
//! | `Break`    | skip the children, call `end_*`  | stop this container, call `end_*`    |
//! | `Stop`     | abort the whole traversal        | abort the whole traversal            |
//!
//! A container returns the result of its `end_*` callback, so an `end_*`
//! returning `Break` also ends the enclosing container.
//!
//! Lists and maps are walked by index with a fresh read per element, so a
//! visitor may hold views of the tree without conflicting borrows.

use super::{ArrayNode, CommentedNode, EnumValue, Key, ListView, MapView, Node, ObjectNode};

/// Instruction returned by every [`NodeVisitor`] callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitResult {
    Continue,
    Skip,
    Break,
    Stop,
}

/// Callbacks invoked by [`Node::accept`]. Every method defaults to
/// [`VisitResult::Continue`].
#[allow(unused_variables)]
pub trait NodeVisitor {
    fn visit_null(&mut self) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_bool(&mut self, value: bool) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_byte(&mut self, value: i8) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_short(&mut self, value: i16) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_int(&mut self, value: i32) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_long(&mut self, value: i64) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_float(&mut self, value: f32) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_double(&mut self, value: f64) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_char(&mut self, value: char) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_string(&mut self, value: &str) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_enum(&mut self, value: &EnumValue) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_array(&mut self, array: &ArrayNode) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_object(&mut self, object: &ObjectNode) -> VisitResult {
        VisitResult::Continue
    }

    fn start_list(&mut self, list: &ListView) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_element(&mut self, index: usize, node: &Node) -> VisitResult {
        VisitResult::Continue
    }

    fn end_list(&mut self, list: &ListView) -> VisitResult {
        VisitResult::Continue
    }

    fn start_map(&mut self, map: &MapView) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_entry(&mut self, index: usize, key: &Key, node: &Node) -> VisitResult {
        VisitResult::Continue
    }

    fn end_map(&mut self, map: &MapView) -> VisitResult {
        VisitResult::Continue
    }

    /// Called before the wrapped node. Anything but `Continue` is returned
    /// without visiting it.
    fn visit_commented(&mut self, node: &CommentedNode) -> VisitResult {
        VisitResult::Continue
    }
}

impl Node {
    /// Walks this node depth-first with `visitor`.
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        match self {
            Node::Null => visitor.visit_null(),
            Node::Bool(v) => visitor.visit_bool(*v),
            Node::Byte(v) => visitor.visit_byte(*v),
            Node::Short(v) => visitor.visit_short(*v),
            Node::Int(v) => visitor.visit_int(*v),
            Node::Long(v) => visitor.visit_long(*v),
            Node::Float(v) => visitor.visit_float(*v),
            Node::Double(v) => visitor.visit_double(*v),
            Node::Char(v) => visitor.visit_char(*v),
            Node::String(v) => visitor.visit_string(v),
            Node::Enum(v) => visitor.visit_enum(v),
            Node::Array(v) => visitor.visit_array(v),
            Node::Object(v) => visitor.visit_object(v),
            Node::List(list) => list.accept(visitor),
            Node::Map(map) => map.accept(visitor),
            Node::Commented(commented) => match visitor.visit_commented(commented) {
                VisitResult::Continue => commented.node().accept(visitor),
                other => other,
            },
        }
    }
}

impl ListView {
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        match visitor.start_list(self) {
            VisitResult::Continue => {}
            VisitResult::Break => return visitor.end_list(self),
            other => return other,
        }

        let mut index = 0;
        while let Some(node) = self.try_get(index) {
            let result = match visitor.visit_element(index, &node) {
                VisitResult::Continue => node.accept(visitor),
                other => other,
            };
            match result {
                VisitResult::Break => break,
                VisitResult::Stop => return VisitResult::Stop,
                VisitResult::Continue | VisitResult::Skip => {}
            }
            index += 1;
        }

        visitor.end_list(self)
    }
}

impl MapView {
    pub fn accept<V: NodeVisitor + ?Sized>(&self, visitor: &mut V) -> VisitResult {
        match visitor.start_map(self) {
            VisitResult::Continue => {}
            VisitResult::Break => return visitor.end_map(self),
            other => return other,
        }

        let mut index = 0;
        while let Some((key, node)) = self.entry_at(index) {
            let result = match visitor.visit_entry(index, &key, &node) {
                VisitResult::Continue => node.accept(visitor),
                other => other,
            };
            match result {
                VisitResult::Break => break,
                VisitResult::Stop => return VisitResult::Stop,
                VisitResult::Continue | VisitResult::Skip => {}
            }
            index += 1;
        }

        visitor.end_map(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, ListNode, MapNode};

    /// Records every callback as a short event string.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
        on_start_list: Option<VisitResult>,
        on_element: Option<(usize, VisitResult)>,
        on_entry: Option<(usize, VisitResult)>,
    }

    impl NodeVisitor for Recorder {
        fn visit_int(&mut self, value: i32) -> VisitResult {
            self.events.push(format!("int {value}"));
            VisitResult::Continue
        }

        fn visit_string(&mut self, value: &str) -> VisitResult {
            self.events.push(format!("str {value}"));
            VisitResult::Continue
        }

        fn start_list(&mut self, _list: &ListView) -> VisitResult {
            self.events.push("[".to_string());
            self.on_start_list.take().unwrap_or(VisitResult::Continue)
        }

        fn visit_element(&mut self, index: usize, _node: &Node) -> VisitResult {
            match self.on_element {
                Some((at, result)) if at == index => result,
                _ => VisitResult::Continue,
            }
        }

        fn end_list(&mut self, _list: &ListView) -> VisitResult {
            self.events.push("]".to_string());
            VisitResult::Continue
        }

        fn start_map(&mut self, _map: &MapView) -> VisitResult {
            self.events.push("{".to_string());
            VisitResult::Continue
        }

        fn visit_entry(&mut self, index: usize, key: &Key, _node: &Node) -> VisitResult {
            self.events.push(format!("key {key}"));
            match self.on_entry {
                Some((at, result)) if at == index => result,
                _ => VisitResult::Continue,
            }
        }

        fn end_map(&mut self, _map: &MapView) -> VisitResult {
            self.events.push("}".to_string());
            VisitResult::Continue
        }

        fn visit_commented(&mut self, node: &CommentedNode) -> VisitResult {
            let content = node.comment_or_none().map(Comment::content).unwrap_or("");
            self.events.push(format!("# {content}"));
            VisitResult::Continue
        }
    }

    fn numbers() -> Node {
        Node::List((1..=3).collect())
    }

    #[test]
    fn test_full_walk_order() {
        let map = MapNode::new();
        map.set("a", 1);
        let list = map.create_list("b");
        list.add("x");
        map.set("c", Node::Int(2).with_comment(Some(Comment::new("two"))));

        let mut recorder = Recorder::default();
        let result = Node::Map(map).accept(&mut recorder);
        assert_eq!(result, VisitResult::Continue);
        assert_eq!(
            recorder.events,
            [
                "{", "key a", "int 1", "key b", "[", "str x", "]", "key c", "# two", "int 2",
                "}"
            ]
        );
    }

    #[test]
    fn test_skip_element_continues_with_siblings() {
        let mut recorder = Recorder {
            on_element: Some((1, VisitResult::Skip)),
            ..Default::default()
        };
        assert_eq!(numbers().accept(&mut recorder), VisitResult::Continue);
        assert_eq!(recorder.events, ["[", "int 1", "int 3", "]"]);
    }

    #[test]
    fn test_break_element_still_calls_end() {
        let mut recorder = Recorder {
            on_element: Some((1, VisitResult::Break)),
            ..Default::default()
        };
        assert_eq!(numbers().accept(&mut recorder), VisitResult::Continue);
        assert_eq!(recorder.events, ["[", "int 1", "]"]);
    }

    #[test]
    fn test_stop_aborts_everything() {
        let outer = ListNode::new();
        outer.add_list().add_all([1, 2]);
        outer.add(3);

        let mut recorder = Recorder {
            on_element: Some((0, VisitResult::Stop)),
            ..Default::default()
        };
        assert_eq!(Node::List(outer).accept(&mut recorder), VisitResult::Stop);
        assert_eq!(recorder.events, ["["]);
    }

    #[test]
    fn test_start_skip_and_break() {
        let mut recorder = Recorder {
            on_start_list: Some(VisitResult::Skip),
            ..Default::default()
        };
        assert_eq!(numbers().accept(&mut recorder), VisitResult::Skip);
        assert_eq!(recorder.events, ["["]);

        let mut recorder = Recorder {
            on_start_list: Some(VisitResult::Break),
            ..Default::default()
        };
        assert_eq!(numbers().accept(&mut recorder), VisitResult::Continue);
        assert_eq!(recorder.events, ["[", "]"]);
    }

    #[test]
    fn test_entry_skip_in_map() {
        let map = MapNode::new();
        map.set("a", 1);
        map.set("b", 2);

        let mut recorder = Recorder {
            on_entry: Some((0, VisitResult::Skip)),
            ..Default::default()
        };
        Node::Map(map).accept(&mut recorder);
        assert_eq!(recorder.events, ["{", "key a", "key b", "int 2", "}"]);
    }

    #[test]
    fn test_visitor_may_mutate_through_handles() {
        struct Doubler;

        impl NodeVisitor for Doubler {
            fn visit_element(&mut self, _index: usize, node: &Node) -> VisitResult {
                if let Some(list) = node.as_list() {
                    list.add(0);
                }
                VisitResult::Skip
            }
        }

        let outer = ListNode::new();
        let inner = outer.add_list();
        Node::List(outer).accept(&mut Doubler);
        assert_eq!(inner.len(), 1);
    }
}
