//! Compact single-line rendering of a tree.
//!
//! Maps render as `{key=value,other=[1,2]}` and lists as `[a,b]`. Strings
//! containing a space or a quote are quoted, with `"` and `\` escaped.

use std::fmt;

use super::number::{format_double, format_float};
use super::{ArrayNode, EnumValue, Key, ListNode, ListView, MapNode, MapView, Node, ObjectNode};
use super::{NodeVisitor, VisitResult};

/// Appends `value` to `out`, quoting and escaping it when needed.
pub fn quote_and_escape(value: &str, out: &mut String) {
    if value.is_empty() {
        out.push_str("\"\"");
        return;
    }

    let start = out.len();
    let mut quote = false;
    for c in value.chars() {
        match c {
            '\\' => out.push('\\'),
            '"' => {
                quote = true;
                out.push('\\');
            }
            ' ' | '\'' => quote = true,
            _ => {}
        }
        out.push(c);
    }

    if quote {
        out.insert(start, '"');
        out.push('"');
    }
}

/// Visitor that renders a tree into a string.
#[derive(Debug, Default)]
pub struct StringVisitor {
    out: String,
}

impl StringVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn push_key(&mut self, key: &Key) {
        match key {
            Key::String(name) => quote_and_escape(name, &mut self.out),
            other => {
                other.to_node().accept(self);
            }
        }
    }
}

impl NodeVisitor for StringVisitor {
    fn visit_null(&mut self) -> VisitResult {
        self.out.push_str("null");
        VisitResult::Continue
    }

    fn visit_bool(&mut self, value: bool) -> VisitResult {
        self.out.push_str(if value { "true" } else { "false" });
        VisitResult::Continue
    }

    fn visit_byte(&mut self, value: i8) -> VisitResult {
        self.out.push_str(&value.to_string());
        VisitResult::Continue
    }

    fn visit_short(&mut self, value: i16) -> VisitResult {
        self.out.push_str(&value.to_string());
        VisitResult::Continue
    }

    fn visit_int(&mut self, value: i32) -> VisitResult {
        self.out.push_str(&value.to_string());
        VisitResult::Continue
    }

    fn visit_long(&mut self, value: i64) -> VisitResult {
        self.out.push_str(&value.to_string());
        VisitResult::Continue
    }

    fn visit_float(&mut self, value: f32) -> VisitResult {
        self.out.push_str(&format_float(value));
        VisitResult::Continue
    }

    fn visit_double(&mut self, value: f64) -> VisitResult {
        self.out.push_str(&format_double(value));
        VisitResult::Continue
    }

    fn visit_char(&mut self, value: char) -> VisitResult {
        self.out.push(value);
        VisitResult::Continue
    }

    fn visit_string(&mut self, value: &str) -> VisitResult {
        quote_and_escape(value, &mut self.out);
        VisitResult::Continue
    }

    fn visit_enum(&mut self, value: &EnumValue) -> VisitResult {
        self.out.push_str(value.name());
        VisitResult::Continue
    }

    fn visit_array(&mut self, array: &ArrayNode) -> VisitResult {
        self.out.push_str(&array.to_string());
        VisitResult::Continue
    }

    fn visit_object(&mut self, object: &ObjectNode) -> VisitResult {
        self.out.push('<');
        self.out.push_str(object.type_name());
        self.out.push('>');
        VisitResult::Continue
    }

    fn start_list(&mut self, _list: &ListView) -> VisitResult {
        self.out.push('[');
        VisitResult::Continue
    }

    fn visit_element(&mut self, index: usize, _node: &Node) -> VisitResult {
        if index != 0 {
            self.out.push(',');
        }
        VisitResult::Continue
    }

    fn end_list(&mut self, _list: &ListView) -> VisitResult {
        self.out.push(']');
        VisitResult::Continue
    }

    fn start_map(&mut self, _map: &MapView) -> VisitResult {
        self.out.push('{');
        VisitResult::Continue
    }

    fn visit_entry(&mut self, index: usize, key: &Key, _node: &Node) -> VisitResult {
        if index != 0 {
            self.out.push(',');
        }
        self.push_key(key);
        self.out.push('=');
        VisitResult::Continue
    }

    fn end_map(&mut self, _map: &MapView) -> VisitResult {
        self.out.push('}');
        VisitResult::Continue
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visitor = StringVisitor::new();
        self.accept(&mut visitor);
        f.write_str(visitor.as_str())
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visitor = StringVisitor::new();
        self.accept(&mut visitor);
        f.write_str(visitor.as_str())
    }
}

impl fmt::Display for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl fmt::Display for MapView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visitor = StringVisitor::new();
        self.accept(&mut visitor);
        f.write_str(visitor.as_str())
    }
}

impl fmt::Display for MapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Comment;

    fn escaped(value: &str) -> String {
        let mut out = String::new();
        quote_and_escape(value, &mut out);
        out
    }

    #[test]
    fn test_quote_and_escape() {
        assert_eq!(escaped(""), "\"\"");
        assert_eq!(escaped("test"), "test");
        assert_eq!(escaped("test's"), "\"test's\"");
        assert_eq!(escaped("test s"), "\"test s\"");
        assert_eq!(escaped("test\"A\""), "\"test\\\"A\\\"\"");
        assert_eq!(escaped("a\\b"), "a\\\\b");
    }

    #[test]
    fn test_render_sample_tree() {
        let map = MapNode::new();
        map.set("string", "value");
        map.set("integer", 100);
        map.set("double", 2.5f64);
        map.set("bool", true);
        map.create_list("list").add_all(["A", "B", "C"]);
        map.create_map("map").set("key", "value");
        map.create_map("nested").create_map("map").set("key", "value");
        map.set("array", ArrayNode::from(vec![1i32, 2, 3]));
        map.set(
            "commented",
            Node::string("commented").with_comment(Some(Comment::new("note"))),
        );
        map.set("test's \"key\"", "test's \"value\"");

        assert_eq!(
            map.to_string(),
            "{string=value,\
             integer=100,\
             double=2.5,\
             bool=true,\
             list=[A,B,C],\
             map={key=value},\
             nested={map={key=value}},\
             array=[1, 2, 3],\
             commented=commented,\
             \"test's \\\"key\\\"\"=\"test's \\\"value\\\"\"}"
        );
    }

    #[test]
    fn test_render_scalars_and_keys() {
        assert_eq!(Node::Null.to_string(), "null");
        assert_eq!(Node::Char('z').to_string(), "z");
        assert_eq!(Node::Float(f32::INFINITY).to_string(), "Infinity");

        let map = MapNode::new();
        map.set(7, "seven");
        map.set(1.5f64, "");
        assert_eq!(map.to_string(), "{7=seven,1.5=\"\"}");
        assert_eq!(ListNode::new().to_string(), "[]");
    }
}
