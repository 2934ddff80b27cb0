//! Simple dumper to inspect binary config files.
//!
//! Usage: `cargo run --example dump_file -- <path> [zstd-level]`

use config_node::model::{ArrayNode, CommentedNode, Key, ListView, MapView, Node};
use config_node::{BinaryFormat, NodeVisitor, VisitResult};

/// Counts nodes by kind and prints the tree with one entry per line.
#[derive(Default)]
struct Dumper {
    depth: usize,
    lists: usize,
    maps: usize,
    scalars: usize,
    arrays: usize,
    comments: usize,
}

impl Dumper {
    fn indent(&self) -> String {
        "  ".repeat(self.depth)
    }

    fn leaf(&mut self, text: String) -> VisitResult {
        self.scalars += 1;
        println!("{}", text);
        VisitResult::Continue
    }
}

impl NodeVisitor for Dumper {
    fn visit_null(&mut self) -> VisitResult {
        self.leaf("null".to_string())
    }

    fn visit_bool(&mut self, value: bool) -> VisitResult {
        self.leaf(value.to_string())
    }

    fn visit_byte(&mut self, value: i8) -> VisitResult {
        self.leaf(format!("{}b", value))
    }

    fn visit_short(&mut self, value: i16) -> VisitResult {
        self.leaf(format!("{}s", value))
    }

    fn visit_int(&mut self, value: i32) -> VisitResult {
        self.leaf(value.to_string())
    }

    fn visit_long(&mut self, value: i64) -> VisitResult {
        self.leaf(format!("{}L", value))
    }

    fn visit_float(&mut self, value: f32) -> VisitResult {
        self.leaf(format!("{}f", Node::Float(value)))
    }

    fn visit_double(&mut self, value: f64) -> VisitResult {
        self.leaf(Node::Double(value).to_string())
    }

    fn visit_char(&mut self, value: char) -> VisitResult {
        self.leaf(format!("'{}'", value))
    }

    fn visit_string(&mut self, value: &str) -> VisitResult {
        let preview: String = value.chars().take(80).collect();
        if value.chars().count() > 80 {
            self.leaf(format!("\"{}...\"", preview))
        } else {
            self.leaf(format!("\"{}\"", preview))
        }
    }

    fn visit_array(&mut self, array: &ArrayNode) -> VisitResult {
        self.arrays += 1;
        if array.len() > 16 {
            println!("{}[{} elements]", array.kind(), array.len());
        } else {
            println!("{}", array);
        }
        VisitResult::Continue
    }

    fn start_list(&mut self, list: &ListView) -> VisitResult {
        self.lists += 1;
        println!("list ({} elements)", list.len());
        self.depth += 1;
        VisitResult::Continue
    }

    fn visit_element(&mut self, index: usize, _node: &Node) -> VisitResult {
        print!("{}- [{}] ", self.indent(), index);
        VisitResult::Continue
    }

    fn end_list(&mut self, _list: &ListView) -> VisitResult {
        self.depth -= 1;
        VisitResult::Continue
    }

    fn start_map(&mut self, map: &MapView) -> VisitResult {
        self.maps += 1;
        println!("map ({} entries)", map.len());
        self.depth += 1;
        VisitResult::Continue
    }

    fn visit_entry(&mut self, _index: usize, key: &Key, _node: &Node) -> VisitResult {
        print!("{}{}: ", self.indent(), key);
        VisitResult::Continue
    }

    fn end_map(&mut self, _map: &MapView) -> VisitResult {
        self.depth -= 1;
        VisitResult::Continue
    }

    fn visit_commented(&mut self, _node: &CommentedNode) -> VisitResult {
        self.comments += 1;
        VisitResult::Continue
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "config.bin".to_string());
    let format = match args.next() {
        Some(level) => BinaryFormat::compressed(level.parse().expect("Invalid zstd level")),
        None => BinaryFormat::DEFAULT,
    };

    println!("Reading: {}", path);

    let root = format.load(&path).expect("Failed to load");
    if root.is_null() {
        println!("Empty or missing file");
        return;
    }

    println!("\n=== Tree ===");
    let mut dumper = Dumper::default();
    root.accept(&mut dumper);

    println!("\n=== Summary ===");
    println!("Maps:     {}", dumper.maps);
    println!("Lists:    {}", dumper.lists);
    println!("Arrays:   {}", dumper.arrays);
    println!("Scalars:  {}", dumper.scalars);
    println!("Comments: {}", dumper.comments);
}
