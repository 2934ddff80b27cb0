//! Node encoding/decoding.
//!
//! Every node starts with a header byte: the high 3 bits are the size class,
//! the low 5 bits the data type. Value types use `0x00..=0x0F`. Structures
//! set bit `0x10`: a list is `0x10`, a primitive array is `0x10` or'ed with
//! its element's value type, and a map is `0x1F`. A non-empty list holding
//! only strings is written as `0x1A` followed by its elements as string nodes.
//!
//! Only strings and structures carry a size; every other value type must use
//! size class 0. Multi-byte numbers are big-endian.

use crate::error::{DecodeError, EncodeError};
use crate::limits::{MAX_DEPTH, MAX_PREALLOC};
use crate::model::{ArrayNode, Key, ListNode, MapNode, MapView, Node};

use super::primitives::{Reader, Writer, DATA_TYPE_MASK, SIZE_CLASS_SHIFT};

/// Data type codes of the header byte.
pub mod data_type {
    pub const NULL: u8 = 0x00;
    pub const FALSE: u8 = 0x01;
    pub const TRUE: u8 = 0x02;
    pub const BYTE: u8 = 0x03;
    pub const SHORT: u8 = 0x04;
    pub const INT: u8 = 0x05;
    pub const LONG: u8 = 0x06;
    pub const FLOAT: u8 = 0x07;
    pub const DOUBLE: u8 = 0x08;
    pub const CHAR: u8 = 0x09;
    pub const STRING: u8 = 0x0A;

    /// Structure bit. On its own it marks a list of nodes.
    pub const ARRAY: u8 = 0x10;
    pub const LIST: u8 = ARRAY | NULL;
    pub const BOOL_ARRAY: u8 = ARRAY | FALSE;
    pub const BYTE_ARRAY: u8 = ARRAY | BYTE;
    pub const SHORT_ARRAY: u8 = ARRAY | SHORT;
    pub const INT_ARRAY: u8 = ARRAY | INT;
    pub const LONG_ARRAY: u8 = ARRAY | LONG;
    pub const FLOAT_ARRAY: u8 = ARRAY | FLOAT;
    pub const DOUBLE_ARRAY: u8 = ARRAY | DOUBLE;
    pub const CHAR_ARRAY: u8 = ARRAY | CHAR;
    /// A list whose elements are all strings.
    pub const STRING_LIST: u8 = ARRAY | STRING;
    pub const MAP: u8 = 0x1F;

    /// Mask extracting the element value type of an array.
    pub const VALUE_TYPE_MASK: u8 = 0x0F;
}

use data_type::*;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a single node that must span all of `input`.
///
/// Empty input decodes to [`Node::Null`].
pub fn decode_node(input: &[u8]) -> Result<Node, DecodeError> {
    if input.is_empty() {
        return Ok(Node::Null);
    }
    let mut reader = Reader::new(input);
    let node = read_node(&mut reader, 0)?;
    if !reader.is_empty() {
        return Err(DecodeError::TrailingBytes {
            count: reader.remaining_len(),
        });
    }
    Ok(node)
}

/// Reads one node (and its children) from `reader`.
pub fn read_node(reader: &mut Reader<'_>, depth: usize) -> Result<Node, DecodeError> {
    let header = reader.read_byte("header")?;
    let dt = header & DATA_TYPE_MASK;

    match dt {
        MAP => read_map(reader, header, depth),
        LIST => read_list(reader, header, depth),
        STRING_LIST => read_string_list(reader, header, depth),
        STRING => {
            let len = reader.read_size(header, "string")?;
            Ok(Node::string(reader.read_str(len, "string")?))
        }
        _ if dt & ARRAY != 0 => read_array(reader, header),
        _ => {
            let size_class = header >> SIZE_CLASS_SHIFT;
            if size_class != 0 {
                return Err(DecodeError::UnexpectedSizeClass {
                    data_type: dt,
                    size_class,
                });
            }
            read_scalar(reader, dt)
        }
    }
}

fn read_scalar(reader: &mut Reader<'_>, dt: u8) -> Result<Node, DecodeError> {
    let node = match dt {
        NULL => Node::Null,
        FALSE => Node::Bool(false),
        TRUE => Node::Bool(true),
        BYTE => Node::Byte(reader.read_i8("byte")?),
        SHORT => Node::Short(reader.read_i16("short")?),
        INT => Node::Int(reader.read_i32("int")?),
        LONG => Node::Long(reader.read_i64("long")?),
        FLOAT => Node::Float(reader.read_f32("float")?),
        DOUBLE => Node::Double(reader.read_f64("double")?),
        CHAR => Node::Char(reader.read_char("char")?),
        _ => return Err(DecodeError::UnsupportedDataType { data_type: dt }),
    };
    Ok(node)
}

fn check_depth(depth: usize) -> Result<usize, DecodeError> {
    let next = depth + 1;
    if next > MAX_DEPTH {
        return Err(DecodeError::DepthExceedsLimit { max: MAX_DEPTH });
    }
    Ok(next)
}

fn read_list(reader: &mut Reader<'_>, header: u8, depth: usize) -> Result<Node, DecodeError> {
    let size = reader.read_size(header, "list")?;
    let depth = check_depth(depth)?;

    let list = ListNode::with_capacity(size.min(MAX_PREALLOC));
    for _ in 0..size {
        list.push_raw(read_node(reader, depth)?);
    }
    Ok(Node::List(list))
}

fn read_string_list(
    reader: &mut Reader<'_>,
    header: u8,
    depth: usize,
) -> Result<Node, DecodeError> {
    let size = reader.read_size(header, "string list")?;
    check_depth(depth)?;

    let list = ListNode::with_capacity(size.min(MAX_PREALLOC));
    for _ in 0..size {
        let element = reader.read_byte("string list element")?;
        let dt = element & DATA_TYPE_MASK;
        if dt != STRING {
            return Err(DecodeError::UnsupportedDataType { data_type: dt });
        }
        let len = reader.read_size(element, "string")?;
        list.push_raw(Node::string(reader.read_str(len, "string")?));
    }
    Ok(Node::List(list))
}

fn read_map(reader: &mut Reader<'_>, header: u8, depth: usize) -> Result<Node, DecodeError> {
    let size = reader.read_size(header, "map")?;
    let depth = check_depth(depth)?;

    let map = MapNode::with_capacity(size.min(MAX_PREALLOC));
    for _ in 0..size {
        let key_node = read_node(reader, depth)?;
        let key = Key::from_node(&key_node).ok_or(DecodeError::InvalidKey {
            kind: key_node.kind(),
        })?;
        let value = read_node(reader, depth)?;
        map.insert_raw(key, value);
    }
    Ok(Node::Map(map))
}

/// Reads `size` fixed-width elements after checking the payload is present.
fn read_elements<'a, const N: usize>(
    reader: &mut Reader<'a>,
    size: usize,
    context: &'static str,
) -> Result<impl Iterator<Item = [u8; N]> + 'a, DecodeError> {
    let len = size
        .checked_mul(N)
        .ok_or(DecodeError::UnexpectedEof { context })?;
    let bytes = reader.read_bytes(len, context)?;
    Ok(bytes.chunks_exact(N).map(|chunk| {
        let mut out = [0u8; N];
        out.copy_from_slice(chunk);
        out
    }))
}

fn read_array(reader: &mut Reader<'_>, header: u8) -> Result<Node, DecodeError> {
    let value_type = header & DATA_TYPE_MASK & VALUE_TYPE_MASK;
    let size = reader.read_size(header, "array")?;

    let array = match value_type {
        FALSE => {
            let bytes = reader.read_bytes(size, "bool array")?;
            let values = bytes
                .iter()
                .map(|&b| match b {
                    0 => Ok(false),
                    1 => Ok(true),
                    value => Err(DecodeError::InvalidBool { value }),
                })
                .collect::<Result<Vec<_>, _>>()?;
            ArrayNode::from(values)
        }
        BYTE => {
            let bytes = reader.read_bytes(size, "byte array")?;
            ArrayNode::from(bytes.iter().map(|&b| b as i8).collect::<Vec<_>>())
        }
        SHORT => ArrayNode::from(
            read_elements(reader, size, "short array")?
                .map(i16::from_be_bytes)
                .collect::<Vec<_>>(),
        ),
        INT => ArrayNode::from(
            read_elements(reader, size, "int array")?
                .map(i32::from_be_bytes)
                .collect::<Vec<_>>(),
        ),
        LONG => ArrayNode::from(
            read_elements(reader, size, "long array")?
                .map(i64::from_be_bytes)
                .collect::<Vec<_>>(),
        ),
        FLOAT => ArrayNode::from(
            read_elements(reader, size, "float array")?
                .map(f32::from_be_bytes)
                .collect::<Vec<_>>(),
        ),
        DOUBLE => ArrayNode::from(
            read_elements(reader, size, "double array")?
                .map(f64::from_be_bytes)
                .collect::<Vec<_>>(),
        ),
        CHAR => {
            let values = read_elements(reader, size, "char array")?
                .map(|bytes| {
                    let value = u32::from_be_bytes(bytes);
                    char::from_u32(value).ok_or(DecodeError::InvalidChar { value })
                })
                .collect::<Result<Vec<_>, _>>()?;
            ArrayNode::from(values)
        }
        _ => return Err(DecodeError::UnsupportedArrayType { value_type }),
    };
    Ok(Node::Array(array))
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes `node` into a new buffer.
pub fn encode_node(node: &Node) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(64);
    write_node(&mut writer, node, 0)?;
    Ok(writer.into_bytes())
}

/// Encodes the map behind `map` into a new buffer.
pub fn encode_map(map: &MapView) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(64);
    write_map(&mut writer, map, 0)?;
    Ok(writer.into_bytes())
}

/// Writes `node` (and its children) to `writer`.
///
/// Comments are not written: a commented node is encoded as the node it
/// wraps, and list/map comments are dropped. Enum constants are written as
/// their name. Object nodes cannot be encoded.
pub fn write_node(writer: &mut Writer, node: &Node, depth: usize) -> Result<(), EncodeError> {
    match node {
        Node::Null => writer.write_byte(NULL),
        Node::Bool(false) => writer.write_byte(FALSE),
        Node::Bool(true) => writer.write_byte(TRUE),
        Node::Byte(v) => {
            writer.write_byte(BYTE);
            writer.write_i8(*v);
        }
        Node::Short(v) => {
            writer.write_byte(SHORT);
            writer.write_i16(*v);
        }
        Node::Int(v) => {
            writer.write_byte(INT);
            writer.write_i32(*v);
        }
        Node::Long(v) => {
            writer.write_byte(LONG);
            writer.write_i64(*v);
        }
        Node::Float(v) => {
            writer.write_byte(FLOAT);
            writer.write_f32(*v);
        }
        Node::Double(v) => {
            writer.write_byte(DOUBLE);
            writer.write_f64(*v);
        }
        Node::Char(v) => {
            writer.write_byte(CHAR);
            writer.write_char(*v);
        }
        Node::String(v) => write_str(writer, v)?,
        Node::Enum(v) => write_str(writer, v.name())?,
        Node::Array(array) => write_array(writer, array)?,
        Node::List(list) => {
            let depth = next_depth(depth)?;
            let nodes = list.to_vec();
            let strings: Option<Vec<&str>> = nodes.iter().map(Node::as_str).collect();
            match strings {
                Some(strings) if !strings.is_empty() => {
                    writer.write_header(STRING_LIST, strings.len(), "string list")?;
                    for value in strings {
                        write_str(writer, value)?;
                    }
                }
                _ => {
                    writer.write_header(LIST, nodes.len(), "list")?;
                    for element in &nodes {
                        write_node(writer, element, depth)?;
                    }
                }
            }
        }
        Node::Map(map) => write_map(writer, map, depth)?,
        Node::Object(_) => return Err(EncodeError::Unsupported { kind: "object" }),
        Node::Commented(commented) => write_node(writer, commented.node(), depth)?,
    }
    Ok(())
}

fn next_depth(depth: usize) -> Result<usize, EncodeError> {
    let next = depth + 1;
    if next > MAX_DEPTH {
        return Err(EncodeError::DepthExceedsLimit { max: MAX_DEPTH });
    }
    Ok(next)
}

fn write_str(writer: &mut Writer, value: &str) -> Result<(), EncodeError> {
    writer.write_header(STRING, value.len(), "string")?;
    writer.write_bytes(value.as_bytes());
    Ok(())
}

fn write_map(writer: &mut Writer, map: &MapView, depth: usize) -> Result<(), EncodeError> {
    let depth = next_depth(depth)?;
    let entries: Vec<_> = map.iter().collect();
    writer.write_header(MAP, entries.len(), "map")?;
    for (key, value) in &entries {
        write_node(writer, &key.to_node(), depth)?;
        write_node(writer, value, depth)?;
    }
    Ok(())
}

fn write_array(writer: &mut Writer, array: &ArrayNode) -> Result<(), EncodeError> {
    match array {
        ArrayNode::Bool(values) => {
            writer.write_header(BOOL_ARRAY, values.len(), "bool array")?;
            values.iter().for_each(|v| writer.write_bool(*v));
        }
        ArrayNode::Byte(values) => {
            writer.write_header(BYTE_ARRAY, values.len(), "byte array")?;
            values.iter().for_each(|v| writer.write_i8(*v));
        }
        ArrayNode::Short(values) => {
            writer.write_header(SHORT_ARRAY, values.len(), "short array")?;
            values.iter().for_each(|v| writer.write_i16(*v));
        }
        ArrayNode::Int(values) => {
            writer.write_header(INT_ARRAY, values.len(), "int array")?;
            values.iter().for_each(|v| writer.write_i32(*v));
        }
        ArrayNode::Long(values) => {
            writer.write_header(LONG_ARRAY, values.len(), "long array")?;
            values.iter().for_each(|v| writer.write_i64(*v));
        }
        ArrayNode::Float(values) => {
            writer.write_header(FLOAT_ARRAY, values.len(), "float array")?;
            values.iter().for_each(|v| writer.write_f32(*v));
        }
        ArrayNode::Double(values) => {
            writer.write_header(DOUBLE_ARRAY, values.len(), "double array")?;
            values.iter().for_each(|v| writer.write_f64(*v));
        }
        ArrayNode::Char(values) => {
            writer.write_header(CHAR_ARRAY, values.len(), "char array")?;
            values.iter().for_each(|v| writer.write_char(*v));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Comment, ObjectNode};
    use proptest::prelude::*;

    const BOUNDARY_SIZES: [usize; 10] = [0, 1, 2, 3, 4, 5, 255, 256, 65535, 65536];

    fn roundtrip(node: &Node) -> Node {
        let bytes = encode_node(node).unwrap();
        decode_node(&bytes).unwrap()
    }

    #[test]
    fn test_scalar_roundtrip() {
        let values = [
            Node::Null,
            Node::Bool(true),
            Node::Bool(false),
            Node::Byte(i8::MIN),
            Node::Byte(0),
            Node::Byte(i8::MAX),
            Node::Short(i16::MIN),
            Node::Short(i16::MAX),
            Node::Int(i32::MIN),
            Node::Int(0),
            Node::Int(i32::MAX),
            Node::Long(i64::MIN),
            Node::Long(i64::MAX),
            Node::Float(f32::MIN_POSITIVE),
            Node::Float(f32::NEG_INFINITY),
            Node::Double(-0.0),
            Node::Double(f64::MAX),
            Node::Double(f64::NAN),
            Node::Char('a'),
            Node::Char('\u{1F600}'),
            Node::string(""),
            Node::string("config"),
            Node::string("日本語のテキスト"),
        ];
        for value in &values {
            assert_eq!(&roundtrip(value), value, "roundtrip of {value:?}");
        }
    }

    #[test]
    fn test_wire_layout() {
        assert_eq!(encode_node(&Node::Null).unwrap(), vec![0x00]);
        assert_eq!(encode_node(&Node::Bool(true)).unwrap(), vec![0x02]);
        assert_eq!(encode_node(&Node::Int(1)).unwrap(), vec![0x05, 0, 0, 0, 1]);
        assert_eq!(encode_node(&Node::string("ab")).unwrap(), vec![0x4A, b'a', b'b']);

        let map: MapNode = vec![("a", 1i8)].into_iter().collect();
        assert_eq!(
            encode_node(&Node::Map(map)).unwrap(),
            vec![0x3F, 0x2A, b'a', 0x03, 0x01]
        );
    }

    #[test]
    fn test_string_size_boundaries() {
        for size in BOUNDARY_SIZES {
            let node = Node::string(&"x".repeat(size));
            assert_eq!(roundtrip(&node), node, "string of {size} bytes");
        }
    }

    #[test]
    fn test_list_size_boundaries() {
        for size in BOUNDARY_SIZES {
            let list: ListNode = (0..size).map(|i| i as i32).collect();
            let decoded = roundtrip(&Node::List(list.clone()));
            assert!(decoded.deep_eq(&Node::List(list)), "list of {size} elements");
        }
    }

    #[test]
    fn test_string_list_size_boundaries() {
        for size in BOUNDARY_SIZES {
            let list: ListNode = (0..size).map(|i| format!("s{i}")).collect();
            let bytes = encode_node(&Node::List(list.clone())).unwrap();
            let expected = if size == 0 { LIST } else { STRING_LIST };
            assert_eq!(bytes[0] & DATA_TYPE_MASK, expected, "list of {size} strings");

            let decoded = decode_node(&bytes).unwrap();
            assert!(decoded.deep_eq(&Node::List(list)), "list of {size} strings");
        }
    }

    #[test]
    fn test_string_list_layout() {
        let list: ListNode = ["x", "yz"].into_iter().collect();
        list.add(Node::string("c").with_comment(Some(Comment::new("note"))));
        assert_eq!(
            encode_node(&Node::List(list)).unwrap(),
            vec![0x7A, 0x2A, b'x', 0x4A, b'y', b'z', 0x2A, b'c']
        );

        let decoded = decode_node(&[0x3A, 0x2A, b'x']).unwrap();
        assert_eq!(decoded.as_list().unwrap().as_list::<String>(), vec!["x"]);

        let mixed: ListNode = ["x"].into_iter().collect();
        mixed.add(1);
        assert_eq!(encode_node(&Node::List(mixed)).unwrap()[0], 0x50);
    }

    #[test]
    fn test_nested_lists_keep_decoded_children() {
        let mut bytes = vec![0x30; 400];
        bytes.push(0x25);
        bytes.extend_from_slice(&[0, 0, 0, 7]);

        let mut node = decode_node(&bytes).unwrap();
        for _ in 0..400 {
            node = node.as_list().unwrap().get(0);
        }
        assert_eq!(node, Node::Int(7));
    }

    #[test]
    fn test_map_size_boundaries() {
        for size in BOUNDARY_SIZES {
            let map: MapNode = (0..size).map(|i| (i as i32, i % 2 == 0)).collect();
            let decoded = roundtrip(&Node::Map(map.clone()));
            assert!(decoded.deep_eq(&Node::Map(map)), "map of {size} entries");
        }
    }

    #[test]
    fn test_array_size_boundaries() {
        for size in BOUNDARY_SIZES {
            let arrays = [
                ArrayNode::from(vec![true; size]),
                ArrayNode::from(vec![-1i8; size]),
                ArrayNode::from((0..size).map(|i| i as i16).collect::<Vec<_>>()),
                ArrayNode::from((0..size).map(|i| i as i32).collect::<Vec<_>>()),
                ArrayNode::from((0..size).map(|i| i as i64).collect::<Vec<_>>()),
                ArrayNode::from((0..size).map(|i| i as f32).collect::<Vec<_>>()),
                ArrayNode::from((0..size).map(|i| i as f64 / 3.0).collect::<Vec<_>>()),
                ArrayNode::from(vec!['z'; size]),
            ];
            for array in arrays {
                let node = Node::Array(array);
                assert_eq!(roundtrip(&node), node, "{} of {size} elements", node.kind());
            }
        }
    }

    #[test]
    fn test_nested_structure_roundtrip() {
        let root = MapNode::new();
        root.set("name", "server");
        let ports = root.create_list("ports");
        ports.add_all([80, 443]);
        let limits = root.create_map("limits");
        limits.set(1i64, 2.5f32);
        limits.set('c', ArrayNode::from(vec![1i16, 2]));
        ports.add_map().set(true, Node::Null);

        let decoded = roundtrip(&Node::Map(root.clone()));
        assert!(decoded.deep_eq(&Node::Map(root)));
    }

    #[test]
    fn test_null_map_values_survive_decoding() {
        let map: MapNode = vec![("gone", None::<i32>)].into_iter().collect();
        let decoded = roundtrip(&Node::Map(map));
        let decoded = decoded.as_map().unwrap();
        assert!(decoded.contains_key("gone"));
        assert_eq!(decoded.get("gone"), Node::Null);
    }

    #[test]
    fn test_comments_and_enums_are_flattened() {
        let list = ListNode::new();
        list.set_comment(Some(Comment::new("list")));
        list.add(Node::Int(1).with_comment(Some(Comment::new("one"))));
        list.add(crate::model::EnumValue::new(
            &crate::model::enum_value::tests::Color::Red,
        ));

        let decoded = roundtrip(&Node::List(list));
        let decoded = decoded.as_list().unwrap();
        assert!(!decoded.has_comment());
        assert_eq!(decoded.to_vec(), vec![Node::Int(1), Node::string("RED")]);
    }

    #[test]
    fn test_object_is_rejected() {
        let list = ListNode::new();
        list.add(ObjectNode::new(1u8));
        assert_eq!(
            encode_node(&Node::List(list)),
            Err(EncodeError::Unsupported { kind: "object" })
        );
    }

    #[test]
    fn test_empty_input_is_null() {
        assert_eq!(decode_node(&[]).unwrap(), Node::Null);
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            decode_node(&[0x0E]),
            Err(DecodeError::UnsupportedDataType { data_type: 0x0E })
        );
        assert_eq!(
            decode_node(&[0x12, 0x00]),
            Err(DecodeError::UnsupportedArrayType { value_type: 0x02 })
        );
        assert_eq!(
            decode_node(&[0x25]),
            Err(DecodeError::UnexpectedSizeClass { data_type: 0x05, size_class: 1 })
        );
        assert_eq!(
            decode_node(&[0x05, 0, 0]),
            Err(DecodeError::UnexpectedEof { context: "int" })
        );
        assert_eq!(
            decode_node(&[0x00, 0x00]),
            Err(DecodeError::TrailingBytes { count: 1 })
        );
        assert_eq!(
            decode_node(&[0x3F, 0x10, 0x00]),
            Err(DecodeError::InvalidKey { kind: "list" })
        );
        assert_eq!(
            decode_node(&[0x31, 0x02]),
            Err(DecodeError::InvalidBool { value: 2 })
        );
        assert_eq!(
            decode_node(&[0x3A, 0x05, 0, 0, 0, 1]),
            Err(DecodeError::UnsupportedDataType { data_type: 0x05 })
        );
    }

    #[test]
    fn test_huge_declared_size_fails_cleanly() {
        let bytes = [0xF0, 0x7F, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            decode_node(&bytes),
            Err(DecodeError::UnexpectedEof { .. })
        ));
        let bytes = [0xF5, 0x7F, 0xFF, 0xFF, 0xFF];
        assert!(matches!(
            decode_node(&bytes),
            Err(DecodeError::UnexpectedEof { context: "int array" })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let mut bytes = vec![0x30; MAX_DEPTH + 1];
        bytes.push(0x10);
        assert_eq!(
            decode_node(&bytes),
            Err(DecodeError::DepthExceedsLimit { max: MAX_DEPTH })
        );

        let root = ListNode::new();
        let mut current = root.clone();
        for _ in 0..MAX_DEPTH {
            current = current.add_list();
        }
        assert_eq!(
            encode_node(&Node::List(root)),
            Err(EncodeError::DepthExceedsLimit { max: MAX_DEPTH })
        );
    }

    fn arb_scalar() -> impl Strategy<Value = Node> {
        prop_oneof![
            Just(Node::Null),
            any::<bool>().prop_map(Node::Bool),
            any::<i8>().prop_map(Node::Byte),
            any::<i16>().prop_map(Node::Short),
            any::<i32>().prop_map(Node::Int),
            any::<i64>().prop_map(Node::Long),
            any::<f32>().prop_map(Node::Float),
            any::<f64>().prop_map(Node::Double),
            any::<char>().prop_map(Node::Char),
            ".*".prop_map(|s: String| Node::string(&s)),
        ]
    }

    fn arb_node() -> impl Strategy<Value = Node> {
        arb_scalar().prop_recursive(4, 64, 8, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8)
                    .prop_map(|nodes| Node::List(nodes.into_iter().collect())),
                prop::collection::vec(("[a-z]{1,6}", inner), 0..8).prop_map(|entries| {
                    Node::Map(entries.into_iter().collect::<MapNode>())
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_scalar_roundtrip(node in arb_scalar()) {
            prop_assert_eq!(roundtrip(&node), node);
        }

        #[test]
        fn prop_tree_roundtrip(node in arb_node()) {
            let decoded = roundtrip(&node);
            prop_assert!(decoded.deep_eq(&node));
        }

        #[test]
        fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
            let _ = decode_node(&bytes);
        }
    }
}
