//! Loading and saving trees as files, streams or byte buffers.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{DecodeError, EncodeError, FormatError};
use crate::limits::MAX_DECOMPRESSED_SIZE;
use crate::model::{MapNode, MapView, Node};

use super::node::{decode_node, encode_map, encode_node};

/// The binary file format, optionally wrapped in a zstd frame.
///
/// Reading a missing file or an empty stream yields an empty tree rather than
/// an error: [`Node::Null`] from the `load*` methods, an empty map from the
/// `load_map*` methods.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryFormat {
    compression_level: Option<i32>,
}

impl BinaryFormat {
    /// Plain, uncompressed encoding.
    pub const DEFAULT: BinaryFormat = BinaryFormat {
        compression_level: None,
    };

    /// Encoding compressed with zstd at `level`.
    pub const fn compressed(level: i32) -> Self {
        Self {
            compression_level: Some(level),
        }
    }

    pub fn compression_level(&self) -> Option<i32> {
        self.compression_level
    }

    pub fn to_bytes(&self, node: &Node) -> Result<Vec<u8>, EncodeError> {
        self.compress(encode_node(node)?)
    }

    pub fn map_to_bytes(&self, map: &MapView) -> Result<Vec<u8>, EncodeError> {
        self.compress(encode_map(map)?)
    }

    /// Decodes a buffer produced by [`BinaryFormat::to_bytes`] with the same
    /// settings. An empty buffer decodes to [`Node::Null`].
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<Node, DecodeError> {
        if bytes.is_empty() {
            return Ok(Node::Null);
        }
        match self.compression_level {
            None => decode_node(bytes),
            Some(_) => decode_node(&decompress(bytes)?),
        }
    }

    /// Reads a tree from `path`. A path that is not a regular file reads as
    /// [`Node::Null`].
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Node, FormatError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Ok(Node::Null);
        }
        let bytes = fs::read(path)?;
        Ok(self.from_bytes(&bytes)?)
    }

    pub fn load_from<R: Read>(&self, mut reader: R) -> Result<Node, FormatError> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        Ok(self.from_bytes(&bytes)?)
    }

    /// Like [`BinaryFormat::load`], but the root must be a map.
    pub fn load_map(&self, path: impl AsRef<Path>) -> Result<MapNode, FormatError> {
        into_map(self.load(path)?)
    }

    pub fn load_map_from<R: Read>(&self, reader: R) -> Result<MapNode, FormatError> {
        into_map(self.load_from(reader)?)
    }

    /// Writes `node` to `path`, creating missing parent directories.
    pub fn save(&self, node: &Node, path: impl AsRef<Path>) -> Result<(), FormatError> {
        write_file(path.as_ref(), &self.to_bytes(node)?)
    }

    pub fn save_map(&self, map: &MapView, path: impl AsRef<Path>) -> Result<(), FormatError> {
        write_file(path.as_ref(), &self.map_to_bytes(map)?)
    }

    pub fn save_to<W: Write>(&self, node: &Node, mut writer: W) -> Result<(), FormatError> {
        writer.write_all(&self.to_bytes(node)?)?;
        writer.flush()?;
        Ok(())
    }

    fn compress(&self, plain: Vec<u8>) -> Result<Vec<u8>, EncodeError> {
        match self.compression_level {
            None => Ok(plain),
            Some(level) => zstd::encode_all(plain.as_slice(), level)
                .map_err(|e| EncodeError::CompressionFailed(e.to_string())),
        }
    }
}

fn decompress(compressed: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let decoder = zstd::Decoder::new(compressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    let mut decompressed = Vec::new();
    decoder
        .take(MAX_DECOMPRESSED_SIZE as u64 + 1)
        .read_to_end(&mut decompressed)
        .map_err(|e| DecodeError::DecompressionFailed(e.to_string()))?;

    if decompressed.len() > MAX_DECOMPRESSED_SIZE {
        return Err(DecodeError::SizeExceedsLimit {
            context: "decompressed payload",
            size: decompressed.len() as u64,
            max: MAX_DECOMPRESSED_SIZE as u64,
        });
    }
    Ok(decompressed)
}

fn into_map(node: Node) -> Result<MapNode, FormatError> {
    match node {
        Node::Null => Ok(MapNode::new()),
        Node::Map(map) => Ok(map),
        other => Err(FormatError::NotAMap { found: other.kind() }),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), FormatError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Key, ListNode};
    use std::path::PathBuf;
    use uuid::Uuid;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new() -> Self {
            Self(std::env::temp_dir().join(format!("config-node-{}", Uuid::new_v4())))
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn sample() -> MapNode {
        let map = MapNode::new();
        map.set("a", "b");
        map.create_list("list").add_all([1, 2, 3]);
        map
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = TempDir::new();
        let path = dir.0.join("nested").join("dirs").join("config.bin");
        let map = sample();

        BinaryFormat::DEFAULT.save(&Node::Map(map.clone()), &path).unwrap();
        assert!(path.is_file());

        let loaded = BinaryFormat::DEFAULT.load_map(&path).unwrap();
        assert!(loaded.deep_eq(&map));
        assert_eq!(loaded.keys(), vec![Key::from("a"), Key::from("list")]);
        assert_eq!(loaded.get_list("list").as_list::<i32>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new();
        let path = dir.0.join("absent.bin");
        assert_eq!(BinaryFormat::DEFAULT.load(&path).unwrap(), Node::Null);
        assert!(BinaryFormat::DEFAULT.load_map(&path).unwrap().is_empty());
        assert_eq!(BinaryFormat::DEFAULT.load(std::env::temp_dir()).unwrap(), Node::Null);
    }

    #[test]
    fn test_empty_stream_is_empty() {
        let empty: &[u8] = &[];
        assert_eq!(BinaryFormat::DEFAULT.load_from(empty).unwrap(), Node::Null);
        assert!(BinaryFormat::compressed(3).load_map_from(empty).unwrap().is_empty());
    }

    #[test]
    fn test_stream_roundtrip() {
        let list = ListNode::new();
        list.add("x");
        let node = Node::List(list);

        let mut buf = Vec::new();
        BinaryFormat::DEFAULT.save_to(&node, &mut buf).unwrap();
        let loaded = BinaryFormat::DEFAULT.load_from(buf.as_slice()).unwrap();
        assert!(loaded.deep_eq(&node));
    }

    #[test]
    fn test_load_map_rejects_other_roots() {
        let bytes = BinaryFormat::DEFAULT.to_bytes(&Node::Int(1)).unwrap();
        let result = BinaryFormat::DEFAULT.load_map_from(bytes.as_slice());
        assert!(matches!(result, Err(FormatError::NotAMap { found: "int" })));
    }

    #[test]
    fn test_compressed_roundtrip() {
        let map = sample();
        for i in 0..200 {
            map.set(format!("key-{i}"), "repetitive value");
        }
        let format = BinaryFormat::compressed(3);

        let plain = BinaryFormat::DEFAULT.map_to_bytes(&map).unwrap();
        let compressed = format.map_to_bytes(&map).unwrap();
        assert!(compressed.len() < plain.len());

        let loaded = format.from_bytes(&compressed).unwrap();
        assert!(loaded.deep_eq(&Node::Map(map)));

        assert!(matches!(
            BinaryFormat::DEFAULT.from_bytes(&compressed),
            Err(_)
        ));
        assert!(matches!(
            format.from_bytes(&plain),
            Err(DecodeError::DecompressionFailed(_))
        ));
    }

    #[test]
    fn test_save_map_view() {
        let dir = TempDir::new();
        let path = dir.0.join("view.bin");
        let map = sample();

        BinaryFormat::compressed(1).save_map(&map.as_view(), &path).unwrap();
        let loaded = BinaryFormat::compressed(1).load(&path).unwrap();
        assert!(loaded.deep_eq(&Node::Map(map)));
    }
}
