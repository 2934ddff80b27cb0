//! Benchmark for config-node serialization using a synthetic server fleet.
//!
//! Builds a large tree of maps, lists, arrays and strings, then times the
//! plain and zstd-compressed binary formats.
//!
//! Usage: `bench-config [servers] [output-dir]`

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use config_node::{ArrayNode, BinaryFormat, MapNode, Node};
use uuid::Uuid;

const DECODE_ITERS: u32 = 10;

const REGIONS: [&str; 6] = [
    "us-east", "us-west", "eu-central", "eu-west", "ap-south", "ap-northeast",
];

/// Builds a tree with one entry per server under `servers`.
fn build_fleet(servers: usize) -> MapNode {
    let root = MapNode::new();
    root.set("version", 3);
    root.set("generated-by", "bench-config");

    let defaults = root.create_map("defaults");
    defaults.set("timeout-ms", 2500i64);
    defaults.set("retries", 3i8);
    defaults.set("tls", true);

    let fleet = root.create_map("servers");
    for i in 0..servers {
        let server = fleet.create_map(Uuid::new_v4().to_string());
        server.set("name", format!("node-{i:06}"));
        server.set("region", REGIONS[i % REGIONS.len()]);
        server.set("port", 8000 + (i % 1000) as i32);
        server.set("weight", (i % 17) as f64 / 16.0);
        server.set("enabled", i % 7 != 0);

        let tags = server.create_list("tags");
        tags.add_all(["web", REGIONS[(i + 1) % REGIONS.len()]]);
        if i % 3 == 0 {
            tags.add("canary");
        }

        let history: Vec<f32> = (0..24).map(|h| ((i + h) % 100) as f32 / 10.0).collect();
        server.set("load-history", ArrayNode::from(history));
    }
    root
}

fn main() {
    let mut args = std::env::args().skip(1);
    let servers: usize = args
        .next()
        .map(|s| s.parse().expect("servers must be a number"))
        .unwrap_or(50_000);
    let output_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("config-node-bench"));

    let build_start = Instant::now();
    let root = build_fleet(servers);
    let build_time = build_start.elapsed();
    println!("Built {} servers in {:?}", servers, build_time);

    let node = Node::Map(root);

    // Plain encoding
    let plain = BinaryFormat::DEFAULT;
    let encode_start = Instant::now();
    let plain_bytes = plain.to_bytes(&node).expect("Failed to encode");
    let encode_time = encode_start.elapsed();
    println!(
        "Encoded {} bytes in {:?} ({:.1} MB/s)",
        plain_bytes.len(),
        encode_time,
        plain_bytes.len() as f64 / encode_time.as_secs_f64() / 1_000_000.0
    );

    let decode_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let decoded = plain.from_bytes(&plain_bytes).expect("Failed to decode");
        std::hint::black_box(decoded);
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;
    println!("Decoded in {:?} (avg of {} runs)", decode_time, DECODE_ITERS);

    // Compressed encoding
    println!("\n=== Compression ===");
    for level in [1, 3, 9, 19] {
        let format = BinaryFormat::compressed(level);
        let compress_start = Instant::now();
        let compressed = format.to_bytes(&node).expect("Failed to compress");
        let compress_time = compress_start.elapsed();

        let decompress_start = Instant::now();
        let decoded = format.from_bytes(&compressed).expect("Failed to decompress");
        let decompress_time = decompress_start.elapsed();

        assert!(decoded.deep_eq(&node), "compressed roundtrip mismatch");
        println!(
            "zstd {:>2}: {:>10} bytes ({:.1}% of plain), encode {:?}, decode {:?}",
            level,
            compressed.len(),
            compressed.len() as f64 / plain_bytes.len() as f64 * 100.0,
            compress_time,
            decompress_time
        );
    }

    // Files
    let output_plain = output_dir.join("fleet.bin");
    let output_compressed = output_dir.join("fleet.bin.zst");
    plain.save(&node, &output_plain).expect("Failed to write file");
    BinaryFormat::compressed(3)
        .save(&node, &output_compressed)
        .expect("Failed to write file");

    let reloaded = plain.load(&output_plain).expect("Failed to read file");
    assert!(reloaded.deep_eq(&node), "file roundtrip mismatch");

    println!("\n=== Output Files ===");
    for path in [&output_plain, &output_compressed] {
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        println!("{} ({} bytes)", path.display(), size);
    }
}
