//! Example: dumping an NBT file
//!
//! Reads an NBT file (uncompressed, gzip or zlib compressed), prints its
//! tree, and checks it against a small level.dat schema.
//!
//! Run with: cargo run --example dump -- <path_to_nbt_file>

use std::env;
use std::fs;
use std::io::Read;
use std::process::ExitCode;

use flate2::read::{GzDecoder, ZlibDecoder};
use nbt_schema::{NbtTree, SchemaNode, Tag, TagID};

fn decompress(raw: Vec<u8>) -> std::io::Result<Vec<u8>> {
    let mut out = Vec::new();
    match raw.as_slice() {
        [0x1f, 0x8b, ..] => {
            GzDecoder::new(&raw[..]).read_to_end(&mut out)?;
        }
        [0x78, ..] => {
            ZlibDecoder::new(&raw[..]).read_to_end(&mut out)?;
        }
        _ => return Ok(raw),
    }
    Ok(out)
}

fn dump(name: &str, tag: &Tag, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    match tag {
        Tag::Byte(v) => format!("{pad}{name}: Byte({v})\n"),
        Tag::Short(v) => format!("{pad}{name}: Short({v})\n"),
        Tag::Int(v) => format!("{pad}{name}: Int({v})\n"),
        Tag::Long(v) => format!("{pad}{name}: Long({v})\n"),
        Tag::Float(v) => format!("{pad}{name}: Float({v})\n"),
        Tag::Double(v) => format!("{pad}{name}: Double({v})\n"),
        Tag::ByteArray(v) => format!("{pad}{name}: ByteArray({} bytes)\n", v.len()),
        Tag::String(v) => format!("{pad}{name}: String({v:?})\n"),
        Tag::IntArray(v) => format!("{pad}{name}: IntArray({} ints)\n", v.len()),
        Tag::LongArray(v) => format!("{pad}{name}: LongArray({} longs)\n", v.len()),
        Tag::ShortArray(v) => format!("{pad}{name}: ShortArray({} shorts)\n", v.len()),
        Tag::List(list) => {
            let mut out = format!("{pad}{name}: List<{}>[{}]\n", list.element_id(), list.len());
            for (index, item) in list.iter().enumerate() {
                out.push_str(&dump(&format!("[{index}]"), item, indent + 1));
            }
            out
        }
        Tag::Compound(compound) => {
            let mut out = format!("{pad}{name}: Compound[{}]\n", compound.len());
            for (key, value) in compound {
                out.push_str(&dump(key, value, indent + 1));
            }
            out
        }
    }
}

fn level_schema() -> SchemaNode {
    SchemaNode::compound("", [SchemaNode::compound(
        "Data",
        [
            SchemaNode::scalar("SpawnX", TagID::Int),
            SchemaNode::scalar("SpawnY", TagID::Int),
            SchemaNode::scalar("SpawnZ", TagID::Int),
            SchemaNode::scalar("RandomSeed", TagID::Long),
            SchemaNode::string("LevelName").optional(),
        ],
    )])
}

fn main() -> ExitCode {
    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: dump <path_to_nbt_file>");
        return ExitCode::FAILURE;
    };

    let data = match fs::read(&path).and_then(decompress) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("failed to read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let tree = match NbtTree::from_slice(&data) {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("failed to parse {path}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let name = format!("{:?}", tree.name);
    let root = tree.into_tag();
    print!("{}", dump(&name, &root, 0));

    match level_schema().verify(&root) {
        Ok(()) => println!("looks like level data"),
        Err(e) => println!("not level data: {e}"),
    }

    ExitCode::SUCCESS
}
