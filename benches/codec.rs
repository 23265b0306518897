use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use nbt_schema::{Compound, List, NbtTree, SchemaNode, Tag, TagID};

fn chunk_like_tree() -> NbtTree {
    let mut sections = List::new(TagID::Compound);
    for y in 0..16i8 {
        let mut section = Compound::new();
        section.insert("Y", y);
        section.insert("Blocks", vec![1i8; 4096]);
        section.insert("Data", vec![0i8; 2048]);
        section.insert("SkyLight", vec![-1i8; 2048]);
        section.insert("BlockLight", vec![0i8; 2048]);
        sections.push(section).unwrap();
    }

    let mut level = Compound::new();
    level.insert("xPos", 3i32);
    level.insert("zPos", -7i32);
    level.insert("LastUpdate", 123_456i64);
    level.insert("HeightMap", vec![64i32; 256]);
    level.insert("Sections", sections);

    let mut root = Compound::new();
    root.insert("Level", level);
    NbtTree::from(root)
}

fn section_schema() -> SchemaNode {
    SchemaNode::compound("", [SchemaNode::compound(
        "Level",
        [
            SchemaNode::scalar("xPos", TagID::Int),
            SchemaNode::scalar("zPos", TagID::Int),
            SchemaNode::int_array("HeightMap", Some(256)),
            SchemaNode::list("Sections", TagID::Compound).with_element(SchemaNode::compound(
                "",
                [
                    SchemaNode::scalar("Y", TagID::Byte),
                    SchemaNode::byte_array("Blocks", Some(4096)),
                    SchemaNode::byte_array("Data", Some(2048)),
                    SchemaNode::byte_array("SkyLight", Some(2048)),
                    SchemaNode::byte_array("BlockLight", Some(2048)),
                ],
            )),
        ],
    )])
}

fn bench_codec(c: &mut Criterion) {
    let tree = chunk_like_tree();
    let bytes = tree.to_vec().unwrap();

    c.bench_function("read chunk", |b| {
        b.iter(|| NbtTree::from_slice(black_box(&bytes)).unwrap())
    });
    c.bench_function("write chunk", |b| b.iter(|| black_box(&tree).to_vec().unwrap()));

    let schema = section_schema();
    let tag = Tag::Compound(tree.root.clone());
    c.bench_function("verify chunk", |b| {
        b.iter(|| schema.validate(black_box(&tag)))
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
