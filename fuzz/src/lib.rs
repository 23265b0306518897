use std::sync::LazyLock;

use nbt_schema::{
    BigEndian, Config, LittleEndian, NbtTree, SchemaNode, StringEncoding, Tag, TagID,
};

static LEVEL: LazyLock<SchemaNode> = LazyLock::new(|| {
    SchemaNode::compound(
        "",
        [SchemaNode::compound(
            "Data",
            [
                SchemaNode::scalar("SpawnX", TagID::Int),
                SchemaNode::scalar("SpawnY", TagID::Int),
                SchemaNode::list("Players", TagID::Compound)
                    .with_element(SchemaNode::compound(
                        "",
                        [SchemaNode::string_max_len("Name", 16)],
                    ))
                    .optional(),
                SchemaNode::byte_array("Blocks", Some(16)).optional(),
            ],
        )],
    )
});

/// Anything that decodes encodes to bytes that decode back to the same bytes.
pub fn test_codec(data: &[u8]) {
    if let Ok(tree) = NbtTree::from_slice(data) {
        let bytes = tree.to_vec().expect("decoded tree must encode");
        let again = NbtTree::from_slice(&bytes).expect("encoded tree must decode");
        assert_eq!(again.to_vec().expect("decoded tree must encode"), bytes);
    }

    let config = Config {
        string_encoding: StringEncoding::Mutf8,
        ..Config::default()
    };
    // Lossy decoding can grow a string past the 16-bit limit.
    let decoded = NbtTree::from_slice_with::<LittleEndian>(data, &config);
    if let Ok(bytes) = decoded.and_then(|tree| tree.to_vec_with::<LittleEndian>(&config)) {
        let again = NbtTree::from_slice_with::<LittleEndian>(&bytes, &config)
            .expect("encoded tree must decode");
        assert_eq!(
            again.to_vec_with::<LittleEndian>(&config).expect("decoded tree must encode"),
            bytes
        );
    }
}

/// Verification never panics, and a repaired tree of a valid one is unchanged.
pub fn test_schema(data: &[u8]) {
    let Ok(tree) = NbtTree::from_slice_with::<BigEndian>(data, &Config::default()) else {
        return;
    };
    let mut tag = tree.into_tag();
    let valid = LEVEL.validate(&tag);
    let before = tag.clone();
    let repaired = LEVEL.repair(&mut tag).is_ok();
    assert_eq!(valid, repaired);
    if valid {
        assert_eq!(tag.tag_id(), before.tag_id());
        assert_eq!(tag.length(), before.length());
    }
    assert!(LEVEL.validate(&LEVEL.build_default_tree()));
}

pub fn test_serde(data: &[u8]) {
    if let Ok(tree) = NbtTree::from_slice(data) {
        let _ = serde_json::to_string(&Tag::Compound(tree.root));
    }
    if let Ok(tag) = serde_json::from_slice::<Tag>(data) {
        let _ = serde_json::to_vec(&tag);
    }
}

pub fn test_all(data: &[u8]) {
    test_codec(data);
    test_schema(data);
    test_serde(data);
}
