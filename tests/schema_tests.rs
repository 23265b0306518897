//! Schema verification, default trees and schema merging

use nbt_schema::{
    Compound, List, NbtTree, Options, SchemaNode, Shape, Tag, TagID, VerifyError,
    VerifyErrorKind,
};

// ==================== Helpers ====================

fn item_schema() -> SchemaNode {
    SchemaNode::compound(
        "",
        [
            SchemaNode::scalar("id", TagID::Short),
            SchemaNode::scalar("Damage", TagID::Short),
            SchemaNode::scalar("Count", TagID::Byte),
            SchemaNode::scalar("Slot", TagID::Byte),
        ],
    )
}

fn furnace_schema() -> SchemaNode {
    SchemaNode::compound(
        "",
        [
            SchemaNode::scalar("BurnTime", TagID::Short),
            SchemaNode::scalar("CookTime", TagID::Short),
            SchemaNode::list("Items", TagID::Compound).with_element(item_schema()),
        ],
    )
}

fn item(id: i16, slot: i8) -> Compound {
    let mut item = Compound::new();
    item.insert("id", id);
    item.insert("Damage", 0i16);
    item.insert("Count", 1i8);
    item.insert("Slot", slot);
    item
}

fn furnace() -> Compound {
    let mut items = List::new(TagID::Compound);
    items.push(item(263, 1)).unwrap();
    items.push(item(4, 0)).unwrap();

    let mut furnace = Compound::new();
    furnace.insert("BurnTime", 200i16);
    furnace.insert("CookTime", 0i16);
    furnace.insert("Items", items);
    furnace
}

fn error_of(schema: &SchemaNode, tag: &Tag) -> VerifyError {
    match schema.verify(tag) {
        Err(err) => err,
        Ok(()) => panic!("expected {tag:?} to fail verification"),
    }
}

// ==================== Verification ====================

#[test]
fn test_valid_furnace() {
    let tag = Tag::Compound(furnace());
    assert_eq!(furnace_schema().verify(&tag), Ok(()));
    assert!(furnace_schema().validate(&tag));
}

#[test]
fn test_missing_required_field() {
    let mut furnace = furnace();
    furnace.remove("Items");

    let err = error_of(&furnace_schema(), &Tag::Compound(furnace));
    assert_eq!(err.path, "Items");
    assert_eq!(err.kind, VerifyErrorKind::MissingField);
    assert_eq!(err.to_string(), "Items: missing required field");
}

#[test]
fn test_optional_field_may_be_absent() {
    let schema = SchemaNode::compound(
        "",
        [
            SchemaNode::scalar("x", TagID::Int),
            SchemaNode::string("CustomName").optional(),
        ],
    );
    let mut compound = Compound::new();
    compound.insert("x", 1i32);
    assert!(schema.validate(&Tag::Compound(compound.clone())));

    // Present optional fields are still checked.
    compound.insert("CustomName", 5i32);
    let err = error_of(&schema, &Tag::Compound(compound));
    assert_eq!(err.path, "CustomName");
    assert_eq!(
        err.kind,
        VerifyErrorKind::TypeMismatch {
            expected: TagID::String,
            actual: TagID::Int,
        }
    );
}

#[test]
fn test_extra_fields_are_accepted() {
    let mut furnace = furnace();
    furnace.insert("Lock", "secret");
    furnace.insert("x", 10i32);
    assert!(furnace_schema().validate(&Tag::Compound(furnace)));
}

#[test]
fn test_root_type_mismatch() {
    let err = error_of(&furnace_schema(), &Tag::Int(3));
    assert_eq!(err.path, "");
    assert_eq!(
        err.kind,
        VerifyErrorKind::TypeMismatch {
            expected: TagID::Compound,
            actual: TagID::Int,
        }
    );
    assert_eq!(
        err.to_string(),
        "<root>: expected TAG_Compound, found TAG_Int"
    );
}

#[test]
fn test_error_path_into_list_element() {
    let mut furnace = furnace();
    if let Some(Tag::List(items)) = furnace.get_mut("Items") {
        items.set(1, item(4, 0)).unwrap();
        if let Some(Tag::Compound(second)) = items.get_mut(1) {
            second.insert("id", 4i32);
        }
    }

    let err = error_of(&furnace_schema(), &Tag::Compound(furnace));
    assert_eq!(err.path, "Items[1].id");
    assert_eq!(
        err.kind,
        VerifyErrorKind::TypeMismatch {
            expected: TagID::Short,
            actual: TagID::Int,
        }
    );
}

#[test]
fn test_list_element_kind() {
    let mut furnace = furnace();
    furnace.insert(
        "Items",
        List::from_tags(TagID::Int, [Tag::Int(1)]).unwrap(),
    );

    let err = error_of(&furnace_schema(), &Tag::Compound(furnace));
    assert_eq!(err.path, "Items");
    assert_eq!(
        err.kind,
        VerifyErrorKind::ListKindMismatch {
            expected: TagID::Compound,
            actual: TagID::Int,
        }
    );
}

#[test]
fn test_empty_list_of_any_type_is_accepted() {
    let mut furnace = furnace();
    furnace.insert("Items", List::new(TagID::Int));
    assert!(furnace_schema().validate(&Tag::Compound(furnace)));
}

#[test]
fn test_untyped_empty_list_from_file() {
    // {BurnTime: 0s, CookTime: 0s, Items: []} with the list written as TAG_End.
    let mut data = vec![0x0A, 0x00, 0x00];
    data.extend_from_slice(&[0x02, 0x00, 0x08]);
    data.extend_from_slice(b"BurnTime");
    data.extend_from_slice(&[0x00, 0x00]);
    data.extend_from_slice(&[0x02, 0x00, 0x08]);
    data.extend_from_slice(b"CookTime");
    data.extend_from_slice(&[0x00, 0x00]);
    data.extend_from_slice(&[0x09, 0x00, 0x05]);
    data.extend_from_slice(b"Items");
    data.extend_from_slice(&[0x00, 0x00, 0x00, 0x00, 0x00]);
    data.push(0x00);

    let mut tag = NbtTree::from_slice(&data).unwrap().into_tag();
    assert_eq!(furnace_schema().verify(&tag), Ok(()));

    let fixed = SchemaNode::compound(
        "",
        [SchemaNode::list("Items", TagID::Compound).with_len(0)],
    );
    assert!(fixed.validate(&tag));
    assert_eq!(furnace_schema().repair(&mut tag), Ok(()));
}

#[test]
fn test_zero_length_means_empty() {
    let array = SchemaNode::byte_array("b", Some(0));
    assert!(array.validate(&Tag::ByteArray(Vec::new())));
    assert_eq!(
        array.verify(&Tag::ByteArray(vec![1, 2, 3])),
        Err(VerifyError {
            path: String::new(),
            kind: VerifyErrorKind::LengthMismatch {
                expected: 0,
                actual: 3,
            },
        })
    );

    let list = SchemaNode::list("l", TagID::Int).with_len(0);
    assert!(list.validate(&Tag::List(List::new(TagID::Int))));
    assert!(!list.validate(&Tag::List(List::from_tags(TagID::Int, [Tag::Int(1)]).unwrap())));

    // Without a length any size passes.
    assert!(SchemaNode::byte_array("b", None).validate(&Tag::ByteArray(vec![1, 2, 3])));
}

#[test]
fn test_fixed_lengths() {
    let schema = SchemaNode::compound(
        "",
        [
            SchemaNode::byte_array("Blocks", Some(4)),
            SchemaNode::list("Pos", TagID::Double).with_len(3),
            SchemaNode::long_array("Empty", Some(0)),
            SchemaNode::int_array("Any", None),
        ],
    );

    let mut compound = Compound::new();
    compound.insert("Blocks", vec![0i8; 4]);
    compound.insert(
        "Pos",
        List::from_tags(TagID::Double, [Tag::Double(0.5), Tag::Double(64.0), Tag::Double(-3.5)])
            .unwrap(),
    );
    compound.insert("Empty", Vec::<i64>::new());
    compound.insert("Any", vec![1i32; 17]);
    assert!(schema.validate(&Tag::Compound(compound.clone())));

    compound.insert("Blocks", vec![0i8; 5]);
    let err = error_of(&schema, &Tag::Compound(compound.clone()));
    assert_eq!(err.path, "Blocks");
    assert_eq!(
        err.kind,
        VerifyErrorKind::LengthMismatch {
            expected: 4,
            actual: 5,
        }
    );

    compound.insert("Blocks", vec![0i8; 4]);
    compound.insert("Empty", vec![1i64]);
    let err = error_of(&schema, &Tag::Compound(compound.clone()));
    assert_eq!(err.path, "Empty");

    compound.insert("Empty", Vec::<i64>::new());
    compound.insert("Pos", List::new(TagID::Double));
    let err = error_of(&schema, &Tag::Compound(compound));
    assert_eq!(err.path, "Pos");
    assert_eq!(
        err.kind,
        VerifyErrorKind::LengthMismatch {
            expected: 3,
            actual: 0,
        }
    );
}

#[test]
fn test_string_constraints() {
    let schema = SchemaNode::compound(
        "",
        [
            SchemaNode::string_literal("id", "Furnace"),
            SchemaNode::string_max_len("Text1", 15).optional(),
        ],
    );

    let mut compound = Compound::new();
    compound.insert("id", "Furnace");
    compound.insert("Text1", "fifteen bytes!!");
    assert!(schema.validate(&Tag::Compound(compound.clone())));

    compound.insert("Text1", "sixteen bytes!!!");
    let err = error_of(&schema, &Tag::Compound(compound.clone()));
    assert_eq!(err.path, "Text1");
    assert_eq!(
        err.kind,
        VerifyErrorKind::LengthMismatch {
            expected: 15,
            actual: 16,
        }
    );

    compound.remove("Text1");
    compound.insert("id", "Chest");
    let err = error_of(&schema, &Tag::Compound(compound));
    assert_eq!(
        err.kind,
        VerifyErrorKind::ValueMismatch {
            expected: "Furnace".into(),
            actual: "Chest".into(),
        }
    );
}

#[test]
fn test_nested_compound_path() {
    let schema = SchemaNode::compound(
        "",
        [SchemaNode::compound(
            "Data",
            [SchemaNode::compound("Player", [SchemaNode::scalar("Health", TagID::Short)])],
        )],
    );
    let mut data = Compound::new();
    data.insert("Player", Compound::new());
    let mut root = Compound::new();
    root.insert("Data", data);

    let err = error_of(&schema, &Tag::Compound(root));
    assert_eq!(err.path, "Data.Player.Health");
    assert_eq!(err.kind, VerifyErrorKind::MissingField);
}

// ==================== Default trees ====================

#[test]
fn test_default_byte_array() {
    let tree = SchemaNode::byte_array("Blocks", Some(128 * 128)).build_default_tree();
    assert_eq!(tree.tag_id(), TagID::ByteArray);
    let bytes = tree.as_byte_array().unwrap();
    assert_eq!(bytes.len(), 16384);
    assert!(bytes.iter().all(|&b| b == 0));
}

#[test]
fn test_default_scalars_and_strings() {
    assert_eq!(SchemaNode::scalar("x", TagID::Float).build_default_tree(), Tag::Float(0.0));
    assert_eq!(SchemaNode::string("s").build_default_tree(), Tag::from(""));
    assert_eq!(
        SchemaNode::string_literal("id", "Chest").build_default_tree(),
        Tag::from("Chest")
    );
    assert_eq!(
        SchemaNode::short_array("a", None).build_default_tree(),
        Tag::ShortArray(Vec::new())
    );
}

#[test]
fn test_default_lists() {
    let plain = SchemaNode::list("Pos", TagID::Double).with_len(3).build_default_tree();
    let plain = plain.as_list().unwrap();
    assert_eq!(plain.element_id(), TagID::Double);
    assert!(plain.is_empty());

    let filled = SchemaNode::list("Pos", TagID::Double)
        .with_len(3)
        .with_element(SchemaNode::scalar("", TagID::Double))
        .build_default_tree();
    let filled = filled.as_list().unwrap();
    assert_eq!(filled.len(), 3);
    assert!(filled.iter().all(|tag| *tag == Tag::Double(0.0)));
}

#[test]
fn test_default_compound_satisfies_schema() {
    let schema = SchemaNode::compound(
        "",
        [
            SchemaNode::string_literal("id", "Furnace"),
            SchemaNode::scalar("BurnTime", TagID::Short),
            SchemaNode::list("Items", TagID::Compound).with_element(item_schema()),
            SchemaNode::string("CustomName").optional(),
            SchemaNode::compound("Pos", [SchemaNode::scalar("x", TagID::Int)]),
        ],
    );
    let tree = schema.build_default_tree();

    assert_eq!(schema.verify(&tree), Ok(()));
    let compound = tree.as_compound().unwrap();
    let keys: Vec<_> = compound.keys().map(String::as_str).collect();
    assert_eq!(keys, ["id", "BurnTime", "Items", "Pos"]);
    assert_eq!(compound.get("id"), Some(&Tag::from("Furnace")));
}

// ==================== Repair ====================

#[test]
fn test_repair_creates_missing_fields() {
    let schema = SchemaNode::compound(
        "",
        [
            SchemaNode::scalar("BurnTime", TagID::Short),
            SchemaNode::list("Items", TagID::Compound)
                .with_element(item_schema())
                .with_options(Options::CREATE_ON_MISSING),
            SchemaNode::string("CustomName").optional(),
        ],
    );

    let mut compound = Compound::new();
    compound.insert("BurnTime", 5i16);
    let mut tag = Tag::Compound(compound);

    assert!(!schema.validate(&tag));
    assert_eq!(schema.repair(&mut tag), Ok(()));
    assert!(schema.validate(&tag));
    assert_eq!(
        tag.get("Items").and_then(Tag::as_list).map(List::element_id),
        Some(TagID::Compound)
    );
    assert_eq!(tag.get("CustomName"), None);
}

#[test]
fn test_repair_reports_other_failures() {
    let schema = SchemaNode::compound(
        "",
        [
            SchemaNode::scalar("a", TagID::Int).with_options(Options::CREATE_ON_MISSING),
            SchemaNode::scalar("b", TagID::Int),
        ],
    );
    let mut tag = Tag::Compound(Compound::new());

    let err = schema.repair(&mut tag).unwrap_err();
    assert_eq!(err.path, "b");
    assert_eq!(err.kind, VerifyErrorKind::MissingField);
    // Entries created before the failure stay.
    assert_eq!(tag.get("a"), Some(&Tag::Int(0)));
}

#[test]
fn test_options_flags() {
    let options = Options::OPTIONAL | Options::CREATE_ON_MISSING;
    assert!(options.contains(Options::OPTIONAL));
    assert!(options.contains(Options::CREATE_ON_MISSING));
    assert!(!Options::NONE.contains(Options::OPTIONAL));

    let node = SchemaNode::scalar("x", TagID::Int).with_options(options);
    assert!(node.is_optional());
    assert_eq!(node.options(), options);
}

// ==================== Merging ====================

#[test]
fn test_merge_into_overrides_and_appends() {
    let base = SchemaNode::compound(
        "",
        [
            SchemaNode::string("id"),
            SchemaNode::scalar("x", TagID::Int),
            SchemaNode::scalar("y", TagID::Int),
            SchemaNode::scalar("z", TagID::Int),
        ],
    );
    let extension = SchemaNode::compound(
        "",
        [
            SchemaNode::string_literal("id", "Furnace"),
            SchemaNode::scalar("BurnTime", TagID::Short),
        ],
    );
    let merged = base.merge_into(&extension);

    let names: Vec<_> = merged.children().iter().map(SchemaNode::name).collect();
    assert_eq!(names, ["id", "x", "y", "z", "BurnTime"]);
    match merged.child("id").map(SchemaNode::shape) {
        Some(Shape::String {
            value: Some(value), ..
        }) => assert_eq!(value, "Furnace"),
        other => panic!("unexpected id node: {other:?}"),
    }

    // Neither input changes.
    assert_eq!(base.children().len(), 4);
    assert_eq!(extension.children().len(), 2);
}

#[test]
fn test_merge_into_non_compound() {
    let base = SchemaNode::scalar("x", TagID::Int);
    let extension = SchemaNode::string("x");
    assert_eq!(base.merge_into(&extension).tag_id(), TagID::String);
}

#[test]
#[should_panic]
fn test_end_scalar_panics() {
    let _ = SchemaNode::scalar("x", TagID::End);
}

#[test]
#[should_panic]
fn test_mismatched_list_element_panics() {
    let _ = SchemaNode::list("l", TagID::Int).with_element(SchemaNode::string(""));
}
