//! The contract higher-level record types implement against the core.
//!
//! A record (a tile entity, a map, level data) owns a static schema, loads
//! itself from a tag, and builds a tag back. Keeping a copy of the compound
//! it was loaded from and merging it under the freshly built one keeps
//! fields the record does not understand across a load, modify, save cycle.
//!
//! ```
//! use std::sync::LazyLock;
//! use nbt_schema::{Compound, Record, SchemaNode, Tag, TagID};
//!
//! static SIGN: LazyLock<SchemaNode> = LazyLock::new(|| {
//!     SchemaNode::compound("", [
//!         SchemaNode::string_literal("id", "Sign"),
//!         SchemaNode::string("Text1"),
//!     ])
//! });
//!
//! struct Sign {
//!     text: String,
//!     source: Option<Compound>,
//! }
//!
//! impl Record for Sign {
//!     fn schema() -> &'static SchemaNode {
//!         &SIGN
//!     }
//!
//!     fn load_tree(tag: &Tag) -> Option<Self> {
//!         let compound = tag.as_compound()?;
//!         Some(Sign {
//!             text: compound.get("Text1")?.as_string()?.to_owned(),
//!             source: Some(compound.clone()),
//!         })
//!     }
//!
//!     fn build_tree(&self) -> Tag {
//!         let mut compound = Compound::new();
//!         compound.insert("id", "Sign");
//!         compound.insert("Text1", self.text.as_str());
//!         nbt_schema::merge_source(compound, self.source.as_ref())
//!     }
//! }
//!
//! let mut loaded = Compound::new();
//! loaded.insert("id", "Sign");
//! loaded.insert("Text1", "hello");
//! loaded.insert("Glowing", 1i8);
//!
//! let mut sign = Sign::load_tree_safe(&Tag::Compound(loaded)).unwrap();
//! sign.text = "bye".into();
//! let saved = sign.build_tree();
//! assert_eq!(saved.get("Text1"), Some(&Tag::from("bye")));
//! assert_eq!(saved.get("Glowing"), Some(&Tag::Byte(1)));
//! ```

use crate::{Compound, SchemaNode, Tag};

pub trait Record: Sized {
    /// The schema every valid tree of this record satisfies.
    fn schema() -> &'static SchemaNode;

    /// Decodes without verification, returning `None` when the tree's shape
    /// does not allow it.
    fn load_tree(tag: &Tag) -> Option<Self>;

    /// Encodes the record's current fields as a fresh tree.
    fn build_tree(&self) -> Tag;

    /// Decodes only trees that pass [`Record::validate_tree`].
    fn load_tree_safe(tag: &Tag) -> Option<Self> {
        if Self::validate_tree(tag) {
            Self::load_tree(tag)
        } else {
            None
        }
    }

    fn validate_tree(tag: &Tag) -> bool {
        Self::schema().validate(tag)
    }
}

/// Finishes [`Record::build_tree`]: merges the entries of the compound a
/// record was loaded from, if any, under the freshly built one.
pub fn merge_source(mut built: Compound, source: Option<&Compound>) -> Tag {
    if let Some(source) = source {
        built.merge_from(source);
    }
    Tag::Compound(built)
}
