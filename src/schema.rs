//! Descriptions of the expected shape of a tag tree.
//!
//! A record type describes the compound it reads and writes with one
//! [`SchemaNode`], built once and shared for the life of the process:
//!
//! ```
//! use std::sync::LazyLock;
//! use nbt_schema::{SchemaNode, TagID};
//!
//! static ITEM: LazyLock<SchemaNode> = LazyLock::new(|| {
//!     SchemaNode::compound("", [
//!         SchemaNode::scalar("id", TagID::Short),
//!         SchemaNode::scalar("Damage", TagID::Short),
//!         SchemaNode::scalar("Count", TagID::Byte),
//!         SchemaNode::scalar("Slot", TagID::Byte).optional(),
//!     ])
//! });
//!
//! let item = ITEM.build_default_tree();
//! assert!(ITEM.validate(&item));
//! ```

use std::ops::{BitOr, BitOrAssign};

use crate::{Compound, List, Tag, TagID};

mod verify;

pub use verify::*;

/// Flags modifying how a node is verified.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Options(u8);

impl Options {
    pub const NONE: Options = Options(0);
    /// The field may be absent.
    pub const OPTIONAL: Options = Options(1);
    /// When absent, [`SchemaNode::repair`] inserts the node's default tree.
    pub const CREATE_ON_MISSING: Options = Options(1 << 1);

    #[inline]
    pub const fn contains(self, other: Options) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Options {
    type Output = Options;

    #[inline]
    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}

impl BitOrAssign for Options {
    #[inline]
    fn bitor_assign(&mut self, rhs: Options) {
        self.0 |= rhs.0;
    }
}

/// The expected shape of one tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Any tag of exactly this type.
    Scalar(TagID),
    String {
        value: Option<String>,
        max_len: Option<usize>,
    },
    ByteArray {
        len: Option<usize>,
    },
    IntArray {
        len: Option<usize>,
    },
    LongArray {
        len: Option<usize>,
    },
    ShortArray {
        len: Option<usize>,
    },
    List {
        element_id: TagID,
        len: Option<usize>,
        element: Option<Box<SchemaNode>>,
    },
    Compound(Vec<SchemaNode>),
}

/// A named, flagged [`Shape`].
///
/// The name is matched against the key of the enclosing compound; the root
/// node's name is unused.
#[derive(Clone, Debug, PartialEq)]
pub struct SchemaNode {
    name: String,
    options: Options,
    shape: Shape,
}

impl SchemaNode {
    fn with_shape(name: impl Into<String>, shape: Shape) -> Self {
        Self {
            name: name.into(),
            options: Options::NONE,
            shape,
        }
    }

    /// A node accepting any tag of type `tag_id`.
    ///
    /// # Panics
    ///
    /// Panics if `tag_id` is [`TagID::End`], which no tag can have.
    pub fn scalar(name: impl Into<String>, tag_id: TagID) -> Self {
        assert_ne!(tag_id, TagID::End, "a schema node cannot expect TAG_End");
        Self::with_shape(name, Shape::Scalar(tag_id))
    }

    /// A string node with no constraint on its value.
    pub fn string(name: impl Into<String>) -> Self {
        Self::with_shape(
            name,
            Shape::String {
                value: None,
                max_len: None,
            },
        )
    }

    /// A string node that must hold exactly `value`.
    pub fn string_literal(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_shape(
            name,
            Shape::String {
                value: Some(value.into()),
                max_len: None,
            },
        )
    }

    /// A string node whose encoded length may not exceed `max_len` bytes.
    pub fn string_max_len(name: impl Into<String>, max_len: usize) -> Self {
        Self::with_shape(
            name,
            Shape::String {
                value: None,
                max_len: Some(max_len),
            },
        )
    }

    /// A byte array node. `Some(n)` requires exactly `n` elements, so
    /// `Some(0)` only accepts an empty array; `None` accepts any length.
    ///
    /// The other array constructors treat `len` the same way.
    pub fn byte_array(name: impl Into<String>, len: Option<usize>) -> Self {
        Self::with_shape(name, Shape::ByteArray { len })
    }

    pub fn int_array(name: impl Into<String>, len: Option<usize>) -> Self {
        Self::with_shape(name, Shape::IntArray { len })
    }

    pub fn long_array(name: impl Into<String>, len: Option<usize>) -> Self {
        Self::with_shape(name, Shape::LongArray { len })
    }

    pub fn short_array(name: impl Into<String>, len: Option<usize>) -> Self {
        Self::with_shape(name, Shape::ShortArray { len })
    }

    /// A list node of `element_id` elements with no count or element constraint.
    ///
    /// `TagID::End` is treated as `Byte`, matching how untyped empty lists
    /// are read.
    pub fn list(name: impl Into<String>, element_id: TagID) -> Self {
        let element_id = match element_id {
            TagID::End => TagID::Byte,
            other => other,
        };
        Self::with_shape(
            name,
            Shape::List {
                element_id,
                len: None,
                element: None,
            },
        )
    }

    pub fn compound(name: impl Into<String>, children: impl IntoIterator<Item = SchemaNode>) -> Self {
        Self::with_shape(name, Shape::Compound(children.into_iter().collect()))
    }

    /// Marks the node [`Options::OPTIONAL`].
    #[must_use]
    pub fn optional(self) -> Self {
        self.with_options(Options::OPTIONAL)
    }

    /// Adds `options` to the node's flags.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options |= options;
        self
    }

    /// Requires a list or array to have exactly `expected` elements.
    /// `with_len(0)` therefore only accepts empty values; leave the length
    /// unset to accept any.
    ///
    /// Has no effect on other nodes.
    #[must_use]
    pub fn with_len(mut self, expected: usize) -> Self {
        match &mut self.shape {
            Shape::ByteArray { len }
            | Shape::IntArray { len }
            | Shape::LongArray { len }
            | Shape::ShortArray { len }
            | Shape::List { len, .. } => *len = Some(expected),
            _ => {}
        }
        self
    }

    /// Verifies every list element against `element`.
    ///
    /// # Panics
    ///
    /// Panics if this is not a list node, or if `element` describes tags of
    /// another type than the list's elements.
    #[must_use]
    pub fn with_element(mut self, element: SchemaNode) -> Self {
        match &mut self.shape {
            Shape::List {
                element_id,
                element: slot,
                ..
            } => {
                assert_eq!(
                    *element_id,
                    element.tag_id(),
                    "list element schema does not match the list's element type"
                );
                *slot = Some(Box::new(element));
            }
            _ => panic!("with_element called on a non-list schema node"),
        }
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn options(&self) -> Options {
        self.options
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.options.contains(Options::OPTIONAL)
    }

    /// The tag type this node accepts.
    pub fn tag_id(&self) -> TagID {
        match &self.shape {
            Shape::Scalar(tag_id) => *tag_id,
            Shape::String { .. } => TagID::String,
            Shape::ByteArray { .. } => TagID::ByteArray,
            Shape::IntArray { .. } => TagID::IntArray,
            Shape::LongArray { .. } => TagID::LongArray,
            Shape::ShortArray { .. } => TagID::ShortArray,
            Shape::List { .. } => TagID::List,
            Shape::Compound(_) => TagID::Compound,
        }
    }

    /// Child nodes of a compound node; empty for every other shape.
    pub fn children(&self) -> &[SchemaNode] {
        match &self.shape {
            Shape::Compound(children) => children,
            _ => &[],
        }
    }

    /// Finds a direct child of a compound node by name.
    pub fn child(&self, name: &str) -> Option<&SchemaNode> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Synthesizes the smallest tag satisfying this node.
    ///
    /// Scalars are zero, strings are the expected literal or empty, arrays
    /// are zero-filled to the expected length. A list is filled with default
    /// elements only when both a count and an element node are given. A
    /// compound holds the default of every non-optional child.
    pub fn build_default_tree(&self) -> Tag {
        match &self.shape {
            Shape::Scalar(tag_id) => match Tag::default_for(*tag_id) {
                Some(tag) => tag,
                None => unreachable!("scalar schema nodes never expect TAG_End"),
            },
            Shape::String { value, .. } => Tag::String(value.clone().unwrap_or_default()),
            Shape::ByteArray { len } => Tag::ByteArray(vec![0; len.unwrap_or(0)]),
            Shape::IntArray { len } => Tag::IntArray(vec![0; len.unwrap_or(0)]),
            Shape::LongArray { len } => Tag::LongArray(vec![0; len.unwrap_or(0)]),
            Shape::ShortArray { len } => Tag::ShortArray(vec![0; len.unwrap_or(0)]),
            Shape::List {
                element_id,
                len,
                element,
            } => {
                let items = match (len, element) {
                    (Some(len), Some(element)) => {
                        (0..*len).map(|_| element.build_default_tree()).collect()
                    }
                    _ => Vec::new(),
                };
                Tag::List(List::from_raw_parts(*element_id, items))
            }
            Shape::Compound(children) => {
                let mut compound = Compound::with_capacity(children.len());
                for child in children.iter().filter(|child| !child.is_optional()) {
                    compound.insert(child.name.clone(), child.build_default_tree());
                }
                Tag::Compound(compound)
            }
        }
    }

    /// Overlays `extension` on this node, returning the combined schema.
    ///
    /// For two compound nodes the result keeps this node's name and options
    /// and holds all children of both: an extension child replaces the base
    /// child of the same name in place, and new names are appended in order.
    /// For any other pair the result is a copy of `extension`.
    ///
    /// ```
    /// use nbt_schema::{SchemaNode, TagID};
    ///
    /// let base = SchemaNode::compound("", [
    ///     SchemaNode::string("id"),
    ///     SchemaNode::scalar("x", TagID::Int),
    /// ]);
    /// let furnace = base.merge_into(&SchemaNode::compound("", [
    ///     SchemaNode::string_literal("id", "Furnace"),
    ///     SchemaNode::scalar("BurnTime", TagID::Short),
    /// ]));
    ///
    /// let names: Vec<_> = furnace.children().iter().map(|c| c.name()).collect();
    /// assert_eq!(names, ["id", "x", "BurnTime"]);
    /// ```
    pub fn merge_into(&self, extension: &SchemaNode) -> SchemaNode {
        let (Shape::Compound(base), Shape::Compound(extra)) = (&self.shape, &extension.shape) else {
            return extension.clone();
        };

        let mut children = base.clone();
        for child in extra {
            match children.iter_mut().find(|existing| existing.name == child.name) {
                Some(existing) => *existing = child.clone(),
                None => children.push(child.clone()),
            }
        }

        SchemaNode {
            name: self.name.clone(),
            options: self.options,
            shape: Shape::Compound(children),
        }
    }
}
