//! NBT (Named Binary Tag) trees: an owned value model, a bit-exact binary
//! codec, and schemas that verify and default-populate trees.
//!
//! ```
//! use nbt_schema::{Compound, NbtTree, SchemaNode, Tag, TagID};
//!
//! let mut root = Compound::new();
//! root.insert("BurnTime", 200i16);
//! root.insert("CookTime", 0i16);
//!
//! let bytes = NbtTree::from(root).to_vec().unwrap();
//! let tree = NbtTree::from_slice(&bytes).unwrap();
//!
//! let schema = SchemaNode::compound("", [
//!     SchemaNode::scalar("BurnTime", TagID::Short),
//!     SchemaNode::scalar("CookTime", TagID::Short),
//! ]);
//! assert!(schema.validate(&tree.into_tag()));
//! ```

pub use zerocopy::BigEndian;
pub use zerocopy::LittleEndian;
pub use zerocopy::NativeEndian;

mod compound;
mod config;
mod error;
mod index;
mod list;
mod read;
pub mod record;
pub mod schema;
#[cfg(feature = "serde")]
mod serde_impl;
mod tag;
mod tree;
mod util;
mod value;
mod write;

pub use compound::*;
pub use config::*;
pub use error::*;
pub use index::*;
pub use list::*;
pub use read::*;
pub use record::*;
pub use schema::*;
pub use tag::*;
pub use tree::*;
pub use util::*;
pub use value::*;
pub use write::*;
