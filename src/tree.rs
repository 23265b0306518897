use std::io::{Read, Write};

use zerocopy::BigEndian;

use crate::{
    ByteOrder, Compound, Config, Error, Result, Tag, cold_path, read::Decoder, write::Encoder,
};

/// A complete NBT document: one named root compound.
///
/// ```
/// use nbt_schema::{NbtTree, Tag};
///
/// let mut tree = NbtTree::default();
/// tree.root.insert("map", 5i16);
///
/// let bytes = tree.to_vec().unwrap();
/// let decoded = NbtTree::from_slice(&bytes).unwrap();
/// assert_eq!(decoded.name, "");
/// assert_eq!(decoded.root.get("map"), Some(&Tag::Short(5)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NbtTree {
    pub name: String,
    pub root: Compound,
}

impl NbtTree {
    pub fn new(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// Reads one big-endian tree from `reader`.
    #[inline]
    pub fn read(reader: impl Read) -> Result<Self> {
        crate::read_tree(reader)
    }

    #[inline]
    pub fn read_with<O: ByteOrder>(reader: impl Read, config: &Config) -> Result<Self> {
        crate::read_tree_with::<O, _>(reader, config)
    }

    /// Reads a big-endian tree that must span the whole of `data`.
    #[inline]
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_slice_with::<BigEndian>(data, &Config::default())
    }

    /// Reads a tree that must span the whole of `data`, failing with
    /// [`Error::TrailingData`] otherwise.
    pub fn from_slice_with<O: ByteOrder>(data: &[u8], config: &Config) -> Result<Self> {
        let mut decoder = Decoder::<&[u8], O>::new(data, config);
        let tree = decoder.read_root()?;
        let rest = decoder.into_inner();
        if !rest.is_empty() {
            cold_path();
            return Err(Error::TrailingData(rest.len()));
        }
        Ok(tree)
    }

    #[inline]
    pub fn write(&self, writer: impl Write) -> Result<()> {
        crate::write_tree(self, writer)
    }

    #[inline]
    pub fn write_with<O: ByteOrder>(&self, writer: impl Write, config: &Config) -> Result<()> {
        crate::write_tree_with::<O, _>(self, writer, config)
    }

    #[inline]
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        self.to_vec_with::<BigEndian>(&Config::default())
    }

    pub fn to_vec_with<O: ByteOrder>(&self, config: &Config) -> Result<Vec<u8>> {
        let mut buf = Vec::with_capacity(256);
        Encoder::<&mut Vec<u8>, O>::new(&mut buf, config).write_root(self)?;
        Ok(buf)
    }

    /// Consumes the tree, returning its root as a [`Tag::Compound`].
    #[inline]
    pub fn into_tag(self) -> Tag {
        Tag::Compound(self.root)
    }
}

impl From<Compound> for NbtTree {
    fn from(root: Compound) -> Self {
        Self::new("", root)
    }
}
