use std::slice;

use crate::{Error, Result, Tag, TagID, cold_path};

/// A homogeneous list of tags.
///
/// The element type is fixed when the list is created. A list declared with
/// `TagID::End` elements is stored as an empty `Byte` list, which is how the
/// untyped empty list found in older files is represented.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    element_id: TagID,
    items: Vec<Tag>,
}

impl Default for List {
    #[inline]
    fn default() -> Self {
        Self::new(TagID::Byte)
    }
}

impl List {
    pub fn new(element_id: TagID) -> Self {
        Self::with_capacity(element_id, 0)
    }

    pub fn with_capacity(element_id: TagID, capacity: usize) -> Self {
        let element_id = match element_id {
            TagID::End => TagID::Byte,
            other => other,
        };
        Self {
            element_id,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Builds a list from tags that must all be of type `element_id`.
    pub fn from_tags(element_id: TagID, tags: impl IntoIterator<Item = Tag>) -> Result<Self> {
        let mut list = Self::new(element_id);
        for tag in tags {
            list.push(tag)?;
        }
        Ok(list)
    }

    #[inline]
    pub fn element_id(&self) -> TagID {
        self.element_id
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    fn check(&self, tag: &Tag) -> Result<()> {
        if tag.tag_id() != self.element_id {
            cold_path();
            return Err(Error::TypeMismatch {
                expected: self.element_id,
                actual: tag.tag_id(),
            });
        }
        Ok(())
    }

    /// Appends a tag, failing with [`Error::TypeMismatch`] if its type differs
    /// from the list's element type.
    pub fn push(&mut self, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check(&tag)?;
        self.items.push(tag);
        Ok(())
    }

    /// Inserts a tag at `index`, shifting later elements.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, tag: impl Into<Tag>) -> Result<()> {
        let tag = tag.into();
        self.check(&tag)?;
        self.items.insert(index, tag);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, tag: impl Into<Tag>) -> Result<Tag> {
        let tag = tag.into();
        self.check(&tag)?;
        Ok(std::mem::replace(&mut self.items[index], tag))
    }

    pub fn remove(&mut self, index: usize) -> Option<Tag> {
        if index < self.items.len() {
            Some(self.items.remove(index))
        } else {
            None
        }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    /// Mutable access to an element.
    ///
    /// Replacing the element with a tag of another type breaks the list's
    /// homogeneity and makes writing it fail; use [`List::set`] for that.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tag> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, Tag> {
        self.items.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, Tag> {
        self.items.iter_mut()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Builds a list without checking element types. Only the decoder uses
    /// this, after reading every element with `element_id`.
    #[inline]
    pub(crate) fn from_raw_parts(element_id: TagID, items: Vec<Tag>) -> Self {
        debug_assert!(items.iter().all(|item| item.tag_id() == element_id));
        Self { element_id, items }
    }
}

impl IntoIterator for List {
    type Item = Tag;
    type IntoIter = std::vec::IntoIter<Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl TryFrom<Vec<Tag>> for List {
    type Error = Error;

    /// Infers the element type from the first tag; an empty vector yields an
    /// empty `Byte` list.
    fn try_from(tags: Vec<Tag>) -> Result<Self> {
        let element_id = tags.first().map_or(TagID::Byte, Tag::tag_id);
        if let Some(bad) = tags.iter().find(|tag| tag.tag_id() != element_id) {
            return Err(Error::TypeMismatch {
                expected: element_id,
                actual: bad.tag_id(),
            });
        }
        Ok(Self {
            element_id,
            items: tags,
        })
    }
}
