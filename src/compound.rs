use indexmap::{IndexMap, map};

use crate::{Error, Result, Tag, cold_path};

/// A mapping from unique names to tags.
///
/// Entries keep their insertion order, so a compound that was read and is
/// written back unchanged produces the same bytes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    entries: IndexMap<String, Tag>,
}

impl Compound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.entries.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Tag> {
        self.entries.get_mut(key)
    }

    /// Looks up `key` and converts it, failing with
    /// [`Error::TypeMismatch`] if the entry exists with another type.
    ///
    /// ```
    /// use nbt_schema::Compound;
    ///
    /// let mut compound = Compound::new();
    /// compound.insert("BurnTime", 200i16);
    ///
    /// assert_eq!(compound.get_as::<i16>("BurnTime").unwrap(), Some(200));
    /// assert!(compound.get_as::<i32>("BurnTime").is_err());
    /// assert_eq!(compound.get_as::<i16>("CookTime").unwrap(), None);
    /// ```
    pub fn get_as<'a, T>(&'a self, key: &str) -> Result<Option<T>>
    where
        T: TryFrom<&'a Tag, Error = Error>,
    {
        self.entries.get(key).map(T::try_from).transpose()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sets `key` to `value`, returning the value it replaces. A replaced
    /// entry keeps its position.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
        self.entries.insert(key.into(), value.into())
    }

    /// Adds a new entry, failing with [`Error::DuplicateKey`] if `key` is
    /// already present.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Result<()> {
        match self.entries.entry(key.into()) {
            map::Entry::Occupied(entry) => {
                cold_path();
                Err(Error::DuplicateKey(entry.key().clone()))
            }
            map::Entry::Vacant(entry) => {
                entry.insert(value.into());
                Ok(())
            }
        }
    }

    /// Removes `key`, keeping the order of the remaining entries.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.entries.shift_remove(key)
    }

    /// Copies every entry of `other` whose key is absent from `self`.
    ///
    /// Existing entries always win. Copied values are deep clones, so the
    /// two compounds share nothing afterwards.
    ///
    /// ```
    /// use nbt_schema::{Compound, Tag};
    ///
    /// let mut built = Compound::new();
    /// built.insert("id", "Furnace");
    ///
    /// let mut source = Compound::new();
    /// source.insert("id", "Chest");
    /// source.insert("CustomName", "Oven");
    ///
    /// built.merge_from(&source);
    /// assert_eq!(built.get("id"), Some(&Tag::from("Furnace")));
    /// assert_eq!(built.get("CustomName"), Some(&Tag::from("Oven")));
    /// ```
    pub fn merge_from(&mut self, other: &Compound) {
        for (key, value) in &other.entries {
            if !self.entries.contains_key(key) {
                self.entries.insert(key.clone(), value.clone());
            }
        }
    }

    #[inline]
    pub fn iter(&self) -> map::Iter<'_, String, Tag> {
        self.entries.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> map::IterMut<'_, String, Tag> {
        self.entries.iter_mut()
    }

    #[inline]
    pub fn keys(&self) -> map::Keys<'_, String, Tag> {
        self.entries.keys()
    }

    #[inline]
    pub fn values(&self) -> map::Values<'_, String, Tag> {
        self.entries.values()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl IntoIterator for Compound {
    type Item = (String, Tag);
    type IntoIter = map::IntoIter<String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Tag);
    type IntoIter = map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<K: Into<String>, V: Into<Tag>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Tag>> Extend<(K, V)> for Compound {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into())),
        );
    }
}
