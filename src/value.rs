use crate::{Compound, Error, List, Result, TagID, index::Index};

/// An owned NBT value.
///
/// Containers own their children exclusively, so [`Clone`] is a full deep
/// copy: every array, list and compound in the result is new.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
    ShortArray(Vec<i16>),
}

impl Tag {
    #[inline]
    pub fn tag_id(&self) -> TagID {
        match self {
            Tag::Byte(_) => TagID::Byte,
            Tag::Short(_) => TagID::Short,
            Tag::Int(_) => TagID::Int,
            Tag::Long(_) => TagID::Long,
            Tag::Float(_) => TagID::Float,
            Tag::Double(_) => TagID::Double,
            Tag::ByteArray(_) => TagID::ByteArray,
            Tag::String(_) => TagID::String,
            Tag::List(_) => TagID::List,
            Tag::Compound(_) => TagID::Compound,
            Tag::IntArray(_) => TagID::IntArray,
            Tag::LongArray(_) => TagID::LongArray,
            Tag::ShortArray(_) => TagID::ShortArray,
        }
    }

    /// The zero value of a tag type: `0`, an empty string, array, list or
    /// compound. `End` has no value.
    pub fn default_for(tag_id: TagID) -> Option<Tag> {
        Some(match tag_id {
            TagID::End => return None,
            TagID::Byte => Tag::Byte(0),
            TagID::Short => Tag::Short(0),
            TagID::Int => Tag::Int(0),
            TagID::Long => Tag::Long(0),
            TagID::Float => Tag::Float(0.0),
            TagID::Double => Tag::Double(0.0),
            TagID::ByteArray => Tag::ByteArray(Vec::new()),
            TagID::String => Tag::String(String::new()),
            TagID::List => Tag::List(List::default()),
            TagID::Compound => Tag::Compound(Compound::new()),
            TagID::IntArray => Tag::IntArray(Vec::new()),
            TagID::LongArray => Tag::LongArray(Vec::new()),
            TagID::ShortArray => Tag::ShortArray(Vec::new()),
        })
    }

    /// Indexes into a list by position or a compound by name.
    ///
    /// ```
    /// use nbt_schema::{Compound, Tag};
    ///
    /// let mut compound = Compound::new();
    /// compound.insert("Count", 3i8);
    /// let tag = Tag::Compound(compound);
    ///
    /// assert_eq!(tag.get("Count"), Some(&Tag::Byte(3)));
    /// assert_eq!(tag.get(0), None);
    /// ```
    #[inline]
    pub fn get(&self, index: impl Index) -> Option<&Tag> {
        index.index_into(self)
    }

    #[inline]
    pub fn get_mut(&mut self, index: impl Index) -> Option<&mut Tag> {
        index.index_into_mut(self)
    }

    /// Number of elements of an array, list or compound, or bytes of a string.
    pub fn length(&self) -> Option<usize> {
        match self {
            Tag::ByteArray(value) => Some(value.len()),
            Tag::String(value) => Some(value.len()),
            Tag::List(value) => Some(value.len()),
            Tag::Compound(value) => Some(value.len()),
            Tag::IntArray(value) => Some(value.len()),
            Tag::LongArray(value) => Some(value.len()),
            Tag::ShortArray(value) => Some(value.len()),
            _ => None,
        }
    }
}

macro_rules! impl_scalar_accessors {
    ($($variant:ident, $type:ty, $as:ident, $is:ident;)*) => {
        impl Tag {
            $(
                #[inline]
                pub fn $as(&self) -> Option<$type> {
                    match self {
                        Tag::$variant(value) => Some(*value),
                        _ => None,
                    }
                }

                #[inline]
                pub fn $is(&self) -> bool {
                    matches!(self, Tag::$variant(_))
                }
            )*
        }

        $(
            impl From<$type> for Tag {
                #[inline]
                fn from(value: $type) -> Self {
                    Tag::$variant(value)
                }
            }

            impl TryFrom<&Tag> for $type {
                type Error = Error;

                fn try_from(tag: &Tag) -> Result<Self> {
                    tag.$as().ok_or(Error::TypeMismatch {
                        expected: TagID::$variant,
                        actual: tag.tag_id(),
                    })
                }
            }

            impl TryFrom<Tag> for $type {
                type Error = Error;

                fn try_from(tag: Tag) -> Result<Self> {
                    <$type>::try_from(&tag)
                }
            }
        )*
    };
}

impl_scalar_accessors! {
    Byte, i8, as_byte, is_byte;
    Short, i16, as_short, is_short;
    Int, i32, as_int, is_int;
    Long, i64, as_long, is_long;
    Float, f32, as_float, is_float;
    Double, f64, as_double, is_double;
}

macro_rules! impl_container_accessors {
    ($($variant:ident, $type:ty, $borrowed:ty, $as:ident, $as_mut:ident, $is:ident;)*) => {
        impl Tag {
            $(
                #[inline]
                pub fn $as(&self) -> Option<&$borrowed> {
                    match self {
                        Tag::$variant(value) => {
                            let value: &$borrowed = value;
                            Some(value)
                        }
                        _ => None,
                    }
                }

                #[inline]
                pub fn $as_mut(&mut self) -> Option<&mut $type> {
                    match self {
                        Tag::$variant(value) => Some(value),
                        _ => None,
                    }
                }

                #[inline]
                pub fn $is(&self) -> bool {
                    matches!(self, Tag::$variant(_))
                }
            )*
        }

        $(
            impl From<$type> for Tag {
                #[inline]
                fn from(value: $type) -> Self {
                    Tag::$variant(value)
                }
            }

            impl<'a> TryFrom<&'a Tag> for &'a $borrowed {
                type Error = Error;

                fn try_from(tag: &'a Tag) -> Result<Self> {
                    tag.$as().ok_or(Error::TypeMismatch {
                        expected: TagID::$variant,
                        actual: tag.tag_id(),
                    })
                }
            }

            impl TryFrom<Tag> for $type {
                type Error = Error;

                fn try_from(tag: Tag) -> Result<Self> {
                    match tag {
                        Tag::$variant(value) => Ok(value),
                        other => Err(Error::TypeMismatch {
                            expected: TagID::$variant,
                            actual: other.tag_id(),
                        }),
                    }
                }
            }
        )*
    };
}

impl_container_accessors! {
    ByteArray, Vec<i8>, [i8], as_byte_array, as_byte_array_mut, is_byte_array;
    String, String, str, as_string, as_string_mut, is_string;
    List, List, List, as_list, as_list_mut, is_list;
    Compound, Compound, Compound, as_compound, as_compound_mut, is_compound;
    IntArray, Vec<i32>, [i32], as_int_array, as_int_array_mut, is_int_array;
    LongArray, Vec<i64>, [i64], as_long_array, as_long_array_mut, is_long_array;
    ShortArray, Vec<i16>, [i16], as_short_array, as_short_array_mut, is_short_array;
}

impl From<&str> for Tag {
    #[inline]
    fn from(value: &str) -> Self {
        Tag::String(value.to_owned())
    }
}

impl From<bool> for Tag {
    #[inline]
    fn from(value: bool) -> Self {
        Tag::Byte(value as i8)
    }
}
