use std::fmt;

/// The on-wire discriminator of a tag.
///
/// `End` terminates compounds and marks the element type of an untyped empty
/// list; it never carries a payload, so no [`Tag`](crate::Tag) value has it.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TagID {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
    /// Legacy extension; not part of the vanilla format.
    ShortArray = 100,
}

impl TagID {
    /// Decodes a raw tag id byte, returning `None` for ids outside the format.
    ///
    /// # Example
    ///
    /// ```
    /// use nbt_schema::TagID;
    ///
    /// assert_eq!(TagID::from_u8(10), Some(TagID::Compound));
    /// assert_eq!(TagID::from_u8(100), Some(TagID::ShortArray));
    /// assert_eq!(TagID::from_u8(13), None);
    /// ```
    pub const fn from_u8(value: u8) -> Option<Self> {
        Some(match value {
            0 => Self::End,
            1 => Self::Byte,
            2 => Self::Short,
            3 => Self::Int,
            4 => Self::Long,
            5 => Self::Float,
            6 => Self::Double,
            7 => Self::ByteArray,
            8 => Self::String,
            9 => Self::List,
            10 => Self::Compound,
            11 => Self::IntArray,
            12 => Self::LongArray,
            100 => Self::ShortArray,
            _ => return None,
        })
    }

    /// Returns `true` for End and the fixed-width numeric tags.
    pub const fn is_primitive(self) -> bool {
        matches!(
            self,
            Self::End
                | Self::Byte
                | Self::Short
                | Self::Int
                | Self::Long
                | Self::Float
                | Self::Double
        )
    }

    /// Returns `true` for the length-prefixed numeric arrays.
    pub const fn is_array(self) -> bool {
        matches!(
            self,
            Self::ByteArray | Self::IntArray | Self::LongArray | Self::ShortArray
        )
    }

    /// Returns `true` for tags that hold other tags.
    pub const fn is_composite(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }

    /// Size in bytes of one payload of a primitive tag, or of one element of an array tag.
    pub const fn element_size(self) -> Option<usize> {
        match self {
            Self::End => Some(0),
            Self::Byte | Self::ByteArray => Some(1),
            Self::Short | Self::ShortArray => Some(2),
            Self::Int | Self::Float | Self::IntArray => Some(4),
            Self::Long | Self::Double | Self::LongArray => Some(8),
            Self::String | Self::List | Self::Compound => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::End => "TAG_End",
            Self::Byte => "TAG_Byte",
            Self::Short => "TAG_Short",
            Self::Int => "TAG_Int",
            Self::Long => "TAG_Long",
            Self::Float => "TAG_Float",
            Self::Double => "TAG_Double",
            Self::ByteArray => "TAG_Byte_Array",
            Self::String => "TAG_String",
            Self::List => "TAG_List",
            Self::Compound => "TAG_Compound",
            Self::IntArray => "TAG_Int_Array",
            Self::LongArray => "TAG_Long_Array",
            Self::ShortArray => "TAG_Short_Array",
        }
    }
}

impl fmt::Display for TagID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for TagID {
    type Error = crate::Error;

    fn try_from(value: u8) -> crate::Result<Self> {
        Self::from_u8(value).ok_or(crate::Error::UnknownTagKind(value))
    }
}
