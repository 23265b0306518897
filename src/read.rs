use std::{io::Read, marker::PhantomData};

use zerocopy::{BigEndian, FromBytes, byteorder};

use crate::{
    ByteOrder, Compound, Config, Error, List, NbtTree, Result, Tag, TagID, cold_path,
    util::LIST_PREALLOC_LIMIT,
};

/// Reads one tree from `reader` using big-endian byte order and the default
/// [`Config`].
///
/// Reading stops right after the root's end tag; pass `&mut reader` to keep
/// using the reader afterwards. Any failure aborts the whole read.
///
/// ```
/// use nbt_schema::{read_tree, Tag};
///
/// let bytes = [
///     0x0A, 0x00, 0x00, // root compound, empty name
///     0x02, 0x00, 0x03, b'm', b'a', b'p', 0x00, 0x05, // Short "map" = 5
///     0x00, // end
/// ];
/// let tree = read_tree(&bytes[..]).unwrap();
/// assert_eq!(tree.root.get("map"), Some(&Tag::Short(5)));
/// ```
pub fn read_tree<R: Read>(reader: R) -> Result<NbtTree> {
    read_tree_with::<BigEndian, R>(reader, &Config::default())
}

/// Reads one tree with an explicit byte order and configuration.
pub fn read_tree_with<O: ByteOrder, R: Read>(reader: R, config: &Config) -> Result<NbtTree> {
    Decoder::<R, O>::new(reader, config).read_root()
}

pub(crate) struct Decoder<'c, R, O> {
    reader: R,
    config: &'c Config,
    depth: usize,
    _marker: PhantomData<O>,
}

macro_rules! read_number {
    ($name:ident, $wire:ident, $type:ty) => {
        #[inline]
        fn $name(&mut self) -> Result<$type> {
            let mut buf = [0u8; size_of::<$type>()];
            self.reader.read_exact(&mut buf)?;
            Ok(byteorder::$wire::<O>::from_bytes(buf).get())
        }
    };
}

macro_rules! read_array {
    ($name:ident, $wire:ident, $type:ty) => {
        fn $name(&mut self) -> Result<Vec<$type>> {
            let len = self.read_length()?;
            let size = len
                .checked_mul(size_of::<$type>())
                .ok_or(Error::LengthTooLong(len))?;
            let bytes = self.read_bytes(size)?;
            let wire = <[byteorder::$wire<O>]>::ref_from_bytes(&bytes).map_err(|_| {
                cold_path();
                Error::UnexpectedEndOfStream
            })?;
            Ok(wire.iter().map(|value| value.get()).collect())
        }
    };
}

impl<'c, R: Read, O: ByteOrder> Decoder<'c, R, O> {
    pub(crate) fn new(reader: R, config: &'c Config) -> Self {
        Self {
            reader,
            config,
            depth: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn into_inner(self) -> R {
        self.reader
    }

    pub(crate) fn read_root(&mut self) -> Result<NbtTree> {
        let tag_id = self.read_u8()?;
        if tag_id != TagID::Compound as u8 {
            cold_path();
            return Err(Error::InvalidRoot(tag_id));
        }
        let name = self.read_string()?;
        let root = self.read_compound()?;
        Ok(NbtTree { name, root })
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    read_number!(read_i16, I16, i16);
    read_number!(read_i32, I32, i32);
    read_number!(read_i64, I64, i64);
    read_number!(read_f32, F32, f32);
    read_number!(read_f64, F64, f64);

    read_array!(read_short_array, I16, i16);
    read_array!(read_int_array, I32, i32);
    read_array!(read_long_array, I64, i64);

    fn read_tag_id(&mut self) -> Result<TagID> {
        let raw = self.read_u8()?;
        TagID::from_u8(raw).ok_or_else(|| {
            cold_path();
            Error::UnknownTagKind(raw)
        })
    }

    /// Reads a 32-bit length prefix. A negative prefix fails before any
    /// payload is touched.
    fn read_length(&mut self) -> Result<usize> {
        let len = self.read_i32()?;
        if len < 0 {
            cold_path();
            return Err(Error::NegativeLength(len));
        }
        Ok(len as usize)
    }

    /// Reads exactly `len` bytes without trusting `len` for preallocation.
    fn read_bytes(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let read = (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
        if read != len {
            cold_path();
            return Err(Error::UnexpectedEndOfStream);
        }
        Ok(buf)
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.read_i16()?;
        if len < 0 {
            cold_path();
            return Err(Error::NegativeLength(len as i32));
        }
        let bytes = self.read_bytes(len as usize)?;
        self.config.string_encoding.decode(bytes)
    }

    fn read_byte_array(&mut self) -> Result<Vec<i8>> {
        let len = self.read_length()?;
        let bytes = self.read_bytes(len)?;
        Ok(bytes.into_iter().map(|byte| byte as i8).collect())
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            cold_path();
            return Err(Error::DepthLimitExceeded(self.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_payload(&mut self, tag_id: TagID) -> Result<Tag> {
        Ok(match tag_id {
            TagID::End => {
                cold_path();
                return Err(Error::UnknownTagKind(TagID::End as u8));
            }
            TagID::Byte => Tag::Byte(self.read_u8()? as i8),
            TagID::Short => Tag::Short(self.read_i16()?),
            TagID::Int => Tag::Int(self.read_i32()?),
            TagID::Long => Tag::Long(self.read_i64()?),
            TagID::Float => Tag::Float(self.read_f32()?),
            TagID::Double => Tag::Double(self.read_f64()?),
            TagID::ByteArray => Tag::ByteArray(self.read_byte_array()?),
            TagID::String => Tag::String(self.read_string()?),
            TagID::List => {
                self.enter()?;
                let list = self.read_list()?;
                self.depth -= 1;
                Tag::List(list)
            }
            TagID::Compound => {
                self.enter()?;
                let compound = self.read_compound()?;
                self.depth -= 1;
                Tag::Compound(compound)
            }
            TagID::IntArray => Tag::IntArray(self.read_int_array()?),
            TagID::LongArray => Tag::LongArray(self.read_long_array()?),
            TagID::ShortArray => Tag::ShortArray(self.read_short_array()?),
        })
    }

    fn read_list(&mut self) -> Result<List> {
        let element_id = self.read_tag_id()?;
        let len = self.read_length()?;
        if element_id == TagID::End {
            if len != 0 {
                cold_path();
                return Err(Error::UntypedList(len as i32));
            }
            return Ok(List::new(TagID::Byte));
        }

        let mut items = Vec::with_capacity(len.min(LIST_PREALLOC_LIMIT));
        for _ in 0..len {
            items.push(self.read_payload(element_id)?);
        }
        Ok(List::from_raw_parts(element_id, items))
    }

    fn read_compound(&mut self) -> Result<Compound> {
        let mut compound = Compound::new();
        loop {
            let tag_id = self.read_tag_id()?;
            if tag_id == TagID::End {
                return Ok(compound);
            }
            let name = self.read_string()?;
            let value = self.read_payload(tag_id)?;
            compound.insert(name, value);
        }
    }
}
