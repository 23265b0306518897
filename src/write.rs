use std::{io::Write, marker::PhantomData};

use zerocopy::{BigEndian, IntoBytes, byteorder};

use crate::{
    ByteOrder, Compound, Config, Error, List, NbtTree, Result, Tag, TagID, cold_path,
    util::{MAX_SEQUENCE_LEN, MAX_STRING_LEN},
};

/// Writes `tree` to `writer` using big-endian byte order and the default
/// [`Config`].
pub fn write_tree<W: Write>(tree: &NbtTree, writer: W) -> Result<()> {
    write_tree_with::<BigEndian, W>(tree, writer, &Config::default())
}

/// Writes `tree` with an explicit byte order and configuration.
///
/// The whole tree is encoded before anything reaches `writer`, so an
/// encoding failure leaves the writer untouched.
pub fn write_tree_with<O: ByteOrder, W: Write>(
    tree: &NbtTree,
    mut writer: W,
    config: &Config,
) -> Result<()> {
    let bytes = tree.to_vec_with::<O>(config)?;
    writer.write_all(&bytes).map_err(Error::IO)?;
    writer.flush().map_err(Error::IO)
}

pub(crate) struct Encoder<'c, W, O> {
    writer: W,
    config: &'c Config,
    depth: usize,
    _marker: PhantomData<O>,
}

macro_rules! write_number {
    ($name:ident, $wire:ident, $type:ty) => {
        #[inline]
        fn $name(&mut self, value: $type) -> Result<()> {
            self.writer
                .write_all(&byteorder::$wire::<O>::new(value).to_bytes())
                .map_err(Error::IO)
        }
    };
}

macro_rules! write_array {
    ($name:ident, $wire:ident, $type:ty) => {
        fn $name(&mut self, values: &[$type]) -> Result<()> {
            self.write_length(values.len())?;
            let wire: Vec<byteorder::$wire<O>> = values
                .iter()
                .map(|&value| byteorder::$wire::<O>::new(value))
                .collect();
            self.writer.write_all(wire.as_bytes()).map_err(Error::IO)
        }
    };
}

impl<'c, W: Write, O: ByteOrder> Encoder<'c, W, O> {
    pub(crate) fn new(writer: W, config: &'c Config) -> Self {
        Self {
            writer,
            config,
            depth: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn write_root(&mut self, tree: &NbtTree) -> Result<()> {
        self.write_u8(TagID::Compound as u8)?;
        self.write_string(&tree.name)?;
        self.write_compound(&tree.root)?;
        self.writer.flush().map_err(Error::IO)
    }

    #[inline]
    fn write_u8(&mut self, value: u8) -> Result<()> {
        self.writer.write_all(&[value]).map_err(Error::IO)
    }

    write_number!(write_i16, I16, i16);
    write_number!(write_i32, I32, i32);
    write_number!(write_i64, I64, i64);
    write_number!(write_f32, F32, f32);
    write_number!(write_f64, F64, f64);

    write_array!(write_short_array, I16, i16);
    write_array!(write_int_array, I32, i32);
    write_array!(write_long_array, I64, i64);

    fn write_length(&mut self, len: usize) -> Result<()> {
        if len > MAX_SEQUENCE_LEN {
            cold_path();
            return Err(Error::LengthTooLong(len));
        }
        self.write_i32(len as i32)
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let encoded = self.config.string_encoding.encode(value);
        if encoded.len() > MAX_STRING_LEN {
            cold_path();
            return Err(Error::StringTooLong(encoded.len()));
        }
        self.write_i16(encoded.len() as i16)?;
        self.writer.write_all(&encoded).map_err(Error::IO)
    }

    fn write_byte_array(&mut self, values: &[i8]) -> Result<()> {
        self.write_length(values.len())?;
        self.writer.write_all(values.as_bytes()).map_err(Error::IO)
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            cold_path();
            return Err(Error::DepthLimitExceeded(self.config.max_depth));
        }
        self.depth += 1;
        Ok(())
    }

    fn write_payload(&mut self, tag: &Tag) -> Result<()> {
        match tag {
            Tag::Byte(value) => self.write_u8(*value as u8),
            Tag::Short(value) => self.write_i16(*value),
            Tag::Int(value) => self.write_i32(*value),
            Tag::Long(value) => self.write_i64(*value),
            Tag::Float(value) => self.write_f32(*value),
            Tag::Double(value) => self.write_f64(*value),
            Tag::ByteArray(values) => self.write_byte_array(values),
            Tag::String(value) => self.write_string(value),
            Tag::List(list) => {
                self.enter()?;
                self.write_list(list)?;
                self.depth -= 1;
                Ok(())
            }
            Tag::Compound(compound) => {
                self.enter()?;
                self.write_compound(compound)?;
                self.depth -= 1;
                Ok(())
            }
            Tag::IntArray(values) => self.write_int_array(values),
            Tag::LongArray(values) => self.write_long_array(values),
            Tag::ShortArray(values) => self.write_short_array(values),
        }
    }

    fn write_list(&mut self, list: &List) -> Result<()> {
        let element_id = list.element_id();
        self.write_u8(element_id as u8)?;
        self.write_length(list.len())?;
        for item in list {
            // `List::get_mut` lets callers break homogeneity in place.
            if item.tag_id() != element_id {
                cold_path();
                return Err(Error::TypeMismatch {
                    expected: element_id,
                    actual: item.tag_id(),
                });
            }
            self.write_payload(item)?;
        }
        Ok(())
    }

    fn write_compound(&mut self, compound: &Compound) -> Result<()> {
        for (name, value) in compound {
            self.write_u8(value.tag_id() as u8)?;
            self.write_string(name)?;
            self.write_payload(value)?;
        }
        self.write_u8(TagID::End as u8)
    }
}
