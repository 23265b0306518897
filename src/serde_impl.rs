//! `serde` support for the tag tree.
//!
//! Tags serialize as their natural data model values: numbers, strings,
//! sequences for arrays and lists, maps for compounds. Deserializing picks
//! the tag type from the value the format reports, so a self-describing
//! format that only knows 64-bit numbers (such as JSON) yields `Long` and
//! `Double` tags.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, SeqAccess, Visitor},
};

use crate::{Compound, List, Tag};

impl Serialize for Tag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tag::Byte(value) => serializer.serialize_i8(*value),
            Tag::Short(value) => serializer.serialize_i16(*value),
            Tag::Int(value) => serializer.serialize_i32(*value),
            Tag::Long(value) => serializer.serialize_i64(*value),
            Tag::Float(value) => serializer.serialize_f32(*value),
            Tag::Double(value) => serializer.serialize_f64(*value),
            Tag::ByteArray(values) => serializer.collect_seq(values),
            Tag::String(value) => serializer.serialize_str(value),
            Tag::List(list) => list.serialize(serializer),
            Tag::Compound(compound) => compound.serialize(serializer),
            Tag::IntArray(values) => serializer.collect_seq(values),
            Tag::LongArray(values) => serializer.collect_seq(values),
            Tag::ShortArray(values) => serializer.collect_seq(values),
        }
    }
}

impl Serialize for List {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self)
    }
}

impl Serialize for Compound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self)
    }
}

struct TagVisitor;

impl<'de> Visitor<'de> for TagVisitor {
    type Value = Tag;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an NBT value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Tag, E> {
        Ok(Tag::Byte(v as i8))
    }

    fn visit_i8<E: de::Error>(self, v: i8) -> Result<Tag, E> {
        Ok(Tag::Byte(v))
    }

    fn visit_i16<E: de::Error>(self, v: i16) -> Result<Tag, E> {
        Ok(Tag::Short(v))
    }

    fn visit_i32<E: de::Error>(self, v: i32) -> Result<Tag, E> {
        Ok(Tag::Int(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Tag, E> {
        Ok(Tag::Long(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Tag, E> {
        i64::try_from(v)
            .map(Tag::Long)
            .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> Result<Tag, E> {
        Ok(Tag::Float(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Tag, E> {
        Ok(Tag::Double(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Tag, E> {
        Ok(Tag::String(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Tag, E> {
        Ok(Tag::String(v))
    }

    fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Tag, E> {
        Ok(Tag::ByteArray(v.iter().map(|&byte| byte as i8).collect()))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Tag, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(4096));
        while let Some(item) = seq.next_element::<Tag>()? {
            items.push(item);
        }
        List::try_from(items)
            .map(Tag::List)
            .map_err(de::Error::custom)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Tag, A::Error> {
        let mut compound = Compound::with_capacity(map.size_hint().unwrap_or(0).min(4096));
        while let Some((key, value)) = map.next_entry::<String, Tag>()? {
            compound.insert(key, value);
        }
        Ok(Tag::Compound(compound))
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Tag, D::Error> {
        deserializer.deserialize_any(TagVisitor)
    }
}

impl<'de> Deserialize<'de> for Compound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Compound, D::Error> {
        match Tag::deserialize(deserializer)? {
            Tag::Compound(compound) => Ok(compound),
            other => Err(de::Error::custom(format!(
                "expected a compound, found {}",
                other.tag_id()
            ))),
        }
    }
}
