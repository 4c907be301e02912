//! `serde::Serializer` producing [`ConfigElement`] trees.

use indexmap::IndexMap;
use serde::ser::{self, Serialize};
use slate_core::{Error, ErrorKind, Span};

use crate::element::{ConfigElement, ConfigElementKind};

/// Serializes `value` into a tree.
///
/// Structs and maps become tables, sequences and tuples arrays, scalars values.
/// `None` and `()` become the empty value. Unit variants are a value holding the
/// variant name; other variants a single-key table `{Variant = ...}`.
pub fn to_element<T: Serialize + ?Sized>(value: &T) -> Result<ConfigElement, Error> {
    value.serialize(ElementSerializer)
}

pub struct ElementSerializer;

fn value(text: impl Into<String>) -> Result<ConfigElement, Error> {
    Ok(ConfigElement::new_value(text))
}

fn array(items: Vec<ConfigElement>) -> ConfigElement {
    ConfigElement::new(ConfigElementKind::Array(items), Span::invalid())
}

fn table(entries: IndexMap<String, ConfigElement>) -> ConfigElement {
    ConfigElement::new(ConfigElementKind::Table(entries), Span::invalid())
}

fn tagged(variant: &'static str, payload: ConfigElement) -> ConfigElement {
    let mut elem = ConfigElement::new_table();
    elem.insert(variant, payload);
    elem
}

impl ser::Serializer for ElementSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    type SerializeSeq = SeqSerializer;
    type SerializeTuple = SeqSerializer;
    type SerializeTupleStruct = SeqSerializer;
    type SerializeTupleVariant = VariantSeqSerializer;
    type SerializeMap = MapSerializer;
    type SerializeStruct = StructSerializer;
    type SerializeStructVariant = VariantStructSerializer;

    fn serialize_bool(self, v: bool) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_f64(self, v: f64) -> Result<ConfigElement, Error> {
        value(v.to_string())
    }

    fn serialize_char(self, v: char) -> Result<ConfigElement, Error> {
        value(v)
    }

    fn serialize_str(self, v: &str) -> Result<ConfigElement, Error> {
        value(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<ConfigElement, Error> {
        let items = v
            .iter()
            .map(|b| ConfigElement::new_value(b.to_string()))
            .collect();
        Ok(array(items))
    }

    fn serialize_none(self) -> Result<ConfigElement, Error> {
        value("")
    }

    fn serialize_some<T: Serialize + ?Sized>(self, v: &T) -> Result<ConfigElement, Error> {
        v.serialize(self)
    }

    fn serialize_unit(self) -> Result<ConfigElement, Error> {
        value("")
    }

    fn serialize_unit_struct(self, _: &'static str) -> Result<ConfigElement, Error> {
        value("")
    }

    fn serialize_unit_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
    ) -> Result<ConfigElement, Error> {
        value(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        v: &T,
    ) -> Result<ConfigElement, Error> {
        v.serialize(self)
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        v: &T,
    ) -> Result<ConfigElement, Error> {
        Ok(tagged(variant, v.serialize(self)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SeqSerializer, Error> {
        Ok(SeqSerializer {
            items: Vec::with_capacity(len.unwrap_or(0)),
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<SeqSerializer, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(self, _: &'static str, len: usize) -> Result<SeqSerializer, Error> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<VariantSeqSerializer, Error> {
        Ok(VariantSeqSerializer {
            variant,
            items: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _: Option<usize>) -> Result<MapSerializer, Error> {
        Ok(MapSerializer {
            entries: IndexMap::new(),
            next_key: None,
        })
    }

    fn serialize_struct(self, _: &'static str, _: usize) -> Result<StructSerializer, Error> {
        Ok(StructSerializer {
            entries: IndexMap::new(),
        })
    }

    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        variant: &'static str,
        _: usize,
    ) -> Result<VariantStructSerializer, Error> {
        Ok(VariantStructSerializer {
            variant,
            entries: IndexMap::new(),
        })
    }
}

pub struct SeqSerializer {
    items: Vec<ConfigElement>,
}

impl ser::SerializeSeq for SeqSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, v: &T) -> Result<(), Error> {
        self.items.push(v.serialize(ElementSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<ConfigElement, Error> {
        Ok(array(self.items))
    }
}

impl ser::SerializeTuple for SeqSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, v: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(self, v)
    }

    fn end(self) -> Result<ConfigElement, Error> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SeqSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, v: &T) -> Result<(), Error> {
        ser::SerializeSeq::serialize_element(self, v)
    }

    fn end(self) -> Result<ConfigElement, Error> {
        ser::SerializeSeq::end(self)
    }
}

pub struct VariantSeqSerializer {
    variant: &'static str,
    items: Vec<ConfigElement>,
}

impl ser::SerializeTupleVariant for VariantSeqSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, v: &T) -> Result<(), Error> {
        self.items.push(v.serialize(ElementSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<ConfigElement, Error> {
        Ok(tagged(self.variant, array(self.items)))
    }
}

pub struct MapSerializer {
    entries: IndexMap<String, ConfigElement>,
    next_key: Option<String>,
}

impl ser::SerializeMap for MapSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, key: &T) -> Result<(), Error> {
        let key = key
            .serialize(ElementSerializer)?
            .into_value()
            .ok_or_else(|| Error::new(ErrorKind::InvalidRepr, "Map keys must be values"))?;
        self.next_key = Some(key);
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, v: &T) -> Result<(), Error> {
        // serde always calls serialize_key first
        let key = self.next_key.take().unwrap_or_default();
        self.entries.insert(key, v.serialize(ElementSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<ConfigElement, Error> {
        Ok(table(self.entries))
    }
}

pub struct StructSerializer {
    entries: IndexMap<String, ConfigElement>,
}

impl ser::SerializeStruct for StructSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, v: &T) -> Result<(), Error> {
        self.entries.insert(key.to_owned(), v.serialize(ElementSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<ConfigElement, Error> {
        Ok(table(self.entries))
    }
}

pub struct VariantStructSerializer {
    variant: &'static str,
    entries: IndexMap<String, ConfigElement>,
}

impl ser::SerializeStructVariant for VariantStructSerializer {
    type Ok = ConfigElement;
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, key: &'static str, v: &T) -> Result<(), Error> {
        self.entries.insert(key.to_owned(), v.serialize(ElementSerializer)?);
        Ok(())
    }

    fn end(self) -> Result<ConfigElement, Error> {
        Ok(tagged(self.variant, table(self.entries)))
    }
}
