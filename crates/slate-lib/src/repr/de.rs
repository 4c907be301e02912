//! `serde::Deserializer` reading from [`ConfigElement`] trees.

use std::str::FromStr;

use serde::de::{self, DeserializeOwned, DeserializeSeed, Visitor};
use slate_core::{Error, ErrorKind, Source};

use super::kind_article;
use crate::element::{ConfigElement, ConfigElementKind};

/// Deserializes a `T` from `element`.
///
/// Pass the source the element was parsed from to get `file:line:col`
/// locations in errors. Errors raised by serde itself (missing fields, invalid
/// types) are attached to the innermost element being read.
pub fn from_element<T: DeserializeOwned>(
    element: &ConfigElement,
    source: Option<&Source<'_>>,
) -> Result<T, Error> {
    let de = ElementDeserializer::new(element, source);
    T::deserialize(de).map_err(|err| de.locate(err))
}

#[derive(Clone, Copy)]
pub struct ElementDeserializer<'de> {
    element: &'de ConfigElement,
    source: Option<&'de Source<'de>>,
}

impl<'de> ElementDeserializer<'de> {
    pub fn new(element: &'de ConfigElement, source: Option<&'de Source<'de>>) -> Self {
        Self { element, source }
    }

    fn error(&self, msg: &str) -> Error {
        Error::from_span(self.element.span(), self.source, ErrorKind::InvalidRepr, msg)
    }

    fn locate(&self, err: Error) -> Error {
        err.located(self.element.span(), self.source)
    }

    fn mismatch(&self, expected: &str) -> Error {
        self.error(&format!("Cannot parse {} as {expected}", kind_article(self.element)))
    }

    fn value(&self, expected: &str) -> Result<&'de str, Error> {
        self.element.as_value().ok_or_else(|| self.mismatch(expected))
    }

    fn parse<T: FromStr>(&self, ty: &str) -> Result<T, Error> {
        let value = self.value(ty)?;
        value
            .parse()
            .map_err(|_| self.error(&format!("Cannot parse '{value}' as {ty}")))
    }

    fn child(&self, element: &'de ConfigElement) -> Self {
        Self::new(element, self.source)
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($t:ty)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
            let parsed = self.parse::<$t>(stringify!($t))?;
            visitor.$visit(parsed).map_err(|err| self.locate(err))
        }
    )*};
}

impl<'de> de::Deserializer<'de> for ElementDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let result = match self.element.kind() {
            ConfigElementKind::Value(value) => visitor.visit_borrowed_str(value),
            ConfigElementKind::Table(table) => visitor.visit_map(TableAccess::new(self, table)),
            ConfigElementKind::Array(array) => visitor.visit_seq(ArrayAccess::new(self, array)),
        };
        result.map_err(|err| self.locate(err))
    }

    deserialize_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let value = self.value("char")?;
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c).map_err(|err| self.locate(err)),
            _ => Err(self.error(&format!("Cannot parse '{value}' as char"))),
        }
    }

    fn deserialize_str<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let value = self.value("a string")?;
        visitor
            .visit_borrowed_str(value)
            .map_err(|err| self.locate(err))
    }

    fn deserialize_string<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let array = self
            .element
            .as_array()
            .ok_or_else(|| self.mismatch("bytes"))?;
        let bytes = array
            .iter()
            .map(|item| self.child(item).parse::<u8>("u8"))
            .collect::<Result<Vec<_>, _>>()?;
        visitor
            .visit_byte_buf(bytes)
            .map_err(|err| self.locate(err))
    }

    fn deserialize_byte_buf<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_bytes(visitor)
    }

    /// The empty value is `None`, anything else `Some`.
    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let result = if self.element.as_value() == Some("") {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        };
        result.map_err(|err| self.locate(err))
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        if self.element.as_value() != Some("") {
            return Err(self.error("Expected an empty value"));
        }
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor
            .visit_newtype_struct(self)
            .map_err(|err| self.locate(err))
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let array = self
            .element
            .as_array()
            .ok_or_else(|| self.mismatch("an array"))?;
        visitor
            .visit_seq(ArrayAccess::new(self, array))
            .map_err(|err| self.locate(err))
    }

    fn deserialize_tuple<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value, Error> {
        let array = self
            .element
            .as_array()
            .ok_or_else(|| self.mismatch("a tuple"))?;
        if array.len() != len {
            return Err(self.error(&format!(
                "Expected an array of {len} elements, found {}",
                array.len()
            )));
        }
        visitor
            .visit_seq(ArrayAccess::new(self, array))
            .map_err(|err| self.locate(err))
    }

    fn deserialize_tuple_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        let table = self
            .element
            .as_table()
            .ok_or_else(|| self.mismatch("a table"))?;
        visitor
            .visit_map(TableAccess::new(self, table))
            .map_err(|err| self.locate(err))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        _: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        self.deserialize_map(visitor)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _: &'static str,
        _: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_enum(self).map_err(|err| self.locate(err))
    }

    fn deserialize_identifier<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_unit()
    }
}

struct ArrayAccess<'de> {
    parent: ElementDeserializer<'de>,
    items: std::slice::Iter<'de, ConfigElement>,
}

impl<'de> ArrayAccess<'de> {
    fn new(parent: ElementDeserializer<'de>, items: &'de [ConfigElement]) -> Self {
        Self {
            parent,
            items: items.iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for ArrayAccess<'de> {
    type Error = Error;

    fn next_element_seed<T: DeserializeSeed<'de>>(
        &mut self,
        seed: T,
    ) -> Result<Option<T::Value>, Error> {
        let Some(item) = self.items.next() else {
            return Ok(None);
        };
        let de = self.parent.child(item);
        seed.deserialize(de).map(Some).map_err(|err| de.locate(err))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.items.len())
    }
}

struct TableAccess<'de> {
    parent: ElementDeserializer<'de>,
    entries: indexmap::map::Iter<'de, String, ConfigElement>,
    pending: Option<&'de ConfigElement>,
}

impl<'de> TableAccess<'de> {
    fn new(
        parent: ElementDeserializer<'de>,
        table: &'de indexmap::IndexMap<String, ConfigElement>,
    ) -> Self {
        Self {
            parent,
            entries: table.iter(),
            pending: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for TableAccess<'de> {
    type Error = Error;

    fn next_key_seed<K: DeserializeSeed<'de>>(&mut self, seed: K) -> Result<Option<K::Value>, Error> {
        let Some((key, value)) = self.entries.next() else {
            return Ok(None);
        };
        self.pending = Some(value);
        // Keys have no span of their own; point at the entry's value instead.
        let de = self.parent.child(value);
        seed.deserialize(KeyDeserializer { key })
            .map(Some)
            .map_err(|err| de.locate(err))
    }

    fn next_value_seed<V: DeserializeSeed<'de>>(&mut self, seed: V) -> Result<V::Value, Error> {
        let Some(value) = self.pending.take() else {
            return Err(self.parent.error("Table value requested before its key"));
        };
        let de = self.parent.child(value);
        seed.deserialize(de).map_err(|err| de.locate(err))
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.entries.len())
    }
}

impl<'de> de::EnumAccess<'de> for ElementDeserializer<'de> {
    type Error = Error;
    type Variant = VariantAccess<'de>;

    fn variant_seed<V: DeserializeSeed<'de>>(self, seed: V) -> Result<(V::Value, VariantAccess<'de>), Error> {
        let (name, payload) = match self.element.kind() {
            ConfigElementKind::Value(name) => (name.as_str(), None),
            ConfigElementKind::Table(table) => match (table.len(), table.first()) {
                (1, Some((name, payload))) => (name.as_str(), Some(payload)),
                _ => return Err(self.error("Table needs to have exactly one element.")),
            },
            ConfigElementKind::Array(_) => return Err(self.mismatch("an enum")),
        };
        let variant = seed
            .deserialize(KeyDeserializer { key: name })
            .map_err(|err| self.locate(err))?;
        Ok((
            variant,
            VariantAccess {
                outer: self,
                payload,
            },
        ))
    }
}

pub struct VariantAccess<'de> {
    outer: ElementDeserializer<'de>,
    payload: Option<&'de ConfigElement>,
}

impl<'de> VariantAccess<'de> {
    fn payload(&self) -> Result<ElementDeserializer<'de>, Error> {
        self.payload
            .map(|payload| self.outer.child(payload))
            .ok_or_else(|| self.outer.error("Expected a table with a single element"))
    }
}

impl<'de> de::VariantAccess<'de> for VariantAccess<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<(), Error> {
        match self.payload {
            None => Ok(()),
            Some(payload) if payload.as_value() == Some("") => Ok(()),
            Some(payload) => Err(self.outer.child(payload).error("Expected a unit variant")),
        }
    }

    fn newtype_variant_seed<T: DeserializeSeed<'de>>(self, seed: T) -> Result<T::Value, Error> {
        let de = self.payload()?;
        seed.deserialize(de).map_err(|err| de.locate(err))
    }

    fn tuple_variant<V: Visitor<'de>>(self, len: usize, visitor: V) -> Result<V::Value, Error> {
        de::Deserializer::deserialize_tuple(self.payload()?, len, visitor)
    }

    fn struct_variant<V: Visitor<'de>>(
        self,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        de::Deserializer::deserialize_struct(self.payload()?, "", fields, visitor)
    }
}

/// Table keys and variant names. Keys are plain strings, but map keys may
/// parse into numbers or booleans.
struct KeyDeserializer<'de> {
    key: &'de str,
}

impl KeyDeserializer<'_> {
    fn parse<T: FromStr>(&self, ty: &str) -> Result<T, Error> {
        self.key.parse().map_err(|_| {
            Error::new(
                ErrorKind::InvalidRepr,
                format!("Cannot parse key '{}' as {ty}", self.key),
            )
        })
    }
}

macro_rules! deserialize_key_parsed {
    ($($method:ident => $visit:ident($t:ty)),* $(,)?) => {$(
        fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
            visitor.$visit(self.parse::<$t>(stringify!($t))?)
        }
    )*};
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_borrowed_str(self.key)
    }

    deserialize_key_parsed! {
        deserialize_bool => visit_bool(bool),
        deserialize_i8 => visit_i8(i8),
        deserialize_i16 => visit_i16(i16),
        deserialize_i32 => visit_i32(i32),
        deserialize_i64 => visit_i64(i64),
        deserialize_i128 => visit_i128(i128),
        deserialize_u8 => visit_u8(u8),
        deserialize_u16 => visit_u16(u16),
        deserialize_u32 => visit_u32(u32),
        deserialize_u64 => visit_u64(u64),
        deserialize_u128 => visit_u128(u128),
        deserialize_f32 => visit_f32(f32),
        deserialize_f64 => visit_f64(f64),
        deserialize_char => visit_char(char),
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Error> {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _: &'static str,
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _: &'static str,
        _: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Error> {
        visitor.visit_enum(de::value::BorrowedStrDeserializer::new(self.key))
    }

    serde::forward_to_deserialize_any! {
        str string bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}
