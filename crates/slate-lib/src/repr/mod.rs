//! Mapping between native Rust values and [`ConfigElement`] trees.
//!
//! Two routes are offered:
//!
//! - [`ElementRepr`], implemented here for primitives and std collections, which
//!   updates an existing value in place.
//! - A serde bridge ([`to_element`], [`from_element`]) for anything that derives
//!   `Serialize`/`Deserialize`.
//!
//! Mapping errors are recoverable ([`ErrorKind::InvalidRepr`],
//! [`ErrorKind::UnknownField`]) and point at the offending element when its
//! source is known.

mod de;
mod ser;

#[cfg(test)]
mod repr_tests;

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;

use indexmap::IndexMap;
use slate_core::{Error, ErrorKind, Source};

use crate::element::{ConfigElement, ConfigElementKind};

pub use de::{ElementDeserializer, from_element};
pub use ser::{ElementSerializer, to_element};

/// Conversion between a native value and a [`ConfigElement`].
pub trait ElementRepr {
    /// Updates `self` from `elem`. On error `self` may be partially updated.
    ///
    /// `src` is the source `elem` was parsed from, used to locate errors.
    fn from_element(&mut self, elem: &ConfigElement, src: Option<&Source<'_>>) -> Result<(), Error>;

    fn to_element(&self) -> ConfigElement;
}

fn repr_error(elem: &ConfigElement, src: Option<&Source<'_>>, msg: &str) -> Error {
    Error::from_span(elem.span(), src, ErrorKind::InvalidRepr, msg)
}

/// "a table", "an array" or "a value", for error messages.
fn kind_article(elem: &ConfigElement) -> &'static str {
    match elem.kind() {
        ConfigElementKind::Value(_) => "a value",
        ConfigElementKind::Table(_) => "a table",
        ConfigElementKind::Array(_) => "an array",
    }
}

macro_rules! repr_via_str {
    ($($t:ty),* $(,)?) => {$(
        impl ElementRepr for $t {
            fn from_element(&mut self, elem: &ConfigElement, src: Option<&Source<'_>>) -> Result<(), Error> {
                let Some(value) = elem.as_value() else {
                    let msg = format!("Cannot parse {} as {}", kind_article(elem), stringify!($t));
                    return Err(repr_error(elem, src, &msg));
                };
                *self = value.parse::<$t>().map_err(|_| {
                    let msg = format!("Cannot parse '{}' as {}", value, stringify!($t));
                    repr_error(elem, src, &msg)
                })?;
                Ok(())
            }

            fn to_element(&self) -> ConfigElement {
                ConfigElement::new_value(self.to_string())
            }
        }
    )*};
}

repr_via_str!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char, String,
);

impl ElementRepr for ConfigElement {
    fn from_element(&mut self, elem: &ConfigElement, _: Option<&Source<'_>>) -> Result<(), Error> {
        *self = elem.clone();
        Ok(())
    }

    fn to_element(&self) -> ConfigElement {
        self.clone()
    }
}

/// An empty value maps to `None`.
impl<T: ElementRepr + Default> ElementRepr for Option<T> {
    fn from_element(&mut self, elem: &ConfigElement, src: Option<&Source<'_>>) -> Result<(), Error> {
        if elem.as_value().is_some_and(str::is_empty) {
            *self = None;
            return Ok(());
        }
        self.get_or_insert_with(T::default).from_element(elem, src)
    }

    fn to_element(&self) -> ConfigElement {
        match self {
            Some(value) => value.to_element(),
            None => ConfigElement::new_value(""),
        }
    }
}

impl<T: ElementRepr + Default> ElementRepr for Vec<T> {
    fn from_element(&mut self, elem: &ConfigElement, src: Option<&Source<'_>>) -> Result<(), Error> {
        let Some(array) = elem.as_array() else {
            let msg = format!("Cannot parse {} as a Vec", kind_article(elem));
            return Err(repr_error(elem, src, &msg));
        };
        self.clear();
        self.reserve(array.len());
        for child in array {
            let mut value = T::default();
            value.from_element(child, src)?;
            self.push(value);
        }
        Ok(())
    }

    fn to_element(&self) -> ConfigElement {
        let mut elem = ConfigElement::new_array();
        for value in self {
            elem.insert("", value.to_element());
        }
        elem
    }
}

macro_rules! repr_map {
    ($name:literal, $map:ident<K, V $(, $s:ident)?>, $($key_bound:tt)+) => {
        impl<K, V $(, $s)?> ElementRepr for $map<K, V $(, $s)?>
        where
            K: FromStr + Display + $($key_bound)+,
            K::Err: Display,
            V: ElementRepr + Default,
            $($s: BuildHasher + Default,)?
        {
            fn from_element(&mut self, elem: &ConfigElement, src: Option<&Source<'_>>) -> Result<(), Error> {
                let Some(table) = elem.as_table() else {
                    let msg = format!("Cannot parse {} as a {}", kind_article(elem), $name);
                    return Err(repr_error(elem, src, &msg));
                };
                self.clear();
                for (key, child) in table {
                    let key: K = key.parse().map_err(|err: K::Err| {
                        repr_error(elem, src, &format!("Cannot parse key '{key}': {err}"))
                    })?;
                    let mut value = V::default();
                    value.from_element(child, src)?;
                    self.insert(key, value);
                }
                Ok(())
            }

            fn to_element(&self) -> ConfigElement {
                let mut elem = ConfigElement::new_table();
                for (key, value) in self {
                    elem.insert(key.to_string(), value.to_element());
                }
                elem
            }
        }
    };
}

repr_map!("HashMap", HashMap<K, V, S>, Eq + Hash);
repr_map!("BTreeMap", BTreeMap<K, V>, Ord);
repr_map!("IndexMap", IndexMap<K, V, S>, Eq + Hash);

macro_rules! repr_tuple {
    ($($v:ident: $t:ident),+) => {
        impl<$($t: ElementRepr + Default),+> ElementRepr for ($($t,)+) {
            fn from_element(&mut self, elem: &ConfigElement, src: Option<&Source<'_>>) -> Result<(), Error> {
                let Some(array) = elem.as_array() else {
                    let msg = format!("Cannot parse {} as a tuple", kind_article(elem));
                    return Err(repr_error(elem, src, &msg));
                };
                let mut items = array.iter();
                $(
                    let mut $v = $t::default();
                    let Some(child) = items.next() else {
                        return Err(repr_error(elem, src, "Insufficient elements for a tuple"));
                    };
                    $v.from_element(child, src)?;
                )+
                if items.next().is_some() {
                    return Err(repr_error(elem, src, "Too many elements for a tuple"));
                }
                *self = ($($v,)+);
                Ok(())
            }

            fn to_element(&self) -> ConfigElement {
                let ($($v,)+) = self;
                let mut elem = ConfigElement::new_array();
                $(elem.insert("", $v.to_element());)+
                elem
            }
        }
    };
}

repr_tuple!(a: A);
repr_tuple!(a: A, b: B);
repr_tuple!(a: A, b: B, c: C);
repr_tuple!(a: A, b: B, c: C, d: D);
repr_tuple!(a: A, b: B, c: C, d: D, e: E);
repr_tuple!(a: A, b: B, c: C, d: D, e: E, f: F);
repr_tuple!(a: A, b: B, c: C, d: D, e: E, f: F, g: G);
repr_tuple!(a: A, b: B, c: C, d: D, e: E, f: F, g: G, h: H);
