//! The generic configuration tree.
//!
//! A [`ConfigElement`] is what a parse produces when no native type is involved:
//! a value, a table or an array, each remembering the span it came from.
//! Values hold fully resolved text, so a tree never borrows from its source.

mod builder;
mod invariants;
mod printer;

#[cfg(test)]
mod printer_tests;

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use slate_core::{Error, Source, Span};

use crate::parser::parse_source;

pub use builder::{BuildVisitor, PatchVisitor};
pub use printer::{ElementPrinter, Printer, QuoteStyle, quote_style};

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigElementKind {
    Value(String),
    /// Keys keep their insertion order.
    Table(IndexMap<String, ConfigElement>),
    Array(Vec<ConfigElement>),
}

/// A node of the configuration tree.
///
/// Equality compares contents only; spans are ignored.
#[derive(Clone, Debug)]
pub struct ConfigElement {
    kind: ConfigElementKind,
    span: Span,
}

impl PartialEq for ConfigElement {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl ConfigElement {
    pub fn new(kind: ConfigElementKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn new_table() -> Self {
        Self::new(ConfigElementKind::Table(IndexMap::new()), Span::invalid())
    }

    pub fn new_value(value: impl Into<String>) -> Self {
        Self::new(ConfigElementKind::Value(value.into()), Span::invalid())
    }

    pub fn new_array() -> Self {
        Self::new(ConfigElementKind::Array(Vec::new()), Span::invalid())
    }

    /// Parses `source` into a fresh root table.
    pub fn from_source(source: &Source<'_>) -> Result<Self, Error> {
        let mut visitor = BuildVisitor::new();
        parse_source(source, &mut visitor)?;
        Ok(visitor.finish())
    }

    /// Parses an anonymous source into a fresh root table.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self, Error> {
        Self::from_source(&Source::anonymous(text))
    }

    /// Updates this table in place with the contents of `source`.
    ///
    /// Existing entries not mentioned in `source` are kept, tables are merged
    /// key by key, everything else is replaced. If an error is returned the
    /// contents of `self` are undefined (but it is still a valid tree).
    ///
    /// Panics if `self` is not a table.
    pub fn from_source_with_init(&mut self, source: &Source<'_>) -> Result<(), Error> {
        self.assert_table("from_source_with_init");

        let root = std::mem::replace(self, Self::new_table());
        let mut visitor = PatchVisitor::new(root);
        let result = parse_source(source, &mut visitor);
        *self = visitor.finish();

        if let Err(err) = &result {
            tracing::debug!(source = source.name(), error = %err, "in-place update failed");
        }
        result
    }

    /// [`from_source_with_init`](Self::from_source_with_init) for an anonymous source.
    pub fn from_str_with_init(&mut self, text: &str) -> Result<(), Error> {
        self.from_source_with_init(&Source::anonymous(text))
    }

    pub fn kind(&self) -> &ConfigElementKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut ConfigElementKind {
        &mut self.kind
    }

    /// Where this element was defined; invalid for elements built in code.
    pub fn span(&self) -> Span {
        self.span
    }

    pub fn set_span(&mut self, span: Span) {
        self.span = span;
    }

    pub fn is_value(&self) -> bool {
        matches!(self.kind, ConfigElementKind::Value(_))
    }

    pub fn is_table(&self) -> bool {
        matches!(self.kind, ConfigElementKind::Table(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, ConfigElementKind::Array(_))
    }

    pub fn as_value(&self) -> Option<&str> {
        match &self.kind {
            ConfigElementKind::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_value_mut(&mut self) -> Option<&mut String> {
        match &mut self.kind {
            ConfigElementKind::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<String> {
        match self.kind {
            ConfigElementKind::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&IndexMap<String, ConfigElement>> {
        match &self.kind {
            ConfigElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut IndexMap<String, ConfigElement>> {
        match &mut self.kind {
            ConfigElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn into_table(self) -> Option<IndexMap<String, ConfigElement>> {
        match self.kind {
            ConfigElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigElement]> {
        match &self.kind {
            ConfigElementKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<ConfigElement>> {
        match &mut self.kind {
            ConfigElementKind::Array(array) => Some(array),
            _ => None,
        }
    }

    pub fn into_array(self) -> Option<Vec<ConfigElement>> {
        match self.kind {
            ConfigElementKind::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Child of a table by key. `None` for values and arrays.
    pub fn get(&self, name: &str) -> Option<&ConfigElement> {
        self.as_table()?.get(name)
    }

    /// Upserts `elem` under `name` in a table (an existing key keeps its
    /// position), or pushes it onto an array, ignoring `name`.
    ///
    /// Panics if `self` is a value.
    pub fn insert(&mut self, name: impl Into<String>, elem: ConfigElement) {
        match &mut self.kind {
            ConfigElementKind::Table(table) => {
                table.insert(name.into(), elem);
            }
            ConfigElementKind::Array(array) => array.push(elem),
            ConfigElementKind::Value(_) => Self::insert_into_value(),
        }
    }

    /// Streams this element into `printer`. Only the root table passes `is_root`;
    /// its entries are printed without surrounding braces.
    pub fn print<W: fmt::Write>(
        &self,
        name: Option<&str>,
        is_root: bool,
        printer: &mut Printer<'_, W>,
    ) -> fmt::Result {
        match &self.kind {
            ConfigElementKind::Value(value) => printer.value(name, value),
            ConfigElementKind::Table(table) => {
                printer.start_table(name, is_root, table.is_empty())?;
                for (key, child) in table {
                    child.print(Some(key), false, printer)?;
                }
                printer.end_table(is_root)
            }
            ConfigElementKind::Array(array) => {
                let one_line = !array
                    .iter()
                    .any(|child| child.as_table().is_some_and(|t| !t.is_empty()));
                printer.start_array(name, one_line)?;
                for child in array {
                    child.print(None, false, printer)?;
                }
                printer.end_array()
            }
        }
    }

    pub fn printer(&self) -> ElementPrinter<'_> {
        ElementPrinter::new(self)
    }
}

impl FromStr for ConfigElement {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        ConfigElement::from_str(text)
    }
}

/// The pretty-printed form, as [`ElementPrinter`] produces it.
impl fmt::Display for ConfigElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.printer().format(f)
    }
}
