use slate_core::{Error, Source, Span};

use super::ConfigString;

/// Receiver of parse events.
///
/// The parser never builds a tree itself: it reports what it sees and lets the
/// visitor decide whether to create fresh nodes or patch existing ones. Any
/// `Err` returned here aborts the parse and is handed back to the caller as is.
///
/// Events arrive properly nested. Each element is bracketed by
/// `start_element`/`end_element` and in between receives exactly one of
/// `set_table`, `set_array`, or a run of `append_string`/`expand` calls.
pub trait Visitor<'s> {
    /// A new element named `name` begins. Array elements get an empty name.
    fn start_element(&mut self, source: &Source<'s>, name: ConfigString<'s>) -> Result<(), Error>;

    /// The innermost open element is complete.
    fn end_element(&mut self) -> Result<(), Error>;

    /// The current element is a table; `span` points at its `{`.
    fn set_table(&mut self, source: &Source<'s>, span: Span) -> Result<(), Error>;

    /// The current element is an array; `span` points at its `[`.
    fn set_array(&mut self, source: &Source<'s>, span: Span) -> Result<(), Error>;

    /// A string fragment to concatenate onto the current value.
    fn append_string(&mut self, source: &Source<'s>, string: ConfigString<'s>)
    -> Result<(), Error>;

    /// `$name`: substitute a previously defined element.
    fn expand(&mut self, source: &Source<'s>, name: ConfigString<'s>) -> Result<(), Error>;
}
