#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for the slate configuration language.
//!
//! Everything here is independent of the lexer and parser:
//! - [`Source`]: a named, immutable text buffer with line lookups
//! - [`Span`]: a byte range into one source, or the invalid sentinel
//! - [`Error`]: the error type shared by every slate crate
//! - [`Colors`]: ANSI palette for the token dump

mod colors;
mod error;
mod invariants;
mod source;
mod span;

pub use colors::Colors;
pub use error::{Error, ErrorKind, GetError};
pub use source::Source;
pub use span::Span;

/// Result type used throughout slate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod span_tests;
