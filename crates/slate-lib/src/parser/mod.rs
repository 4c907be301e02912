//! Lexer and parser for the configuration language.
//!
//! # Architecture
//!
//! Parsing is split in two layers that never build a tree themselves:
//!
//! - The [`Lexer`] hands out zero-copy [`Token`]s with one token of lookahead.
//! - The [`Parser`] walks the grammar by recursive descent and reports every
//!   element, table, array and string fragment to a [`Visitor`].
//!
//! Whatever the visitor does with those events (build a fresh tree, patch an
//! existing one, record them for a test) is up to it.
//!
//! # Errors
//!
//! There is no recovery. The first lexer, grammar or visitor error aborts the
//! parse and is returned unchanged.

pub mod lexer;

mod core;
mod grammar;
mod invariants;
mod string;
mod visitor;

#[cfg(test)]
mod lexer_tests;

pub use core::{DEFAULT_RECURSION_LIMIT, Parser, parse_source};
pub use lexer::{Lexer, Token, TokenKind, tokenize};
pub use string::{ConfigString, StringKind};
pub use visitor::Visitor;

pub(crate) use lexer::{is_border_char, is_middle_char};
