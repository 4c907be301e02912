//! Slate: a small configuration language with in-place reloading.
//!
//! # Example
//!
//! ```
//! use serde::Deserialize;
//! use slate_lib::{ConfigElement, Source, from_element};
//!
//! #[derive(Deserialize)]
//! struct Server {
//!     host: String,
//!     ports: Vec<u16>,
//! }
//!
//! let source = Source::new("server.cfg", "host = localhost\nports = [80, 443]\n");
//! let root = ConfigElement::from_source(&source).unwrap();
//! let server: Server = from_element(&root, Some(&source)).unwrap();
//!
//! assert_eq!(server.host, "localhost");
//! assert_eq!(server.ports, [80, 443]);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod diagnostics;
pub mod element;
pub mod parser;
pub mod repr;

pub use diagnostics::ErrorPrinter;
pub use element::{ConfigElement, ConfigElementKind, ElementPrinter};
pub use parser::{ConfigString, Lexer, Parser, Token, TokenKind, Visitor};
pub use repr::{ElementRepr, from_element, to_element};
pub use slate_core::{Error, ErrorKind, GetError, Result, Source, Span};
