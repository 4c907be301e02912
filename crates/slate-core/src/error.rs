//! The error type shared by the lexer, parser, tree and native mapping.

use std::fmt::Display;

use crate::{Source, Span};

/// What went wrong, which decides whether the caller can carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Lexical or syntactic malformation. The current parse is aborted.
    ParseFailure,
    /// A native value could not be rebuilt from its element. The value is left
    /// in an unspecified (but safe to inspect) state.
    InvalidRepr,
    /// A table had a key the native schema does not know. The value is untouched.
    UnknownField,
    /// Reserved for extensions; the code is theirs to define.
    Custom(i32),
}

impl ErrorKind {
    pub fn is_recoverable(self) -> bool {
        !matches!(self, ErrorKind::ParseFailure)
    }
}

/// An error with its kind, display text and the span it points at.
///
/// `text` is the fully formatted line (`name:line:col: error: message` when the
/// source was known), `message` is the bare message for renderers that draw
/// their own location header.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{text}")]
pub struct Error {
    pub kind: ErrorKind,
    pub text: String,
    pub message: String,
    pub span: Span,
}

impl Error {
    /// Location-less error; `text` is used verbatim.
    pub fn new(kind: ErrorKind, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            kind,
            message: text.clone(),
            text,
            span: Span::invalid(),
        }
    }

    /// Builds an error pointing at `span`.
    ///
    /// `source`, when given, must be the source the span was produced from; it is
    /// consulted to turn the span start into a line and column.
    pub fn from_span(span: Span, source: Option<&Source<'_>>, kind: ErrorKind, msg: &str) -> Self {
        let text = match source {
            Some(source) if span.is_valid() => {
                let (line, col) = source.line_col(span.start());
                format!("{}:{}:{}: error: {}", source.name(), line, col, msg)
            }
            Some(source) => format!("{}: error: {}", source.name(), msg),
            None => format!("error: {}", msg),
        };
        Self {
            kind,
            text,
            message: msg.to_owned(),
            span,
        }
    }

    /// Re-anchors an error that was raised without location info.
    ///
    /// Errors which already carry a valid span are returned unchanged.
    pub fn located(self, span: Span, source: Option<&Source<'_>>) -> Self {
        if self.span.is_valid() || !span.is_valid() {
            return self;
        }
        Self::from_span(span, source, self.kind, &self.message)
    }

    pub fn is_recoverable(&self) -> bool {
        self.kind.is_recoverable()
    }
}

/// Access to the error a value carries, if any.
pub trait GetError {
    fn get_error(&self) -> Option<&Error>;

    fn has_error(&self) -> bool {
        self.get_error().is_some()
    }
}

impl GetError for Error {
    fn get_error(&self) -> Option<&Error> {
        Some(self)
    }
}

impl<T> GetError for Result<T, Error> {
    fn get_error(&self) -> Option<&Error> {
        self.as_ref().err()
    }
}

impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::new(ErrorKind::InvalidRepr, msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::new(ErrorKind::InvalidRepr, msg.to_string())
    }

    fn unknown_field(field: &str, expected: &'static [&'static str]) -> Self {
        let text = if expected.is_empty() {
            format!("Unknown field `{field}`, there are no fields")
        } else {
            format!(
                "Unknown field `{field}`, expected one of: {}",
                expected.join(", ")
            )
        };
        Error::new(ErrorKind::UnknownField, text)
    }
}
