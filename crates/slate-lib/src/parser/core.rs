//! Parser state and low-level operations.

use slate_core::{Error, ErrorKind, Source, Span};

use super::lexer::{Lexer, Token};
use super::visitor::Visitor;

/// Nesting depth accepted when no explicit limit is configured.
pub const DEFAULT_RECURSION_LIMIT: u32 = 256;

/// Recursive descent parser that reports every syntactic event to a [`Visitor`].
///
/// The parser stops at the first error, whether it comes from the lexer, the
/// grammar or the visitor.
pub struct Parser<'l, 's, 'v, V: Visitor<'s>> {
    pub(super) lexer: Lexer<'l, 's>,
    pub(super) visitor: &'v mut V,
    pub(super) depth: u32,
    recursion_limit: Option<u32>,
}

impl<'l, 's, 'v, V: Visitor<'s>> Parser<'l, 's, 'v, V> {
    pub fn new(source: &'l Source<'s>, visitor: &'v mut V) -> Self {
        Self {
            lexer: Lexer::new(source),
            visitor,
            depth: 0,
            recursion_limit: Some(DEFAULT_RECURSION_LIMIT),
        }
    }

    /// Maximum table/array nesting; `None` removes the limit.
    pub fn with_recursion_limit(mut self, limit: Option<u32>) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn parse(mut self) -> Result<(), Error> {
        let source = self.source();
        tracing::debug!(source = source.name(), bytes = source.len(), "parse start");

        let result = self.parse_document();
        match &result {
            Ok(()) => {
                self.assert_balanced();
                tracing::debug!(source = source.name(), "parse done");
            }
            Err(err) => tracing::debug!(source = source.name(), error = %err, "parse failed"),
        }
        result
    }

    pub(super) fn source(&self) -> &'l Source<'s> {
        self.lexer.source()
    }

    pub(super) fn current(&self) -> Result<Token<'s>, Error> {
        self.lexer.cur_token()
    }

    /// Consumes the current token, returning the one after it.
    pub(super) fn bump(&mut self) -> Result<Token<'s>, Error> {
        self.lexer.next()
    }

    pub(super) fn error<T>(&self, span: Span, msg: &str) -> Result<T, Error> {
        Err(Error::from_span(
            span,
            Some(self.source()),
            ErrorKind::ParseFailure,
            msg,
        ))
    }

    pub(super) fn enter(&mut self, span: Span) -> Result<(), Error> {
        if self.recursion_limit.is_some_and(|limit| self.depth >= limit) {
            return self.error(span, "Nesting too deep");
        }
        self.depth += 1;
        Ok(())
    }

    pub(super) fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Parses `source` with default settings, feeding events to `visitor`.
pub fn parse_source<'s, V: Visitor<'s>>(source: &Source<'s>, visitor: &mut V) -> Result<(), Error> {
    Parser::new(source, visitor).parse()
}
