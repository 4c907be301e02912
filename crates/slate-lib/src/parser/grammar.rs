//! Grammar productions.
//!
//! ```text
//! document     := table-body Eof | '{' table-body '}' Eof
//! table-body   := (table-elem ','?)*
//! table-elem   := string ('=' element | '{' table-body '}')
//! element      := '[' array-body ']' | '{' table-body '}' | string-expr
//! array-body   := (element (',' element)* ','?)?
//! string-expr  := source ('~'? source)*
//! source       := string | '$' string
//! ```

use slate_core::Error;

use super::core::Parser;
use super::lexer::{Token, TokenKind};
use super::string::ConfigString;
use super::visitor::Visitor;

impl<'s, V: Visitor<'s>> Parser<'_, 's, '_, V> {
    pub(super) fn parse_document(&mut self) -> Result<(), Error> {
        let first = self.current()?;
        if first.kind == TokenKind::LeftBrace {
            // The root table may be wrapped in braces; it is never announced.
            self.parse_braced_table(first, false)?;
            let last = self.current()?;
            if last.kind != TokenKind::Eof {
                return self.error(last.span, "Expected end of input");
            }
            return Ok(());
        }

        self.parse_table_body()?;
        let last = self.current()?;
        if last.kind != TokenKind::Eof {
            return self.error(last.span, "Expected a string");
        }
        Ok(())
    }

    fn parse_table_body(&mut self) -> Result<(), Error> {
        while self.parse_table_element()? {
            if self.current()?.kind == TokenKind::Comma {
                self.bump()?;
            }
        }
        Ok(())
    }

    fn parse_table_element(&mut self) -> Result<bool, Error> {
        let name = self.current()?;
        if !name.kind.is_string() {
            return Ok(false);
        }

        let source = self.source();
        self.visitor
            .start_element(source, ConfigString::from_token(name))?;

        let next = self.bump()?;
        match next.kind {
            TokenKind::Assign => {
                let value = self.bump()?;
                if !self.parse_element()? {
                    return if value.kind == TokenKind::Eof {
                        self.error(next.span, "Expected '[', '{' or a string to follow, but got EOF")
                    } else {
                        self.error(value.span, "Expected '[', '{' or a string")
                    };
                }
            }
            TokenKind::LeftBrace => self.parse_braced_table(next, true)?,
            TokenKind::Eof => {
                return self.error(name.span, "Expected '=' or '{' to follow, but got EOF");
            }
            _ => return self.error(next.span, "Expected '=' or '{'"),
        }

        self.visitor.end_element()?;
        Ok(true)
    }

    /// Returns `false` without consuming anything if no element starts here.
    fn parse_element(&mut self) -> Result<bool, Error> {
        let token = self.current()?;
        match token.kind {
            TokenKind::LeftBracket => self.parse_array(token)?,
            TokenKind::LeftBrace => self.parse_braced_table(token, true)?,
            TokenKind::Dollar => self.parse_string_expr()?,
            kind if kind.is_string() => self.parse_string_expr()?,
            _ => return Ok(false),
        }
        Ok(true)
    }

    fn parse_braced_table(&mut self, open: Token<'s>, is_element: bool) -> Result<(), Error> {
        self.assert_current(TokenKind::LeftBrace);
        self.enter(open.span)?;
        self.bump()?;
        if is_element {
            let source = self.source();
            self.visitor.set_table(source, open.span)?;
        }

        self.parse_table_body()?;

        let close = self.current()?;
        match close.kind {
            TokenKind::RightBrace => {
                self.bump()?;
            }
            TokenKind::Eof => return self.error(open.span, "Unterminated table"),
            TokenKind::Comma => return self.error(close.span, "Expected '}' or a string"),
            _ => return self.error(close.span, "Expected '}', ',' or a string"),
        }
        self.leave();
        Ok(())
    }

    fn parse_array(&mut self, open: Token<'s>) -> Result<(), Error> {
        self.assert_current(TokenKind::LeftBracket);
        self.enter(open.span)?;
        self.bump()?;
        let source = self.source();
        self.visitor.set_array(source, open.span)?;

        while self.parse_array_element()? {
            if self.current()?.kind != TokenKind::Comma {
                break;
            }
            self.bump()?;
        }

        let close = self.current()?;
        match close.kind {
            TokenKind::RightBracket => {
                self.bump()?;
            }
            TokenKind::Eof => return self.error(open.span, "Unterminated array"),
            TokenKind::Comma => return self.error(close.span, "Expected ']' or a string"),
            _ => return self.error(close.span, "Expected ']', ',' or a string"),
        }
        self.leave();
        Ok(())
    }

    fn parse_array_element(&mut self) -> Result<bool, Error> {
        let token = self.current()?;
        let starts_element = token.kind.is_string()
            || matches!(
                token.kind,
                TokenKind::Dollar | TokenKind::LeftBrace | TokenKind::LeftBracket
            );
        if !starts_element {
            return Ok(false);
        }

        let source = self.source();
        self.visitor.start_element(source, ConfigString::empty())?;
        self.parse_element()?;
        self.visitor.end_element()?;
        Ok(true)
    }

    /// Adjacent fragments concatenate; `~` between them is optional.
    ///
    /// A string followed by `=` or `{` is the next table key, not a fragment.
    fn parse_string_expr(&mut self) -> Result<(), Error> {
        loop {
            self.parse_string_source()?;

            let next = self.current()?;
            match next.kind {
                TokenKind::Tilde => {
                    let after = self.bump()?;
                    if after.kind == TokenKind::Eof {
                        return self.error(next.span, "Expected a string or '$' to follow, but got EOF");
                    }
                    if !after.kind.is_string() && after.kind != TokenKind::Dollar {
                        return self.error(after.span, "Expected a string or '$'");
                    }
                }
                TokenKind::Dollar => {}
                kind if kind.is_string() => {
                    let following = self.lexer.peek()?;
                    if matches!(following.kind, TokenKind::Assign | TokenKind::LeftBrace) {
                        return Ok(());
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// A single fragment: a string literal or a `$name` expansion.
    fn parse_string_source(&mut self) -> Result<(), Error> {
        let token = self.current()?;
        let source = self.source();
        if token.kind == TokenKind::Dollar {
            let name = self.bump()?;
            if name.kind == TokenKind::Eof {
                return self.error(token.span, "Expected a string to follow '$', but got EOF");
            }
            if !name.kind.is_string() {
                return self.error(name.span, "Expected a string after '$'");
            }
            self.visitor.expand(source, ConfigString::from_token(name))?;
        } else {
            self.visitor
                .append_string(source, ConfigString::from_token(token))?;
        }
        self.bump()?;
        Ok(())
    }
}
