//! Lexer for the configuration language.
//!
//! Tokens borrow their text straight from the [`Source`]: naked, quoted and raw
//! strings are all zero-copy slices. Escape sequences are validated here but only
//! decoded later, when a [`ConfigString`](super::ConfigString) is materialized.
//!
//! ## Error handling
//!
//! The first malformed token ends lexing. The error is sticky: once the lexer has
//! produced an error, every further call returns that same error.

use std::fmt;

use logos::Logos;
use slate_core::{Error, ErrorKind, Source, Span};

use super::string::validate_escapes;

/// Zero-copy token: kind (carrying the unprocessed string slice, if any) + span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub kind: TokenKind<'s>,
    pub span: Span,
}

impl<'s> Token<'s> {
    #[inline]
    pub fn new(kind: TokenKind<'s>, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'s> {
    /// Naked or `"quoted"` string. The slice still contains escape sequences.
    EscapedString(&'s str),
    /// `{{"raw"}}` string, used verbatim.
    RawString(&'s str),
    Assign,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    Dollar,
    Comma,
    Tilde,
    Eof,
}

impl<'s> TokenKind<'s> {
    pub fn is_string(&self) -> bool {
        matches!(self, TokenKind::EscapedString(_) | TokenKind::RawString(_))
    }

    /// Unprocessed string contents, `None` for punctuation and `Eof`.
    pub fn text(&self) -> Option<&'s str> {
        match *self {
            TokenKind::EscapedString(s) | TokenKind::RawString(s) => Some(s),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::EscapedString(_) => "EscapedString",
            TokenKind::RawString(_) => "RawString",
            TokenKind::Assign => "Assign",
            TokenKind::LeftBracket => "LeftBracket",
            TokenKind::RightBracket => "RightBracket",
            TokenKind::LeftBrace => "LeftBrace",
            TokenKind::RightBrace => "RightBrace",
            TokenKind::Dollar => "Dollar",
            TokenKind::Comma => "Comma",
            TokenKind::Tilde => "Tilde",
            TokenKind::Eof => "Eof",
        }
    }
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Chars that may start or end a naked string.
///
/// Must stay in sync with the `Naked` regex below and with the printer's
/// decision to emit a string without quotes.
pub(crate) fn is_border_char(c: char) -> bool {
    !c.is_whitespace() && !matches!(c, '=' | '[' | ']' | '{' | '}' | '$' | ',' | '~' | '"' | '#')
}

/// Chars allowed inside a naked string.
pub(crate) fn is_middle_char(c: char) -> bool {
    is_border_char(c) || c == ' '
}

#[derive(Debug, Clone, PartialEq, Default)]
enum LexError {
    #[default]
    UnexpectedCharacter,
    UnterminatedQuoted,
    UnterminatedRaw,
    EofInEscape {
        offset: usize,
    },
}

impl LexError {
    fn into_error(self, span: Span, source: &Source<'_>) -> Error {
        let (span, msg) = match self {
            LexError::UnexpectedCharacter => (span, "Unexpected character"),
            LexError::UnterminatedQuoted => (span, "Unterminated quoted string literal"),
            LexError::UnterminatedRaw => (span, "Unterminated raw string literal"),
            LexError::EofInEscape { offset } => (
                Span::new(offset, offset + 1),
                "Unexpected EOF while parsing escape in string literal",
            ),
        };
        Error::from_span(span, Some(source), ErrorKind::ParseFailure, msg)
    }
}

/// Raw logos output, before trivia filtering and slice extraction.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexError)]
enum RawToken {
    #[token("=")]
    Assign,

    #[token("[")]
    LeftBracket,

    #[token("]")]
    RightBracket,

    #[token("{")]
    LeftBrace,

    #[token("}")]
    RightBrace,

    #[token("$")]
    Dollar,

    #[token(",")]
    Comma,

    #[token("~")]
    Tilde,

    #[token("\"", lex_quoted)]
    Quoted,

    /// Two or more `{` directly followed by `"`.
    #[regex(r#"\{\{+""#, lex_raw)]
    Raw,

    /// Any border char (including `\`); the callback extends it.
    #[regex(r##"[^\s=\[\]{}$,~"#]"##, lex_naked)]
    Naked,

    #[regex(r"\s+")]
    Whitespace,

    #[regex(r"#[^\n]*", allow_greedy = true)]
    Comment,
}

fn lex_quoted(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexError> {
    let end = lex
        .remainder()
        .find('"')
        .ok_or(LexError::UnterminatedQuoted)?;
    lex.bump(end + 1);
    Ok(())
}

/// Finds the first `"` followed by as many `}` as the opener had `{`.
fn lex_raw(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexError> {
    let braces = lex.slice().len() - 1;
    let rest = lex.remainder().as_bytes();

    let quote = rest
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == b'"')
        .map(|(i, _)| i)
        .find(|&i| rest[i + 1..].iter().take_while(|&&b| b == b'}').count() >= braces)
        .ok_or(LexError::UnterminatedRaw)?;
    lex.bump(quote + 1 + braces);
    Ok(())
}

/// Extends a naked string over middle chars, ending it at the last border char.
///
/// A `\` makes the following char part of the string whatever it is.
fn lex_naked(lex: &mut logos::Lexer<RawToken>) -> Result<(), LexError> {
    let start = lex.span().start;
    let rest = &lex.source()[start..];

    let mut end = 0;
    let mut escape_next = false;
    for (i, c) in rest.char_indices() {
        if escape_next {
            escape_next = false;
        } else if is_border_char(c) {
            escape_next = c == '\\';
        } else if c == ' ' {
            continue;
        } else {
            break;
        }
        end = i + c.len_utf8();
    }

    if escape_next {
        return Err(LexError::EofInEscape {
            offset: start + end - 1,
        });
    }

    let matched = lex.span().end - start;
    lex.bump(end - matched);
    Ok(())
}

fn lex_one<'s>(
    source: &Source<'s>,
    inner: &mut logos::Lexer<'s, RawToken>,
) -> Result<Token<'s>, Error> {
    loop {
        let Some(result) = inner.next() else {
            return Ok(Token::new(TokenKind::Eof, Span::empty(source.len())));
        };
        let span = Span::from(inner.span());
        let raw = result.map_err(|e| e.into_error(span, source))?;
        let slice = inner.slice();
        let kind = match raw {
            RawToken::Assign => TokenKind::Assign,
            RawToken::LeftBracket => TokenKind::LeftBracket,
            RawToken::RightBracket => TokenKind::RightBracket,
            RawToken::LeftBrace => TokenKind::LeftBrace,
            RawToken::RightBrace => TokenKind::RightBrace,
            RawToken::Dollar => TokenKind::Dollar,
            RawToken::Comma => TokenKind::Comma,
            RawToken::Tilde => TokenKind::Tilde,
            RawToken::Naked => {
                check_escapes(source, slice, span.start())?;
                TokenKind::EscapedString(slice)
            }
            RawToken::Quoted => {
                let text = &slice[1..slice.len() - 1];
                check_escapes(source, text, span.start() + 1)?;
                TokenKind::EscapedString(text)
            }
            RawToken::Raw => {
                let braces = slice.bytes().take_while(|&b| b == b'{').count();
                TokenKind::RawString(&slice[braces + 1..slice.len() - braces - 1])
            }
            RawToken::Whitespace | RawToken::Comment => continue,
        };
        return Ok(Token::new(kind, span));
    }
}

fn check_escapes(source: &Source<'_>, text: &str, base: usize) -> Result<(), Error> {
    validate_escapes(text).map_err(|bad| {
        let start = base + bad.offset;
        Error::from_span(
            Span::new(start, start + bad.len),
            Some(source),
            ErrorKind::ParseFailure,
            bad.message,
        )
    })
}

/// Pull-based lexer with one token of lookahead.
///
/// [`cur_token`](Lexer::cur_token) is the token the parser is looking at,
/// [`peek`](Lexer::peek) the one after it. `Eof` repeats forever once reached.
pub struct Lexer<'l, 's> {
    source: &'l Source<'s>,
    inner: logos::Lexer<'s, RawToken>,
    current: Result<Token<'s>, Error>,
    lookahead: Result<Token<'s>, Error>,
}

impl<'l, 's> Lexer<'l, 's> {
    pub fn new(source: &'l Source<'s>) -> Self {
        let mut inner = RawToken::lexer(source.text());
        let current = lex_one(source, &mut inner);
        let lookahead = match &current {
            Err(err) => Err(err.clone()),
            Ok(tok) if tok.kind == TokenKind::Eof => Ok(*tok),
            Ok(_) => lex_one(source, &mut inner),
        };
        Self {
            source,
            inner,
            current,
            lookahead,
        }
    }

    pub fn source(&self) -> &'l Source<'s> {
        self.source
    }

    pub fn get_source(&self) -> &'l Source<'s> {
        self.source
    }

    pub fn cur_token(&self) -> Result<Token<'s>, Error> {
        self.current.clone()
    }

    pub fn peek(&self) -> Result<Token<'s>, Error> {
        self.lookahead.clone()
    }

    /// Advances by one token and returns the new current token.
    pub fn next(&mut self) -> Result<Token<'s>, Error> {
        let following = match &self.lookahead {
            Err(err) => Err(err.clone()),
            Ok(tok) if tok.kind == TokenKind::Eof => Ok(*tok),
            Ok(_) => lex_one(self.source, &mut self.inner),
        };
        self.current = std::mem::replace(&mut self.lookahead, following);
        self.cur_token()
    }

    /// Restarts lexing from the beginning of the source.
    pub fn reset(&mut self) {
        *self = Lexer::new(self.source);
    }
}

/// Lexes the whole source, `Eof` token included.
pub fn tokenize<'s>(source: &Source<'s>) -> Result<Vec<Token<'s>>, Error> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.cur_token()?;
        tokens.push(token);
        if token.kind == TokenKind::Eof {
            return Ok(tokens);
        }
        lexer.next()?;
    }
}
