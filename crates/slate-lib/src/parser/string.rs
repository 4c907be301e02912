//! Lazily decoded string fragments.

use std::borrow::Cow;
use std::fmt::{self, Write};

use slate_core::Span;

use super::lexer::{Token, TokenKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringKind<'s> {
    /// Used verbatim.
    Raw(&'s str),
    /// Contains escape sequences, decoded on materialization.
    Escaped(&'s str),
}

/// A string fragment as it appeared in the source.
///
/// Nothing is allocated until the fragment is materialized, and raw fragments
/// (or escaped ones without a `\`) can be borrowed without any copy at all
/// through [`ConfigString::to_cow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfigString<'s> {
    pub kind: StringKind<'s>,
    pub span: Span,
}

impl<'s> ConfigString<'s> {
    pub fn new(kind: StringKind<'s>, span: Span) -> Self {
        Self { kind, span }
    }

    /// The empty name handed out for array elements.
    pub fn empty() -> Self {
        Self::new(StringKind::Raw(""), Span::invalid())
    }

    /// Panics if `token` is not a string token.
    pub fn from_token(token: Token<'s>) -> Self {
        let kind = match token.kind {
            TokenKind::EscapedString(s) => StringKind::Escaped(s),
            TokenKind::RawString(s) => StringKind::Raw(s),
            other => Self::not_a_string(other),
        };
        Self::new(kind, token.span)
    }

    /// Unprocessed source slice.
    pub fn source_text(&self) -> &'s str {
        match self.kind {
            StringKind::Raw(s) | StringKind::Escaped(s) => s,
        }
    }

    /// Decodes this fragment onto the end of `dest`.
    pub fn append_to_string(&self, dest: &mut String) {
        match self.kind {
            StringKind::Raw(s) => dest.push_str(s),
            StringKind::Escaped(s) => {
                dest.reserve(s.len());
                unescape_into(s, dest).expect("String write never fails");
            }
        }
    }

    pub fn to_cow(&self) -> Cow<'s, str> {
        match self.kind {
            StringKind::Raw(s) => Cow::Borrowed(s),
            StringKind::Escaped(s) if !s.contains('\\') => Cow::Borrowed(s),
            StringKind::Escaped(s) => {
                let mut out = String::with_capacity(s.len());
                unescape_into(s, &mut out).expect("String write never fails");
                Cow::Owned(out)
            }
        }
    }
}

impl fmt::Display for ConfigString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StringKind::Raw(s) => f.write_str(s),
            StringKind::Escaped(s) => unescape_into(s, f),
        }
    }
}

/// An escape sequence the lexer refuses, relative to the start of the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BadEscape {
    pub offset: usize,
    pub len: usize,
    pub message: &'static str,
}

enum Escape {
    Char(char),
    Unicode { digits: usize },
}

fn classify(c: char) -> Option<Escape> {
    let decoded = match c {
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        '0' => '\0',
        'u' => return Some(Escape::Unicode { digits: 4 }),
        'U' => return Some(Escape::Unicode { digits: 8 }),
        c if c.is_alphanumeric() => return None,
        c => c,
    };
    Some(Escape::Char(decoded))
}

fn hex_scalar(digits: &str) -> Option<char> {
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

pub(crate) fn validate_escapes(s: &str) -> Result<(), BadEscape> {
    let mut chars = s.char_indices();
    while let Some((i, c)) = chars.next() {
        if c != '\\' {
            continue;
        }
        let Some((_, e)) = chars.next() else {
            return Err(BadEscape {
                offset: i,
                len: 1,
                message: "Incomplete escape sequence",
            });
        };
        match classify(e) {
            Some(Escape::Char(_)) => {}
            Some(Escape::Unicode { digits }) => {
                let start = i + 2;
                let valid = s.get(start..start + digits).and_then(hex_scalar).is_some();
                if !valid {
                    return Err(BadEscape {
                        offset: i,
                        len: 2,
                        message: "Invalid unicode escape",
                    });
                }
                for _ in 0..digits {
                    chars.next();
                }
            }
            None => {
                return Err(BadEscape {
                    offset: i,
                    len: 1 + e.len_utf8(),
                    message: "Invalid escape sequence",
                });
            }
        }
    }
    Ok(())
}

/// Decodes escapes into `w`. Sequences the lexer would have rejected decode to U+FFFD.
fn unescape_into(s: &str, w: &mut impl Write) -> fmt::Result {
    let mut rest = s;
    while let Some(pos) = rest.find('\\') {
        w.write_str(&rest[..pos])?;
        let mut chars = rest[pos + 1..].chars();
        let Some(e) = chars.next() else {
            return w.write_char(char::REPLACEMENT_CHARACTER);
        };
        rest = chars.as_str();
        match classify(e) {
            Some(Escape::Char(c)) => w.write_char(c)?,
            Some(Escape::Unicode { digits }) => {
                let decoded = rest.get(..digits).and_then(hex_scalar);
                w.write_char(decoded.unwrap_or(char::REPLACEMENT_CHARACTER))?;
                rest = rest.get(digits..).unwrap_or("");
            }
            None => w.write_char(char::REPLACEMENT_CHARACTER)?,
        }
    }
    w.write_str(rest)
}
