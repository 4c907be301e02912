//! Serializes a [`ConfigElement`] back into configuration source.
//!
//! [`Printer`] is a small streaming state machine: callers open and close tables
//! and arrays and emit values, and it takes care of separators, indentation and
//! quoting. [`ElementPrinter`] drives it for a whole tree.

use std::fmt::Write;

use super::ConfigElement;
use crate::parser::{is_border_char, is_middle_char};

/// How a string has to be written to read back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    Naked,
    /// `"..."` wrapped in this many braces on each side (0 for plain quotes).
    Quoted(usize),
}

pub fn quote_style(s: &str) -> QuoteStyle {
    let (Some(first), Some(last)) = (s.chars().next(), s.chars().next_back()) else {
        return QuoteStyle::Quoted(0);
    };
    let naked = is_border_char(first)
        && is_border_char(last)
        && s.chars().all(is_middle_char)
        && !s.contains('\\');
    if naked {
        return QuoteStyle::Naked;
    }
    if !s.contains(['"', '\\']) {
        return QuoteStyle::Quoted(0);
    }
    QuoteStyle::Quoted(raw_brace_count(s))
}

/// Braces needed so that no `"}}..` inside `s` closes the raw string early.
fn raw_brace_count(s: &str) -> usize {
    let longest_run = s
        .match_indices('"')
        .map(|(i, _)| s[i + 1..].bytes().take_while(|&b| b == b'}').count())
        .max()
        .unwrap_or(0);
    (longest_run + 1).max(2)
}

#[derive(Debug, Clone, Copy)]
struct Level {
    in_array: bool,
    one_line: bool,
    is_empty: bool,
}

/// Streaming writer for configuration source.
pub struct Printer<'w, W: Write> {
    writer: &'w mut W,
    depth: usize,
    levels: Vec<Level>,
    compact: bool,
}

impl<'w, W: Write> Printer<'w, W> {
    pub fn new(writer: &'w mut W) -> Self {
        Self {
            writer,
            depth: 0,
            levels: vec![Level {
                in_array: false,
                one_line: false,
                is_empty: true,
            }],
            compact: false,
        }
    }

    /// Prints everything on a single line.
    pub fn compact(mut self, value: bool) -> Self {
        self.compact = value;
        self.levels[0].one_line = value;
        self
    }

    fn level(&self) -> Level {
        self.levels[self.levels.len() - 1]
    }

    fn mark_non_empty(&mut self) {
        let last = self.levels.len() - 1;
        self.levels[last].is_empty = false;
    }

    fn push_level(&mut self, in_array: bool, one_line: bool) {
        self.depth += 1;
        self.levels.push(Level {
            in_array,
            one_line: one_line || self.compact,
            is_empty: true,
        });
    }

    fn pop_level(&mut self) {
        self.depth -= 1;
        self.levels.pop();
    }

    fn write_indent(&mut self) -> std::fmt::Result {
        for _ in 0..self.depth {
            self.writer.write_char('\t')?;
        }
        Ok(())
    }

    fn write_string(&mut self, s: &str) -> std::fmt::Result {
        match quote_style(s) {
            QuoteStyle::Naked => self.writer.write_str(s),
            QuoteStyle::Quoted(braces) => {
                for _ in 0..braces {
                    self.writer.write_char('{')?;
                }
                write!(self.writer, "\"{s}\"")?;
                for _ in 0..braces {
                    self.writer.write_char('}')?;
                }
                Ok(())
            }
        }
    }

    /// Separator and indentation before the next entry of the current level.
    fn start_entry(&mut self) -> std::fmt::Result {
        let level = self.level();
        if (level.in_array || level.one_line) && !level.is_empty {
            self.writer.write_char(',')?;
        }
        if level.one_line {
            // `{` glued to a raw-quoted key would lex as a longer raw opener.
            let opens_table = self.depth > 0 && !level.in_array;
            if !level.is_empty || opens_table {
                self.writer.write_char(' ')?;
            }
            return Ok(());
        }
        if !(self.depth == 0 && level.is_empty) {
            self.writer.write_char('\n')?;
        }
        self.write_indent()
    }

    /// Closing newline and indentation of a multi-line level.
    fn finish_level(&mut self) -> std::fmt::Result {
        let level = self.level();
        if level.one_line || level.is_empty {
            return Ok(());
        }
        self.writer.write_char('\n')?;
        self.depth -= 1;
        self.write_indent()?;
        self.depth += 1;
        Ok(())
    }

    pub fn value(&mut self, name: Option<&str>, value: &str) -> std::fmt::Result {
        self.start_entry()?;
        if let Some(name) = name {
            self.write_string(name)?;
            self.writer.write_str(" = ")?;
        }
        self.write_string(value)?;
        self.mark_non_empty();
        Ok(())
    }

    pub fn start_array(&mut self, name: Option<&str>, one_line: bool) -> std::fmt::Result {
        let one_line = one_line || self.compact;
        self.start_entry()?;
        if let Some(name) = name {
            self.write_string(name)?;
            self.writer.write_str(" =")?;
            if one_line {
                self.writer.write_char(' ')?;
            } else {
                self.writer.write_char('\n')?;
                self.write_indent()?;
            }
        }
        self.writer.write_char('[')?;
        self.mark_non_empty();
        self.push_level(true, one_line);
        Ok(())
    }

    pub fn end_array(&mut self) -> std::fmt::Result {
        self.finish_level()?;
        self.pop_level();
        self.writer.write_char(']')
    }

    /// `is_root` tables print their entries only, without name or braces.
    pub fn start_table(&mut self, name: Option<&str>, is_root: bool, one_line: bool) -> std::fmt::Result {
        if is_root {
            return Ok(());
        }
        let one_line = one_line || self.compact;
        self.start_entry()?;
        if let Some(name) = name {
            self.write_string(name)?;
            if one_line {
                self.writer.write_char(' ')?;
            } else {
                self.writer.write_char('\n')?;
                self.write_indent()?;
            }
        }
        self.writer.write_char('{')?;
        self.mark_non_empty();
        self.push_level(false, one_line);
        Ok(())
    }

    pub fn end_table(&mut self, is_root: bool) -> std::fmt::Result {
        if is_root {
            let level = self.level();
            if !level.one_line && !level.is_empty {
                self.writer.write_char('\n')?;
            }
            return Ok(());
        }
        let level = self.level();
        if level.one_line && !level.is_empty {
            self.writer.write_char(' ')?;
        }
        self.finish_level()?;
        self.pop_level();
        self.writer.write_char('}')
    }
}

/// Prints a whole element, treating it as the document root.
pub struct ElementPrinter<'e> {
    element: &'e ConfigElement,
    compact: bool,
}

impl<'e> ElementPrinter<'e> {
    pub fn new(element: &'e ConfigElement) -> Self {
        Self {
            element,
            compact: false,
        }
    }

    pub fn compact(mut self, value: bool) -> Self {
        self.compact = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        let mut printer = Printer::new(w).compact(self.compact);
        self.element.print(None, true, &mut printer)
    }
}
