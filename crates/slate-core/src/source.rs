//! Named text buffers and position lookups.

use crate::Span;

/// An immutable configuration text together with the name it came from.
///
/// The text is borrowed for the whole lifetime of every token, string slice and
/// span produced from it, so a source can be lexed as many times as needed
/// without invalidating earlier results. Line starts are computed once up front.
#[derive(Clone, Debug)]
pub struct Source<'s> {
    name: &'s str,
    text: &'s str,
    line_starts: Vec<usize>,
}

impl<'s> Source<'s> {
    pub fn new(name: &'s str, text: &'s str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name,
            text,
            line_starts,
        }
    }

    /// Source without a meaningful origin (strings parsed from code).
    pub fn anonymous(text: &'s str) -> Self {
        Self::new("<string>", text)
    }

    pub fn name(&self) -> &'s str {
        self.name
    }

    pub fn text(&self) -> &'s str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text covered by `span`, `None` for the invalid span or a span outside the text.
    pub fn slice(&self, span: Span) -> Option<&'s str> {
        span.range().and_then(|r| self.text.get(r))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based line and column of a byte offset. Columns count chars, not bytes.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        self.ensure_in_bounds(offset);
        let line = self.line_index(offset);
        let line_start = self.line_starts[line];
        let col = self.text[line_start..offset].chars().count();
        (line + 1, col + 1)
    }

    /// Text of the 1-based `line`, without its line terminator.
    pub fn line(&self, line: usize) -> Option<&'s str> {
        let idx = line.checked_sub(1)?;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.text.len(), |next| next - 1);
        let text = &self.text[start..end];
        Some(text.strip_suffix('\r').unwrap_or(text))
    }

    fn line_index(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }
}
