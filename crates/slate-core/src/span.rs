use std::ops::Range;

/// Half-open byte range `[start, end)` into a single [`Source`](crate::Source).
///
/// A span is only meaningful against the source text that produced it. Spans
/// for synthetic nodes (built in code rather than parsed) are [`Span::invalid`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Default for Span {
    fn default() -> Self {
        Self::invalid()
    }
}

impl Span {
    const SENTINEL: usize = usize::MAX;

    pub fn new(start: usize, end: usize) -> Self {
        Self::ensure_ordered(start, end);
        Self { start, end }
    }

    /// Zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    pub const fn invalid() -> Self {
        Self {
            start: Self::SENTINEL,
            end: Self::SENTINEL,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start != Self::SENTINEL
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        if self.is_valid() {
            self.end - self.start
        } else {
            0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest span covering both. An invalid side is ignored.
    pub fn combine(self, other: Span) -> Span {
        match (self.is_valid(), other.is_valid()) {
            (false, _) => other,
            (_, false) => self,
            _ => Span {
                start: self.start.min(other.start),
                end: self.end.max(other.end),
            },
        }
    }

    /// Byte range for slicing, `None` for the invalid span.
    pub fn range(&self) -> Option<Range<usize>> {
        self.is_valid().then_some(self.start..self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Span::new(range.start, range.end)
    }
}
