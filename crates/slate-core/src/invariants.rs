//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Source, Span};

impl Span {
    #[inline]
    pub(crate) fn ensure_ordered(start: usize, end: usize) {
        assert!(
            start <= end && start != usize::MAX,
            "Span: start {start} must not exceed end {end}"
        );
    }
}

impl Source<'_> {
    #[inline]
    pub(crate) fn ensure_in_bounds(&self, offset: usize) {
        assert!(
            offset <= self.len(),
            "Source `{}`: offset {offset} out of bounds (len {}); span from another source?",
            self.name(),
            self.len(),
        );
    }
}
