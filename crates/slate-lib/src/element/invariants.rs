//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::ConfigElement;

impl ConfigElement {
    #[inline]
    pub(super) fn assert_table(&self, operation: &str) {
        assert!(
            self.is_table(),
            "ConfigElement::{operation}: the root must be a table, found {:?}",
            self.kind(),
        );
    }

    #[cold]
    pub(super) fn insert_into_value() -> ! {
        panic!("Trying to insert an element into a value")
    }
}
