//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::lexer::TokenKind;
use super::string::ConfigString;
use super::visitor::Visitor;

impl<'s, V: Visitor<'s>> Parser<'_, 's, '_, V> {
    #[inline]
    pub(super) fn assert_current(&self, expected: TokenKind<'s>) {
        let current = self.lexer.cur_token().map(|token| token.kind).ok();
        assert_eq!(
            current,
            Some(expected),
            "broken parser invariant: expected {:?} but found {:?} (upstream caller's responsibility)",
            expected,
            current,
        );
    }

    #[inline]
    pub(super) fn assert_balanced(&self) {
        assert_eq!(
            self.depth, 0,
            "broken parser invariant: {} nested element(s) left open",
            self.depth,
        );
    }
}

impl ConfigString<'_> {
    #[cold]
    pub(super) fn not_a_string(kind: TokenKind<'_>) -> ! {
        panic!("ConfigString::from_token: {:?} is not a string token", kind)
    }
}
