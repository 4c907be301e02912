//! Lexing must not allocate: tokens borrow from the source.
//!
//! Lives in its own test binary because it installs a global allocator.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use slate_lib::{Lexer, Source, TokenKind};

struct CountingAlloc;

thread_local! {
    static ALLOCATIONS: Cell<usize> = const { Cell::new(0) };
}

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        ALLOCATIONS.with(|n| n.set(n.get() + 1));
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        ALLOCATIONS.with(|n| n.set(n.get() + 1));
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

/// Lexes `text` to the end, returning (tokens, allocations made while lexing).
fn lex_counting(text: &str) -> (usize, usize) {
    let source = Source::anonymous(text);

    let before = ALLOCATIONS.with(Cell::get);
    let mut lexer = Lexer::new(&source);
    let mut tokens = 0;
    while lexer.cur_token().unwrap().kind != TokenKind::Eof {
        tokens += 1;
        lexer.next().unwrap();
    }
    let after = ALLOCATIONS.with(Cell::get);

    (tokens, after - before)
}

#[test]
fn raw_strings_do_not_allocate() {
    assert_eq!(lex_counting(r#"{{"raw one"}} {{{"raw two"}}}"#), (2, 0));
    assert_eq!(lex_counting(r#"{{{"a"}}b"}}} {{"x"}"}}"#), (2, 0));
}

#[test]
fn other_tokens_do_not_allocate() {
    assert_eq!(lex_counting(r#"naked "quoted" other"#), (3, 0));
    assert_eq!(lex_counting(r#"a = [1, $b ~ "\t"] # note"#), (10, 0));
}
