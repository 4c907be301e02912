use slate_core::{Error, ErrorKind, Source, Span};

use super::ErrorPrinter;
use crate::element::ConfigElement;

fn parse_error(source: &Source<'_>) -> Error {
    ConfigElement::from_source(source).unwrap_err()
}

#[test]
fn renders_excerpt_with_path() {
    let source = Source::new("test.cfg", "a ]");
    let err = parse_error(&source);

    let result = ErrorPrinter::new(&err).source(&source).render();
    insta::assert_snapshot!(result, @r"
    error: Expected '=' or '{'
     --> test.cfg:1:3
      |
    1 | a ]
      |   ^
    ");
}

#[test]
fn points_at_the_right_line() {
    let source = Source::new("test.cfg", "a = 1\nb = $missing\nc = 3\n");
    let err = parse_error(&source);

    let result = ErrorPrinter::new(&err).source(&source).render();
    assert!(result.contains("Could not find an element named `missing`"));
    assert!(result.contains("test.cfg:2:6"));
    assert!(result.contains("2 | b = $missing"));
    assert!(!result.contains("c = 3"));
}

#[test]
fn empty_span_at_eof() {
    let source = Source::new("test.cfg", "a =");
    let err = parse_error(&source);

    let result = ErrorPrinter::new(&err).source(&source).render();
    assert!(result.contains("Expected '[', '{' or a string to follow, but got EOF"));
    assert!(result.contains("1 | a ="));
}

#[test]
fn colored() {
    let source = Source::new("test.cfg", "a ]");
    let err = parse_error(&source);

    let result = ErrorPrinter::new(&err).source(&source).colored(true).render();
    assert!(result.contains("Expected '=' or '{'"));
    assert!(result.contains('\x1b'));
}

#[test]
fn without_source_prints_text() {
    let source = Source::new("test.cfg", "a ]");
    let err = parse_error(&source);

    insta::assert_snapshot!(ErrorPrinter::new(&err).render(), @"test.cfg:1:3: error: Expected '=' or '{'");
}

#[test]
fn invalid_span_prints_text() {
    let source = Source::new("test.cfg", "a = 1");
    let err = Error::new(ErrorKind::Custom(7), "something broke");

    assert_eq!(err.span, Span::invalid());
    insta::assert_snapshot!(ErrorPrinter::new(&err).source(&source).render(), @"something broke");
}
