use crate::Span;

#[test]
fn combine_covers_both() {
    let a = Span::new(2, 5);
    let b = Span::new(8, 10);

    assert_eq!(a.combine(b), Span::new(2, 10));
    assert_eq!(b.combine(a), Span::new(2, 10));
}

#[test]
fn combine_ignores_invalid_side() {
    let a = Span::new(3, 4);

    assert_eq!(Span::invalid().combine(a), a);
    assert_eq!(a.combine(Span::invalid()), a);
    assert!(!Span::invalid().combine(Span::invalid()).is_valid());
}

#[test]
fn invalid_span_has_no_range() {
    let span = Span::default();

    assert!(!span.is_valid());
    assert_eq!(span.range(), None);
    assert_eq!(span.len(), 0);
}

#[test]
fn empty_span_is_valid() {
    let span = Span::empty(7);

    assert!(span.is_valid());
    assert!(span.is_empty());
    assert_eq!(span.range(), Some(7..7));
}

#[test]
#[should_panic(expected = "Span: start 5 must not exceed end 2")]
fn reversed_span_panics() {
    Span::new(5, 2);
}
