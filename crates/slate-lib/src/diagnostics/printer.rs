//! Builder-pattern printer for rendering errors with a source excerpt.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use slate_core::{Error, Source, Span};

/// Renders an error, with the offending source line and a caret under the span
/// when the source is known.
pub struct ErrorPrinter<'e, 's> {
    error: &'e Error,
    source: Option<&'s Source<'s>>,
    colored: bool,
}

impl<'e, 's> ErrorPrinter<'e, 's> {
    pub fn new(error: &'e Error) -> Self {
        Self {
            error,
            source: None,
            colored: false,
        }
    }

    /// Must be the source the error's span was produced from.
    pub fn source(mut self, source: &'s Source<'s>) -> Self {
        self.source = Some(source);
        self
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        let source = match self.source {
            Some(source) if self.error.span.is_valid() => source,
            _ => return w.write_str(&self.error.text),
        };

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        let snippet = Snippet::source(source.text())
            .line_start(1)
            .path(source.name())
            .annotation(AnnotationKind::Primary.span(adjust_range(self.error.span, source.len())));

        let report: Vec<Group> = vec![Level::ERROR.primary_title(&self.error.message).element(snippet)];
        write!(w, "{}", renderer.render(&report))
    }
}

/// Clamps the span to the source and widens empty spans to one char.
fn adjust_range(span: Span, limit: usize) -> Range<usize> {
    let start = span.start().min(limit);
    let end = span.end().min(limit);

    if start == end {
        return start..(start + 1).min(limit);
    }

    start..end
}
