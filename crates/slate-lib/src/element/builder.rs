//! Visitors that turn parse events into a [`ConfigElement`] tree.

use indexmap::IndexMap;
use slate_core::{Error, ErrorKind, Source, Span};

use super::{ConfigElement, ConfigElementKind};
use crate::parser::{ConfigString, Visitor};

struct Frame {
    name: String,
    element: ConfigElement,
    /// Whether this parse has given the element any content yet.
    initialized: bool,
}

/// Elements under construction, innermost last, on top of the root table.
struct FrameStack {
    root: Frame,
    open: Vec<Frame>,
}

impl FrameStack {
    fn new(root: ConfigElement) -> Self {
        Self {
            root: Frame {
                name: String::new(),
                element: root,
                initialized: true,
            },
            open: Vec::new(),
        }
    }

    fn top(&mut self) -> &mut Frame {
        self.open.last_mut().unwrap_or(&mut self.root)
    }

    fn top_ref(&self) -> &Frame {
        self.open.last().unwrap_or(&self.root)
    }

    fn push(&mut self, name: String, seed: ConfigElement) {
        self.open.push(Frame {
            name,
            element: seed,
            initialized: false,
        });
    }

    fn pop_into_parent(&mut self) {
        if let Some(frame) = self.open.pop() {
            self.top().element.insert(frame.name, frame.element);
        }
    }

    fn set(&mut self, element: ConfigElement) {
        let frame = self.top();
        frame.element = element;
        frame.initialized = true;
    }

    fn append_string(&mut self, source: &Source<'_>, string: ConfigString<'_>) -> Result<(), Error> {
        let frame = self.top();
        if !frame.initialized {
            let mut value = String::new();
            string.append_to_string(&mut value);
            frame.element = ConfigElement::new(ConfigElementKind::Value(value), string.span);
            frame.initialized = true;
            return Ok(());
        }

        match &mut frame.element.kind {
            ConfigElementKind::Value(value) => string.append_to_string(value),
            ConfigElementKind::Table(_) => {
                return visit_error(string.span, source, "Cannot append a string to a table");
            }
            ConfigElementKind::Array(_) => {
                return visit_error(string.span, source, "Cannot append a string to an array");
            }
        }
        frame.element.span = frame.element.span.combine(string.span);
        Ok(())
    }

    /// Finds `name` in the closest enclosing container that has it.
    ///
    /// The frame being defined under that same name is skipped, so `a = $a ~ x`
    /// refers to the previous `a`.
    fn lookup(&self, name: &str) -> Option<ConfigElement> {
        self.open
            .iter()
            .rev()
            .chain(std::iter::once(&self.root))
            .filter(|frame| frame.initialized && frame.name != name)
            .find_map(|frame| match &frame.element.kind {
                ConfigElementKind::Value(_) => None,
                ConfigElementKind::Table(table) => table.get(name),
                ConfigElementKind::Array(array) => {
                    name.parse::<usize>().ok().and_then(|idx| array.get(idx))
                }
            })
            .cloned()
    }

    fn expand(&mut self, source: &Source<'_>, name: ConfigString<'_>) -> Result<(), Error> {
        let span = name.span;
        let name = name.to_string();
        let Some(found) = self.lookup(&name) else {
            return visit_error(
                span,
                source,
                &format!("Could not find an element named `{name}`"),
            );
        };
        tracing::trace!(name = %name, "expanding reference");

        let frame = self.top();
        if !frame.initialized {
            frame.element = found;
            frame.element.span = span;
            frame.initialized = true;
            return Ok(());
        }

        match (&mut frame.element.kind, found.kind) {
            (ConfigElementKind::Value(lhs), ConfigElementKind::Value(rhs)) => lhs.push_str(&rhs),
            (ConfigElementKind::Value(_), ConfigElementKind::Table(_)) => {
                return visit_error(span, source, "Cannot append a table to a value");
            }
            (ConfigElementKind::Value(_), ConfigElementKind::Array(_)) => {
                return visit_error(span, source, "Cannot append an array to a value");
            }
            (ConfigElementKind::Table(_), _) => {
                return visit_error(span, source, "Cannot append to a table");
            }
            (ConfigElementKind::Array(_), _) => {
                return visit_error(span, source, "Cannot append to an array");
            }
        }
        frame.element.span = frame.element.span.combine(span);
        Ok(())
    }

    fn finish(self) -> ConfigElement {
        self.root.element
    }
}

fn visit_error(span: Span, source: &Source<'_>, msg: &str) -> Result<(), Error> {
    Err(Error::from_span(
        span,
        Some(source),
        ErrorKind::ParseFailure,
        msg,
    ))
}

fn fresh_table(span: Span) -> ConfigElement {
    ConfigElement::new(ConfigElementKind::Table(IndexMap::new()), span)
}

fn fresh_array(span: Span) -> ConfigElement {
    ConfigElement::new(ConfigElementKind::Array(Vec::new()), span)
}

/// Builds a new tree. A repeated key replaces the earlier definition but keeps
/// its position.
pub struct BuildVisitor {
    frames: FrameStack,
}

impl BuildVisitor {
    pub fn new() -> Self {
        Self {
            frames: FrameStack::new(ConfigElement::new_table()),
        }
    }

    /// The root table. Elements still open (after a failed parse) are dropped.
    pub fn finish(self) -> ConfigElement {
        self.frames.finish()
    }
}

impl Default for BuildVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl<'s> Visitor<'s> for BuildVisitor {
    fn start_element(&mut self, _: &Source<'s>, name: ConfigString<'s>) -> Result<(), Error> {
        self.frames
            .push(name.to_string(), ConfigElement::new_value(""));
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), Error> {
        self.frames.pop_into_parent();
        Ok(())
    }

    fn set_table(&mut self, _: &Source<'s>, span: Span) -> Result<(), Error> {
        self.frames.set(fresh_table(span));
        Ok(())
    }

    fn set_array(&mut self, _: &Source<'s>, span: Span) -> Result<(), Error> {
        self.frames.set(fresh_array(span));
        Ok(())
    }

    fn append_string(&mut self, source: &Source<'s>, string: ConfigString<'s>) -> Result<(), Error> {
        self.frames.append_string(source, string)
    }

    fn expand(&mut self, source: &Source<'s>, name: ConfigString<'s>) -> Result<(), Error> {
        self.frames.expand(source, name)
    }
}

/// Updates an existing tree.
///
/// Each element starts from a copy of what the parent already holds under the
/// same key. Tables merge into an existing table; values and arrays replace.
pub struct PatchVisitor {
    frames: FrameStack,
}

impl PatchVisitor {
    pub fn new(root: ConfigElement) -> Self {
        Self {
            frames: FrameStack::new(root),
        }
    }

    /// The patched root, also after a failed parse.
    pub fn finish(self) -> ConfigElement {
        self.frames.finish()
    }
}

impl<'s> Visitor<'s> for PatchVisitor {
    fn start_element(&mut self, _: &Source<'s>, name: ConfigString<'s>) -> Result<(), Error> {
        let name = name.to_string();
        let seed = self
            .frames
            .top_ref()
            .element
            .get(&name)
            .cloned()
            .unwrap_or_else(|| ConfigElement::new_value(""));
        self.frames.push(name, seed);
        Ok(())
    }

    fn end_element(&mut self) -> Result<(), Error> {
        self.frames.pop_into_parent();
        Ok(())
    }

    fn set_table(&mut self, _: &Source<'s>, span: Span) -> Result<(), Error> {
        let frame = self.frames.top();
        if frame.element.is_table() {
            frame.element.span = span;
            frame.initialized = true;
        } else {
            self.frames.set(fresh_table(span));
        }
        Ok(())
    }

    fn set_array(&mut self, _: &Source<'s>, span: Span) -> Result<(), Error> {
        self.frames.set(fresh_array(span));
        Ok(())
    }

    fn append_string(&mut self, source: &Source<'s>, string: ConfigString<'s>) -> Result<(), Error> {
        self.frames.append_string(source, string)
    }

    fn expand(&mut self, source: &Source<'s>, name: ConfigString<'s>) -> Result<(), Error> {
        self.frames.expand(source, name)
    }
}
