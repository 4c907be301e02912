//! Rendering of [`Error`](slate_core::Error)s against the source they point into.

mod printer;

#[cfg(test)]
mod tests;

pub use printer::ErrorPrinter;
