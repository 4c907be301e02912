//! ANSI palette for `slate tokens`, one color per part of a token line.

/// Escape codes for each part of a dumped token. All empty when color is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Token kind name (`Assign`, `RawString`, ...).
    pub kind: &'static str,
    /// Decoded text of string tokens.
    pub text: &'static str,
    /// Byte range of the token.
    pub span: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const ON: Self = Self {
        kind: "\x1b[34m",
        text: "\x1b[32m",
        span: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        kind: "",
        text: "",
        span: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }
}
